// Fixed key set of the binding catalog. This file is also `include!`d by
// build.rs, so it must stay free of crate paths and inner attributes.

/// Placeholder prefix used when the build did not override it.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "COMPILE_TIME_VARIABLE";

/// Binding name under which the tool version is reported.
pub const TOOL_VERSION_BINDING: &str = "main.ToolVersion";

/// Every artifact binding the build must inject, sorted by name.
pub const BINDING_NAMES: [&str; 36] = [
    "bosh.ConcourseReleaseSHA1",
    "bosh.ConcourseReleaseURL",
    "bosh.ConcourseReleaseVersion",
    "bosh.ConcourseStemcellSHA1",
    "bosh.ConcourseStemcellURL",
    "bosh.ConcourseStemcellVersion",
    "bosh.DirectorCPIReleaseSHA1",
    "bosh.DirectorCPIReleaseURL",
    "bosh.DirectorCPIReleaseVersion",
    "bosh.DirectorReleaseSHA1",
    "bosh.DirectorReleaseURL",
    "bosh.DirectorReleaseVersion",
    "bosh.DirectorStemcellSHA1",
    "bosh.DirectorStemcellURL",
    "bosh.DirectorStemcellVersion",
    "bosh.GardenReleaseSHA1",
    "bosh.GardenReleaseURL",
    "bosh.GardenReleaseVersion",
    "bosh.GrafanaReleaseSHA1",
    "bosh.GrafanaReleaseURL",
    "bosh.GrafanaReleaseVersion",
    "bosh.InfluxDBReleaseSHA1",
    "bosh.InfluxDBReleaseURL",
    "bosh.InfluxDBReleaseVersion",
    "bosh.RiemannReleaseSHA1",
    "bosh.RiemannReleaseURL",
    "bosh.RiemannReleaseVersion",
    "director.DarwinBinaryURL",
    "director.LinuxBinaryURL",
    "director.WindowsBinaryURL",
    "fly.DarwinBinaryURL",
    "fly.LinuxBinaryURL",
    "fly.WindowsBinaryURL",
    "terraform.DarwinBinaryURL",
    "terraform.LinuxBinaryURL",
    "terraform.WindowsBinaryURL",
];
