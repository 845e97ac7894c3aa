//! CU-001: Provenance gate — refuse to run a binary with unset build bindings.
//!
//! Every release, stemcell and companion binary this tool orchestrates is
//! pinned at build time (see `build.rs`). A binding that is empty, or still
//! carries the reserved placeholder prefix, means the binary came from an
//! incomplete build. The gate reports the first such binding, checking the
//! tool version before the catalog and the catalog in name order.

pub mod catalog;
pub mod embedded;
pub mod fingerprint;

/// Fixed key set of the binding catalog, shared with `build.rs`.
pub mod names {
    include!("names.rs");
}


pub use catalog::{ArtifactField, ArtifactIdentity, BindingCatalog, BindingName};
pub use names::DEFAULT_PLACEHOLDER_PREFIX;

/// Remediation for an unset tool version.
pub const TOOL_VERSION_FLAG: &str = "CONCOURSE_UP_VERSION=0.0.0 cargo build";

/// Build flag that supplies a single catalog binding.
pub fn binding_flag(name: &str) -> String {
    format!("CONCOURSE_UP_SET=\"{}=SOME_VALUE\" cargo build", name)
}

/// A build binding that was never injected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingBindingError {
    #[error("Compile-time variable {binding} not set, please build with: `{flag}`")]
    ToolVersion { binding: String, flag: String },

    #[error("Compile-time variable {binding} not set, please build with: `{flag}`")]
    Binding { binding: String, flag: String },
}

impl MissingBindingError {
    fn tool_version() -> Self {
        Self::ToolVersion {
            binding: names::TOOL_VERSION_BINDING.to_string(),
            flag: TOOL_VERSION_FLAG.to_string(),
        }
    }

    fn binding(name: &str) -> Self {
        Self::Binding {
            binding: name.to_string(),
            flag: binding_flag(name),
        }
    }

    /// Name of the offending binding.
    pub fn binding_name(&self) -> &str {
        match self {
            Self::ToolVersion { binding, .. } | Self::Binding { binding, .. } => binding,
        }
    }
}

/// True if `value` was never injected. An empty prefix only rejects empty values.
pub fn is_unset(value: &str, placeholder_prefix: &str) -> bool {
    value.is_empty() || (!placeholder_prefix.is_empty() && value.starts_with(placeholder_prefix))
}

/// Validation over a tool version and a binding catalog.
#[derive(Debug, Clone, Copy)]
pub struct Gate<'a> {
    tool_version: &'a str,
    catalog: &'a BindingCatalog,
    placeholder_prefix: &'a str,
}

impl<'a> Gate<'a> {
    /// Gate using the placeholder prefix this binary was built with.
    pub fn new(tool_version: &'a str, catalog: &'a BindingCatalog) -> Self {
        Self {
            tool_version,
            catalog,
            placeholder_prefix: embedded::PLACEHOLDER_PREFIX,
        }
    }

    /// Use a different reserved placeholder prefix.
    pub fn with_placeholder(mut self, prefix: &'a str) -> Self {
        self.placeholder_prefix = prefix;
        self
    }

    /// Fail on the first unset binding.
    pub fn validate(&self) -> Result<(), MissingBindingError> {
        if is_unset(self.tool_version, self.placeholder_prefix) {
            return Err(MissingBindingError::tool_version());
        }

        match self
            .catalog
            .iter()
            .find(|(_, value)| is_unset(value, self.placeholder_prefix))
        {
            Some((name, _)) => Err(MissingBindingError::binding(name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gate<'a>(version: &'a str, catalog: &'a BindingCatalog) -> Gate<'a> {
        Gate::new(version, catalog).with_placeholder(DEFAULT_PLACEHOLDER_PREFIX)
    }

    fn full_catalog() -> BindingCatalog {
        BindingCatalog::from_pairs(
            names::BINDING_NAMES
                .iter()
                .map(|name| (*name, format!("value-of-{}", name))),
        )
    }

    fn with_value(name: &str, value: &str) -> BindingCatalog {
        BindingCatalog::from_pairs(names::BINDING_NAMES.iter().map(|n| {
            if *n == name {
                (*n, value.to_string())
            } else {
                (*n, format!("value-of-{}", n))
            }
        }))
    }

    #[test]
    fn test_cu001_fully_populated_passes() {
        let catalog = full_catalog();
        assert_eq!(gate("2.3.1", &catalog).validate(), Ok(()));
    }

    #[test]
    fn test_cu001_empty_catalog_passes() {
        let catalog = BindingCatalog::default();
        assert!(gate("2.3.1", &catalog).validate().is_ok());
    }

    #[test]
    fn test_cu001_empty_binding_named() {
        let catalog =
            BindingCatalog::from_pairs([("release.URL", ""), ("release.Version", "1.0")]);
        let err = gate("2.3.1", &catalog).validate().unwrap_err();
        assert_eq!(err.binding_name(), "release.URL");
        assert!(matches!(err, MissingBindingError::Binding { .. }));
    }

    #[test]
    fn test_cu001_placeholder_binding_named() {
        let catalog = with_value(
            "fly.WindowsBinaryURL",
            "COMPILE_TIME_VARIABLE_fly_WindowsBinaryURL",
        );
        let err = gate("2.3.1", &catalog).validate().unwrap_err();
        assert_eq!(err.binding_name(), "fly.WindowsBinaryURL");
    }

    #[test]
    fn test_cu001_tool_version_placeholder() {
        let catalog = full_catalog();
        let err = gate("COMPILE_TIME_VARIABLE_x", &catalog)
            .validate()
            .unwrap_err();
        assert_eq!(err.binding_name(), "main.ToolVersion");
        assert!(err.to_string().contains("CONCOURSE_UP_VERSION=0.0.0"));
    }

    #[test]
    fn test_cu001_new_uses_embedded_prefix() {
        let catalog = full_catalog();
        let placeholder = format!("{}_main_ToolVersion", embedded::PLACEHOLDER_PREFIX);
        let err = Gate::new(&placeholder, &catalog).validate().unwrap_err();
        assert_eq!(err.binding_name(), "main.ToolVersion");

        let catalog = with_value(
            "bosh.GardenReleaseURL",
            &format!("{}_bosh_GardenReleaseURL", embedded::PLACEHOLDER_PREFIX),
        );
        let err = Gate::new("1.0.0", &catalog).validate().unwrap_err();
        assert_eq!(err.binding_name(), "bosh.GardenReleaseURL");
    }

    #[test]
    fn test_cu001_tool_version_checked_before_catalog() {
        let catalog = BindingCatalog::from_pairs([("bosh.GardenReleaseURL", "")]);
        let err = gate("", &catalog).validate().unwrap_err();
        assert!(matches!(err, MissingBindingError::ToolVersion { .. }));
    }

    #[test]
    fn test_cu001_first_missing_in_name_order() {
        let catalog = BindingCatalog::from_pairs([
            ("terraform.LinuxBinaryURL", ""),
            ("bosh.RiemannReleaseSHA1", ""),
            ("director.LinuxBinaryURL", ""),
        ]);
        for _ in 0..5 {
            let err = gate("1.0.0", &catalog).validate().unwrap_err();
            assert_eq!(err.binding_name(), "bosh.RiemannReleaseSHA1");
        }
    }

    #[test]
    fn test_cu001_diagnostic_names_flag() {
        let catalog = with_value("bosh.ConcourseReleaseURL", "");
        let err = gate("1.0.0", &catalog).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Compile-time variable bosh.ConcourseReleaseURL not set, please build with: \
             `CONCOURSE_UP_SET=\"bosh.ConcourseReleaseURL=SOME_VALUE\" cargo build`"
        );
        assert_eq!(
            err,
            MissingBindingError::Binding {
                binding: "bosh.ConcourseReleaseURL".to_string(),
                flag: binding_flag("bosh.ConcourseReleaseURL"),
            }
        );
    }

    #[test]
    fn test_cu001_diagnostic_is_single_line() {
        let catalog = full_catalog();
        let err = gate("", &catalog).validate().unwrap_err();
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_cu001_custom_placeholder_prefix() {
        let catalog = with_value("fly.LinuxBinaryURL", "UNSET_fly");
        let gate = Gate::new("1.0.0", &catalog).with_placeholder("UNSET");
        assert_eq!(gate.validate().unwrap_err().binding_name(), "fly.LinuxBinaryURL");

        // Under a custom prefix the default token is ordinary data.
        let catalog = with_value("fly.LinuxBinaryURL", "COMPILE_TIME_VARIABLE_fly");
        let gate = Gate::new("1.0.0", &catalog).with_placeholder("UNSET");
        assert!(gate.validate().is_ok());
    }

    #[test]
    fn test_cu001_empty_prefix_only_rejects_empty_values() {
        let catalog = full_catalog();
        assert!(Gate::new("1.0.0", &catalog)
            .with_placeholder("")
            .validate()
            .is_ok());

        let catalog = with_value("director.LinuxBinaryURL", "");
        let err = Gate::new("1.0.0", &catalog)
            .with_placeholder("")
            .validate()
            .unwrap_err();
        assert_eq!(err.binding_name(), "director.LinuxBinaryURL");
    }

    #[test]
    fn test_cu001_prefix_must_lead() {
        // Placeholder text in the middle of a value is not a placeholder.
        let catalog = with_value("bosh.GardenReleaseVersion", "1.0-COMPILE_TIME_VARIABLE");
        assert!(gate("1.0.0", &catalog).validate().is_ok());
    }

    #[test]
    fn test_cu001_is_unset() {
        assert!(is_unset("", DEFAULT_PLACEHOLDER_PREFIX));
        assert!(is_unset("COMPILE_TIME_VARIABLE", DEFAULT_PLACEHOLDER_PREFIX));
        assert!(is_unset("COMPILE_TIME_VARIABLE_main_x", DEFAULT_PLACEHOLDER_PREFIX));
        assert!(!is_unset("0.0.0", DEFAULT_PLACEHOLDER_PREFIX));
        assert!(!is_unset(" ", DEFAULT_PLACEHOLDER_PREFIX));
        assert!(is_unset("", ""));
        assert!(!is_unset("0.0.0", ""));
    }

    proptest! {
        #[test]
        fn prop_cu001_populated_always_passes(
            version in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
            values in proptest::collection::vec("[a-z0-9:/._-]{1,40}", 36),
        ) {
            let catalog = BindingCatalog::from_pairs(
                names::BINDING_NAMES.iter().copied().zip(values),
            );
            prop_assert!(gate(&version, &catalog).validate().is_ok());
        }

        #[test]
        fn prop_cu001_single_empty_binding_is_reported(idx in 0usize..36) {
            let name = names::BINDING_NAMES[idx];
            let catalog = with_value(name, "");
            let gate = gate("1.0.0", &catalog);
            let first = gate.validate();
            let err = first.clone().unwrap_err();
            prop_assert_eq!(err.binding_name(), name);
            prop_assert_eq!(gate.validate(), first);
        }
    }
}
