//! Concourse-Up CLI — deploy Concourse CI from a build-pinned artifact set.

use concourse_up::cli;
use concourse_up::provenance::embedded;

fn main() {
    std::process::exit(cli::run(
        std::env::args_os(),
        embedded::TOOL_VERSION,
        embedded::catalog(),
        embedded::PLACEHOLDER_PREFIX,
    ));
}
