//! Bindings injected by `build.rs` for this binary.

use super::{BindingCatalog, Gate, MissingBindingError};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/provenance_bindings.rs"));
}

/// Version string of this build.
pub const TOOL_VERSION: &str = generated::TOOL_VERSION;

/// Placeholder prefix this build was configured with.
pub const PLACEHOLDER_PREFIX: &str = generated::PLACEHOLDER_PREFIX;

/// The catalog embedded in this binary.
pub fn catalog() -> BindingCatalog {
    BindingCatalog::from_pairs(generated::BINDINGS.iter().copied())
}

/// Run the provenance gate over the embedded bindings.
pub fn check() -> Result<(), MissingBindingError> {
    let catalog = catalog();
    Gate::new(TOOL_VERSION, &catalog).validate()
}
