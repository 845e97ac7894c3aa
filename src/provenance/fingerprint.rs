//! CU-004: BLAKE3 fingerprint of a binding catalog.
//!
//! A deployment record stores the fingerprint of the catalog that produced it,
//! so `info` can tell when the running build pins different artifacts.

use super::BindingCatalog;

/// Compute a composite hash from multiple components.
pub fn composite_hash(components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for c in components {
        hasher.update(c.as_bytes());
        hasher.update(b"\0");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

/// Fingerprint a catalog (sorted walk, names and values included).
pub fn catalog_fingerprint(catalog: &BindingCatalog) -> String {
    let mut hasher = blake3::Hasher::new();
    for (name, value) in catalog.iter() {
        hasher.update(name.as_bytes());
        hasher.update(b"\0");
        hasher.update(value.as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

/// Fingerprint of a whole build: tool version plus catalog.
pub fn build_fingerprint(tool_version: &str, catalog: &BindingCatalog) -> String {
    composite_hash(&[tool_version, &catalog_fingerprint(catalog)])
}
