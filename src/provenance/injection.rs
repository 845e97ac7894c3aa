// Build-time injection rules. This file is `include!`d by build.rs and by the
// crate's tests; it expects `BINDING_NAMES`, `TOOL_VERSION_BINDING` and
// `DEFAULT_PLACEHOLDER_PREFIX` in scope and must stay free of crate paths.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Provenance manifest read from `CONCOURSE_UP_MANIFEST`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// Fully resolved values to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub tool_version: String,
    pub placeholder_prefix: String,
    /// One entry per known binding, in `BINDING_NAMES` order
    pub bindings: Vec<(String, String)>,
}

/// Parse a manifest document.
pub fn parse_manifest(content: &str) -> Result<Manifest, String> {
    serde_yaml_ng::from_str(content).map_err(|e| format!("invalid manifest: {}", e))
}

/// Parse whitespace-separated `name=value` pairs.
pub fn parse_overrides(set: &str) -> Result<Vec<(String, String)>, String> {
    set.split_whitespace()
        .map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| format!("CONCOURSE_UP_SET entry '{}' is not name=value", pair))
        })
        .collect()
}

/// Placeholder embedded for a binding nobody supplied.
pub fn placeholder_for(prefix: &str, name: &str) -> String {
    format!("{}_{}", prefix, name.replace('.', "_"))
}

/// An unset or empty override falls back to the default prefix.
pub fn resolve_prefix(raw: Option<&str>) -> String {
    match raw {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => DEFAULT_PLACEHOLDER_PREFIX.to_string(),
    }
}

/// Merge manifest, overrides and version; overrides win over the manifest.
pub fn inject(
    mut manifest: Manifest,
    overrides: Option<&str>,
    version: Option<String>,
    prefix: &str,
) -> Result<Injected, String> {
    if let Some(set) = overrides {
        manifest.bindings.extend(parse_overrides(set)?);
    }
    if version.is_some() {
        manifest.version = version;
    }

    if let Some(unknown) = manifest
        .bindings
        .keys()
        .find(|name| !BINDING_NAMES.contains(&name.as_str()))
    {
        return Err(format!("unknown binding '{}'", unknown));
    }

    let bindings = BINDING_NAMES
        .iter()
        .map(|name| {
            let value = manifest
                .bindings
                .get(*name)
                .cloned()
                .unwrap_or_else(|| placeholder_for(prefix, name));
            (name.to_string(), value)
        })
        .collect();

    Ok(Injected {
        tool_version: manifest
            .version
            .unwrap_or_else(|| placeholder_for(prefix, TOOL_VERSION_BINDING)),
        placeholder_prefix: prefix.to_string(),
        bindings,
    })
}

/// Rust source for `$OUT_DIR/provenance_bindings.rs`.
pub fn render(injected: &Injected) -> String {
    let mut out = String::from("// @generated by build.rs\n\n");
    out.push_str(&format!(
        "pub const TOOL_VERSION: &str = {:?};\n",
        injected.tool_version
    ));
    out.push_str(&format!(
        "pub const PLACEHOLDER_PREFIX: &str = {:?};\n\n",
        injected.placeholder_prefix
    ));
    out.push_str("pub const BINDINGS: &[(&str, &str)] = &[\n");
    for (name, value) in &injected.bindings {
        out.push_str(&format!("    ({:?}, {:?}),\n", name, value));
    }
    out.push_str("];\n");
    out
}
