//! CU-002: Binding catalog — named artifact identity bindings.
//!
//! A binding name is `<namespace>.<Artifact><Field>`, e.g.
//! `bosh.ConcourseReleaseSHA1` or `fly.LinuxBinaryURL`. The catalog is
//! assembled once and only read afterwards; iteration is always sorted by name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which part of an artifact's identity a binding pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactField {
    Url,
    Sha1,
    Version,
}

impl ArtifactField {
    const ALL: [ArtifactField; 3] = [Self::Sha1, Self::Url, Self::Version];

    fn suffix(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Sha1 => "SHA1",
            Self::Version => "Version",
        }
    }
}

impl fmt::Display for ArtifactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// A parsed binding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingName {
    /// Artifact family (`bosh`, `director`, `fly`, `terraform`)
    pub namespace: String,

    /// Artifact within the family (`ConcourseRelease`, `LinuxBinary`)
    pub artifact: String,

    /// Identity field
    pub field: ArtifactField,
}

impl BindingName {
    /// Parse `namespace.ArtifactField`.
    pub fn parse(name: &str) -> Result<Self, String> {
        let (namespace, rest) = name
            .split_once('.')
            .ok_or_else(|| format!("binding '{}' has no namespace", name))?;

        if namespace.is_empty()
            || !namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(format!("binding '{}' has an invalid namespace", name));
        }

        for field in ArtifactField::ALL {
            if let Some(artifact) = rest.strip_suffix(field.suffix()) {
                if artifact.is_empty() || !artifact.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(format!("binding '{}' has an invalid artifact name", name));
                }
                return Ok(Self {
                    namespace: namespace.to_string(),
                    artifact: artifact.to_string(),
                    field,
                });
            }
        }

        Err(format!(
            "binding '{}' does not end in URL, SHA1 or Version",
            name
        ))
    }

    /// `namespace.Artifact`, the key shared by all fields of one artifact.
    pub fn artifact_key(&self) -> String {
        format!("{}.{}", self.namespace, self.artifact)
    }
}

impl fmt::Display for BindingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.namespace, self.artifact, self.field)
    }
}

/// Identity of one externally-sourced artifact.
///
/// Companion binaries only carry a URL; releases and stemcells carry all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}

impl ArtifactIdentity {
    fn set(&mut self, field: ArtifactField, value: &str) {
        let slot = match field {
            ArtifactField::Url => &mut self.url,
            ArtifactField::Sha1 => &mut self.sha1,
            ArtifactField::Version => &mut self.version,
        };
        *slot = Some(value.to_string());
    }
}

/// Mapping from binding name to injected value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingCatalog {
    bindings: BTreeMap<String, String>,
}

impl BindingCatalog {
    /// Build a catalog from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            bindings: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Group bindings by artifact (`namespace.Artifact`), sorted by key.
    pub fn artifacts(&self) -> Result<IndexMap<String, ArtifactIdentity>, String> {
        let mut artifacts: IndexMap<String, ArtifactIdentity> = IndexMap::new();
        for (name, value) in self.iter() {
            let parsed = BindingName::parse(name)?;
            artifacts
                .entry(parsed.artifact_key())
                .or_default()
                .set(parsed.field, value);
        }
        artifacts.sort_keys();
        Ok(artifacts)
    }
}
