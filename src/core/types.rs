//! CU-010: Deployment types — settings, deployment records, and events.
//!
//! Deployment records are YAML lock files; events are JSONL lines. Both derive
//! Serialize/Deserialize for roundtripping.

use crate::provenance::ArtifactIdentity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Settings
// ============================================================================

/// Process-wide options, built once by the entry point and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Never prompt; assume "yes" for confirmations
    pub non_interactive: bool,

    /// Directory holding one subdirectory per deployment
    pub state_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            non_interactive: false,
            state_dir: PathBuf::from("state"),
        }
    }
}

// ============================================================================
// Deployment record
// ============================================================================

/// Pinned artifact set of one deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentLock {
    /// Schema version
    pub schema: String,

    /// Deployment name
    pub deployment: String,

    /// When the record was written
    pub generated_at: String,

    /// Generator (`concourse-up <version>`)
    pub generator: String,

    /// Tool version that wrote the record
    pub tool_version: String,

    /// BLAKE3 of tool version + catalog
    pub build_hash: String,

    /// BLAKE3 of the catalog alone
    pub catalog_hash: String,

    /// Artifacts keyed by `namespace.Artifact`
    pub artifacts: IndexMap<String, ArtifactIdentity>,
}

/// What `deploy` did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployOutcome {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// What `destroy` did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    Destroyed,
    Aborted,
}

/// Recorded deployment as seen by the running build.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentInfo {
    #[serde(flatten)]
    pub lock: DeploymentLock,

    /// Catalog fingerprint of the running build
    pub current_catalog_hash: String,

    /// Running build pins different artifacts than the record
    pub drifted: bool,
}

// ============================================================================
// Events
// ============================================================================

/// Event for the JSONL event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeploymentEvent {
    DeployStarted {
        deployment: String,
        run_id: String,
        tool_version: String,
    },
    DeployCompleted {
        deployment: String,
        run_id: String,
        outcome: DeployOutcome,
        build_hash: String,
    },
    DestroyStarted {
        deployment: String,
        run_id: String,
    },
    DestroyCompleted {
        deployment: String,
        run_id: String,
    },
    DestroyAborted {
        deployment: String,
        run_id: String,
    },
}

/// Timestamped event wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: DeploymentEvent,
}
