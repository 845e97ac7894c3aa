//! CU-011: Deployment records — load, save (atomic), remove, path derivation.

use super::types::DeploymentLock;
use crate::provenance::{fingerprint, BindingCatalog};
use std::path::{Path, PathBuf};

/// Derive the record path for a deployment within the state directory.
pub fn lock_file_path(state_dir: &Path, deployment: &str) -> PathBuf {
    state_dir.join(deployment).join("deployment.lock.yaml")
}

/// Load a deployment record. Returns None if it doesn't exist.
pub fn load_lock(state_dir: &Path, deployment: &str) -> Result<Option<DeploymentLock>, String> {
    let path = lock_file_path(state_dir, deployment);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let lock: DeploymentLock = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("invalid lock file {}: {}", path.display(), e))?;
    Ok(Some(lock))
}

/// Save a deployment record atomically (write to temp, then rename).
pub fn save_lock(state_dir: &Path, lock: &DeploymentLock) -> Result<(), String> {
    let path = lock_file_path(state_dir, &lock.deployment);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
    }

    let yaml = serde_yaml_ng::to_string(lock).map_err(|e| format!("serialize error: {}", e))?;

    let tmp_path = path.with_extension("yaml.tmp");
    std::fs::write(&tmp_path, &yaml)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, &path).map_err(|e| {
        format!(
            "cannot rename {} → {}: {}",
            tmp_path.display(),
            path.display(),
            e
        )
    })?;

    tracing::debug!(path = %path.display(), "saved deployment record");
    Ok(())
}

/// Remove a deployment record. Returns false if there was none.
pub fn remove_lock(state_dir: &Path, deployment: &str) -> Result<bool, String> {
    let path = lock_file_path(state_dir, deployment);
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path).map_err(|e| format!("cannot remove {}: {}", path.display(), e))?;
    Ok(true)
}

/// Create a record pinning `catalog` for a deployment.
pub fn new_lock(
    deployment: &str,
    tool_version: &str,
    catalog: &BindingCatalog,
) -> Result<DeploymentLock, String> {
    Ok(DeploymentLock {
        schema: "1.0".to_string(),
        deployment: deployment.to_string(),
        generated_at: crate::core::eventlog::now_rfc3339(),
        generator: format!("concourse-up {}", tool_version),
        tool_version: tool_version.to_string(),
        build_hash: fingerprint::build_fingerprint(tool_version, catalog),
        catalog_hash: fingerprint::catalog_fingerprint(catalog),
        artifacts: catalog.artifacts()?,
    })
}
