//! CU-013: Deployment engine boundary and the local ledger backend.
//!
//! `Engine` is the seam the command dispatcher drives. Infrastructure
//! orchestration proper lives behind it; `LedgerEngine` keeps the local
//! bookkeeping: which artifact set each named deployment was made from.

use super::types::{DeployOutcome, DeploymentEvent, DeploymentInfo, DestroyOutcome, Settings};
use super::{eventlog, state};
use crate::provenance::{fingerprint, BindingCatalog};

/// Deploy, destroy, and inspect named deployments.
pub trait Engine {
    fn deploy(&self, deployment: &str, settings: &Settings) -> Result<DeployOutcome, String>;
    fn destroy(&self, deployment: &str, settings: &Settings) -> Result<DestroyOutcome, String>;
    fn info(&self, deployment: &str, settings: &Settings) -> Result<DeploymentInfo, String>;
}

/// Yes/no confirmation from the operator.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool, String>;
}

/// Asks on the controlling terminal; defaults to "no".
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool, String> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| format!("cannot read confirmation: {}", e))
    }
}

/// Check a deployment name is usable as a state directory entry.
pub fn validate_deployment_name(name: &str) -> Result<(), String> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "invalid deployment name '{}': use letters, digits, '-' and '_'",
            name
        ));
    }
    Ok(())
}

/// Engine that records deployments of the embedded artifact set.
pub struct LedgerEngine {
    tool_version: String,
    catalog: BindingCatalog,
    prompt: Box<dyn Confirm>,
}

impl LedgerEngine {
    pub fn new(tool_version: impl Into<String>, catalog: BindingCatalog) -> Self {
        Self {
            tool_version: tool_version.into(),
            catalog,
            prompt: Box::new(TerminalConfirm),
        }
    }

    /// Replace the confirmation source.
    pub fn with_prompt(mut self, prompt: Box<dyn Confirm>) -> Self {
        self.prompt = prompt;
        self
    }

    fn missing(deployment: &str) -> String {
        format!("no deployment named '{}'", deployment)
    }
}

impl Engine for LedgerEngine {
    fn deploy(&self, deployment: &str, settings: &Settings) -> Result<DeployOutcome, String> {
        validate_deployment_name(deployment)?;
        let state_dir = settings.state_dir.as_path();
        let lock = state::new_lock(deployment, &self.tool_version, &self.catalog)?;
        let previous = state::load_lock(state_dir, deployment)?;
        tracing::debug!(deployment, bindings = self.catalog.len(), "deploy planned");

        let run_id = eventlog::generate_run_id();
        eventlog::append_event(
            state_dir,
            deployment,
            DeploymentEvent::DeployStarted {
                deployment: deployment.to_string(),
                run_id: run_id.clone(),
                tool_version: self.tool_version.clone(),
            },
        )?;

        let outcome = match previous {
            None => DeployOutcome::Created,
            Some(prev) if prev.build_hash == lock.build_hash => DeployOutcome::Unchanged,
            Some(prev) => {
                tracing::info!(
                    deployment,
                    from = %prev.tool_version,
                    to = %lock.tool_version,
                    "artifact set changed"
                );
                DeployOutcome::Updated
            }
        };

        if outcome != DeployOutcome::Unchanged {
            state::save_lock(state_dir, &lock)?;
        }

        eventlog::append_event(
            state_dir,
            deployment,
            DeploymentEvent::DeployCompleted {
                deployment: deployment.to_string(),
                run_id,
                outcome,
                build_hash: lock.build_hash.clone(),
            },
        )?;

        tracing::debug!(deployment, %outcome, artifacts = lock.artifacts.len(), "deploy finished");
        Ok(outcome)
    }

    fn destroy(&self, deployment: &str, settings: &Settings) -> Result<DestroyOutcome, String> {
        validate_deployment_name(deployment)?;
        let state_dir = settings.state_dir.as_path();

        if state::load_lock(state_dir, deployment)?.is_none() {
            return Err(Self::missing(deployment));
        }

        let run_id = eventlog::generate_run_id();
        let confirmed = settings.non_interactive
            || self
                .prompt
                .confirm(&format!("Destroy deployment '{}'?", deployment))?;

        if !confirmed {
            eventlog::append_event(
                state_dir,
                deployment,
                DeploymentEvent::DestroyAborted {
                    deployment: deployment.to_string(),
                    run_id,
                },
            )?;
            tracing::info!(deployment, "destroy aborted");
            return Ok(DestroyOutcome::Aborted);
        }

        eventlog::append_event(
            state_dir,
            deployment,
            DeploymentEvent::DestroyStarted {
                deployment: deployment.to_string(),
                run_id: run_id.clone(),
            },
        )?;
        state::remove_lock(state_dir, deployment)?;
        eventlog::append_event(
            state_dir,
            deployment,
            DeploymentEvent::DestroyCompleted {
                deployment: deployment.to_string(),
                run_id,
            },
        )?;

        Ok(DestroyOutcome::Destroyed)
    }

    fn info(&self, deployment: &str, settings: &Settings) -> Result<DeploymentInfo, String> {
        validate_deployment_name(deployment)?;
        let lock = state::load_lock(&settings.state_dir, deployment)?
            .ok_or_else(|| Self::missing(deployment))?;

        let current_catalog_hash = fingerprint::catalog_fingerprint(&self.catalog);
        let drifted = lock.catalog_hash != current_catalog_hash;
        if drifted {
            tracing::warn!(deployment, "deployment was made from a different artifact set");
        }

        Ok(DeploymentInfo {
            lock,
            current_catalog_hash,
            drifted,
        })
    }
}
