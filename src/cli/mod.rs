//! CU-020: CLI — deploy, destroy, info.

use crate::core::engine::{Engine, LedgerEngine};
use crate::core::types::{DeployOutcome, DeploymentInfo, DestroyOutcome, Settings};
use crate::provenance::embedded::TOOL_VERSION;
use crate::provenance::{BindingCatalog, Gate};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP_FOOTER: &str = "See 'concourse-up help <command>' to read about a specific command.

Built by EngineerBetter http://engineerbetter.com";

#[derive(Parser, Debug)]
#[command(
    name = "concourse-up",
    version = TOOL_VERSION,
    about = "A CLI tool to deploy Concourse CI",
    after_help = HELP_FOOTER
)]
pub struct Cli {
    /// Non interactive
    #[arg(short = 'n', long, env = "NON_INTERACTIVE", global = true)]
    pub non_interactive: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// State directory
    #[arg(
        long,
        env = "CONCOURSE_UP_STATE_DIR",
        default_value = "state",
        global = true
    )]
    pub state_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options threaded through every command.
    pub fn settings(&self) -> Settings {
        Settings {
            non_interactive: self.non_interactive,
            state_dir: self.state_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploys or updates a Concourse
    Deploy {
        /// Deployment name
        name: String,
    },

    /// Destroys a Concourse
    Destroy {
        /// Deployment name
        name: String,
    },

    /// Fetches information on a deployed environment
    Info {
        /// Deployment name
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `--verbose`.
/// A subscriber that is already installed is left in place.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

/// Run the tool over `args` and return the process exit status.
///
/// The provenance gate runs before the arguments are even parsed, so an
/// incomplete build refuses `--help` and `--version` too.
pub fn run<I, T>(
    args: I,
    tool_version: &str,
    catalog: BindingCatalog,
    placeholder_prefix: &str,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    if let Err(e) = Gate::new(tool_version, &catalog)
        .with_placeholder(placeholder_prefix)
        .validate()
    {
        eprintln!("{}", e);
        return 1;
    }

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 1 } else { 0 };
        }
    };
    init_tracing(cli.verbose);

    let settings = cli.settings();
    tracing::debug!(
        version = tool_version,
        bindings = catalog.len(),
        state_dir = %settings.state_dir.display(),
        "provenance verified"
    );

    let engine = LedgerEngine::new(tool_version, catalog);
    match dispatch(cli.command, &settings, &engine) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, settings: &Settings, engine: &dyn Engine) -> Result<(), String> {
    match cmd {
        Commands::Deploy { name } => cmd_deploy(engine, settings, &name),
        Commands::Destroy { name } => cmd_destroy(engine, settings, &name),
        Commands::Info { name, json } => cmd_info(engine, settings, &name, json),
    }
}

fn cmd_deploy(engine: &dyn Engine, settings: &Settings, name: &str) -> Result<(), String> {
    let outcome = engine.deploy(name, settings)?;
    match outcome {
        DeployOutcome::Created => println!("Deployment '{}' created.", name),
        DeployOutcome::Updated => println!("Deployment '{}' updated to this build.", name),
        DeployOutcome::Unchanged => println!("Deployment '{}' already matches this build.", name),
    }
    Ok(())
}

fn cmd_destroy(engine: &dyn Engine, settings: &Settings, name: &str) -> Result<(), String> {
    match engine.destroy(name, settings)? {
        DestroyOutcome::Destroyed => println!("Deployment '{}' destroyed.", name),
        DestroyOutcome::Aborted => println!("Aborted."),
    }
    Ok(())
}

fn cmd_info(engine: &dyn Engine, settings: &Settings, name: &str, json: bool) -> Result<(), String> {
    let info = engine.info(name, settings)?;
    if json {
        let out = serde_json::to_string_pretty(&info)
            .map_err(|e| format!("JSON serialize error: {}", e))?;
        println!("{}", out);
    } else {
        print_info(&info);
    }
    Ok(())
}

/// Display a deployment record to stdout.
fn print_info(info: &DeploymentInfo) {
    let lock = &info.lock;
    println!("Deployment: {}", lock.deployment);
    println!("  Generated: {}", lock.generated_at);
    println!("  Generator: {}", lock.generator);
    println!("  Artifacts: {}", lock.artifacts.len());

    for (key, artifact) in &lock.artifacts {
        match &artifact.version {
            Some(v) => println!("    {}: {}", key, v),
            None => println!("    {}", key),
        }
        if let Some(url) = &artifact.url {
            println!("      url:  {}", url);
        }
        if let Some(sha1) = &artifact.sha1 {
            println!("      sha1: {}", sha1);
        }
    }

    println!();
    if info.drifted {
        println!("Provenance: DRIFTED");
        println!("  Recorded:   {}", lock.catalog_hash);
        println!("  This build: {}", info.current_catalog_hash);
    } else {
        println!("Provenance: matches this build ({})", lock.catalog_hash);
    }
}
