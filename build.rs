//! Embeds the release provenance bindings into the binary.
//!
//! Sources, lowest precedence first:
//! - `CONCOURSE_UP_MANIFEST`: path to a YAML manifest (`version`, `bindings`)
//! - `CONCOURSE_UP_SET`: whitespace-separated `name=value` pairs
//! - `CONCOURSE_UP_VERSION`: the tool version
//!
//! Anything not supplied is embedded as a placeholder and rejected by the
//! provenance gate at startup, so a development build still compiles.

use std::env;
use std::path::{Path, PathBuf};

include!("src/provenance/names.rs");
include!("src/provenance/injection.rs");

const WATCHED_VARS: [&str; 4] = [
    "CONCOURSE_UP_MANIFEST",
    "CONCOURSE_UP_SET",
    "CONCOURSE_UP_VERSION",
    "CONCOURSE_UP_PLACEHOLDER_PREFIX",
];

fn main() {
    for var in WATCHED_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/provenance/names.rs");
    println!("cargo:rerun-if-changed=src/provenance/injection.rs");

    if let Err(e) = run() {
        panic!("cannot embed provenance bindings: {}", e);
    }
}

fn run() -> Result<(), String> {
    let prefix = resolve_prefix(env::var("CONCOURSE_UP_PLACEHOLDER_PREFIX").ok().as_deref());

    let manifest = match env::var_os("CONCOURSE_UP_MANIFEST") {
        Some(path) => {
            let path = PathBuf::from(path);
            println!("cargo:rerun-if-changed={}", path.display());
            load_manifest(&path)?
        }
        None => Manifest::default(),
    };

    let injected = inject(
        manifest,
        env::var("CONCOURSE_UP_SET").ok().as_deref(),
        env::var("CONCOURSE_UP_VERSION").ok(),
        &prefix,
    )?;

    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR not set: {}", e))?;
    let dest = Path::new(&out_dir).join("provenance_bindings.rs");
    std::fs::write(&dest, render(&injected))
        .map_err(|e| format!("cannot write {}: {}", dest.display(), e))
}

fn load_manifest(path: &Path) -> Result<Manifest, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read manifest {}: {}", path.display(), e))?;
    parse_manifest(&content).map_err(|e| format!("{} ({})", e, path.display()))
}
