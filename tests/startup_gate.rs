//! The binary must refuse to run when the build left any binding unset.

use concourse_up::provenance::embedded;
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_concourse-up"))
}

#[test]
fn test_cu030_version_respects_gate() {
    let out = binary().arg("--version").output().unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    match embedded::check() {
        Err(e) => {
            assert_eq!(out.status.code(), Some(1));
            assert_eq!(stderr.trim_end(), e.to_string());
            assert!(stdout.is_empty());
        }
        Ok(()) => {
            assert!(out.status.success());
            assert!(stdout.contains(embedded::TOOL_VERSION));
        }
    }
}

#[test]
fn test_cu030_gate_runs_before_commands() {
    let dir = tempfile::tempdir().unwrap();
    let out = binary()
        .args(["--non-interactive", "--state-dir"])
        .arg(dir.path())
        .args(["deploy", "ci"])
        .output()
        .unwrap();

    match embedded::check() {
        Err(e) => {
            assert_eq!(out.status.code(), Some(1));
            let stderr = String::from_utf8_lossy(&out.stderr);
            assert!(stderr.contains(e.binding_name()));
            assert!(stderr.contains("please build with"));
            // Nothing was deployed
            assert!(!dir.path().join("ci").exists());
        }
        Ok(()) => {
            assert!(out.status.success());
            assert!(dir.path().join("ci").join("deployment.lock.yaml").exists());
        }
    }
}

#[test]
fn test_cu030_unknown_deployment_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = binary()
        .arg("--state-dir")
        .arg(dir.path())
        .args(["info", "ghost"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    if embedded::check().is_ok() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("error: no deployment named 'ghost'"));
    }
}
