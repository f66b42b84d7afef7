//! Runs the chp-inspector binary against a throwaway config

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chp-inspector"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run chp-inspector")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_schedule_json() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let output = run(&config, &["schedule", "2025-01-15", "-f", "json"]);
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[1]["slot"], "FEB");
    assert_eq!(rows[1]["month"], "JAN");
    assert_eq!(rows[1]["date"], "2026-01-10");
}

#[test]
fn test_invalid_anchor_fails() {
    let dir = tempdir().unwrap();
    let output = run(&dir.path().join("config.json"), &["schedule", "15/01/2025"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_new_then_export() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let record = dir.path().join("record.json");
    let out_dir = dir.path().join("out");

    let output = run(
        &config,
        &[
            "new",
            "-o",
            record.to_str().unwrap(),
            "--unit",
            "Tiffany 20",
            "--anchor",
            "2025-01-15",
            "--all-ok",
            "--rate",
            "MAR=10",
            "--seed",
            "3",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(record.exists());

    let output = run(&config, &["deficiencies", record.to_str().unwrap(), "-f", "json"]);
    assert!(output.status.success());
    let deficiencies: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(deficiencies.as_array().unwrap().len(), 4);

    let output = run(
        &config,
        &["export", record.to_str().unwrap(), "-o", out_dir.to_str().unwrap(), "--xlsx"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let pdfs: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".pdf"))
        .collect();
    assert_eq!(pdfs.len(), 1);
    assert!(pdfs[0].starts_with("CHP108A_Tiffany_20_"));

    let bytes = std::fs::read(out_dir.join(&pdfs[0])).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(out_dir.join(pdfs[0].replace(".pdf", ".xlsx")).exists());
}

#[test]
fn test_unknown_unit_fails() {
    let dir = tempdir().unwrap();
    let record = dir.path().join("record.json");
    let output = run(
        &dir.path().join("config.json"),
        &["new", "-o", record.to_str().unwrap(), "--unit", "Bus 404"],
    );
    assert!(!output.status.success());
    assert!(!record.exists());
}

#[test]
fn test_config_set_persists() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let output = run(
        &config,
        &["config", "--set", "form_code=CHP108", "--set", "interactive_fields=false"],
    );
    assert!(output.status.success());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["form_code"], "CHP108");
    assert_eq!(saved["interactive_fields"], false);

    let output = run(&config, &["config", "--set", "nonsense=1"]);
    assert!(!output.status.success());
}

#[test]
fn test_fleet_lists_builtin_vehicles() {
    let dir = tempdir().unwrap();
    let output = run(&dir.path().join("config.json"), &["fleet", "-f", "json"]);
    assert!(output.status.success());
    let fleet: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(fleet.as_array().unwrap().len(), 14);
}
