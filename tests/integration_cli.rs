//! End-to-end runs of the `pv-sim` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pv-sim"))
        .args(args)
        .output()
        .expect("pv-sim process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "pv-sim {args:?} failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

/// Reads the number following `label` on its report line.
fn parse_metric(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .filter(|c| *c != ',')
        .collect();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}

#[test]
fn default_preset_reports_ten_monocristallin_panels() {
    let out = stdout_of(&["--seed", "1"]);
    assert_eq!(parse_metric(&out, "Surface installée"), 18.0);
    assert_eq!(parse_metric(&out, "Puissance installée"), 3.6);
    assert_eq!(parse_metric(&out, "Production estimée"), 6566.0);
    assert_eq!(parse_metric(&out, "Réseau requis"), 2351.0);
    assert_eq!(parse_metric(&out, "Coût estimé"), 4320.0);
    assert!(out.contains("--- Production vs Besoin ---"));
    assert!(out.contains("--- Répartition de l'énergie solaire ---"));
    assert!(!out.contains("ROI"));
}

#[test]
fn residential_preset_includes_roi() {
    let out = stdout_of(&[
        "--preset",
        "residential",
        "--panel-type",
        "Bifacial",
        "--seed",
        "3",
    ]);
    assert_eq!(parse_metric(&out, "ROI"), 512.34);
}

#[test]
fn scenario_file_overrides_site() {
    let out = stdout_of(&["--scenario", "scenarios/north.toml", "--panels", "0"]);
    assert_eq!(parse_metric(&out, "Réseau requis"), 6500.0);
    assert!(out.contains("Simulateur Solaire - Lille"));
}

#[test]
fn unknown_panel_type_fails() {
    let output = run(&["--panel-type", "Tandem"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown panel type"), "stderr: {stderr}");
}

#[test]
fn negative_panel_count_fails() {
    let output = run(&["--panels", "-1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("panel count must be >= 0"), "stderr: {stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
}

#[test]
fn sweep_export_writes_one_row_per_count() {
    let path: PathBuf = std::env::temp_dir().join(format!("pv-sim-sweep-{}.csv", std::process::id()));
    let path_str = path.to_str().expect("temp path should be UTF-8");
    stdout_of(&["--preset", "residential", "--sweep-out", path_str]);

    let content = std::fs::read_to_string(&path).expect("sweep CSV should exist");
    let _ = std::fs::remove_file(&path);
    // header + counts 5..=30
    assert_eq!(content.lines().count(), 27);
    assert!(content.lines().nth(1).is_some_and(|l| l.starts_with("Monocristallin,5,")));
}

#[test]
fn marseille_scenario_defaults_to_bifacial_with_roi() {
    let out = stdout_of(&["--scenario", "scenarios/marseille.toml", "--seed", "5"]);
    assert!(out.contains("Panneau :              12 x Bifacial"));
    assert_eq!(parse_metric(&out, "ROI"), 512.34);
}
