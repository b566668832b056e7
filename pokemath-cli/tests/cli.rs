use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "pokemath-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&content).expect("json output")
}

#[test]
fn cli_verify_passes_for_shipped_table() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let status = Command::new(exe)
        .args(["verify", "--report", "markdown"])
        .status()
        .expect("run cli");
    assert!(status.success());
}

#[test]
fn cli_level_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let output_path = temp_path("level");
    let status = Command::new(exe)
        .args(["level", "150", "--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let report = read_json(&output_path);
    assert_eq!(report["title"], "Trainer Level");
    assert_eq!(report["data"]["level"], 2);
    assert_eq!(report["data"]["exp_to_next_level"], 250.0);
}

#[test]
fn cli_migrate_reports_converted_regions() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let output_path = temp_path("migrate");
    let status = Command::new(exe)
        .args(["migrate", "2,3,8", "--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let report = read_json(&output_path);
    let converted = &report["data"]["converted_progress"];
    assert_eq!(converted["2"], true);
    assert_eq!(converted["8"], true);
    assert_eq!(report["notes"].as_array().map(Vec::len), Some(3));
}

#[test]
fn cli_stage_honors_flag_document() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let flags_path = temp_path("flags");
    std::fs::write(&flags_path, r#"{"stage_layout": "legacy"}"#).expect("write flags");
    let output_path = temp_path("stage");
    let status = Command::new(exe)
        .args(["stage", "7", "6", "--report", "json", "--flags"])
        .arg(&flags_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let report = read_json(&output_path);
    assert_eq!(report["data"]["resolved_stage"], 6);
    assert_eq!(report["data"]["phase"], "legacy");
}

#[test]
fn cli_rejects_malformed_region_list() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let output = Command::new(exe)
        .args(["migrate", "3,three"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("three"));
}

#[test]
fn cli_console_output_has_banner() {
    let exe = env!("CARGO_BIN_EXE_pokemath");
    let output = Command::new(exe)
        .args(["daily-bonus", "7"])
        .env("NO_COLOR", "1")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pokémon Math Adventure Economy"));
    assert!(stdout.contains("Daily Bonus"));
}
