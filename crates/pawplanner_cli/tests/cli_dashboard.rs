use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("pawplanner-{nanos}-{file_name}"))
}

fn run_with_config(args: &[&str], config: Option<serde_json::Value>) -> Output {
    let exe = env!("CARGO_BIN_EXE_pawplanner");
    let config_path = temp_path("dashboard-config.json");
    if let Some(config) = config {
        std::fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();
    }

    let output = Command::new(exe)
        .args(args)
        .env("PAWPLANNER_PREFS_PATH", temp_path("dashboard-prefs.json"))
        .env("PAWPLANNER_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run pawplanner");
    std::fs::remove_file(&config_path).ok();
    output
}

fn run(args: &[&str]) -> Output {
    run_with_config(args, None)
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout is JSON")
}

#[test]
fn week_json_has_seven_consecutive_days() {
    let output = run(&["week", "--json"]);
    assert!(output.status.success());

    let week = stdout_json(&output);
    let days = week["days"].as_array().expect("days array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], week["week_start"]);
    assert_eq!(days.iter().filter(|day| day["is_today"] == true).count(), 1);
}

#[test]
fn week_paging_moves_by_whole_weeks() {
    let current = stdout_json(&run(&["week", "--date", "2025-11-12", "--json"]));
    let next = stdout_json(&run(&["week", "--date", "2025-11-12", "--offset", "1", "--json"]));
    let previous = stdout_json(&run(&["week", "--date", "2025-11-12", "--offset", "-1", "--json"]));

    assert_eq!(current["week_start"], "2025-11-09");
    assert_eq!(next["week_start"], "2025-11-16");
    assert_eq!(previous["week_start"], "2025-11-02");
    let previous_tasks: usize = previous["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|day| day["tasks"].as_array().unwrap().len())
        .sum();
    assert_eq!(previous_tasks, 0);
}

#[test]
fn week_offset_past_the_calendar_is_rejected() {
    for offset in ["100000000", "-100000000"] {
        let output = run(&["week", "--offset", offset]);

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("ERROR: invalid_input - week offset out of range"));
        assert!(!stderr.contains("panicked"));
    }
}

#[test]
fn monday_week_start_from_config_file() {
    let output = run_with_config(
        &["week"],
        Some(serde_json::json!({ "week_start": "monday" })),
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_day = stdout
        .lines()
        .find(|line| line.contains("Mon ") || line.contains("Sun "))
        .expect("a day row");
    assert!(first_day.contains("Mon "));
}

#[test]
fn invalid_config_file_warns_and_uses_defaults() {
    let exe = env!("CARGO_BIN_EXE_pawplanner");
    let config_path = temp_path("broken-config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let output = Command::new(exe)
        .args(["pets"])
        .env("PAWPLANNER_PREFS_PATH", temp_path("broken-prefs.json"))
        .env("PAWPLANNER_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run pawplanner");
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: config ignored: invalid_data"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Max"));
}

#[test]
fn appointments_list_vet_visit_with_badge() {
    let output = run(&["appointments", "--json"]);
    assert!(output.status.success());

    let appointments = stdout_json(&output);
    let appointments = appointments.as_array().expect("appointments array");
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0]["title"], "Vet Checkup");
    assert_eq!(appointments[0]["badge"], "In 3 days");
    assert!(appointments[1]["badge"].is_null());
}

#[test]
fn stats_reports_progress_for_pet() {
    let output = run(&["stats", "--json"]);
    assert!(output.status.success());

    let stats = stdout_json(&output);
    assert_eq!(stats["pet_name"], "Max");
    assert_eq!(stats["completed"], 2);
    assert_eq!(stats["total"], 5);
    assert_eq!(stats["activities"].as_array().unwrap().len(), 3);
    assert_eq!(stats["activities"][0]["activity"], "Feeding");
}

#[test]
fn add_pet_requires_name() {
    let output = run(&["add-pet", " ", "cat"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - pet name is required"));
}

#[test]
fn add_pet_reports_new_profile() {
    let output = run(&["add-pet", "Luna", "Cat", "--breed", "Siamese", "--age", "3", "--json"]);
    assert!(output.status.success());

    let pet = stdout_json(&output);
    assert_eq!(pet["id"], "pet-2");
    assert_eq!(pet["species"], "cat");
    assert_eq!(pet["breed"], "Siamese");
    assert_eq!(pet["age"], 3);
}

#[test]
fn commands_run_without_a_home_directory() {
    let exe = env!("CARGO_BIN_EXE_pawplanner");
    let output = Command::new(exe)
        .args(["today", "--json"])
        .env_remove("HOME")
        .env_remove("APPDATA")
        .env_remove("PAWPLANNER_PREFS_PATH")
        .env("PAWPLANNER_CONFIG_PATH", temp_path("homeless-config.json"))
        .output()
        .expect("failed to run pawplanner");

    assert!(output.status.success());
    let today = stdout_json(&output);
    assert_eq!(today["total"], 5);
}
