use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const READINGS: &str = r#"[
    {"id": 1, "room_number": "101", "meter_type": "water", "reading_value": 120,
     "previous_reading": 100, "tenant_count": 3, "tenant_names": "Somchai, Suda",
     "student_ids": "6501, 6502", "recorder_name": "Anan",
     "created_at": "2024-05-03T09:00:00+07:00"},
    {"id": 2, "room_number": "101", "meter_type": "water", "reading_value": 140,
     "previous_reading": 120, "tenant_count": 3, "created_at": "2024-06-03T09:00:00+07:00"},
    {"id": 3, "room_number": "202", "meter_type": "electric", "reading_value": 80,
     "previous_reading": 90, "tenant_count": 1, "created_at": "2024-05-12T18:30:00+07:00"}
]"#;

fn dormbill(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dormbill").unwrap();
    cmd.env("DORM_BILLING_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn data_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("data")).unwrap();
    fs::write(temp.path().join("data/readings.json"), READINGS).unwrap();
    temp
}

#[test]
fn init_writes_default_settings() {
    let temp = TempDir::new().unwrap();

    dormbill(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    let settings = fs::read_to_string(temp.path().join("config.json")).unwrap();
    assert!(settings.contains("\"water\": 1700"));
    assert!(temp.path().join("reports").is_dir());
}

#[test]
fn readings_for_period_show_split_and_warning() {
    let temp = data_dir();

    dormbill(temp.path())
        .args(["readings", "--period", "2024-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Readings for 2024-05"))
        .stdout(predicate::str::contains("100 - 120"))
        .stdout(predicate::str::contains("฿114.00 x3"))
        .stdout(predicate::str::contains("Warning: room 202 electric reading 3"))
        .stdout(predicate::str::contains("140 -").not());
}

#[test]
fn readings_search_and_rate_override() {
    let temp = data_dir();

    dormbill(temp.path())
        .args(["readings", "--all", "--search", "somchai", "--water", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("฿400.00"))
        .stdout(predicate::str::contains("202").not());
}

#[test]
fn negative_rate_is_a_notice() {
    let temp = data_dir();

    dormbill(temp.path())
        .args(["readings", "--all", "--electric=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rate cannot be negative"));
}

#[test]
fn export_writes_report() {
    let temp = data_dir();
    let out = temp.path().join("out");

    dormbill(temp.path())
        .args(["export", "--period", "2024-05", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 readings"));

    let report = fs::read_to_string(out.join("report_2024-05.csv")).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines[0],
        "\u{FEFF}Date,Room,Student ID(s),Tenant(s),Type,Meter Reading,Usage,Total Cost"
    );
    assert_eq!(
        lines[1],
        "\"3/5/2567\",\"101\",\"6501, 6502\",\"Somchai, Suda\",\"Water\",\"100 - 120\",20,340.00"
    );
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[2],
        "\"12/5/2567\",\"202\",\"-\",\"-\",\"Electric\",\"90 - 80\",-10,-70.00"
    );

    let audit = fs::read_to_string(temp.path().join("audit.log")).unwrap();
    assert!(audit.contains("\"operation\":\"export\""));
}

#[test]
fn empty_export_fails_without_file() {
    let temp = data_dir();

    dormbill(temp.path())
        .args(["export", "--period", "2023-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readings to export for 2023-01"));

    assert!(!temp.path().join("reports/report_2023-01.csv").exists());
}

#[test]
fn tenant_lifecycle() {
    let temp = TempDir::new().unwrap();

    dormbill(temp.path())
        .args(["tenant", "add", "--room", "101", "--name", "Somchai", "--student-id", "6501"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added tenant: Somchai (room 101"));

    dormbill(temp.path())
        .args(["tenant", "add", "--room", "101", "--name", "somchai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    dormbill(temp.path())
        .args(["tenant", "add", "--room", "", "--name", "Suda"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Room number cannot be empty"));

    let tenants = fs::read_to_string(temp.path().join("data/tenants.json")).unwrap();
    let tenants: serde_json::Value = serde_json::from_str(&tenants).unwrap();
    let id = tenants[0]["id"].as_str().unwrap().to_string();

    dormbill(temp.path())
        .args(["tenant", "list", "--search", "SOM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Somchai"));

    dormbill(temp.path())
        .args(["tenant", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    dormbill(temp.path())
        .args(["tenant", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted tenant: Somchai"));

    dormbill(temp.path())
        .args(["tenant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tenants found."));

    let audit = fs::read_to_string(temp.path().join("audit.log")).unwrap();
    assert_eq!(audit.lines().count(), 2);

    dormbill(temp.path())
        .args(["audit", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE Tenant"))
        .stdout(predicate::str::contains("CREATE").not());
}

#[test]
fn delete_unknown_tenant_fails() {
    let temp = TempDir::new().unwrap();

    dormbill(temp.path())
        .args(["tenant", "delete", "nope", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tenant not found: nope"));
}
