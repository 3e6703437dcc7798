#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clo").unwrap();
    cmd.current_dir(dir.path())
        .env("CLO_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_project(dir: &TempDir) {
    clo(dir).arg("init").assert().success();
}

fn generate_airway(dir: &TempDir) -> assert_cmd::assert::Assert {
    clo(dir)
        .args([
            "generate",
            "--profile",
            "health sciences",
            "--outcome",
            "PLO3",
            "--level",
            "Mechanism",
            "--verb",
            "Perform",
            "--content",
            "basic airway management",
            "--course",
            "NUR101",
            "--weight",
            "20",
        ])
        .assert()
}

fn stdout_json(assert: assert_cmd::assert::Assert) -> serde_json::Value {
    let out = assert.get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ---------------------------------------------------------------------------
// clo init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    clo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .clo/config.yaml"));

    assert!(dir.path().join(".clo/config.yaml").exists());
    assert!(dir.path().join(".clo/reference/outcomes.yaml").exists());
    assert!(dir.path().join(".clo/reference/taxonomy.yaml").exists());
    assert!(dir.path().join(".clo/reference/assessment.yaml").exists());
    assert!(dir.path().join(".clo/reference/goals.json").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    clo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .clo/config.yaml"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    clo(&dir)
        .args(["lookup", "outcomes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// clo generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_sentence_and_saves() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    generate_airway(&dir)
        .success()
        .stdout(predicate::str::starts_with(
            "Perform basic airway management using clinical skills by performing",
        ))
        .stdout(predicate::str::contains("Assessment: Practical test / OSCE station"))
        .stdout(predicate::str::contains("Saved as #1"));

    let history = std::fs::read_to_string(dir.path().join(".clo/history.yaml")).unwrap();
    assert!(history.contains("NUR101"));
}

#[test]
fn generate_json_has_variants_and_rubric() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let out = stdout_json(
        clo(&dir)
            .args([
                "--json",
                "generate",
                "--outcome",
                "plo2",
                "--level",
                "evaluate",
                "--verb",
                "evaluate",
                "--content",
                "treatment options",
                "--style",
                "aligned",
                "--no-save",
            ])
            .assert()
            .success(),
    );
    assert!(out.get("id").is_none());
    assert_eq!(out["criterion"], "independently and with sound judgment");
    assert_eq!(out["variants"].as_array().unwrap().len(), 6);
    assert!(out["sentence"].as_str().unwrap().contains("aligned with"));
    assert!(out["rubric"]["excellent"]
        .as_str()
        .unwrap()
        .starts_with("Consistently demonstrates"));
    assert!(!dir.path().join(".clo/history.yaml").exists());
}

#[test]
fn generate_blank_content_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    clo(&dir)
        .args([
            "generate", "--outcome", "PLO1", "--level", "apply", "--verb", "apply", "--content",
            "  ",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field: content"));
}

#[test]
fn generate_rejects_out_of_range_weight() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    clo(&dir)
        .args([
            "generate", "--outcome", "PLO1", "--level", "apply", "--verb", "apply", "--content",
            "ratios", "--weight", "120",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid weight"));
}

// ---------------------------------------------------------------------------
// clo lookup / goals
// ---------------------------------------------------------------------------

#[test]
fn lookup_levels_and_misses() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    clo(&dir)
        .args(["lookup", "levels", "PLO3", "--profile", "health sciences"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mechanism"));

    let out = stdout_json(
        clo(&dir)
            .args(["--json", "lookup", "levels", "PLO404"])
            .assert()
            .success(),
    );
    assert_eq!(out, serde_json::json!([]));

    let out = stdout_json(
        clo(&dir)
            .args(["--json", "lookup", "meta", "PLO404", "apply"])
            .assert()
            .success(),
    );
    assert_eq!(out, serde_json::json!({}));
}

#[test]
fn goals_cascade() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let out = stdout_json(
        clo(&dir)
            .args(["--json", "goals", "plos", "PEO1"])
            .assert()
            .success(),
    );
    assert_eq!(out, serde_json::json!(["PLO1", "PLO3", "PLO6"]));

    clo(&dir)
        .args(["goals", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IEG1"));
}

// ---------------------------------------------------------------------------
// clo history
// ---------------------------------------------------------------------------

#[test]
fn history_edit_delete_and_reset() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    generate_airway(&dir).success();
    generate_airway(&dir).success();

    clo(&dir)
        .args(["history", "edit", "2", "--course", "NUR102"])
        .assert()
        .success();
    clo(&dir)
        .args(["history", "edit", "2", "--clear-weight"])
        .assert()
        .success();
    clo(&dir)
        .args(["history", "edit", "2", "--weight", "10", "--clear-weight"])
        .assert()
        .failure();
    clo(&dir)
        .args(["history", "edit", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));

    clo(&dir)
        .args(["history", "delete", "1"])
        .assert()
        .success();
    clo(&dir)
        .args(["history", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("history record not found: 1"));

    let rows = stdout_json(clo(&dir).args(["--json", "history", "list"]).assert().success());
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["course"], "NUR102");
    assert_eq!(rows[0]["weight"], serde_json::Value::Null);

    clo(&dir).args(["history", "reset"]).assert().success();
    clo(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved CLOs."));
}

#[test]
fn reset_then_csv_export_is_header_only() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    generate_airway(&dir).success();
    clo(&dir).args(["history", "reset"]).assert().success();

    let out = dir.path().join("out.csv");
    clo(&dir)
        .args(["history", "export", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn export_workbooks() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    generate_airway(&dir).success();

    clo(&dir).args(["history", "export"]).assert().success();
    let bytes = std::fs::read(dir.path().join("clo_history.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));

    clo(&dir)
        .args(["history", "export", "--format", "rubric"])
        .assert()
        .success();
    assert!(dir.path().join("clo_history_rubric.xlsx").exists());
}

// ---------------------------------------------------------------------------
// clo reference
// ---------------------------------------------------------------------------

#[test]
fn reference_validate_and_import() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    clo(&dir)
        .args(["reference", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));

    let csv = dir.path().join("nursing.csv");
    std::fs::write(
        &csv,
        "code,skill_code,skill_description,values_tag,domain\n\
         PLO1,SC1,care planning,compassion,cognitive\n",
    )
    .unwrap();
    clo(&dir)
        .args(["reference", "import", "--profile", "Nursing"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 outcomes"));

    let codes = stdout_json(
        clo(&dir)
            .args(["--json", "lookup", "outcomes", "--profile", "nursing"])
            .assert()
            .success(),
    );
    assert_eq!(codes.as_array().unwrap().len(), 1);
    assert_eq!(codes[0]["skill_description"], "care planning");
}
