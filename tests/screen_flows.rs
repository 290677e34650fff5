use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestEnv {
    _tmp: TempDir,
    home: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(home.join(".config/ascreen")).expect("create isolated home");
        // Zero delays so batch runs do not sleep between cases.
        fs::write(
            home.join(".config/ascreen/config.toml"),
            "intercall_delay_ms = 0\ncase_delay_ms = 0\n",
        )
        .expect("write config");
        Self { _tmp: tmp, home }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ascreen").expect("binary builds");
        cmd.env("HOME", &self.home)
            .env_remove("GEMINI_API_KEY")
            .env_remove("GOOGLE_API_KEY");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    fn audit_lines(&self) -> Vec<String> {
        let raw = fs::read_to_string(self.home.join(".config/ascreen/audit.jsonl"))
            .expect("audit log written");
        raw.lines().map(str::to_string).collect()
    }
}

#[test]
fn absent_name_is_non_match_with_zero_oracle_usage() {
    let env = TestEnv::new();
    let v = env.run_json(&[
        "screen",
        "--name",
        "Jane Doe",
        "--dob",
        "01/01/1980",
        "--article",
        "The committee approved the new budget on Tuesday.",
    ]);

    assert_eq!(v["ok"], true);
    let data = &v["data"];
    assert_eq!(data["match_decision"], "Non-Match");
    assert_eq!(data["sentiment"], "N/A");
    assert_eq!(data["name_is_present"], false);
    assert_eq!(data["oracle_usage"].as_array().expect("array").len(), 0);
}

#[test]
fn text_output_shows_decision() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "screen",
            "--name",
            "Jane Doe",
            "--dob",
            "01/01/1980",
            "--article",
            "An unrelated municipal notice.",
        ])
        .assert()
        .success()
        .stdout(contains("decision: Non-Match"))
        .stdout(contains("sentiment: N/A"));
}

#[test]
fn present_name_without_credentials_walks_the_default_chain() {
    // Exact local match skips the name oracle; the remaining three nodes
    // each fail on the missing API key and apply their own default.
    let env = TestEnv::new();
    let v = env.run_json(&[
        "screen",
        "--name",
        "Jane Doe",
        "--dob",
        "01/01/1980",
        "--article",
        "Jane Doe, 45, was honored for her charity work.",
    ]);

    let data = &v["data"];
    assert_eq!(data["name_is_present"], true);
    assert_eq!(data["age_matches"], true);
    assert_eq!(data["match_decision"], "Review Required");
    assert_eq!(data["sentiment"], "Neutral");
    // Failed calls consume no tokens.
    assert_eq!(data["oracle_usage"].as_array().expect("array").len(), 0);
    assert!(data["match_explanation"]
        .as_str()
        .expect("string")
        .contains("API key"));
}

#[test]
fn batch_runs_every_row_and_audits_each_case() {
    let env = TestEnv::new();
    let csv = env.home.join("cases.csv");
    fs::write(
        &csv,
        "name,dob,url,text\n\
Jane Doe,01/01/1980,,The budget meeting covered roads.\n\
John Smith,02/02/1975,https://unused.example/x,A gardening column about tulips.\n",
    )
    .expect("write csv");

    let v = env.run_json(&["batch", csv.to_str().expect("utf8 path")]);
    let rows = v["data"].as_array().expect("array");
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["match_decision"], "Non-Match");
        assert_eq!(row["sentiment"], "N/A");
    }

    let audit = env.audit_lines();
    assert_eq!(audit.len(), 2);
    let first: Value = serde_json::from_str(&audit[0]).expect("audit line is json");
    assert_eq!(first["subject_name"], "Jane Doe");
    assert_eq!(first["match_decision"], "Non-Match");
    assert_eq!(first["oracle_units"], 0);
}

#[test]
fn batch_text_rows_print_tabular_summary() {
    let env = TestEnv::new();
    let csv = env.home.join("cases.csv");
    fs::write(
        &csv,
        "name,dob,url,text\nJane Doe,01/01/1980,,Nothing relevant here.\n",
    )
    .expect("write csv");

    env.cmd()
        .args(["batch", csv.to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(contains("Jane Doe\tNon-Match\tN/A"));
}

#[test]
fn batch_with_only_invalid_rows_fails() {
    let env = TestEnv::new();
    let csv = env.home.join("cases.csv");
    fs::write(&csv, "name,dob,url\n,01/01/1980,https://example.com/a\n").expect("write csv");

    env.cmd()
        .args(["batch", csv.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(contains("no valid cases"));
}
