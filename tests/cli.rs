use assert_cmd::Command;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ascreen").expect("binary builds");
    cmd.env("HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GOOGLE_API_KEY");
    cmd
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");
    for args in [vec![], vec!["screen"], vec!["batch"]] {
        let mut c = cmd(&home);
        c.args(&args).arg("--help").assert().success();
    }
}

#[test]
fn screen_requires_all_case_fields() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .args(["screen", "--name", "Jane Doe"])
        .assert()
        .failure();
}

#[test]
fn batch_requires_a_file_argument() {
    let home = TempDir::new().expect("temp home");
    cmd(&home).arg("batch").assert().failure();
}

#[test]
fn batch_with_missing_file_fails_with_context() {
    let home = TempDir::new().expect("temp home");
    cmd(&home)
        .args(["batch", "/nonexistent/cases.csv"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot read case file"));
}
