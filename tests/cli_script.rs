use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget_view_cli").unwrap();
    cmd.env("BUDGET_VIEW_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_accumulates_across_lines() {
    let home = TempDir::new().unwrap();
    let input = "spend 2025-11-03 50\n\
                 plot budget=1000 spending=30 date=2025-11-05 view=week\n\
                 exit\n";

    cli(&home)
        .env("BUDGET_VIEW_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Weekly Budget View (Budget = 1000)"))
        .stdout(contains("$920.00"))
        .stdout(contains("$950.00"));
}

#[test]
fn one_shot_plot_prints_month_view() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["plot", "budget=500", "spending=600", "date=2025-11-05"])
        .assert()
        .success()
        .stdout(contains("Monthly Budget View (Budget = 500)"))
        .stdout(contains("2025-11-30"));
}

#[test]
fn one_shot_missing_parameter_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["plot", "budget=500", "date=2025-11-05"])
        .assert()
        .failure()
        .stderr(contains("missing required parameter `spending`"));
}

#[test]
fn json_output_lists_points() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args([
            "json",
            "budget=100",
            "spending=10",
            "date=2025-12-15",
            "view=week",
        ])
        .assert()
        .success()
        .stdout(contains("\"RemainingBudget\""))
        .stdout(contains("\"2025-12-21\""));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["plto"])
        .assert()
        .failure()
        .stdout(contains("Suggestion: `plot`?"));
}
