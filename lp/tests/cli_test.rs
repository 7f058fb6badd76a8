//! End-to-end tests for the `lp` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `lp` isolated from the user's config, logs and API key
fn lp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lp").unwrap();
    cmd.current_dir(home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn test_compose_quiz() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args([
            "compose",
            "--grade",
            "7",
            "--topic",
            "The Economy",
            "--type",
            "Quiz",
            "--scaffolding",
            "High Support",
            "--blooms",
            "Remember",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Create a comprehensive quiz for Grade 7 EMS on the topic of The Economy.",
        ))
        .stdout(predicate::str::contains("South African Context").not());
}

#[test]
fn test_compose_with_local_context_and_score() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args([
            "compose",
            "-g",
            "9",
            "-t",
            "financial literacy",
            "--type",
            "worksheet",
            "-s",
            "moderate-guidance",
            "-b",
            "apply",
            "--local-context",
            "--score",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("on the topic of Financial Literacy."))
        .stdout(predicate::str::contains("South African Context:"))
        .stdout(predicate::str::contains("4/5 points"));
}

#[test]
fn test_compose_reports_invalid_parameters() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args(["compose", "--grade", "7", "--topic", "Labour", "--type", "Essay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--topic: Topic 'Labour' is not part of the Grade 7 curriculum",
        ))
        .stderr(predicate::str::contains("--type: Unknown learning object type 'Essay'"))
        .stderr(predicate::str::contains("--scaffolding: Please select a scaffolding level"));
}

#[test]
fn test_score_offline() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args([
            "score",
            "--offline",
            "This lesson plan targets Grade 7 CAPS learning objective, using the Remember level with high \
             support and local examples from Cape Town.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("4/5 points"))
        .stdout(predicate::str::contains("(keyword fallback)"));
}

#[test]
fn test_score_json_from_stdin_without_key_falls_back() {
    let home = TempDir::new().unwrap();
    let output = lp(&home)
        .args(["score", "--json"])
        .write_stdin("")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["totalScore"], 0);
    assert_eq!(json["color"], "red");
    assert_eq!(json["meetsMinimum"], false);
    assert_eq!(json["isFallback"], true);
}

#[test]
fn test_score_from_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("lesson.txt");
    std::fs::write(&path, "Grade 8 learners apply budgeting with teacher guidance").unwrap();

    lp(&home)
        .args(["score", "--offline", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3/5 points"));
}

#[test]
fn test_catalog_json() {
    let home = TempDir::new().unwrap();
    let output = lp(&home).args(["catalog", "--json"]).assert().success().get_output().stdout.clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["grades"][2]["grade"], 9);
    assert_eq!(json["grades"][2]["topics"][3], "Entrepreneurship");
    assert_eq!(json["bloomsLevels"][5], "Create");
}

#[test]
fn test_check_without_key() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OPENAI_API_KEY is not set"))
        .stdout(predicate::str::contains("model:       gpt-4"));
}

#[test]
fn test_generate_without_key_fails() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args([
            "generate",
            "-g",
            "8",
            "-t",
            "Production",
            "--type",
            "Project",
            "-s",
            "High Support",
            "-b",
            "Create",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "LLM API key not found. Set the OPENAI_API_KEY environment variable.",
        ));
}

#[test]
fn test_check_call_without_key_fails_before_calling() {
    let home = TempDir::new().unwrap();
    lp(&home)
        .args(["check", "--call"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("OPENAI_API_KEY is not set"))
        .stdout(predicate::str::contains("Model call failed").not())
        .stderr(predicate::str::contains(
            "LLM API key not found. Set the OPENAI_API_KEY environment variable.",
        ));
}

#[test]
fn test_local_config_file_is_used() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".lessonprompt.yml"),
        "llm:\n  model: gpt-4o-mini\n  api-key-env: LESSONPROMPT_CLI_TEST_KEY\n",
    )
    .unwrap();

    lp(&home)
        .env_remove("LESSONPROMPT_CLI_TEST_KEY")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("LESSONPROMPT_CLI_TEST_KEY is not set"))
        .stdout(predicate::str::contains("model:       gpt-4o-mini"));
}
