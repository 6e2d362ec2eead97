use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_check_runs_both() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/Header.jsx",
            "export const Header = () => <h1>Our products</h1>;\n",
        ),
        ("locales/en/common.json", r#"{"title": "Title"}"#),
        ("locales/de/common.json", r#"{"title": "__NOT_TRANSLATED__"}"#),
    ])?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"Our products\""));
    assert!(out.stdout.contains("warning: \"title\"  untranslated"));
    assert!(out.stdout.contains("2 problems (1 error, 1 warning)"));

    Ok(())
}

#[test]
fn test_check_without_locales_dir() -> Result<()> {
    let test = CliTest::with_files(&[("src/util.js", "export const answer = 42;\n")])?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Checked 1 source file - no issues found"));

    Ok(())
}

#[test]
fn test_check_json_contains_both_sections() -> Result<()> {
    let test = CliTest::with_files(&[
        ("templates/index.html", "<p>{% trans \"Welcome\" %}</p>\n"),
        ("locales/en.json", r#"{"welcome": "Welcome"}"#),
        ("locales/es.json", r#"{"welcome": "Bienvenido"}"#),
    ])?;

    let mut cmd = test.check_command();
    cmd.args(["--format", "json", "--framework", "django"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    let report: serde_json::Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(report["scan"]["total_matches"], 0);
    assert_eq!(report["consistency"]["reference"], "en");
    assert_eq!(report["consistency"]["summaries"][0]["coverage"], 100.0);

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    for command in ["scan", "locales", "check", "init"] {
        assert!(out.stdout.contains(command), "help should list {}", command);
    }

    Ok(())
}
