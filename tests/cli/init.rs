use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["sourceRoot", "framework", "localesRoot", "sourceLanguage", "minLength"] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert_eq!(parsed["framework"], "auto");
    assert_eq!(parsed["sourceLanguage"], "en");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created .glossarc.json"));
    assert!(test.root().join(".glossarc.json").exists());

    let content = test.read_file(".glossarc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".glossarc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("already exists"));
    assert_eq!(test.read_file(".glossarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    test.write_file("src/app.js", "export const VERSION = 3;\n")?;
    test.write_file("locales/en.json", "{}")?;

    let out = run(test.check_command())?;
    assert_eq!(
        out.code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        out.stderr
    );

    Ok(())
}
