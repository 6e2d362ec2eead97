use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_missing_key() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en/common.json", r#"{"a": {"b": "x", "c": "y"}}"#),
        ("locales/de/common.json", r#"{"a": {"b": "X"}}"#),
    ])?;

    let out = run(test.locales_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"a.c\"  missing-key"));
    assert!(out.stdout.contains("--> de/common.json"));
    assert!(out.stdout.contains("Locale coverage (reference: en)"));
    assert!(out.stdout.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_consistent_locales() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{"nav": {"home": "Home"}}"#),
        ("locales/fr.json", r#"{"nav": {"home": "Accueil"}}"#),
    ])?;

    let out = run(test.locales_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Checked 2 locale files - no issues found"));
    assert!(out.stdout.contains("fr  100.0%  1/1 keys"));

    Ok(())
}

#[test]
fn test_yaml_catalogs_and_custom_root() -> Result<()> {
    let test = CliTest::with_files(&[
        ("config/locales/en.yml", "en:\n  greeting: Hello\n  farewell: Bye\n"),
        ("config/locales/de.yml", "de:\n  greeting: Hallo\n"),
    ])?;

    let mut cmd = test.locales_command();
    cmd.args(["--locales-root", "config/locales"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"farewell\"  missing-key"));
    assert!(out.stdout.contains("--> de.yml"));

    Ok(())
}

#[test]
fn test_missing_and_malformed_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en/common.json", r#"{"ok": "OK"}"#),
        ("locales/en/errors.json", r#"{"oops": "Oops"}"#),
        ("locales/de/common.json", r#"{"ok": "#),
    ])?;

    let out = run(test.locales_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"common.json\" could not be parsed  malformed-file"));
    assert!(out.stdout.contains("error: \"de\" has no \"errors.json\"  missing-file"));
    assert!(out.stdout.contains("--> de/errors.json"));

    Ok(())
}

#[test]
fn test_new_language_dir_without_files() -> Result<()> {
    let test = CliTest::with_files(&[("locales/en/common.json", r#"{"ok": "OK"}"#)])?;
    std::fs::create_dir(test.root().join("locales/fr"))?;

    let out = run(test.locales_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"fr\" has no \"common.json\"  missing-file"));
    assert!(out.stdout.contains("--> fr/common.json"));

    Ok(())
}

#[test]
fn test_source_language_override() -> Result<()> {
    let test = CliTest::with_files(&[
        ("locales/en.json", r#"{"a": "A"}"#),
        ("locales/de.json", r#"{"a": "A", "b": "B"}"#),
    ])?;

    let mut cmd = test.locales_command();
    cmd.args(["--source-language", "de"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"b\"  missing-key"));
    assert!(out.stdout.contains("--> en.json"));

    Ok(())
}

#[test]
fn test_unknown_reference_is_error() -> Result<()> {
    let test = CliTest::with_files(&[("locales/en.json", "{}")])?;

    let mut cmd = test.locales_command();
    cmd.args(["--source-language", "ja"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("reference language 'ja' not found"));

    Ok(())
}

#[test]
fn test_missing_locales_root_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.locales_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("locales directory"));

    Ok(())
}
