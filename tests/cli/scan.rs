use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, run};

#[test]
fn test_hardcoded_text() -> Result<()> {
    let test = CliTest::with_files(&[(
        "src/app.js",
        "function greet() {\n  console.log('Hello World');\n}\n",
    )])?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: \"Hello World\"  hardcoded (single-quoted)"));
    assert!(out.stdout.contains("--> src/app.js:2:16"));
    assert!(out.stdout.contains("use key `ui.hello_world`"));
    assert!(out.stdout.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_translated_text_is_clean() -> Result<()> {
    let test = CliTest::with_files(&[(
        "src/menu.js",
        "const title = t('menu.title');\nconst label = i18n.t('Save changes');\n",
    )])?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert_snapshot!(out.stdout.trim_end(), @"✓ Checked 1 source file - no issues found");

    Ok(())
}

#[test]
fn test_fixed_framework_snippet() -> Result<()> {
    let test = CliTest::with_files(&[(
        "src/App.vue",
        "<template>\n  <p>Welcome back</p>\n</template>\n",
    )])?;

    let mut cmd = test.scan_command();
    cmd.args(["--framework", "vue"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("{{ $t('ui.welcome_back') }}"));

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_files(&[("app.py", "flash(\"Profile updated\")\n")])?;

    let mut cmd = test.scan_command();
    cmd.args(["--format", "json", "--framework", "flask"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(report["scan"]["framework"], "flask");
    assert_eq!(report["scan"]["files_scanned"], 1);
    let texts: Vec<&str> = report["scan"]["files"][0]["matches"]
        .as_array()
        .map(|m| m.iter().filter_map(|m| m["text"].as_str()).collect())
        .unwrap_or_default();
    assert!(texts.contains(&"Profile updated"));
    assert!(report.get("consistency").is_none());

    Ok(())
}

#[test]
fn test_output_writes_report() -> Result<()> {
    let test = CliTest::with_files(&[("index.html", "<h1>Pricing plans</h1>\n")])?;

    let mut cmd = test.scan_command();
    cmd.args(["--output", "out"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&test.read_file("out/report.json")?)?;
    assert_eq!(report["scan"]["total_matches"], 1);

    Ok(())
}

#[test]
fn test_config_ignores_and_ignore_texts() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".glossarc.json",
            r#"{ "ignores": ["**/generated/**"], "ignoreTexts": ["Acme Corp"] }"#,
        ),
        ("src/generated/api.js", "alert('Generated message')"),
        ("src/footer.js", "const brand = 'Acme Corp';"),
    ])?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(out.stdout.contains("Checked 1 source file"));

    Ok(())
}

#[test]
fn test_test_files_skipped_unless_requested() -> Result<()> {
    let test = CliTest::with_files(&[("src/app.test.js", "it('renders the header', () => {})")])?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(0));

    let mut cmd = test.scan_command();
    cmd.arg("--include-tests");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("renders the header"));

    Ok(())
}

#[test]
fn test_missing_source_root_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.scan_command();
    cmd.args(["--source-root", "does-not-exist"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Error:"));
    assert!(out.stderr.contains("does-not-exist"));

    Ok(())
}

#[test]
fn test_unreadable_file_is_warning() -> Result<()> {
    let test = CliTest::with_files(&[("src/ok.js", "const x = 1;")])?;
    std::fs::write(test.root().join("src/binary.js"), [0xff, 0xfe, 0x00])?;

    let out = run(test.scan_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stderr.contains("1 file or rule could not be processed"));

    Ok(())
}
