use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "localesDir",
        "localeFileNamePattern",
        "hardcodedFileKinds",
        "hardcodedAttributeNames",
        "sourceRoot",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert_eq!(parsed["localesDir"], "./locales");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"✓ Created .lokitrc.json");
    assert!(test.root().join(".lokitrc.json").exists());

    let content = test.read_file(".lokitrc.json")?;
    assert_config_content(&content)?;

    // The generated file loads as a valid configuration.
    let output = test.run(&["check", "hardcoded"])?;
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lokitrc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".lokitrc.json already exists"));
    assert_eq!(test.read_file(".lokitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lokitrc.json", r#"{ "localeFileNamePattern": "([" }"#)?;

    let output = test.run(&["check", "hardcoded"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}
