use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"<template>
  <h1>Welcome</h1>
  <img alt="Company logo">
</template>
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_locales(r#"{ "Welcome": "Welcome back" }"#, "{}")?;
    test.write_file("src/App.vue", APP)?;
    Ok(test)
}

#[test]
fn test_extract_dry_run() -> Result<()> {
    let test = project()?;

    let output = test.run(&["extract", "src/App.vue"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        r#"  --> src/App.vue:2:7 "Welcome" => {{ $t('Welcome') }}
  --> src/App.vue:3:13 "Company logo" => :alt="$t('Company logo')"
Would extract 2 text(s) from src/App.vue (1 new key(s) for en).
  - reused: 1 existing key(s): Welcome
Run with --apply to rewrite the file.
"#
    );
    // Dry run leaves every file untouched.
    assert_eq!(test.read_file("src/App.vue")?, APP);
    assert_eq!(test.read_json("locales/en.json")?, json!({"Welcome": "Welcome back"}));

    Ok(())
}

#[test]
fn test_extract_apply() -> Result<()> {
    let test = project()?;

    let output = test.run(&["extract", "src/App.vue", "--apply"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Extracted 2 text(s) from src/App.vue; added 1 key(s) to en."));
    assert_eq!(
        test.read_file("src/App.vue")?,
        r#"<template>
  <h1>{{ $t('Welcome') }}</h1>
  <img :alt="$t('Company logo')">
</template>
"#
    );
    assert_eq!(
        test.read_json("locales/en.json")?,
        json!({"Welcome": "Welcome back", "Company logo": "Company logo"})
    );
    assert_eq!(test.read_json("locales/zh.json")?, json!({}));

    // Nothing is left to report afterwards.
    let output = test.run(&["check", "hardcoded"])?;
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_extract_with_prefix() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;
    test.write_file("src/a.js", "alert(\"Saved successfully\");\n")?;

    let output = test.run(&["extract", "src/a.js", "--prefix", "toast", "--apply"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("src/a.js")?,
        "alert(t('toast.Saved successfully'));\n"
    );
    assert_eq!(
        test.read_json("locales/en.json")?,
        json!({"toast": {"Saved successfully": "Saved successfully"}})
    );

    Ok(())
}

#[test]
fn test_extract_nothing_found() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;
    test.write_file("src/App.vue", "<template><p>{{ $t('a') }}</p></template>")?;

    let output = test.run(&["extract", "src/App.vue"])?;

    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"✓ No hardcoded text found in src/App.vue");

    Ok(())
}

#[test]
fn test_extract_refuses_malformed_default_locale() -> Result<()> {
    let test = CliTest::with_locales("{ broken", "{}")?;
    test.write_file("src/App.vue", APP)?;

    let output = test.run(&["extract", "src/App.vue", "--apply"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("could not be parsed"));
    assert_eq!(test.read_file("src/App.vue")?, APP);
    assert_eq!(test.read_file("locales/en.json")?, "{ broken");

    Ok(())
}

#[test]
fn test_extract_missing_file() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;

    let output = test.run(&["extract", "src/Nope.vue"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read src/Nope.vue"));

    Ok(())
}
