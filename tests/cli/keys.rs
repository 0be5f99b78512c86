use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_set_adds_and_updates() -> Result<()> {
    let test = CliTest::with_locales(r#"{ "nav": { "home": "Home" } }"#, "{}")?;

    let output = test.run(&["set", "nav.about", "en", "About us"])?;
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"✓ Added 'nav.about' in en");

    let output = test.run(&["set", "nav.home", "en", "Start"])?;
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"✓ Updated 'nav.home' in en");

    assert_eq!(
        test.read_json("locales/en.json")?,
        json!({"nav": {"home": "Start", "about": "About us"}})
    );
    assert_eq!(test.read_json("locales/zh.json")?, json!({}));

    Ok(())
}

#[test]
fn test_set_writes_pretty_json() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;

    test.run(&["set", "title", "zh", "标题"])?;

    assert_eq!(test.read_file("locales/zh.json")?, "{\n  \"title\": \"标题\"\n}\n");

    Ok(())
}

#[test]
fn test_set_value_starting_with_hyphen() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;

    let output = test.run(&["set", "sep", "en", "-- or --"])?;

    assert!(output.status.success());
    assert_eq!(test.read_json("locales/en.json")?, json!({"sep": "-- or --"}));

    Ok(())
}

#[test]
fn test_set_unknown_locale() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;

    let output = test.run(&["set", "a", "fr", "Bonjour"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown locale 'fr'"));

    Ok(())
}

#[test]
fn test_set_refuses_malformed_locale() -> Result<()> {
    let test = CliTest::with_locales("{}", "[1,")?;

    let output = test.run(&["set", "a", "zh", "A"])?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(test.read_file("locales/zh.json")?, "[1,");

    Ok(())
}

fn rename_project() -> Result<CliTest> {
    let test = CliTest::with_locales(
        r#"{ "nav": { "home": "Home" } }"#,
        r#"{ "nav": { "home": "主页" } }"#,
    )?;
    test.write_file(
        "src/App.vue",
        "<template><p>{{ $t('nav.home') }}</p></template>",
    )?;
    test.write_file("src/a.js", "const home = t(\"nav.home\");\n")?;
    test.write_file("src/b.js", "const other = t('nav.homepage');\n")?;
    Ok(test)
}

#[test]
fn test_rename_dry_run() -> Result<()> {
    let test = rename_project()?;

    let output = test.run(&["rename", "nav.home", "nav.index"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Would rename 'nav.home' to 'nav.index' in 2 locale(s) and 2 file(s).
  - locales: en, zh
  - files:
    src/App.vue
    src/a.js
Run with --apply to rename this key.
"
    );
    assert_eq!(test.read_file("src/a.js")?, "const home = t(\"nav.home\");\n");

    Ok(())
}

#[test]
fn test_rename_apply() -> Result<()> {
    let test = rename_project()?;

    let output = test.run(&["rename", "nav.home", "nav.index", "--apply"])?;

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Renamed 'nav.home' to 'nav.index'"));
    assert_eq!(test.read_json("locales/en.json")?, json!({"nav": {"index": "Home"}}));
    assert_eq!(test.read_json("locales/zh.json")?, json!({"nav": {"index": "主页"}}));
    assert_eq!(
        test.read_file("src/App.vue")?,
        "<template><p>{{ $t('nav.index') }}</p></template>"
    );
    assert_eq!(test.read_file("src/a.js")?, "const home = t(\"nav.index\");\n");
    assert_eq!(test.read_file("src/b.js")?, "const other = t('nav.homepage');\n");

    Ok(())
}

#[test]
fn test_rename_rejects_existing_key() -> Result<()> {
    let test = CliTest::with_locales(r#"{ "a": "A", "b": "B" }"#, "{}")?;

    let output = test.run(&["rename", "a", "b", "--apply"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Key 'b' already exists"));
    assert_eq!(test.read_json("locales/en.json")?, json!({"a": "A", "b": "B"}));

    Ok(())
}

#[test]
fn test_rename_unknown_key() -> Result<()> {
    let test = CliTest::with_locales("{}", "{}")?;

    let output = test.run(&["rename", "a", "b"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Key 'a' not found in any locale"));

    Ok(())
}

fn inline_project() -> Result<CliTest> {
    let test = CliTest::with_locales(
        r#"{ "greet": "Hello", "bye": "Bye" }"#,
        r#"{ "greet": "你好" }"#,
    )?;
    test.write_file("src/a.js", "alert(t('greet'));\n")?;
    Ok(test)
}

#[test]
fn test_inline_dry_run() -> Result<()> {
    let test = inline_project()?;

    let output = test.run(&["inline", "greet"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Would inline 'greet' as \"Hello\" in 1 file(s) and delete it from 2 locale(s).
  - files:
    src/a.js
Run with --apply to inline this key.
"
    );
    assert_eq!(test.read_file("src/a.js")?, "alert(t('greet'));\n");

    Ok(())
}

#[test]
fn test_inline_apply() -> Result<()> {
    let test = inline_project()?;

    let output = test.run(&["inline", "greet", "--apply"])?;

    assert!(output.status.success());
    assert_eq!(test.read_file("src/a.js")?, "alert(\"Hello\");\n");
    assert_eq!(test.read_json("locales/en.json")?, json!({"bye": "Bye"}));
    assert_eq!(test.read_json("locales/zh.json")?, json!({}));

    Ok(())
}

#[test]
fn test_inline_from_locale() -> Result<()> {
    let test = inline_project()?;

    let output = test.run(&["inline", "greet", "--locale", "zh", "--apply"])?;

    assert!(output.status.success());
    assert_eq!(test.read_file("src/a.js")?, "alert(\"你好\");\n");

    Ok(())
}

#[test]
fn test_inline_value_missing_in_locale() -> Result<()> {
    let test = inline_project()?;

    let output = test.run(&["inline", "bye", "--locale", "zh"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Key 'bye' has no value in locale 'zh'"));

    Ok(())
}

fn delete_project() -> Result<CliTest> {
    let test = CliTest::with_locales(
        r#"{ "a": { "b": "B" }, "c": "C" }"#,
        r#"{ "a": { "b": "Bee" } }"#,
    )?;
    test.write_file("src/a.js", "t('a.b')\n")?;
    Ok(test)
}

#[test]
fn test_delete_dry_run_warns_about_references() -> Result<()> {
    let test = delete_project()?;

    let output = test.run(&["delete", "a.b"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Would delete 'a.b' from 2 locale(s): en, zh
warning: 'a.b' is still used in 1 file(s):
    src/a.js
Run with --apply to delete this key.
"
    );
    assert_eq!(test.read_json("locales/zh.json")?, json!({"a": {"b": "Bee"}}));

    Ok(())
}

#[test]
fn test_delete_apply_prunes_empty_parents() -> Result<()> {
    let test = delete_project()?;

    let output = test.run(&["delete", "a.b", "--apply"])?;

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Deleted 'a.b' from 2 locale(s): en, zh"));
    assert_eq!(test.read_json("locales/en.json")?, json!({"c": "C"}));
    assert_eq!(test.read_json("locales/zh.json")?, json!({}));

    Ok(())
}

#[test]
fn test_delete_unknown_key() -> Result<()> {
    let test = delete_project()?;

    let output = test.run(&["delete", "nope"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Key 'nope' not found in any locale"));

    Ok(())
}
