use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const EN: &str = r#"{ "nav": { "home": "Home" }, "old": "Old" }"#;
const ZH: &str = r#"{ "nav": { "home": "主页" } }"#;

#[test]
fn test_usage_lists_used_and_unused_keys() -> Result<()> {
    let test = CliTest::with_locales(EN, ZH)?;
    test.write_file("src/a.js", "t('nav.home')\nt('undefined.key')\n")?;
    test.write_file(
        "src/App.vue",
        "<template>\n  <p>{{ $t('nav.home') }}</p>\n</template>\n",
    )?;

    let output = test.run(&["usage"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "nav.home (en, zh)
  used by src/App.vue:2:9
  used by src/a.js:1:1

Unused key:
  old

1 used, 1 unused
"
    );

    Ok(())
}

#[test]
fn test_status_shows_progress() -> Result<()> {
    let test = CliTest::with_locales(EN, ZH)?;

    let output = test.run(&["status"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "en  100%  2/2
zh   50%  1/2
    missing: old
"
    );

    Ok(())
}

#[test]
fn test_status_warns_about_malformed_locale() -> Result<()> {
    let test = CliTest::with_locales(EN, "{")?;

    let output = test.run(&["status"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("zh    0%  0/2"));
    assert!(stderr(&output).contains("1 locale file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_locales_dir_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/fr.json", r#"{ "a": "A" }"#)?;

    let output = test.run(&["status", "--locales-dir", "i18n"])?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "fr  100%  1/1\n");

    Ok(())
}
