use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const EN: &str = r#"{
  "nav": {
    "home": "Home"
  },
  "old": "Old"
}
"#;

const ZH: &str = r#"{
  "nav": {
    "home": "主页"
  }
}
"#;

#[test]
fn test_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.vue",
        "<template>\n  <h1>Welcome</h1>\n</template>\n",
    )?;

    let output = test.run(&["check", "hardcoded"])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "error: \"Welcome\"  hardcoded
  --> src/App.vue:2:7
  |
2 |   <h1>Welcome</h1>
  |       ^
  = hint: run `lokit extract src/App.vue` to move it into a locale

\u{2718} 1 problems (1 error, 0 warnings)
"
    );

    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.vue",
        "<template>\n  <h1>{{ $t('nav.home') }}</h1>\n</template>\n",
    )?;

    let output = test.run(&["check", "hardcoded"])?;

    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"✓ Checked 1 source file - no issues found");

    Ok(())
}

#[test]
fn test_attribute_value_note() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        "<input placeholder=\"Your email\" type=\"email\">\n",
    )?;

    let output = test.run(&["check", "hardcoded"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"Your email\"  hardcoded"));
    assert!(out.contains("  --> index.html:1:21"));
    assert!(out.contains("= note: attribute `placeholder`"));

    Ok(())
}

#[test]
fn test_missing_and_unused_keys() -> Result<()> {
    let test = CliTest::with_locales(EN, ZH)?;
    test.write_file("src/a.js", "t('nav.home')\nt('gone')\n")?;

    let output = test.run(&["check", "missing", "unused"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"gone\"  missing-key\n  --> src/a.js:2:1\n"));
    assert!(out.contains("warning: \"old\"  unused-key"));
    assert!(out.contains("locales/en.json:5:1"));
    assert!(out.contains("= note: (\"Old\") defined in: en"));
    assert!(out.ends_with("2 problems (1 error, 1 warning)\n"));

    Ok(())
}

#[test]
fn test_unused_keys_alone_do_not_fail() -> Result<()> {
    let test = CliTest::with_locales(EN, ZH)?;
    test.write_file("src/a.js", "t('nav.home')\n")?;

    let output = test.run(&["check", "unused"])?;

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("1 problems (0 errors, 1 warning)\n"));

    Ok(())
}

#[test]
fn test_all_checks_pass() -> Result<()> {
    let test = CliTest::with_locales(EN, ZH)?;
    test.write_file("src/a.js", "t('nav.home')\nt('old')\n")?;

    let output = test.run(&["check"])?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 source file, 2 locale files - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_malformed_locale_is_reported() -> Result<()> {
    let test = CliTest::with_locales(EN, "{ not json")?;
    test.write_file("src/a.js", "t('nav.home')\nt('old')\n")?;

    let output = test.run(&["check", "missing"])?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("parse-error"));
    assert!(out.contains("locales/zh.json\n"));

    Ok(())
}

#[test]
fn test_missing_locales_dir_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "t('a')\n")?;

    let output = test.run(&["check", "missing"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("no locale files found"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lokitrc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;
    test.write_file("src/generated/Gen.vue", "<template><p>Generated text</p></template>")?;
    test.write_file("src/App.vue", "<template><p>{{ $t('a') }}</p></template>")?;

    let output = test.run(&["check", "hardcoded"])?;

    assert!(output.status.success());
    assert!(!stdout(&output).contains("Generated text"));

    Ok(())
}

#[test]
fn test_source_root_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/Page.vue", "<template><p>Inside app</p></template>")?;
    test.write_file("other/Page.vue", "<template><p>Outside app</p></template>")?;

    let output = test.run(&["check", "hardcoded", "--source-root", "app"])?;
    let out = stdout(&output);

    assert!(out.contains("\"Inside app\""));
    assert!(!out.contains("Outside app"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["--help"])?;
    let out = stdout(&output);

    assert!(output.status.success());
    for command in ["check", "extract", "usage", "status", "set", "rename", "inline", "delete", "init"] {
        assert!(out.contains(command), "help should list `{}`", command);
    }

    Ok(())
}
