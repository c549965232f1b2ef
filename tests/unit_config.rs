// tests/unit_config.rs
use std::fs;
use tuplelint_core::config::{Config, LabelExemption, LargeTupleConfig, SeverityThreshold};
use tuplelint_core::error::LintError;
use tuplelint_core::types::Severity;

#[test]
fn test_defaults() {
    let c = LargeTupleConfig::default();
    assert_eq!(c.warning, 2);
    assert_eq!(c.error, Some(3));
    assert_eq!(c.label_exemption, LabelExemption::AllTiers);
    assert_eq!(
        c.thresholds(),
        vec![
            SeverityThreshold::new(Severity::Error, 3),
            SeverityThreshold::new(Severity::Warning, 2),
        ]
    );
}

#[test]
fn test_missing_files_keep_defaults() {
    let d = tempfile::tempdir().unwrap();
    let c = Config::load(d.path()).unwrap();
    assert_eq!(c.rules.large_tuple, LargeTupleConfig::default());
    assert!(c.exclude_patterns.is_empty());
    assert!(!c.verbose);
}

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join("tuplelint.toml"),
        "[large_tuple]\nwarning = 3\nerror = 5\n",
    )
    .unwrap();
    let c = Config::load(d.path()).unwrap();
    assert_eq!(c.rules.large_tuple.warning, 3);
    assert_eq!(c.rules.large_tuple.error, Some(5));
}

#[test]
fn test_partial_section_fills_defaults() {
    let mut c = Config::new();
    c.parse_toml("[large_tuple]\nwarning = 4\n").unwrap();
    assert_eq!(c.rules.large_tuple.warning, 4);
    assert_eq!(c.rules.large_tuple.error, Some(3));
}

#[test]
fn test_explicit_tiers_override_shorthand() {
    let mut c = Config::new();
    c.parse_toml(
        r#"
[large_tuple]
warning = 9

[[large_tuple.tiers]]
severity = "warning"
limit = 1

[[large_tuple.tiers]]
severity = "error"
limit = 4
"#,
    )
    .unwrap();
    assert_eq!(
        c.rules.large_tuple.thresholds(),
        vec![
            SeverityThreshold::new(Severity::Warning, 1),
            SeverityThreshold::new(Severity::Error, 4),
        ]
    );
}

#[test]
fn test_empty_tiers_disable_check() {
    let mut c = Config::new();
    c.parse_toml("[large_tuple]\ntiers = []\n").unwrap();
    assert!(c.rules.large_tuple.thresholds().is_empty());
}

#[test]
fn test_label_exemption_values() {
    let mut c = Config::new();
    c.parse_toml("[large_tuple]\nlabel_exemption = \"exact-limit\"\n").unwrap();
    assert_eq!(c.rules.large_tuple.label_exemption, LabelExemption::ExactLimit);

    let mut c = Config::new();
    c.parse_toml("[large_tuple]\nlabel_exemption = \"all-tiers\"\n").unwrap();
    assert_eq!(c.rules.large_tuple.label_exemption, LabelExemption::AllTiers);
}

#[test]
fn test_unknown_rule_key_rejected() {
    let mut c = Config::new();
    let err = c.parse_toml("[large_tuple]\nwarnings = 2\n").unwrap_err();
    assert!(matches!(err, LintError::Config(_)));
}

#[test]
fn test_malformed_toml_rejected() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("tuplelint.toml"), "[large_tuple\nwarning = ").unwrap();
    assert!(matches!(Config::load(d.path()), Err(LintError::Config(_))));
}

#[test]
fn test_scan_section() {
    let mut c = Config::new();
    c.parse_toml("[scan]\ninclude = [\"^Sources/\"]\nexclude = [\"Generated\"]\nverbose = true\n")
        .unwrap();
    assert_eq!(c.include_patterns.len(), 1);
    assert_eq!(c.exclude_patterns.len(), 1);
    assert!(c.verbose);
}

#[test]
fn test_invalid_pattern_rejected() {
    let mut c = Config::new();
    let err = c.parse_toml("[scan]\nexclude = [\"(unclosed\"]\n").unwrap_err();
    assert!(matches!(err, LintError::Regex(_)));
}

#[test]
fn test_tuplelintignore() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join(".tuplelintignore"),
        "# generated code\nGenerated/\n\nFixtures\n",
    )
    .unwrap();
    let c = Config::load(d.path()).unwrap();
    assert_eq!(c.exclude_patterns.len(), 2);
    assert!(c.exclude_patterns[0].is_match("Sources/Generated/Api.swift"));
}

#[test]
fn test_from_file_ignores_root_files() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("custom.toml");
    fs::write(&path, "[large_tuple]\nerror = 6\n").unwrap();
    let c = Config::from_file(&path).unwrap();
    assert_eq!(c.rules.large_tuple.error, Some(6));
}

#[test]
fn test_from_file_missing_is_io_error() {
    let d = tempfile::tempdir().unwrap();
    let err = Config::from_file(&d.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, LintError::Io { .. }));
}
