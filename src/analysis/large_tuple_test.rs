// src/analysis/large_tuple_test.rs

use super::*;
use crate::syntax::parse;
use crate::types::SourcePosition;

fn obs(position: usize, member_count: usize, labeled_member_count: usize) -> TupleObservation {
    TupleObservation {
        position: SourcePosition(position),
        member_count,
        labeled_member_count,
    }
}

fn check(code: &str, config: &LargeTupleConfig) -> Vec<Violation> {
    LargeTupleRule::new(config).validate(&parse(code).unwrap())
}

fn severities(code: &str, config: &LargeTupleConfig) -> Vec<Severity> {
    check(code, config).into_iter().map(|v| v.severity).collect()
}

fn exact_limit() -> LargeTupleConfig {
    LargeTupleConfig {
        label_exemption: LabelExemption::ExactLimit,
        ..Default::default()
    }
}

#[test]
fn two_members_pass() {
    assert!(check("let foo: (Int, Int)", &LargeTupleConfig::default()).is_empty());
}

#[test]
fn three_unlabelled_members_warn() {
    let v = check("let foo: (Int, Int, Int)", &LargeTupleConfig::default());
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].severity, Severity::Warning);
    assert_eq!(v[0].position, SourcePosition(9));
    assert_eq!(v[0].rule, "large_tuple");
    assert_eq!(
        v[0].message,
        "Tuples should have at most 2 members or have all members labelled"
    );
}

#[test]
fn four_unlabelled_members_error() {
    let v = check("let foo: (Int, Int, Int, Int)", &LargeTupleConfig::default());
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].severity, Severity::Error);
    // The message quotes the warning limit even when the error tier fired.
    assert!(v[0].message.contains("at most 2 members"));
}

#[test]
fn fully_labelled_tuple_is_exempt_from_every_tier() {
    let config = LargeTupleConfig::default();
    assert!(check("let foo: (start: Int, end: Int, value: String)", &config).is_empty());
    assert!(check("let foo: (a: A, b: B, c: C, d: D, e: E)", &config).is_empty());
}

#[test]
fn exact_limit_reading_only_cancels_the_matching_tier() {
    let config = exact_limit();
    assert_eq!(
        severities("let foo: (start: Int, end: Int, value: String)", &config),
        vec![Severity::Warning]
    );
    assert_eq!(
        severities("let foo: (a: A, b: B, c: C, d: D)", &config),
        vec![Severity::Error]
    );
}

#[test]
fn partially_labelled_tuple_is_not_exempt() {
    let config = LargeTupleConfig::default();
    assert_eq!(
        severities("let foo: (Int, end: Int, value: String)", &config),
        vec![Severity::Warning]
    );
    assert_eq!(
        severities("let foo: (Int, end: Int, value: String, flag: Bool)", &config),
        vec![Severity::Error]
    );
    assert_eq!(
        severities("let foo: (Int, end: Int, value: String)", &exact_limit()),
        vec![Severity::Warning]
    );
}

#[test]
fn labelled_at_limit_skips_tier_but_not_a_lower_one() {
    let rule = LargeTupleRule::with_thresholds(
        vec![
            SeverityThreshold::new(Severity::Error, 3),
            SeverityThreshold::new(Severity::Warning, 2),
        ],
        LabelExemption::ExactLimit,
    );
    let v = rule.evaluate(vec![obs(0, 3, 3)]);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].severity, Severity::Warning);
}

#[test]
fn violations_are_sorted_by_position() {
    let rule = LargeTupleRule::new(&LargeTupleConfig::default());
    let v = rule.evaluate(vec![obs(40, 3, 0), obs(5, 4, 0), obs(20, 2, 0), obs(10, 3, 1)]);
    let positions: Vec<usize> = v.iter().map(|v| v.position.offset()).collect();
    assert_eq!(positions, vec![5, 10, 40]);
}

#[test]
fn nested_tuples_report_in_source_order() {
    let code = "func foo() throws -> (Int, (String, String, String), Int) {}";
    let v = check(code, &LargeTupleConfig::default());
    let positions: Vec<usize> = v.iter().map(|v| v.position.offset()).collect();
    assert_eq!(positions, vec![code.find("(Int").unwrap(), code.find("(String").unwrap()]);
}

#[test]
fn first_matching_tier_wins_in_configured_order() {
    // Warning listed first shadows the error tier.
    let config = LargeTupleConfig {
        tiers: Some(vec![
            SeverityThreshold::new(Severity::Warning, 2),
            SeverityThreshold::new(Severity::Error, 3),
        ]),
        ..Default::default()
    };
    assert_eq!(
        severities("let foo: (Int, Int, Int, Int)", &config),
        vec![Severity::Warning]
    );
}

#[test]
fn arbitrary_number_of_tiers() {
    let config = LargeTupleConfig {
        tiers: Some(vec![
            SeverityThreshold::new(Severity::Error, 6),
            SeverityThreshold::new(Severity::Warning, 4),
            SeverityThreshold::new(Severity::Warning, 3),
        ]),
        ..Default::default()
    };
    let rule = LargeTupleRule::new(&config);
    let v = rule.evaluate(vec![obs(0, 3, 0), obs(1, 4, 0), obs(2, 5, 0), obs(3, 7, 0)]);
    let got: Vec<(usize, Severity)> = v.iter().map(|v| (v.position.offset(), v.severity)).collect();
    assert_eq!(
        got,
        vec![(1, Severity::Warning), (2, Severity::Warning), (3, Severity::Error)]
    );
    // First warning tier in the list supplies the quoted limit.
    assert!(v[0].message.contains("at most 4 members"));
}

#[test]
fn no_tiers_never_violates() {
    let config = LargeTupleConfig {
        tiers: Some(Vec::new()),
        ..Default::default()
    };
    assert!(check("let foo: (A, B, C, D, E, F)", &config).is_empty());
}

#[test]
fn error_tier_only_quotes_smallest_limit() {
    let rule = LargeTupleRule::with_thresholds(
        vec![SeverityThreshold::new(Severity::Error, 5)],
        LabelExemption::AllTiers,
    );
    let v = rule.evaluate(vec![obs(0, 6, 0)]);
    assert!(v[0].message.contains("at most 5 members"));
}

#[test]
fn empty_observations_yield_nothing() {
    let rule = LargeTupleRule::new(&LargeTupleConfig::default());
    assert!(rule.evaluate(Vec::new()).is_empty());
}

#[test]
fn validation_is_idempotent() {
    let root = parse("let a: (A, B, C)\nfunc f(x: (Int, Int, Int, Int)) -> (X, Y) {}").unwrap();
    let rule = LargeTupleRule::new(&LargeTupleConfig::default());
    let first = rule.validate(&root);
    let second = rule.validate(&root);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}
