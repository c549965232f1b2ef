// tests/rule_examples.rs
//! Declaration corpus for the large tuple check. `↓` marks the position of
//! each expected violation and is stripped before analysis.

use tuplelint_core::analysis::large_tuple::LargeTupleRule;
use tuplelint_core::config::LargeTupleConfig;
use tuplelint_core::syntax::parse;

const MARKER: char = '↓';

const NON_TRIGGERING: &[&str] = &[
    "let foo: (Int, Int)\n",
    "let foo: (start: Int, end: Int)\n",
    "let foo: (start: Int, end: Int, value: String)\n",
    "let foo: (Int, (Int, String))\n",
    "func foo() -> (Int, Int)\n",
    "func foo() -> (Int, Int) {}\n",
    "func foo(bar: String) -> (Int, Int)\n",
    "func foo(bar: String) -> (Int, Int) {}\n",
    "func foo() throws -> (Int, Int)\n",
    "func foo() throws -> (Int, Int) {}\n",
    "let foo: (Int, Int, Int) -> Void\n",
    "let foo: (Int, Int, Int) throws -> Void\n",
    "func foo(bar: (Int, String, Float) -> Void)\n",
    "func foo(bar: (Int, String, Float) throws -> Void)\n",
    "var completionHandler: ((_ data: Data?, _ resp: URLResponse?, _ e: NSError?) -> Void)!\n",
    "func getDictionaryAndInt() -> (Dictionary<Int, String>, Int)?\n",
    "func getGenericTypeAndInt() -> (Type<Int, String, Float>, Int)?\n",
    "func foo() async -> (Int, Int)\n",
    "func foo() async -> (Int, Int) {}\n",
    "func foo(bar: String) async -> (Int, Int)\n",
    "func foo(bar: String) async -> (Int, Int) {}\n",
    "func foo() async throws -> (Int, Int)\n",
    "func foo() async throws -> (Int, Int) {}\n",
    "let foo: (Int, Int, Int) async -> Void\n",
    "let foo: (Int, Int, Int) async throws -> Void\n",
    "func foo(bar: (Int, String, Float) async -> Void)\n",
    "func foo(bar: (Int, String, Float) async throws -> Void)\n",
    "func getDictionaryAndInt() async -> (Dictionary<Int, String>, Int)?\n",
    "func getGenericTypeAndInt() async -> (Type<Int, String, Float>, Int)?\n",
];

const TRIGGERING: &[&str] = &[
    "let foo: ↓(Int, Int, Int)\n",
    "let foo: ↓(Int, end: Int, value: String)\n",
    "let foo: (Int, ↓(Int, Int, Int))\n",
    "func foo(bar: ↓(Int, Int, Int))\n",
    "func foo() -> ↓(Int, Int, Int)\n",
    "func foo() -> ↓(Int, Int, Int) {}\n",
    "func foo(bar: String) -> ↓(Int, Int, Int)\n",
    "func foo(bar: String) -> ↓(Int, Int, Int) {}\n",
    "func foo() throws -> ↓(Int, Int, Int)\n",
    "func foo() throws -> ↓(Int, Int, Int) {}\n",
    "func foo() throws -> ↓(Int, ↓(String, String, String), Int) {}\n",
    "func getDictionaryAndInt() -> (Dictionary<Int, ↓(String, String, String)>, Int)?\n",
    "func foo(bar: ↓(Int, Int, Int)) async\n",
    "func foo() async -> ↓(Int, Int, Int)\n",
    "func foo() async -> ↓(Int, Int, Int) {}\n",
    "func foo(bar: String) async -> ↓(Int, Int, Int)\n",
    "func foo(bar: String) async -> ↓(Int, Int, Int) {}\n",
    "func foo() async throws -> ↓(Int, Int, Int)\n",
    "func foo() async throws -> ↓(Int, Int, Int) {}\n",
    "func foo() async throws -> ↓(Int, ↓(String, String, String), Int) {}\n",
    "func getDictionaryAndInt() async -> (Dictionary<Int, ↓(String, String, String)>, Int)?\n",
];

/// Strips markers, returning the clean source and the byte offsets they marked.
fn strip_markers(example: &str) -> (String, Vec<usize>) {
    let mut clean = String::with_capacity(example.len());
    let mut offsets = Vec::new();
    for c in example.chars() {
        if c == MARKER {
            offsets.push(clean.len());
        } else {
            clean.push(c);
        }
    }
    (clean, offsets)
}

fn violation_offsets(source: &str) -> Vec<usize> {
    let root = parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"));
    LargeTupleRule::new(&LargeTupleConfig::default())
        .validate(&root)
        .iter()
        .map(|v| v.position.offset())
        .collect()
}

#[test]
fn non_triggering_examples_pass() {
    for example in NON_TRIGGERING {
        assert!(
            violation_offsets(example).is_empty(),
            "expected no violations for {example:?}"
        );
    }
}

#[test]
fn triggering_examples_flag_marked_positions() {
    for example in TRIGGERING {
        let (source, expected) = strip_markers(example);
        assert!(!expected.is_empty(), "example without marker: {example:?}");
        assert_eq!(violation_offsets(&source), expected, "for {example:?}");
    }
}

#[test]
fn examples_still_trigger_inside_type_bodies() {
    for example in TRIGGERING {
        let (source, _) = strip_markers(example);
        let wrapped = format!("struct Wrapper {{\n    {source}}}\n");
        let expected = violation_offsets(&source).len();
        assert_eq!(violation_offsets(&wrapped).len(), expected, "for {wrapped:?}");
    }
}
