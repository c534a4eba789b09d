//! End-to-end tests for canonical formatting through the public API.

use pretty_assertions::assert_eq;
use yaml_canon::{Error, LintOptions, Linter, Value, dump, load_value, parse};

fn lint(text: &str) -> String {
    Linter::new(text, LintOptions::default())
        .expect("input should lint")
        .dump()
}

fn lint_with_columns(text: &str, columns: usize) -> String {
    let options = LintOptions {
        columns,
        ..LintOptions::default()
    };
    Linter::new(text, options).expect("input should lint").dump()
}

/// Linting the canonical output again must change nothing.
fn assert_idempotent(text: &str) {
    let once = lint(text);
    assert_eq!(lint(&once), once, "second pass changed the output of:\n{text}");
}

// ============================================================================
// Formatting scenarios
// ============================================================================

#[test]
fn test_mixed_scalars() {
    let input = "- 1\n- \"one ' \"\n- 'one'\n- 77 things\n- 77.1\n";
    assert_eq!(lint(input), "---\n- 1\n- \"one ' \"\n- one\n- 77 things\n- 77.1\n");
}

#[test]
fn test_long_string_is_folded() {
    let input = "- this text is long let's ensure it is displayed as multiline\n";
    assert_eq!(
        lint_with_columns(input, 20),
        "---\n- >-\n  this text is long let's\n  ensure it is displayed\n  as multiline\n"
    );
}

#[test]
fn test_leading_comment_and_quotes() {
    let input = "# a comment\n- hello world\n- 'another ''\" world'\n";
    assert_eq!(
        lint(input),
        "---\n# a comment\n- hello world\n- \"another '\\\" world\"\n"
    );
}

#[test]
fn test_appended_string_with_both_quotes() {
    let mut linter = Linter::new("# a comment\n- hello world\n", LintOptions::default()).unwrap();
    if let Some(items) = linter.contents_mut().as_sequence_mut() {
        items.push(Value::string("another '\" world"));
    }
    assert_eq!(
        linter.dump(),
        "---\n# a comment\n- hello world\n- \"another '\\\" world\"\n"
    );
}

#[test]
fn test_curly_braces_are_quoted() {
    let mut linter = Linter::new("[]\n", LintOptions::default()).unwrap();
    *linter.contents_mut() = Value::from(vec![Value::string("{curly}")]);
    assert_eq!(linter.dump(), "---\n- \"{curly}\"\n");
}

#[test]
fn test_edit_then_dump() {
    let mut linter = Linter::new("- 1\n- 2\n", LintOptions::default()).unwrap();
    if let Some(items) = linter.contents_mut().as_sequence_mut() {
        items.push(Value::from(3_i64));
        items.push(Value::string("3"));
    }
    assert_eq!(linter.dump(), "---\n- 1\n- 2\n- 3\n- \"3\"\n");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_flow_collections_become_block() {
    let input = "config: {name: demo, tags: [a, b], empty: {}, none: []}\n";
    assert_eq!(
        lint(input),
        "---\nconfig:\n  name: demo\n  tags:\n    - a\n    - b\n  empty: {}\n  none: []\n"
    );
}

#[test]
fn test_nested_sequences() {
    assert_eq!(lint("- [1, [2, []]]\n- []\n"), "---\n- - 1\n  - - 2\n    - []\n- []\n");
}

#[test]
fn test_multiline_string_becomes_literal() {
    let input = "script: \"echo one\\necho two\\n\"\n";
    assert_eq!(lint(input), "---\nscript: |\n  echo one\n  echo two\n");
}

#[test]
fn test_special_floats_and_nulls() {
    let input = "- .inf\n- -.inf\n- .nan\n- ~\n- 1.0\n- 2e3\n";
    assert_eq!(
        lint(input),
        "---\n- .inf\n- -.inf\n- .nan\n- null\n- 1.0\n- 2000.0\n"
    );
}

#[test]
fn test_tricky_strings_stay_strings() {
    let input = "- '- not a list'\n- '#hash'\n- 'trailing '\n- 'a: b'\n- 'x/y'\n- '@at'\n";
    let output = lint(input);
    let (before, _) = parse(input).unwrap();
    assert_eq!(load_value(&output).unwrap(), before);
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_follow_their_nodes() {
    let input = "\
# deployment settings
name: web # service name
ports: # exposed
  - 80 # http
  - 443
env: [] # filled in later
replicas: 3
# end of file
";
    assert_eq!(
        lint(input),
        "\
---
# deployment settings
name: web # service name
ports: # exposed
  - 80 # http
  - 443
env: [] # filled in later
replicas: 3
# end of file
"
    );
}

#[test]
fn test_comment_block_is_aligned() {
    let input = "- a # one\n  # two\n- b\n";
    assert_eq!(lint(input), "---\n- a # one\n    # two\n- b\n");
}

#[test]
fn test_comments_are_exposed() {
    let linter = Linter::new("- a # about a\n- b\n", LintOptions::default()).unwrap();
    assert_eq!(linter.comments().get("-a"), Some("# about a"));
}

#[test]
fn test_hash_in_block_scalar_is_content() {
    let input = "- |\n  one\n  # not a comment\n- b\n";
    let expected = "---\n- |\n  one\n  # not a comment\n- b\n";
    assert_eq!(lint(input), expected);
    assert_eq!(lint(expected), expected);
}

#[test]
fn test_block_scalar_comment_in_sequence() {
    let expected = "---\n- | # c\n  text\n- b\n";
    assert_eq!(lint("- \"text\\n\" # c\n- b\n"), expected);
    assert_eq!(lint(expected), expected);
}

#[test]
fn test_hash_in_nested_key_is_not_a_comment() {
    let input = "x:\n  \"a # b\": 1\ny: 2\n";
    let expected = "---\nx:\n  \"a # b\": 1\ny: 2\n";
    assert_eq!(lint(input), expected);
    assert_eq!(lint(expected), expected);
}

#[test]
fn test_hash_in_first_key_is_not_leading() {
    let expected = "---\n\"a # b\": 1 # real\nc: 2\n";
    assert_eq!(lint("\"a # b\": 1 # real\nc: 2\n"), expected);
    assert_eq!(lint(expected), expected);

    assert_eq!(lint("a#b: 1\n"), "---\na#b: 1\n");
    assert_eq!(lint("- a#b: 1\n  c: 2\n"), "---\n- a#b: 1\n  c: 2\n");
}

#[test]
fn test_comment_only_document() {
    assert_eq!(lint("# nothing here\n"), "---\n# nothing here\nnull\n");
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_canonical_output_is_stable() {
    let inputs = [
        "- 1\n- \"one ' \"\n- 'one'\n- 77 things\n- 77.1\n",
        "---\n# lead\na: 1 # one\nb:\n  - x\n  - {c: d}\n# tail\n",
        "key: |- # note\n  first\n  second\nnext: >\n  folded\n  text\n",
        "a: [] # empty\nb: {}\n",
        "quote: \"it's \\\"fine\\\"\"\nslash: a/b\n",
        "'1': string key\n2: int key\ntrue: bool key\n",
        "- |\n  one\n  # two\n- >- # folded\n  long\n  text\n- \"x\\n\" # on x\n",
        "\"k # 1\": v # c\nouter:\n  \"k # 2\":\n    - a#b: 1 # d\n",
    ];
    for input in inputs {
        assert_idempotent(input);
    }
}

#[test]
fn test_dump_matches_parse_value() {
    let input = "a:\n  b: [1, 2.5, true, null, text]\n  c: 'quoted 1'\n";
    let (value, comments) = parse(input).unwrap();
    let output = dump(&value, &comments, 80);
    assert_eq!(load_value(&output).unwrap(), value);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_multi_document_rejected() {
    let err = Linter::new("a: 1\n---\nb: 2\n", LintOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDocument { documents: 2 }));
}

#[test]
fn test_alias_rejected() {
    let err = Linter::new("base: &b 1\ncopy: *b\n", LintOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnexpectedNodeKind { .. }));
}

#[test]
fn test_syntax_error_reported() {
    let err = Linter::new("a: 'unterminated\n", LintOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Scan(_)));
    assert!(err.to_string().starts_with("YAML syntax error"));
}
