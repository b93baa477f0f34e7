//! End-to-end tests: source text → scanner → parser → checker → JSON report.

use pylite_analyzer::lexer::TokenKind;
use pylite_analyzer::semantic::VariableType;
use pylite_analyzer::{analyze, analyze_with_limits};
use pylite_common::Limits;
use serde_json::{json, Value};

fn report_json(source: &str) -> Value {
    let report = analyze(source);
    serde_json::from_str(&report.to_json().expect("report serialization failed"))
        .expect("report is valid JSON")
}

// =========================================================================
// Report shape
// =========================================================================

#[test]
fn report_has_all_sections() {
    let value = report_json("x = 5\nprint(x)");
    for key in ["lexical", "syntax", "semantic", "success"] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    for key in ["tokens", "table", "statistics", "errors", "reserved_words"] {
        assert!(value["lexical"].get(key).is_some(), "missing lexical.{}", key);
    }
    for key in ["ast", "errors", "success", "error_line"] {
        assert!(value["syntax"].get(key).is_some(), "missing syntax.{}", key);
    }
    for key in ["errors", "variables", "type_mismatches", "success"] {
        assert!(value["semantic"].get(key).is_some(), "missing semantic.{}", key);
    }
    assert!(value.get("error").is_none());
}

#[test]
fn lexical_section() {
    let value = report_json("if x >= 10:\n  print('big')");
    let lexical = &value["lexical"];

    assert_eq!(
        lexical["tokens"][0],
        json!({"type": "KEYWORD", "value": "if", "line": 1, "column": 1})
    );
    assert_eq!(
        lexical["tokens"][2],
        json!({"type": "SYMBOL", "value": ">=", "line": 1, "column": 6})
    );
    assert_eq!(
        lexical["table"],
        json!({
            "PR": ["if", "print"],
            "ID": ["x"],
            "Numeros": ["10"],
            "Simbolos": [">=", ":", "(", ")"],
            "Error": []
        })
    );
    assert_eq!(
        lexical["statistics"],
        json!({
            "keywords": 2,
            "identifiers": 1,
            "numbers": 1,
            "strings": 1,
            "symbols": 4,
            "errors": 0
        })
    );
    assert_eq!(lexical["reserved_words"], 2);
}

#[test]
fn syntax_section() {
    let value = report_json("x = 1 + 2");
    assert_eq!(
        value["syntax"]["ast"],
        json!({
            "type": "Program",
            "line": 1,
            "children": [{
                "type": "Assignment",
                "value": "x",
                "line": 1,
                "children": [{
                    "type": "BinaryOp",
                    "value": "+",
                    "line": 1,
                    "children": [
                        {"type": "Number", "value": "1", "line": 1},
                        {"type": "Number", "value": "2", "line": 1}
                    ]
                }]
            }]
        })
    );
    assert_eq!(value["syntax"]["success"], true);
    assert_eq!(value["syntax"]["error_line"], 0);
}

#[test]
fn semantic_section() {
    let value = report_json("name = 'Ana'\nage = 30\nok = age > 18");
    assert_eq!(
        value["semantic"]["variables"],
        json!({
            "age": {"name": "age", "type": "int", "line": 2},
            "name": {"name": "name", "type": "string", "line": 1},
            "ok": {"name": "ok", "type": "bool", "line": 3}
        })
    );
    assert_eq!(value["semantic"]["success"], true);
}

#[test]
fn empty_source() {
    let value = report_json("");
    assert_eq!(value["lexical"]["tokens"], json!([]));
    assert_eq!(value["syntax"]["ast"], json!({"type": "Program", "line": 1}));
    assert_eq!(value["success"], true);
}

// =========================================================================
// Behavioral properties
// =========================================================================

#[test]
fn analysis_is_deterministic() {
    let source = "def f(a, b):\n  c = a + b\nif c > 'x':\n  print(c.lower(), z)\n`";
    let first = analyze(source).to_json().unwrap();
    for _ in 0..5 {
        assert_eq!(analyze(source).to_json().unwrap(), first);
    }
}

#[test]
fn double_equals_is_one_symbol() {
    let report = analyze("a == b");
    let symbols: Vec<_> = report
        .lexical
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Symbol)
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(symbols, ["=="]);
}

#[test]
fn reassignment_changes_type() {
    let report = analyze("x = 5\nx = 'a'");
    assert!(report.success);
    assert!(report.semantic.errors.is_empty());
    assert_eq!(
        report.semantic.variables.type_of("x"),
        Some(VariableType::String)
    );
}

#[test]
fn comparison_with_undefined_variable_is_quiet() {
    let report = analyze("if x > 'a':\n  print(x)");
    assert!(report.semantic.errors.is_empty());
    assert!(report.success);
}

#[test]
fn comparison_of_number_with_string() {
    let report = analyze("x = 5\nif x > 'a':\n  print(x)");
    assert!(!report.success);
    assert_eq!(report.semantic.errors.len(), 1);
    assert!(report.semantic.errors[0].contains("'>'"));
    assert_eq!(report.semantic.type_mismatches, report.semantic.errors);
    assert_eq!(
        report.error.as_deref(),
        Some("semantic errors: semantic error at line 2: cannot compare number with string using '>'")
    );
}

#[test]
fn lower_on_number_and_string() {
    let bad = analyze("x = 5\nx.lower()");
    assert_eq!(
        bad.semantic.errors,
        vec!["semantic error at line 2: method 'lower()' is not available for the type of 'x'"]
    );

    let good = analyze("x = 'hi'\nx.lower()");
    assert!(good.semantic.errors.is_empty());
    assert!(good.success);
}

#[test]
fn if_block_stops_at_def() {
    let value = report_json("if x > 1:\n  y = 1\ndef f():\n  pass");
    let program = &value["syntax"]["ast"];
    let block = &program["children"][0]["children"][1];
    assert_eq!(block["type"], "Block");
    assert_eq!(block["children"].as_array().unwrap().len(), 1);
    assert_eq!(block["children"][0]["value"], "y");
    assert_eq!(program["children"][1]["type"], "FunctionDef");
}

#[test]
fn backtick_is_one_lexical_error() {
    let report = analyze("x = 5 `");
    assert_eq!(
        report.lexical.diagnostics.messages(),
        vec!["unrecognized character '`' at line 1, column 7"]
    );
    let errors: Vec<_> = report
        .lexical
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].lexeme, "`");
    assert_eq!(report.lexical.table.errors, ["`"]);
}

#[test]
fn lexical_error_alone_keeps_success() {
    let value = report_json("x = 5 `");
    assert_eq!(value["lexical"]["errors"].as_array().unwrap().len(), 1);
    assert_eq!(value["syntax"]["success"], true);
    assert_eq!(value["semantic"]["success"], true);
    assert_eq!(value["success"], true);
    assert!(value.get("error").is_none());
}

#[test]
fn recovery_keeps_later_statements() {
    let report = analyze("x = = 3\ny = 4");
    assert!(!report.syntax.success);
    assert!(!report.syntax.diagnostics.is_empty());
    assert_eq!(report.syntax.error_line, 1);
    assert!(report.semantic.variables.lookup("y").is_some());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["success"], false);
    let error = value["error"].as_str().unwrap();
    assert!(error.starts_with("syntax errors: error at line 1:"), "{}", error);
}

#[test]
fn unterminated_string_is_silent_in_scanner() {
    let report = analyze("s = 'abc");
    assert!(report.lexical.diagnostics.is_empty());
    assert_eq!(report.lexical.table.errors, ["'abc"]);
    assert!(!report.syntax.success);
}

#[test]
fn deep_nesting_reports_once() {
    let depth = 5_000;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let report = analyze(&source);
    assert_eq!(
        report.syntax.diagnostics.messages(),
        vec!["error at line 1: maximum nesting depth of 200 exceeded"]
    );
    assert!(!report.success);
}

#[test]
fn custom_depth_limit_applies_to_both_stages() {
    let limits = Limits {
        max_depth: 8,
        ..Limits::default()
    };
    let source = "x = ((((((((((1))))))))))";
    let report = analyze_with_limits(source, &limits);
    assert_eq!(
        report.syntax.diagnostics.messages(),
        vec!["error at line 1: maximum nesting depth of 8 exceeded"]
    );

    let shallow = analyze_with_limits("x = 1", &limits);
    assert!(shallow.success);
}

fn nested_calls(depth: usize) -> String {
    format!("{}1{}", "f(".repeat(depth), ")".repeat(depth))
}

#[test]
fn deepest_accepted_call_nesting_passes_the_checker() {
    // Program, ExpressionStatement, 198 calls, then the literal at level 200.
    let report = analyze(&nested_calls(198));
    assert!(report.syntax.diagnostics.is_empty());
    assert!(report.semantic.errors.is_empty());
    assert!(report.success);
}

#[test]
fn one_call_too_deep_is_only_a_syntax_error() {
    let report = analyze(&nested_calls(199));
    assert_eq!(
        report.syntax.diagnostics.messages(),
        vec!["error at line 1: maximum nesting depth of 200 exceeded"]
    );
    assert!(report.semantic.errors.is_empty());
}

#[test]
fn left_nested_chain_is_limited_by_the_parser() {
    let limits = Limits {
        max_depth: 6,
        ..Limits::default()
    };

    let fits = analyze_with_limits("x = (1 + 1) + 1 + 1 + 1", &limits);
    assert!(fits.success, "{:?}", fits.error);

    let too_deep = analyze_with_limits("x = (1 + 1) + 1 + 1 + 1 + 1", &limits);
    assert_eq!(
        too_deep.syntax.diagnostics.messages(),
        vec!["error at line 1: maximum nesting depth of 6 exceeded"]
    );
    assert!(too_deep.semantic.errors.is_empty());
}

#[test]
fn incomplete_operation_keeps_inner_errors() {
    let report = analyze("x = 'a'\ny = (x - 1) >");
    assert_eq!(
        report.semantic.errors,
        vec![
            "semantic error at line 2: incomplete binary operation",
            "semantic error at line 2: operator '-' is not valid for strings",
        ]
    );
}
