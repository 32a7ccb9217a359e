//! Rule, constraint and job tests.

mod common;

use common::*;
use serde_json::{Value, json};
use tsd_core::ErrorKind;

#[test]
fn test_incompatible_comparison() {
    let document = person_program(vec![person_rule(
        "r",
        comparison(field_access("p", "name"), ">", number(18.0)),
        vec![job("noop", vec![])],
    )]);
    assert_eq!(error_kind(&document), ErrorKind::IncompatibleTypes);
}

#[test]
fn test_valid_rule() {
    let document = person_program(vec![person_rule(
        "adult",
        comparison(field_access("p", "age"), ">=", number(18.0)),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert!(should_pass(&document));
}

#[test]
fn test_unknown_field_access() {
    let document = person_program(vec![person_rule(
        "r",
        comparison(field_access("p", "height"), ">", number(1.0)),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert_eq!(error_kind(&document), ErrorKind::InvalidField);
    assert_eq!(
        error_message(&document),
        "field 'height' not found in type 'Person'"
    );
}

#[test]
fn test_synthetic_id_is_string() {
    let document = person_program(vec![person_rule(
        "r",
        comparison(field_access("p", "id"), "==", string("Person~Alice")),
        vec![job("print", vec![field_access("p", "id")])],
    )]);
    assert!(should_pass(&document));
}

#[test]
fn test_undefined_variable_type() {
    let document = json!({
        "expressions": [{
            "ruleId": "r",
            "set": {"variables": [{"name": "o", "dataType": "Order"}]},
            "action": {"jobs": [{"name": "print", "args": []}]}
        }]
    });
    assert_eq!(error_kind(&document), ErrorKind::InvalidType);
}

#[test]
fn test_rule_without_action() {
    let mut rule = person_rule("r", Value::Null, vec![]);
    rule.as_object_mut().unwrap().remove("action");
    let document = person_program(vec![rule]);
    assert_eq!(error_kind(&document), ErrorKind::MalformedAst);
    assert_eq!(error_message(&document), "rule 'r' has no action");
}

#[test]
fn test_rule_with_empty_job_list() {
    let document = person_program(vec![person_rule("r", Value::Null, vec![])]);
    assert_eq!(error_kind(&document), ErrorKind::MalformedAst);
}

#[test]
fn test_aggregation_compares_with_number() {
    let document = json!({
        "types": [person_type()],
        "expressions": [{
            "ruleId": "crowd",
            "patterns": [
                {"variables": [{"name": "p", "dataType": "Person"}]},
                {"variables": [{"name": "n", "dataType": "Person", "aggregation": "count"}]}
            ],
            "constraints": comparison(
                json!({"type": "variable", "name": "n"}),
                ">",
                number(10.0)
            ),
            "action": {"jobs": [job("print", vec![json!({"type": "variable", "name": "n"})])]}
        }]
    });
    assert!(should_pass(&document));
}

#[test]
fn test_logical_expression() {
    let constraints = json!({
        "type": "logicalExpr",
        "left": comparison(field_access("p", "age"), ">", number(18.0)),
        "operations": [
            {"op": "AND", "right": comparison(field_access("p", "name"), "!=", string(""))},
            {"op": "OR", "right": comparison(field_access("p", "name"), "<", number(3.0))}
        ]
    });
    let document = person_program(vec![person_rule(
        "r",
        constraints,
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    // The last operation compares a string with a number
    assert_eq!(error_kind(&document), ErrorKind::IncompatibleTypes);
}

#[test]
fn test_arithmetic_in_comparison() {
    let sum = json!({
        "type": "binaryOp",
        "left": field_access("p", "age"),
        "operator": "+",
        "right": number(1.0)
    });
    let document = person_program(vec![person_rule(
        "r",
        comparison(sum, ">", number(18.0)),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert!(should_pass(&document));
}

#[test]
fn test_base64_operator() {
    // "Pj0=" decodes to ">="
    let document = person_program(vec![person_rule(
        "r",
        comparison(field_access("p", "age"), "Pj0=", number(18.0)),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert!(should_pass(&document));
}

#[test]
fn test_unknown_operator() {
    let document = person_program(vec![person_rule(
        "r",
        comparison(field_access("p", "age"), "=~", number(18.0)),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert_eq!(error_kind(&document), ErrorKind::MalformedAst);
}

#[test]
fn test_unknown_constraint_node() {
    let document = person_program(vec![person_rule(
        "r",
        json!({"type": "lambda"}),
        vec![job("print", vec![field_access("p", "name")])],
    )]);
    assert_eq!(error_message(&document), "unknown argument type: lambda");
}

#[test]
fn test_function_call_return_type() {
    let upper = json!({"type": "functionCall", "name": "UPPER", "args": [field_access("p", "name")]});
    let length = json!({"type": "functionCall", "name": "length", "args": []});
    let document = person_program(vec![
        person_rule("a", comparison(upper, "==", string("ALICE")), vec![job("print", vec![field_access("p", "name")])]),
        person_rule("b", comparison(length, ">", number(3.0)), vec![job("print", vec![field_access("p", "name")])]),
    ]);
    assert!(should_pass(&document));
}

#[test]
fn test_duplicate_rule_id_is_discarded() {
    let rule = || {
        person_rule(
            "same",
            comparison(field_access("p", "age"), ">", number(1.0)),
            vec![job("print", vec![field_access("p", "name")])],
        )
    };
    let analysis = check(&person_program(vec![rule(), rule()])).unwrap();
    assert_eq!(analysis.discarded.len(), 1);
    assert_eq!(analysis.discarded[0].kind(), ErrorKind::DuplicateRuleId);
}
