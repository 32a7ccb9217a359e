//! Integration tests for AST document ingest.

use serde_json::json;
use tsd_ast::{Constraint, DurationDecl, FactValue, Program, parse_document};
use tsd_core::ErrorKind;

fn person_rule_document() -> serde_json::Value {
    json!({
        "types": [{
            "type": "typeDefinition",
            "name": "Person",
            "line": 1,
            "fields": [
                {"name": "name", "type": "string", "isPrimaryKey": true},
                {"name": "age", "type": "number"}
            ]
        }],
        "expressions": [{
            "type": "expression",
            "ruleId": "adult",
            "line": 3,
            "set": {"type": "set", "variables": [
                {"type": "typedVariable", "name": "p", "dataType": "Person"}
            ]},
            "constraints": {
                "type": "comparison",
                "left": {"type": "fieldAccess", "object": "p", "field": "age"},
                "operator": ">=",
                "right": {"type": "number", "value": 18}
            },
            "action": {"type": "action", "job": {"type": "jobCall", "name": "print", "args": [
                {"type": "fieldAccess", "object": "p", "field": "name"}
            ]}}
        }]
    })
}

#[test]
fn test_full_rule_document() {
    let program = Program::from_json(&person_rule_document()).unwrap();

    assert_eq!(program.types.len(), 1);
    let person = &program.types[0];
    assert_eq!(person.line, 1);
    assert!(person.fields[0].is_primary_key);
    assert!(!person.fields[1].is_primary_key);

    let rule = &program.expressions[0];
    assert_eq!(rule.rule_id(), Some("adult"));
    assert_eq!(rule.line, 3);
    assert_eq!(rule.patterns.len(), 1);
    assert_eq!(rule.variables().next().unwrap().data_type, "Person");
    assert_eq!(rule.action.as_ref().unwrap().jobs[0].name, "print");
}

#[test]
fn test_patterns_take_precedence_over_set() {
    let document = json!({
        "expressions": [{
            "set": {"variables": [{"name": "a", "dataType": "A"}]},
            "patterns": [
                {"variables": [{"name": "b", "dataType": "B"}]},
                {"variables": [{"name": "total", "dataType": "number", "aggregation": "sum"}]}
            ],
            "action": {"jobs": [{"name": "print", "args": []}]}
        }]
    });
    let program = Program::from_json(&document).unwrap();
    let names: Vec<_> = program.expressions[0]
        .variables()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["b", "total"]);
    assert_eq!(
        program.expressions[0].patterns[1].variables[0].aggregation.as_deref(),
        Some("sum")
    );
}

#[test]
fn test_job_and_jobs_together_are_malformed() {
    let document = json!({
        "expressions": [{
            "set": {"variables": [{"name": "a", "dataType": "A"}]},
            "action": {
                "job": {"name": "print", "args": []},
                "jobs": [{"name": "log", "args": []}]
            }
        }]
    });
    let err = Program::from_json(&document).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedAst);
}

#[test]
fn test_fact_values() {
    let document = json!({
        "facts": [{
            "type": "fact",
            "typeName": "Order",
            "fields": [
                {"name": "ref", "value": {"type": "identifier", "value": "o-1"}},
                {"name": "total", "value": {"type": "number", "value": 12.5}},
                {"name": "paid", "value": {"type": "boolean", "value": false}},
                {"name": "owner", "value": {"type": "variableReference", "value": "alice"}}
            ]
        }]
    });
    let program = Program::from_json(&document).unwrap();
    let fact = &program.facts[0];
    assert_eq!(fact.value("ref"), Some(&FactValue::Identifier("o-1".into())));
    assert_eq!(fact.value("total"), Some(&FactValue::Number(12.5)));
    assert_eq!(fact.value("paid"), Some(&FactValue::Bool(false)));
    assert_eq!(
        fact.value("owner"),
        Some(&FactValue::VariableReference("alice".into()))
    );
}

#[test]
fn test_null_payload_is_malformed() {
    let document = json!({
        "facts": [{"typeName": "User", "fields": [
            {"name": "name", "value": {"type": "string", "value": null}}
        ]}]
    });
    let err = Program::from_json(&document).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedAst);
    assert!(err.message().contains("field 'name'"));
}

#[test]
fn test_unknown_fact_value_kind() {
    let document = json!({
        "facts": [{"typeName": "User", "fields": [
            {"name": "tags", "value": {"type": "list", "value": []}}
        ]}]
    });
    let err = Program::from_json(&document).unwrap_err();
    assert!(err.message().contains("unknown fact value type 'list'"));
}

#[test]
fn test_xuple_space_defaults_and_durations() {
    let document = json!({
        "xupleSpaceDeclarations": [
            {"name": "plain"},
            {
                "name": "timed",
                "selectionPolicy": "lifo",
                "consumptionPolicy": {"type": "limited", "limit": 3},
                "retentionPolicy": {"type": "duration", "duration": "2h"},
                "maxSize": 10
            },
            {"name": "numeric", "retentionPolicy": {"type": "duration", "duration": 90}}
        ]
    });
    let program = Program::from_json(&document).unwrap();
    let [plain, timed, numeric] = program.xuple_spaces.as_slice() else {
        panic!("expected three xuple-spaces");
    };

    assert_eq!(plain.selection_policy, "fifo");
    assert_eq!(plain.consumption_policy.kind, "once");
    assert_eq!(plain.retention_policy.kind, "unlimited");
    assert_eq!(plain.max_size, 0.0);

    assert_eq!(timed.consumption_policy.limit, Some(3.0));
    assert_eq!(
        timed.retention_policy.duration,
        Some(DurationDecl::Text("2h".into()))
    );
    assert_eq!(
        numeric.retention_policy.duration,
        Some(DurationDecl::Seconds(90.0))
    );
}

#[test]
fn test_resets_and_actions() {
    let document = json!({
        "resets": [{"type": "reset"}],
        "actions": [{
            "name": "notify",
            "parameters": [
                {"name": "message", "type": "string"},
                {"name": "level", "type": "number", "defaultValue": {"type": "number", "value": 1}},
                {"name": "tag", "type": "string", "optional": true}
            ]
        }]
    });
    let program = Program::from_json(&document).unwrap();
    assert!(program.has_reset());
    let notify = &program.actions[0];
    assert_eq!(notify.required_arity(), 1);
    assert_eq!(
        notify.parameters[1].default_value,
        Some(Constraint::Number(1.0))
    );
}

#[test]
fn test_parse_document_rejects_invalid_json() {
    let err = parse_document("{not json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedAst);
}

#[test]
fn test_non_object_root() {
    let err = Program::from_json(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.message(), "program must be an object");
}

fn nested_sum_text(levels: usize) -> String {
    let mut constraint = r#"{"type": "number", "value": 1}"#.to_string();
    for _ in 0..levels {
        constraint = format!(
            r#"{{"type": "binaryOp", "operator": "+", "left": {constraint}, "right": {{"type": "number", "value": 1}}}}"#
        );
    }
    format!(
        r#"{{"expressions": [{{"ruleId": "deep", "set": {{"variables": []}}, "constraints": {constraint}, "action": {{"jobs": []}}}}]}}"#
    )
}

#[test]
fn test_deep_text_document_exceeds_depth() {
    let err = parse_document(&nested_sum_text(150)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    assert!(err.message().starts_with("AST document nests deeper than 128 levels"));

    assert!(parse_document(&nested_sum_text(40)).is_ok());
}
