//! Xuple-space declaration tests.

mod common;

use common::*;
use serde_json::{Value, json};
use std::time::Duration;
use tsd_core::ErrorKind;
use tsd_semantic::{ConsumptionPolicy, RetentionPolicy, SelectionPolicy};

fn spaces(declarations: Vec<Value>) -> Value {
    json!({"xupleSpaceDeclarations": declarations})
}

#[test]
fn test_full_declaration() {
    let document = spaces(vec![json!({
        "type": "xupleSpaceDeclaration",
        "name": "jobs",
        "selectionPolicy": "lifo",
        "consumptionPolicy": {"type": "limited", "limit": 3},
        "retentionPolicy": {"type": "duration", "duration": "1w"},
        "maxSize": 100
    })]);
    let analysis = check(&document).unwrap();
    let space = &analysis.xuple_spaces[0];
    assert_eq!(space.name, "jobs");
    assert_eq!(space.selection, SelectionPolicy::Lifo);
    assert_eq!(space.consumption, ConsumptionPolicy::Limited(3));
    assert_eq!(
        space.retention,
        RetentionPolicy::Duration(Duration::from_secs(604_800))
    );
    assert_eq!(space.max_size, Some(100));
}

#[test]
fn test_numeric_duration_in_seconds() {
    let document = spaces(vec![json!({
        "name": "cache",
        "retentionPolicy": {"type": "duration", "duration": 90}
    })]);
    let analysis = check(&document).unwrap();
    assert_eq!(
        analysis.xuple_spaces[0].retention,
        RetentionPolicy::Duration(Duration::from_secs(90))
    );
}

#[test]
fn test_per_agent_consumption() {
    let document = spaces(vec![json!({
        "name": "broadcast",
        "selectionPolicy": "random",
        "consumptionPolicy": {"type": "per-agent"}
    })]);
    let analysis = check(&document).unwrap();
    assert_eq!(analysis.xuple_spaces[0].consumption, ConsumptionPolicy::PerAgent);
}

#[test]
fn test_policy_errors() {
    let invalid = [
        json!({"name": "a", "selectionPolicy": "priority"}),
        json!({"name": "b", "consumptionPolicy": {"type": "limited", "limit": 0}}),
        json!({"name": "c", "consumptionPolicy": {"type": "twice"}}),
        json!({"name": "d", "retentionPolicy": {"type": "duration", "duration": "-5m"}}),
        json!({"name": "e", "retentionPolicy": {"type": "duration", "duration": "soon"}}),
        json!({"name": "f", "retentionPolicy": {"type": "duration"}}),
        json!({"name": "g", "maxSize": -1}),
    ];
    for declaration in invalid {
        assert_eq!(
            error_kind(&spaces(vec![declaration])),
            ErrorKind::XupleSpacePolicy
        );
    }
}

#[test]
fn test_duplicate_space_names() {
    let document = spaces(vec![json!({"name": "inbox"}), json!({"name": "inbox"})]);
    assert_eq!(
        error_message(&document),
        "xuple-space 'inbox' is declared more than once"
    );
}
