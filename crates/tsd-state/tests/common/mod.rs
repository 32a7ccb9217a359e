//! Common fragments for incremental state tests.

#![allow(dead_code)]

use serde_json::{Value, json};

/// `type User(#name: string, age: number)`
pub fn user_type() -> Value {
    json!({
        "name": "User",
        "fields": [
            {"name": "name", "type": "string", "isPrimaryKey": true},
            {"name": "age", "type": "number"}
        ]
    })
}

pub fn user_fact(name: &str, age: f64) -> Value {
    json!({"typeName": "User", "fields": [
        {"name": "name", "value": {"type": "string", "value": name}},
        {"name": "age", "value": {"type": "number", "value": age}}
    ]})
}

/// `rule id : {x: number} / x > 1 ==> print(x)`, valid without any types.
pub fn number_rule(id: &str) -> Value {
    json!({
        "ruleId": id,
        "set": {"variables": [{"name": "x", "dataType": "number"}]},
        "constraints": {
            "type": "comparison",
            "left": {"type": "variable", "name": "x"},
            "operator": ">",
            "right": {"type": "number", "value": 1}
        },
        "action": {"jobs": [{"name": "print", "args": [{"type": "variable", "name": "x"}]}]}
    })
}

/// `rule id : {u: User} / u.age >= 18 ==> print(u)`
pub fn user_rule(id: &str) -> Value {
    json!({
        "ruleId": id,
        "set": {"variables": [{"name": "u", "dataType": "User"}]},
        "constraints": {
            "type": "comparison",
            "left": {"type": "fieldAccess", "object": "u", "field": "age"},
            "operator": ">=",
            "right": {"type": "number", "value": 18}
        },
        "action": {"jobs": [{"name": "print", "args": [{"type": "variable", "name": "u"}]}]}
    })
}

pub fn reset() -> Value {
    json!({"type": "reset"})
}
