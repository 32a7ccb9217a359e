//! Integration tests for the static type model and function registry

use tsd_core::type_system::{FunctionRegistry, Operator, StaticType};
use tsd_core::{Limits, vocabulary};

#[test]
fn test_synonym_transparency() {
    let bool_type = StaticType::from_name(vocabulary::BOOL);
    let boolean_type = StaticType::from_name(vocabulary::BOOLEAN);

    for symbol in ["==", "!=", "<", ">", "<=", ">="] {
        let op = Operator::from_symbol(symbol).unwrap();
        assert!(
            bool_type.compatible_with(&boolean_type, op),
            "bool and boolean should be compatible under {symbol}"
        );
    }
}

#[test]
fn test_variable_type_is_never_compatible_by_itself() {
    // The aggregation exception lives in the expression analyzer
    assert!(!StaticType::Variable.compatible_with(&StaticType::NUMBER, Operator::Greater));
}

#[test]
fn test_isolated_registry_does_not_touch_global() {
    let isolated = FunctionRegistry::new();
    isolated.register("ONLY_HERE", StaticType::NUMBER, None);

    assert!(isolated.contains("only_here"));
    assert!(!FunctionRegistry::global().contains("only_here"));
}

#[test]
fn test_base64_operator_respects_configured_payload() {
    let tight = Limits {
        max_operator_payload: 2,
        ..Limits::default()
    };
    assert!(Operator::decode("PT0=", &tight).is_err());
    assert!(Operator::decode("PT0=", &Limits::default()).is_ok());
}
