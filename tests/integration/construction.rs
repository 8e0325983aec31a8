//! Construction through non-public constructors.

use crate::fixtures::Token;
use mirror::{construct, construct_default, ConstructorArg, ReflectError};

#[test]
fn parameterless_constructor() {
    let token: Token = construct_default().unwrap();
    assert_eq!(token.value(), "");
    assert_eq!(token.uses(), 0);
}

#[test]
fn single_parameter_constructor_assigns_state() {
    let token: Token =
        construct(vec![ConstructorArg::of::<String>("abc123".to_string())]).unwrap();
    assert_eq!(token.value(), "abc123");
    assert_eq!(token.uses(), 1);
}

#[test]
fn two_parameter_constructor_matches_exact_signature() {
    let token: Token = construct(vec![
        ConstructorArg::of::<String>("xyz".to_string()),
        ConstructorArg::of::<i64>(40),
    ])
    .unwrap();
    assert_eq!(token.value(), "xyz");
    assert_eq!(token.uses(), 40);
}

#[test]
fn mismatched_signature_fails_with_not_found() {
    // An i32 where the registered constructor takes i64 is not a match.
    let err = construct::<Token>(vec![
        ConstructorArg::of::<String>("xyz".to_string()),
        ConstructorArg::of::<i32>(40),
    ])
    .unwrap_err();
    match err {
        ReflectError::ConstructorNotFound { type_name } => assert_eq!(type_name, "Token"),
        other => panic!("expected ConstructorNotFound, got {other:?}"),
    }
}

#[test]
fn argument_order_is_part_of_the_signature() {
    assert!(matches!(
        construct::<Token>(vec![
            ConstructorArg::of::<i64>(40),
            ConstructorArg::of::<String>("xyz".to_string()),
        ]),
        Err(ReflectError::ConstructorNotFound { .. })
    ));
}
