//! Integration tests for binding and operation checks

use poly_binding::{BinaryOp, BindError, Binding, Checker, Scope};
use poly_types::{NamedParameter, Payload, Type, Value};

#[test]
fn test_console_log_accepts_number_literal() {
    let scope = Scope::prelude();
    let mut checker = Checker::new();

    let console = scope.lookup("console").unwrap();
    let log = checker.eval_member(console, "log").unwrap();
    assert_eq!(log.payload, Payload::Native("console.log".to_string()));

    let mut logged = Vec::new();
    let result = checker
        .eval_call(&log, &[Binding::number(2.0)], |args| {
            logged.extend(args.iter().map(|arg| arg.payload.clone()));
            Ok(Payload::Void)
        })
        .unwrap();

    assert_eq!(result, Binding::void());
    assert_eq!(logged, vec![Payload::Number(2.0)]);
}

#[test]
fn test_console_log_rejects_logic() {
    let scope = Scope::prelude();
    let mut checker = Checker::new();

    let log = checker
        .eval_member(scope.lookup("console").unwrap(), "log")
        .unwrap();
    let err = checker
        .eval_call(&log, &[Binding::logic(true)], |_| Ok(Payload::Void))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument 0 of type true does not match parameter type Text | Number"
    );
}

#[test]
fn test_console_log_arity() {
    let scope = Scope::prelude();
    let mut checker = Checker::new();

    let log = checker
        .eval_member(scope.lookup("console").unwrap(), "log")
        .unwrap();
    let err = checker
        .eval_call(&log, &[Binding::text("a"), Binding::text("b")], |_| {
            Ok(Payload::Void)
        })
        .unwrap_err();
    assert_eq!(err, BindError::ArityMismatch { expected: 1, actual: 2 });
}

#[test]
fn test_undefined_name() {
    let scope = Scope::prelude();
    assert_eq!(
        scope.lookup("window").unwrap_err().to_string(),
        "'window' was never defined"
    );
}

#[test]
fn test_member_through_union_object() {
    let mut checker = Checker::new();
    let shape = Type::union([
        Type::dictionary([("area", Type::Number), ("radius", Type::Number)]),
        Type::dictionary([("area", Type::Number), ("side", Type::Number)]),
    ]);

    let area = checker.check_member(&shape, "area").unwrap();
    assert_eq!(area, Type::union([Type::Number, Type::Number]));
    assert!(matches!(
        checker.check_member(&shape, "radius"),
        Err(BindError::NoMember { .. })
    ));

    // A union of identical branches still reduces for arithmetic
    assert_eq!(
        checker.check_binary(BinaryOp::Multiply, &area, &Type::Number).unwrap(),
        Type::Number
    );
}

#[test]
fn test_call_through_union_of_functions() {
    let mut checker = Checker::new();
    let f = Type::function(vec![NamedParameter::new("x", Type::Number)], Type::Text);
    let g = Type::function(
        vec![NamedParameter::new("y", Type::union([Type::Number, Type::Logic]))],
        Type::Logic,
    );
    let either = Type::union([f, g]);

    let ret = checker
        .check_call(&either, &[Value::number(1.0).into_literal()])
        .unwrap();
    assert_eq!(ret, Type::union([Type::Text, Type::Logic]));

    // The projected parameter is `Number | (Number | Logic)`; text matches no branch
    assert!(matches!(
        checker.check_call(&either, &[Type::Text]),
        Err(BindError::ArgumentMismatch { index: 0, .. })
    ));
}

#[test]
fn test_mixed_arity_union_is_not_callable() {
    let mut checker = Checker::new();
    let unary = Type::function(vec![NamedParameter::new("x", Type::Number)], Type::Void);
    let nullary = Type::function(vec![], Type::Void);
    let either = Type::union([unary, nullary]);
    assert!(matches!(
        checker.check_call(&either, &[]),
        Err(BindError::NotCallable { .. })
    ));
}

#[test]
fn test_arithmetic_on_bindings() {
    let mut scope = Scope::new();
    let mut checker = Checker::new();

    scope.define("width", Binding::number(3.0)).unwrap();
    scope.define("label", Binding::text("ab")).unwrap();

    let width = scope.lookup("width").unwrap().clone();
    let label = scope.lookup("label").unwrap().clone();

    let area = checker.eval_binary(BinaryOp::Multiply, &width, &width).unwrap();
    assert_eq!(area, Binding::new(Payload::Number(9.0), Type::Number));

    let banner = checker.eval_binary(BinaryOp::Multiply, &label, &width).unwrap();
    assert_eq!(banner.payload, Payload::Text("ababab".to_string()));

    let err = checker.eval_binary(BinaryOp::Add, &label, &width).unwrap_err();
    assert_eq!(
        err,
        BindError::InvalidOperands {
            op: BinaryOp::Add,
            lhs: Type::Text,
            rhs: Type::Number,
        }
    );
}

#[test]
fn test_union_operand_is_irreducible() {
    let mut checker = Checker::new();
    let maybe = Binding::number(1.0).widen(Type::union([Type::Number, Type::Text]));
    assert!(matches!(
        checker.eval_binary(BinaryOp::Add, &maybe, &Binding::number(1.0)),
        Err(BindError::IrreducibleOperand { .. })
    ));
}

#[test]
fn test_template_rendering() {
    let mut checker = Checker::new();
    let sum = checker
        .eval_binary(BinaryOp::Add, &Binding::number(1.5), &Binding::number(2.5))
        .unwrap();
    let rendered = checker
        .eval_template(&[Binding::text("total: "), sum])
        .unwrap();
    assert_eq!(rendered.payload, Payload::Text("total: 4".to_string()));

    assert!(matches!(
        checker.eval_template(&[Binding::logic(false)]),
        Err(BindError::NotDisplayable { .. })
    ));
}

#[test]
fn test_member_through_nested_union_object() {
    let mut checker = Checker::new();
    let circle = Type::dictionary([("area", Type::Number)]);
    let square = Type::dictionary([("area", Type::Number)]);
    let shape = Type::union([Type::union([circle, square])]);

    let area = checker.check_member(&shape, "area").unwrap();
    assert_eq!(
        checker.check_binary(BinaryOp::Multiply, &area, &Type::Number).unwrap(),
        Type::Number
    );
    assert_eq!(checker.check_template_chunk(&area).unwrap(), Type::Number);
}
