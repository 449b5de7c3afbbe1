use oberonc::ast::Node;
use oberonc::frontend::lexer::scan;
use oberonc::frontend::Parser;
use oberonc::parse_source;
use oberonc::passes::{Evaluator, Value};
use oberonc::utils::errors::{OberonError, OberonResult};
use oberonc::LineNumber;

fn eval(source: &str) -> OberonResult<Value> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    let expression = Parser::new(&tokens).parse_expression()?;
    Evaluator::new().evaluate_expression(&expression)
}

#[test]
fn test_integer_arithmetic() -> OberonResult<()> {
    assert_eq!(eval("3 + 4 * 2")?, Value::Integer(11));
    assert_eq!(eval("(3 + 4) * 2")?, Value::Integer(14));
    assert_eq!(eval("10 - 2 - 3")?, Value::Integer(5));
    assert_eq!(eval("-2 * 3 + 1")?, Value::Integer(-5));
    assert_eq!(eval("+7")?, Value::Integer(7));
    assert_eq!(eval("0FFH + 1")?, Value::Integer(256));
    Ok(())
}

#[test]
fn test_sign_applies_to_whole_term() -> OberonResult<()> {
    assert_eq!(eval("-7 DIV 2")?, Value::Integer(-3));
    assert_eq!(eval("(-7) DIV 2")?, Value::Integer(-4));
    Ok(())
}

#[test]
fn test_floored_div_and_mod() -> OberonResult<()> {
    assert_eq!(eval("7 DIV 2")?, Value::Integer(3));
    assert_eq!(eval("7 MOD 2")?, Value::Integer(1));
    assert_eq!(eval("(-7) MOD 2")?, Value::Integer(1));
    assert_eq!(eval("7 DIV (-2)")?, Value::Integer(-4));
    assert_eq!(eval("7 MOD (-2)")?, Value::Integer(-1));
    Ok(())
}

#[test]
fn test_real_arithmetic() -> OberonResult<()> {
    assert_eq!(eval("7 / 2")?, Value::Real(3.5));
    assert_eq!(eval("1 + 0.5")?, Value::Real(1.5));
    assert_eq!(eval("2.5 * 2")?, Value::Real(5.0));
    assert_eq!(eval("-1.5")?, Value::Real(-1.5));
    Ok(())
}

#[test]
fn test_booleans_and_strings() -> OberonResult<()> {
    assert_eq!(eval("TRUE & FALSE")?, Value::Boolean(false));
    assert_eq!(eval("FALSE OR TRUE")?, Value::Boolean(true));
    assert_eq!(eval("\"abc\"")?, Value::String("abc".to_string()));
    Ok(())
}

#[test]
fn test_division_by_zero() {
    assert!(matches!(eval("1 DIV 0"), Err(OberonError::DivisionByZero)));
    assert!(matches!(eval("1 MOD 0"), Err(OberonError::DivisionByZero)));
    assert!(matches!(eval("1 / 0.0"), Err(OberonError::DivisionByZero)));
}

#[test]
fn test_overflow() {
    assert!(matches!(
        eval("9223372036854775807 + 1"),
        Err(OberonError::Overflow { .. })
    ));
    assert!(matches!(
        eval("4294967296 * 4294967296"),
        Err(OberonError::Overflow { .. })
    ));
}

#[test]
fn test_operand_errors() {
    assert!(matches!(eval("TRUE + 1"), Err(OberonError::ConstantEvaluation { .. })));
    assert!(matches!(eval("1.5 DIV 2"), Err(OberonError::ConstantEvaluation { .. })));
    assert!(matches!(eval("1 & TRUE"), Err(OberonError::ConstantEvaluation { .. })));
    assert!(matches!(eval("-\"s\""), Err(OberonError::ConstantEvaluation { .. })));
}

#[test]
fn test_names() {
    assert!(matches!(
        eval("missing + 1"),
        Err(OberonError::UndefinedConstant { name }) if name == "missing"
    ));
    assert!(matches!(eval("Lib.k"), Err(OberonError::ConstantEvaluation { .. })));
}

#[test]
fn test_module_constants() -> OberonResult<()> {
    let source = "MODULE M;
        CONST a = 2; b = a * 10; half = b / 4; on = TRUE;
        PROCEDURE P;
          CONST a = 5; k = a + b;
        END P;
        END M.";
    let root = parse_source(source)?;
    let mut evaluator = Evaluator::new();
    root.accept(&mut evaluator)?;

    let values: Vec<(&str, &Value)> = evaluator
        .values()
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect();
    assert_eq!(
        values,
        vec![
            ("a", &Value::Integer(2)),
            ("b", &Value::Integer(20)),
            ("half", &Value::Real(5.0)),
            ("on", &Value::Boolean(true)),
            ("P.a", &Value::Integer(5)),
            ("P.k", &Value::Integer(25)),
        ]
    );
    assert_eq!(evaluator.value_of("P.k"), Some(&Value::Integer(25)));
    assert_eq!(evaluator.value_of("k"), None);
    // Procedure-local constants are gone once the procedure is left.
    assert_eq!(evaluator.lookup("a"), Some(&Value::Integer(2)));
    Ok(())
}

#[test]
fn test_module_evaluation_aborts_on_error() -> OberonResult<()> {
    let root = parse_source("MODULE M; CONST a = 1; b = a DIV 0; c = 3; END M.")?;
    let mut evaluator = Evaluator::new();
    assert!(matches!(root.accept(&mut evaluator), Err(OberonError::DivisionByZero)));
    assert_eq!(evaluator.values().len(), 1);
    Ok(())
}

#[test]
fn test_local_declarations_hide_outer_constants() -> OberonResult<()> {
    let shadowed_by_parameter = parse_source(
        "MODULE M; CONST a = 2; PROCEDURE P(a: INTEGER); CONST k = a + 1; END P; END M.",
    )?;
    let mut evaluator = Evaluator::new();
    assert!(matches!(
        shadowed_by_parameter.accept(&mut evaluator),
        Err(OberonError::ConstantEvaluation { message }) if message.contains("'a' is not a constant")
    ));
    assert_eq!(evaluator.value_of("P.k"), None);

    let shadowed_by_variable = parse_source(
        "MODULE M; CONST n = 5;
         PROCEDURE P; VAR n: INTEGER; PROCEDURE Q; CONST k = n * 2; END Q; END P;
         END M.",
    )?;
    let mut evaluator = Evaluator::new();
    assert!(matches!(
        shadowed_by_variable.accept(&mut evaluator),
        Err(OberonError::ConstantEvaluation { .. })
    ));

    let shadowed_by_type = parse_source(
        "MODULE M; CONST T = 1;
         PROCEDURE P; TYPE T = INTEGER; PROCEDURE Q; CONST k = T; END Q; END P;
         END M.",
    )?;
    let mut evaluator = Evaluator::new();
    assert!(shadowed_by_type.accept(&mut evaluator).is_err());
    Ok(())
}

#[test]
fn test_hidden_name_is_visible_again_after_its_scope() {
    let mut evaluator = Evaluator::new();
    evaluator.define("a", Value::Integer(2));
    evaluator.enter_scope("P");
    evaluator.hide("a");
    assert_eq!(evaluator.lookup("a"), None);
    evaluator.leave_scope();
    assert_eq!(evaluator.lookup("a"), Some(&Value::Integer(2)));
}

#[test]
fn test_manual_scopes() -> OberonResult<()> {
    let mut evaluator = Evaluator::new();
    evaluator.define("size", Value::Integer(4));
    evaluator.enter_scope("Local");
    evaluator.define("size", Value::Integer(8));

    let mut state = LineNumber::default();
    let tokens = scan(&mut state, "size * 2")?;
    let expression = Parser::new(&tokens).parse_expression()?;
    assert_eq!(evaluator.evaluate_expression(&expression)?, Value::Integer(16));

    evaluator.leave_scope();
    assert_eq!(evaluator.evaluate_expression(&expression)?, Value::Integer(8));
    Ok(())
}
