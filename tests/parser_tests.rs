use oberonc::ast::{
    AddOperator, FactorKind, MulOperator, NumberKind, Qualident, Sign, TypeKind,
};
use oberonc::frontend::lexer::scan;
use oberonc::frontend::Parser;
use oberonc::parse_source;
use oberonc::utils::config::parser::{MAX_NESTING_DEPTH, MAX_OPEN_ARRAY_DEPTH};
use oberonc::utils::errors::{OberonError, OberonResult};
use oberonc::LineNumber;

#[test]
fn test_minimal_module() -> OberonResult<()> {
    let root = parse_source("MODULE Empty; END Empty.")?;
    let module = &root.module;
    assert_eq!(module.name.name, "Empty");
    assert_eq!(module.end_name.name, "Empty");
    assert!(module.imports.is_none());
    assert!(module.declarations.is_empty());
    Ok(())
}

#[test]
fn test_imports_and_sections() -> OberonResult<()> {
    let source = "MODULE M;
        IMPORT Out, Files;
        CONST n* = 10; s = \"abc\";
        TYPE T = INTEGER;
        VAR a, b*: T; f: Files.File;
        END M.";
    let root = parse_source(source)?;
    let module = &root.module;

    let imports = module.imports.as_ref().map(|list| {
        list.identifiers
            .iter()
            .map(|identifier| identifier.name.as_str())
            .collect::<Vec<_>>()
    });
    assert_eq!(imports, Some(vec!["Out", "Files"]));

    let declarations = &module.declarations;
    assert_eq!(declarations.constants.len(), 2);
    assert!(declarations.constants[0].name.exported);
    assert!(!declarations.constants[1].name.exported);
    assert_eq!(declarations.types.len(), 1);
    assert_eq!(declarations.variables.declarations.len(), 2);

    let first = &declarations.variables.declarations[0];
    let names: Vec<_> = first.names.defs.iter().map(|def| (def.name.as_str(), def.exported)).collect();
    assert_eq!(names, vec![("a", false), ("b", true)]);

    let second = &declarations.variables.declarations[1];
    match &second.var_type.kind {
        TypeKind::Qualident(named) => assert_eq!(named.name, Qualident::qualified("Files", "File")),
        other => panic!("expected a named type, found {:?}", other),
    }
    Ok(())
}

#[test]
fn test_precedence_chain() -> OberonResult<()> {
    let root = parse_source("MODULE M; CONST x = a + b * c; END M.")?;
    let simple = &root.module.declarations.constants[0].value.expression.simple;

    assert!(simple.first.sign.is_none());
    assert!(simple.first.term.operations.is_empty());
    assert_eq!(simple.operations.len(), 1);

    let operation = &simple.operations[0];
    assert!(matches!(operation.operator, AddOperator::Plus(_)));
    assert_eq!(operation.term.operations.len(), 1);
    let multiplication = &operation.term.operations[0];
    assert!(matches!(multiplication, MulOperator::Multiplication(_)));
    assert_eq!(
        multiplication.right().kind,
        FactorKind::Designator(Qualident::simple("c"))
    );
    Ok(())
}

#[test]
fn test_sign_belongs_to_first_term() -> OberonResult<()> {
    let root = parse_source("MODULE M; CONST x = -2 * 3 - 1; END M.")?;
    let simple = &root.module.declarations.constants[0].value.expression.simple;
    assert!(matches!(simple.first.sign, Some(Sign::Minus(_))));
    assert_eq!(simple.first.term.operations.len(), 1);
    assert!(matches!(simple.operations[0].operator, AddOperator::Minus(_)));
    Ok(())
}

#[test]
fn test_all_multiplicative_operators() -> OberonResult<()> {
    let root = parse_source("MODULE M; CONST x = 1 * 2 / 3 DIV 4 MOD 5 & 6; END M.")?;
    let term = &root.module.declarations.constants[0].value.expression.simple.first.term;
    let symbols: Vec<_> = term.operations.iter().map(|op| op.symbol()).collect();
    assert_eq!(symbols, vec!["*", "/", "DIV", "MOD", "&"]);
    Ok(())
}

#[test]
fn test_factors() -> OberonResult<()> {
    let root = parse_source("MODULE M; CONST x = (1.5 OR \"s\") + Lib.k; END M.")?;
    let simple = &root.module.declarations.constants[0].value.expression.simple;
    match &simple.first.term.first.kind {
        FactorKind::Parenthesized(inner) => {
            match &inner.simple.first.term.first.kind {
                FactorKind::Number(number) => {
                    assert!(matches!(number.kind, NumberKind::Real(ref real) if real.value == 1.5))
                }
                other => panic!("expected a number, found {:?}", other),
            }
            assert!(matches!(inner.simple.operations[0].operator, AddOperator::Or(_)));
        }
        other => panic!("expected parentheses, found {:?}", other),
    }
    assert_eq!(
        simple.operations[0].term.first.kind,
        FactorKind::Designator(Qualident::qualified("Lib", "k"))
    );
    Ok(())
}

#[test]
fn test_structured_types() -> OberonResult<()> {
    let source = "MODULE M;
        TYPE
          A = ARRAY 2, 3 OF ARRAY 4 OF CHAR;
          Base = RECORD END;
          R = RECORD (Base) x, y: REAL; next: P; END;
          P = POINTER TO R;
          F = PROCEDURE (VAR a: INTEGER): BOOLEAN;
          G = PROCEDURE;
        END M.";
    let root = parse_source(source)?;
    let types = &root.module.declarations.types;

    match &types[0].declared_type.kind {
        TypeKind::Array(array) => {
            assert_eq!(array.lengths.lengths.len(), 2);
            assert!(matches!(array.element.kind, TypeKind::Array(_)));
        }
        other => panic!("expected an array, found {:?}", other),
    }
    match &types[1].declared_type.kind {
        TypeKind::Record(record) => {
            assert!(record.base.is_none());
            assert!(record.fields.field_lists.is_empty());
        }
        other => panic!("expected a record, found {:?}", other),
    }
    match &types[2].declared_type.kind {
        TypeKind::Record(record) => {
            assert_eq!(record.base.as_ref().map(|base| base.name.name.as_str()), Some("Base"));
            assert_eq!(record.fields.field_lists.len(), 2);
            assert_eq!(record.fields.field_lists[0].names.defs.len(), 2);
        }
        other => panic!("expected a record, found {:?}", other),
    }
    assert!(matches!(types[3].declared_type.kind, TypeKind::Pointer(_)));
    match &types[4].declared_type.kind {
        TypeKind::Procedure(procedure) => {
            let parameters = procedure.parameters.as_ref().map(|p| (p.sections.sections.len(), p.result.clone()));
            assert_eq!(parameters, Some((1, Some(Qualident::simple("BOOLEAN")))));
        }
        other => panic!("expected a procedure type, found {:?}", other),
    }
    match &types[5].declared_type.kind {
        TypeKind::Procedure(procedure) => assert!(procedure.parameters.is_none()),
        other => panic!("expected a procedure type, found {:?}", other),
    }
    Ok(())
}

#[test]
fn test_procedure_declaration() -> OberonResult<()> {
    let source = "MODULE M;
        PROCEDURE Sum*(VAR a, b: INTEGER; s: ARRAY OF ARRAY OF CHAR): INTEGER;
          CONST k = 2;
          PROCEDURE Inner; END Inner;
          RETURN a + b * k
        END Sum;
        END M.";
    let root = parse_source(source)?;
    let procedure = &root.module.declarations.procedures[0];
    assert_eq!(procedure.name(), "Sum");
    assert!(procedure.heading.name.exported);
    assert_eq!(procedure.end_name.name, "Sum");
    assert_eq!(procedure.body.constants.len(), 1);
    assert_eq!(procedure.body.procedures.len(), 1);
    assert!(procedure.return_value.is_some());

    let parameters = procedure.heading.parameters.as_ref().expect("parameters");
    assert_eq!(parameters.result, Some(Qualident::simple("INTEGER")));
    let sections = &parameters.sections.sections;
    assert_eq!(sections.len(), 2);
    assert!(sections[0].by_reference);
    assert_eq!(sections[0].names.identifiers.len(), 2);
    assert!(!sections[1].by_reference);
    assert_eq!(sections[1].formal_type.open_arrays, 2);
    assert_eq!(sections[1].formal_type.name, Qualident::simple("CHAR"));
    Ok(())
}

#[test]
fn test_empty_parameter_list() -> OberonResult<()> {
    let root = parse_source("MODULE M; PROCEDURE P(): INTEGER; RETURN 0 END P; END M.")?;
    let parameters = root.module.declarations.procedures[0].heading.parameters.as_ref().expect("parameters");
    assert!(parameters.sections.sections.is_empty());
    Ok(())
}

#[test]
fn test_missing_semicolon() {
    let result = parse_source("MODULE M\nCONST x = 1; END M.");
    match result {
        Err(OberonError::SyntaxError { expected, found, line }) => {
            assert_eq!(expected, ";");
            assert_eq!(found, "CONST");
            assert_eq!(line, 2);
        }
        other => panic!("expected a syntax error, found {:?}", other),
    }
}

#[test]
fn test_missing_factor() {
    assert!(matches!(
        parse_source("MODULE M; CONST x = ; END M."),
        Err(OberonError::SyntaxError { expected, .. }) if expected == "factor"
    ));
}

#[test]
fn test_trailing_input_is_rejected() {
    assert!(matches!(
        parse_source("MODULE M; END M. CONST"),
        Err(OberonError::SyntaxError { .. })
    ));
}

#[test]
fn test_missing_end_dot() {
    assert!(matches!(
        parse_source("MODULE M; END M"),
        Err(OberonError::SyntaxError { found, .. }) if found == "end of file"
    ));
}

#[test]
fn test_open_array_depth_limit() {
    let deep = "ARRAY OF ".repeat(MAX_OPEN_ARRAY_DEPTH + 1);
    let source = format!("MODULE M; PROCEDURE P(a: {}CHAR); END P; END M.", deep);
    let limit = format!("at most {} open array dimensions", MAX_OPEN_ARRAY_DEPTH);
    assert!(matches!(
        parse_source(&source),
        Err(OberonError::SyntaxError { expected, .. }) if expected == limit
    ));

    let allowed = format!("MODULE M; PROCEDURE P(a: {}CHAR); END P; END M.", "ARRAY OF ".repeat(16));
    assert!(parse_source(&allowed).is_ok());
}

#[test]
fn test_parse_expression() -> OberonResult<()> {
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, "x DIV 2")?;
    let expression = Parser::new(&tokens).parse_expression()?;
    assert!(matches!(
        expression.simple.first.term.operations[0],
        MulOperator::IntegerDivision(_)
    ));

    let tokens = scan(&mut state, "x DIV 2 )")?;
    assert!(Parser::new(&tokens).parse_expression().is_err());
    Ok(())
}

fn parenthesized(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_expression_nesting_limit() {
    // The constant's own expression is one level; each pair of parentheses adds one.
    let allowed = format!("MODULE M; CONST x = {}; END M.", parenthesized(MAX_NESTING_DEPTH - 1));
    assert!(parse_source(&allowed).is_ok());

    let too_deep = format!("MODULE M; CONST x = {}; END M.", parenthesized(MAX_NESTING_DEPTH));
    assert!(matches!(
        parse_source(&too_deep),
        Err(OberonError::SyntaxError { expected, .. }) if expected.contains("nested expressions")
    ));
}

#[test]
fn test_very_deep_input_is_a_syntax_error() {
    let expression = format!("MODULE M; CONST x = {}; END M.", parenthesized(20_000));
    assert!(matches!(parse_source(&expression), Err(OberonError::SyntaxError { .. })));

    let pointers = format!("MODULE M; TYPE T = {}INTEGER; END M.", "POINTER TO ".repeat(20_000));
    assert!(matches!(
        parse_source(&pointers),
        Err(OberonError::SyntaxError { expected, .. }) if expected.contains("nested types")
    ));

    let procedures = format!(
        "MODULE M; {} END M.",
        "PROCEDURE P; ".repeat(5_000) + &"END P; ".repeat(5_000)
    );
    assert!(matches!(
        parse_source(&procedures),
        Err(OberonError::SyntaxError { expected, .. }) if expected.contains("nested procedures")
    ));
}
