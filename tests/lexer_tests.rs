use oberonc::frontend::lexer::scan;
use oberonc::frontend::token::Token;
use oberonc::utils::errors::{OberonError, OberonResult};
use oberonc::LineNumber;

fn tokens(source: &str) -> OberonResult<Vec<Token>> {
    let mut state = LineNumber::default();
    Ok(scan(&mut state, source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

#[test]
fn test_module_header() -> OberonResult<()> {
    let mut state = LineNumber::default();
    let scanned = scan(&mut state, "MODULE Lists;\nIMPORT Out;\nEND Lists.")?;
    let expected = vec![
        (Token::Module, 1),
        (Token::Ident("Lists".to_string()), 1),
        (Token::Semicolon, 1),
        (Token::Import, 2),
        (Token::Ident("Out".to_string()), 2),
        (Token::Semicolon, 2),
        (Token::End, 3),
        (Token::Ident("Lists".to_string()), 3),
        (Token::Dot, 3),
    ];
    assert_eq!(scanned, expected);
    Ok(())
}

#[test]
fn test_operators_and_punctuation() -> OberonResult<()> {
    let scanned = tokens("+ - * / DIV MOD & OR = : , ( )")?;
    let expected = vec![
        Token::Plus,
        Token::Minus,
        Token::Times,
        Token::Slash,
        Token::Div,
        Token::Mod,
        Token::And,
        Token::Or,
        Token::Equal,
        Token::Colon,
        Token::Comma,
        Token::LParen,
        Token::RParen,
    ];
    assert_eq!(scanned, expected);
    Ok(())
}

#[test]
fn test_keywords_are_case_sensitive() -> OberonResult<()> {
    let scanned = tokens("RECORD record Record POINTER TO")?;
    assert_eq!(
        scanned,
        vec![
            Token::Record,
            Token::Ident("record".to_string()),
            Token::Ident("Record".to_string()),
            Token::Pointer,
            Token::To,
        ]
    );
    Ok(())
}

#[test]
fn test_numbers() -> OberonResult<()> {
    let scanned = tokens("42 0FFH 1AH 3.25 2. 1.5E2 4.0E-1")?;
    assert_eq!(
        scanned,
        vec![
            Token::Integer(42),
            Token::Integer(255),
            Token::Integer(26),
            Token::Real(3.25),
            Token::Real(2.0),
            Token::Real(150.0),
            Token::Real(0.4),
        ]
    );
    Ok(())
}

#[test]
fn test_invalid_numbers() {
    assert!(matches!(
        tokens("1A"),
        Err(OberonError::InvalidNumber { number, line: 1 }) if number == "1A"
    ));
    assert!(matches!(tokens("1.0E"), Err(OberonError::InvalidNumber { .. })));
    assert!(matches!(
        tokens("99999999999999999999"),
        Err(OberonError::InvalidNumber { .. })
    ));
}

#[test]
fn test_strings() -> OberonResult<()> {
    let scanned = tokens("\"hello world\" \"\"")?;
    assert_eq!(
        scanned,
        vec![
            Token::StringLiteral("hello world".to_string()),
            Token::StringLiteral(String::new()),
        ]
    );
    Ok(())
}

#[test]
fn test_string_errors() {
    assert!(matches!(
        tokens("\"open"),
        Err(OberonError::UnterminatedString { line: 1 })
    ));
    assert!(matches!(
        tokens("\"two\nlines\""),
        Err(OberonError::MultilineString { line: 2 })
    ));
}

#[test]
fn test_nested_comments() -> OberonResult<()> {
    let mut state = LineNumber::default();
    let source = "(* outer (* inner *)\n still outer *) CONST (* trailing *)";
    let scanned = scan(&mut state, source)?;
    assert_eq!(scanned, vec![(Token::Const, 2)]);
    assert_eq!(state.line, 2);
    Ok(())
}

#[test]
fn test_parenthesis_is_not_a_comment() -> OberonResult<()> {
    assert_eq!(
        tokens("(a)")?,
        vec![Token::LParen, Token::Ident("a".to_string()), Token::RParen]
    );
    Ok(())
}

#[test]
fn test_comments_and_whitespace_interleave() -> OberonResult<()> {
    let mut state = LineNumber::default();
    let scanned = scan(&mut state, " (*a*)\n\t(*b*)(*c*)\n ( x")?;
    assert_eq!(
        scanned,
        vec![(Token::LParen, 3), (Token::Ident("x".to_string()), 3)]
    );
    Ok(())
}

#[test]
fn test_unterminated_comment() {
    assert!(matches!(
        tokens("\n(* never (* closed *)"),
        Err(OberonError::UnterminatedComment { line: 2 })
    ));
}

#[test]
fn test_unknown_character() {
    assert!(matches!(
        tokens("CONST x = 1 # 2;"),
        Err(OberonError::UnknownToken { token: '#', line: 1 })
    ));
}

#[test]
fn test_empty_source() -> OberonResult<()> {
    assert!(tokens("  \n\t (* nothing *) ")?.is_empty());
    Ok(())
}
