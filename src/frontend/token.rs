#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Integer(i64),
    Real(f64),
    StringLiteral(String),
    // Keywords
    Module,
    Import,
    Const,
    Type,
    Var,
    Procedure,
    Begin,
    Return,
    End,
    Array,
    Of,
    Record,
    Pointer,
    To,
    Div,
    Mod,
    Or,
    // Punctuation and operators
    Dot,
    Comma,
    Semicolon,
    Colon,
    Equal,
    LParen,
    RParen,
    Plus,
    Minus,
    Times,
    Slash,
    And,
    Eof,
}

impl Token {
    /// True when both tokens are the same kind, ignoring any carried value.
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "identifier {}", name),
            Token::Integer(value) => write!(f, "{}", value),
            Token::Real(value) => write!(f, "{}", value),
            Token::StringLiteral(value) => write!(f, "\"{}\"", value),
            Token::Module => write!(f, "MODULE"),
            Token::Import => write!(f, "IMPORT"),
            Token::Const => write!(f, "CONST"),
            Token::Type => write!(f, "TYPE"),
            Token::Var => write!(f, "VAR"),
            Token::Procedure => write!(f, "PROCEDURE"),
            Token::Begin => write!(f, "BEGIN"),
            Token::Return => write!(f, "RETURN"),
            Token::End => write!(f, "END"),
            Token::Array => write!(f, "ARRAY"),
            Token::Of => write!(f, "OF"),
            Token::Record => write!(f, "RECORD"),
            Token::Pointer => write!(f, "POINTER"),
            Token::To => write!(f, "TO"),
            Token::Div => write!(f, "DIV"),
            Token::Mod => write!(f, "MOD"),
            Token::Or => write!(f, "OR"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Equal => write!(f, "="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Times => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::And => write!(f, "&"),
            Token::Eof => write!(f, "end of file"),
        }
    }
}
