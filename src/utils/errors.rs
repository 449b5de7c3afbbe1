use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OberonError {
    // File and I/O errors
    #[error("File read error: {0}")]
    FileReadError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    // Lexical analysis errors
    #[error("Unknown token '{token}' at line {line}")]
    UnknownToken { token: char, line: usize },
    #[error("Unterminated comment at line {line}")]
    UnterminatedComment { line: usize },
    #[error("Unterminated string literal at line {line}")]
    UnterminatedString { line: usize },
    #[error("Multiline string literals not supported at line {line}")]
    MultilineString { line: usize },
    #[error("Invalid number '{number}' at line {line}")]
    InvalidNumber { number: String, line: usize },

    // Parsing errors
    #[error("Syntax error at line {line}: expected '{expected}', found '{found}'")]
    SyntaxError {
        expected: String,
        found: String,
        line: usize,
    },

    // Symbol table errors
    #[error("Symbol '{name}' already defined in this scope")]
    SymbolAlreadyDefined { name: String },
    #[error("Invalid identifier '{identifier}'")]
    InvalidIdentifier { identifier: String },
    #[error("Scope error: {0}")]
    ScopeError(String),

    // Constant evaluation errors
    #[error("Constant evaluation error: {message}")]
    ConstantEvaluation { message: String },
    #[error("Undefined constant '{name}'")]
    UndefinedConstant { name: String },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in {operation}")]
    Overflow { operation: String },

    // Output errors
    #[error("Output error: {0}")]
    OutputError(String),
}

impl OberonError {
    /// Create a syntax error
    pub fn syntax_error(expected: impl Into<String>, found: impl Into<String>, line: usize) -> Self {
        OberonError::SyntaxError {
            expected: expected.into(),
            found: found.into(),
            line,
        }
    }

    /// Create a constant evaluation error
    pub fn evaluation_error(message: impl Into<String>) -> Self {
        OberonError::ConstantEvaluation {
            message: message.into(),
        }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        OberonError::Overflow {
            operation: operation.into(),
        }
    }
}

// Type alias for Result with OberonError
pub type OberonResult<T> = Result<T, OberonError>;
