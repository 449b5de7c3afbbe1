use crate::frontend::token::Token;
use crate::utils::errors::{OberonError, OberonResult};
use crate::LineNumber;
use std::{iter::Peekable, str::Chars};

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    state: &'a mut LineNumber,
}

impl<'a> Lexer<'a> {
    pub fn new(file_content: &'a str, state: &'a mut LineNumber) -> Self {
        Self {
            chars: file_content.chars().peekable(),
            state,
        }
    }

    pub fn scan(mut self) -> OberonResult<Vec<(Token, usize)>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            if self.chars.peek().is_none() {
                break;
            }
            let line = self.state.line;
            let token = self.scan_token()?;
            tokens.push((token, line));
        }
        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) -> OberonResult<()> {
        loop {
            let next = self.chars.peek().copied();
            match next {
                Some('(') if self.comment_ahead() => self.scan_comment()?,
                Some(ch) if ch.is_whitespace() => self.scan_whitespace(),
                _ => break,
            }
        }
        Ok(())
    }

    // "(*" opens a comment; a lone "(" is a token.
    fn comment_ahead(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.peek() == Some(&'*')
    }

    fn scan_token(&mut self) -> OberonResult<Token> {
        match self.chars.peek() {
            Some(&ch) if ch.is_alphabetic() || ch == '_' => self.scan_identifier(),
            Some(&ch) if ch.is_ascii_digit() => self.scan_number(),
            Some(&'"') => self.scan_string_literal(),
            Some(&ch) => self.scan_single_char_token(ch),
            None => Ok(Token::Eof),
        }
    }

    // Comments nest: (* outer (* inner *) still outer *)
    fn scan_comment(&mut self) -> OberonResult<()> {
        let start_line = self.state.line;
        self.chars.next(); // Consume '('
        self.chars.next(); // Consume '*'
        let mut depth = 1;
        while let Some(ch) = self.chars.next() {
            match ch {
                '\n' => self.state.line += 1,
                '(' if self.chars.peek() == Some(&'*') => {
                    self.chars.next();
                    depth += 1;
                }
                '*' if self.chars.peek() == Some(&')') => {
                    self.chars.next();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(OberonError::UnterminatedComment { line: start_line })
    }

    fn scan_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                if ch == '\n' {
                    self.state.line += 1;
                }
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> OberonResult<Token> {
        let mut identifier = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }
        Ok(self.keyword_or_identifier(identifier))
    }

    // Keywords are upper case only; `module` is an ordinary identifier.
    fn keyword_or_identifier(&self, identifier: String) -> Token {
        match identifier.as_str() {
            "MODULE" => Token::Module,
            "IMPORT" => Token::Import,
            "CONST" => Token::Const,
            "TYPE" => Token::Type,
            "VAR" => Token::Var,
            "PROCEDURE" => Token::Procedure,
            "BEGIN" => Token::Begin,
            "RETURN" => Token::Return,
            "END" => Token::End,
            "ARRAY" => Token::Array,
            "OF" => Token::Of,
            "RECORD" => Token::Record,
            "POINTER" => Token::Pointer,
            "TO" => Token::To,
            "DIV" => Token::Div,
            "MOD" => Token::Mod,
            "OR" => Token::Or,
            _ => Token::Ident(identifier),
        }
    }

    /// integer = digit {digit} | digit {hexDigit} "H"
    /// real    = digit {digit} "." {digit} ["E" ["+" | "-"] digit {digit}]
    fn scan_number(&mut self) -> OberonResult<Token> {
        let mut digits = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() || ('A'..='F').contains(&ch) {
                digits.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }

        match self.chars.peek() {
            Some(&'H') => {
                self.chars.next(); // Consume 'H'
                i64::from_str_radix(&digits, 16)
                    .map(Token::Integer)
                    .map_err(|_| self.invalid_number(format!("{}H", digits)))
            }
            _ if !digits.chars().all(|ch| ch.is_ascii_digit()) => Err(self.invalid_number(digits)),
            Some(&'.') => {
                self.chars.next(); // Consume '.'
                self.scan_real(digits)
            }
            _ => digits
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| self.invalid_number(digits)),
        }
    }

    fn scan_real(&mut self, integer_part: String) -> OberonResult<Token> {
        let mut literal = integer_part;
        literal.push('.');
        let mut fraction = String::new();
        while let Some(&ch) = self.chars.peek().filter(|ch| ch.is_ascii_digit()) {
            fraction.push(ch);
            self.chars.next();
        }
        if fraction.is_empty() {
            fraction.push('0');
        }
        literal.push_str(&fraction);

        if self.chars.peek() == Some(&'E') {
            self.chars.next(); // Consume 'E'
            literal.push('E');
            if let Some(&sign) = self.chars.peek().filter(|ch| **ch == '+' || **ch == '-') {
                literal.push(sign);
                self.chars.next();
            }
            let mut exponent = String::new();
            while let Some(&ch) = self.chars.peek().filter(|ch| ch.is_ascii_digit()) {
                exponent.push(ch);
                self.chars.next();
            }
            if exponent.is_empty() {
                return Err(self.invalid_number(literal));
            }
            literal.push_str(&exponent);
        }

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Real(value)),
            _ => Err(self.invalid_number(literal)),
        }
    }

    fn invalid_number(&self, number: String) -> OberonError {
        OberonError::InvalidNumber {
            number,
            line: self.state.line,
        }
    }

    fn scan_string_literal(&mut self) -> OberonResult<Token> {
        self.chars.next(); // Consume opening quote
        let mut literal = String::new();
        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.chars.next(); // Consume closing quote
                    break;
                }
                Some(&'\n') => {
                    self.state.line += 1;
                    return Err(OberonError::MultilineString { line: self.state.line });
                }
                Some(&ch) => {
                    literal.push(ch);
                    self.chars.next();
                }
                None => {
                    return Err(OberonError::UnterminatedString { line: self.state.line });
                }
            }
        }
        Ok(Token::StringLiteral(literal))
    }

    fn scan_single_char_token(&mut self, ch: char) -> OberonResult<Token> {
        self.chars.next(); // Consume the character
        let token = match ch {
            '.' => Token::Dot,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '=' => Token::Equal,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Times,
            '/' => Token::Slash,
            '&' => Token::And,
            _ => return Err(OberonError::UnknownToken { token: ch, line: self.state.line }),
        };
        Ok(token)
    }
}

// Convenience function mirroring `Lexer::scan`
pub fn scan(state: &mut LineNumber, file_content: &str) -> OberonResult<Vec<(Token, usize)>> {
    let lexer = Lexer::new(file_content, state);
    lexer.scan()
}
