use std::{fs::File, io::Read, path::Path};

pub mod ast;
pub mod frontend;
pub mod passes;
pub mod semantic;
pub mod utils;

use crate::ast::Root;
use crate::frontend::{lexer, Parser};
use crate::utils::config::source::FILE_EXTENSIONS;
use crate::utils::errors::{OberonError, OberonResult};

pub struct LineNumber {
    pub line: usize,
}

impl Default for LineNumber {
    fn default() -> Self {
        Self { line: 1 }
    }
}

pub fn read(filename: &Path) -> OberonResult<String> {
    let accepted = filename
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FILE_EXTENSIONS.contains(&ext));
    if !accepted {
        return Err(OberonError::FileReadError(format!(
            "File must have one of the extensions: {}",
            FILE_EXTENSIONS.join(", ")
        )));
    }
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Scans and parses one module.
pub fn parse_source(source: &str) -> OberonResult<Root> {
    let mut state = LineNumber::default();
    let tokens = lexer::scan(&mut state, source)?;
    Parser::new(&tokens).parse()
}
