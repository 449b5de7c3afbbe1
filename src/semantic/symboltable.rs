use crate::utils::config::predeclared;
use crate::utils::{OberonError, OberonResult};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolType {
    Module,
    Constant,
    Type,
    Variable,
    Parameter,
    Procedure,
}

impl SymbolType {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolType::Module => "module",
            SymbolType::Constant => "constant",
            SymbolType::Type => "type",
            SymbolType::Variable => "variable",
            SymbolType::Parameter => "parameter",
            SymbolType::Procedure => "procedure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub symbol_type: SymbolType,
    pub exported: bool,
}

impl Symbol {
    pub fn new(symbol_type: SymbolType, exported: bool) -> Self {
        Self {
            symbol_type,
            exported,
        }
    }
}

pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// A table whose outermost scope holds the predeclared types and the
    /// boolean constants.
    pub fn with_predeclared() -> Self {
        let mut table = Self::new();
        if let Some(universe) = table.scopes.first_mut() {
            for name in predeclared::TYPES.iter() {
                universe.insert(name.to_string(), Symbol::new(SymbolType::Type, false));
            }
            for name in [predeclared::TRUE, predeclared::FALSE] {
                universe.insert(name.to_string(), Symbol::new(SymbolType::Constant, false));
            }
        }
        table
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn drop_scope(&mut self) -> OberonResult<()> {
        if self.scopes.len() <= 1 {
            return Err(OberonError::ScopeError("Cannot drop global scope - scope underflow".to_string()));
        }
        self.scopes.pop();
        Ok(())
    }

    pub fn insert(&mut self, name: &str, symbol: Symbol) -> OberonResult<()> {
        if name.is_empty() {
            return Err(OberonError::InvalidIdentifier {
                identifier: name.to_string(),
            });
        }
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(name) {
                return Err(OberonError::SymbolAlreadyDefined {
                    name: name.to_string(),
                });
            }
            scope.insert(name.to_string(), symbol);
        }
        Ok(())
    }

    // Get a reference to a symbol by name, searching from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Nesting level of the innermost scope; the outermost scope is level 0.
    pub fn level(&self) -> usize {
        self.scopes.len() - 1
    }
}
