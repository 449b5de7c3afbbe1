use oberonc::semantic::symboltable::Symbol;
use oberonc::semantic::symboltable::SymbolTable;
use oberonc::semantic::symboltable::SymbolType;
use oberonc::utils::errors::OberonError;

#[cfg(test)]
mod tests {
    use super::*;

    fn variable() -> Symbol {
        Symbol::new(SymbolType::Variable, false)
    }

    fn kind_of(table: &SymbolTable, name: &str) -> Option<SymbolType> {
        table.get(name).map(|symbol| symbol.symbol_type.clone())
    }

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new(SymbolType::Procedure, true);
        assert_eq!(symbol.symbol_type, SymbolType::Procedure);
        assert!(symbol.exported);
    }

    #[test]
    fn test_symbol_table_creation() {
        let table = SymbolTable::new();
        assert_eq!(table.level(), 0);
        assert!(table.get("INTEGER").is_none());
    }

    #[test]
    fn test_predeclared_names() {
        let table = SymbolTable::with_predeclared();
        assert_eq!(table.level(), 0);
        assert_eq!(kind_of(&table, "INTEGER"), Some(SymbolType::Type));
        assert_eq!(kind_of(&table, "CHAR"), Some(SymbolType::Type));
        assert_eq!(kind_of(&table, "TRUE"), Some(SymbolType::Constant));
        assert!(table.get("integer").is_none());
    }

    #[test]
    fn test_insert_and_get_symbol() {
        let mut table = SymbolTable::new();
        assert!(table.insert("count", variable()).is_ok());

        assert_eq!(kind_of(&table, "count"), Some(SymbolType::Variable));
        assert!(table.get("other").is_none());
    }

    #[test]
    fn test_duplicate_symbol() {
        let mut table = SymbolTable::new();
        assert!(table.insert("x", variable()).is_ok());

        let result = table.insert("x", Symbol::new(SymbolType::Constant, false));
        assert!(matches!(result, Err(OberonError::SymbolAlreadyDefined { name }) if name == "x"));
        // The first declaration stays
        assert_eq!(kind_of(&table, "x"), Some(SymbolType::Variable));
    }

    #[test]
    fn test_empty_name() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.insert("", variable()),
            Err(OberonError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_scope_management() {
        let mut table = SymbolTable::new();

        table.push_scope();
        assert_eq!(table.level(), 1);

        table.push_scope();
        assert_eq!(table.level(), 2);

        assert!(table.drop_scope().is_ok());
        assert!(table.drop_scope().is_ok());
        assert_eq!(table.level(), 0);

        assert!(matches!(table.drop_scope(), Err(OberonError::ScopeError(_))));
        assert_eq!(table.level(), 0);
    }

    #[test]
    fn test_shadowing_across_scopes() {
        let mut table = SymbolTable::new();
        assert!(table.insert("x", variable()).is_ok());

        table.push_scope();
        assert!(table.insert("x", Symbol::new(SymbolType::Parameter, false)).is_ok());
        assert_eq!(kind_of(&table, "x"), Some(SymbolType::Parameter));

        assert!(table.drop_scope().is_ok());
        assert_eq!(kind_of(&table, "x"), Some(SymbolType::Variable));
    }

    #[test]
    fn test_inner_names_vanish_with_their_scope() {
        let mut table = SymbolTable::new();
        table.push_scope();
        assert!(table.insert("inner", variable()).is_ok());
        assert!(table.drop_scope().is_ok());
        assert!(table.get("inner").is_none());
    }
}
