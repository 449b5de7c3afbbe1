// Source file handling
pub mod source {
    // Extensions accepted by `crate::read`
    pub const FILE_EXTENSIONS: &[&str] = &["Mod", "ob"];
}

// Printer layout
pub mod printer {
    pub const DEFAULT_INDENT: usize = 2;
    pub const MAX_INDENT: usize = 8;
}

// Names visible in every module without declaration
pub mod predeclared {
    use lazy_static::lazy_static;
    use std::collections::HashSet;

    lazy_static! {
        pub static ref TYPES: HashSet<&'static str> = [
            "BOOLEAN", "CHAR", "INTEGER", "REAL", "LONGINT", "LONGREAL", "BYTE", "SET",
        ]
        .iter()
        .copied()
        .collect();
    }

    pub const TRUE: &str = "TRUE";
    pub const FALSE: &str = "FALSE";

    pub fn boolean_constant(name: &str) -> Option<bool> {
        match name {
            TRUE => Some(true),
            FALSE => Some(false),
            _ => None,
        }
    }
}

// Parser limits
pub mod parser {
    // Upper bound on `ARRAY OF ARRAY OF ...` nesting in a formal type
    pub const MAX_OPEN_ARRAY_DEPTH: usize = 16;
    // Upper bound on nested expressions, types and procedures
    pub const MAX_NESTING_DEPTH: usize = 100;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_constants() {
        assert_eq!(predeclared::boolean_constant("TRUE"), Some(true));
        assert_eq!(predeclared::boolean_constant("FALSE"), Some(false));
        assert_eq!(predeclared::boolean_constant("True"), None);
    }
}
