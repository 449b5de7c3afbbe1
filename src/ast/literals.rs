use super::traits::impl_node;

/// A bare name: import entries, closing names, formal parameter names.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A declared name with an optional export mark (`name*`).
#[derive(Debug, Clone, PartialEq)]
pub struct IdentDef {
    pub name: String,
    pub exported: bool,
}

impl IdentDef {
    pub fn new(name: impl Into<String>, exported: bool) -> Self {
        Self {
            name: name.into(),
            exported,
        }
    }
}

/// A reference by name, optionally qualified by an imported module (`Module.Name`).
#[derive(Debug, Clone, PartialEq)]
pub struct Qualident {
    pub module: Option<String>,
    pub name: String,
}

impl Qualident {
    pub fn new(module: Option<String>, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }

    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }

    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Some(module.into()), name)
    }

    pub fn is_qualified(&self) -> bool {
        self.module.is_some()
    }
}

impl std::fmt::Display for Qualident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}.{}", module, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberKind {
    Integer(Integer),
    Real(Real),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub kind: NumberKind,
}

impl Number {
    pub fn new(kind: NumberKind) -> Self {
        Self { kind }
    }

    pub fn integer(value: i64) -> Self {
        Self::new(NumberKind::Integer(Integer::new(value)))
    }

    pub fn real(value: f64) -> Self {
        Self::new(NumberKind::Real(Real::new(value)))
    }

    pub fn as_node(&self) -> &dyn super::Node {
        match &self.kind {
            NumberKind::Integer(integer) => integer,
            NumberKind::Real(real) => real,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    pub value: i64,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Self { value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Real {
    pub value: f64,
}

impl Real {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// String literal; the node variant is `NodeKind::String`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl_node! {
    Identifier => Identifier, visit_identifier;
    IdentDef => IdentDef, visit_ident_def;
    Qualident => Qualident, visit_qualident;
    Number => Number, visit_number;
    Integer => Integer, visit_integer;
    Real => Real, visit_real;
    StringLiteral => String, visit_string;
}
