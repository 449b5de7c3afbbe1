use super::traits::impl_node;
use super::{DeclarationSequence, Identifier, IdentifierList};

/// Compilation unit entry point handed from the parser to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub module: Module,
}

impl Root {
    pub fn new(module: Module) -> Self {
        Self { module }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: Identifier,
    pub imports: Option<IdentifierList>,
    pub declarations: DeclarationSequence,
    pub end_name: Identifier,
}

impl Module {
    pub fn new(
        name: Identifier,
        imports: Option<IdentifierList>,
        declarations: DeclarationSequence,
        end_name: Identifier,
    ) -> Self {
        Self {
            name,
            imports,
            declarations,
            end_name,
        }
    }
}

impl_node! {
    Root => Root, visit_root;
    Module => Module, visit_module;
}
