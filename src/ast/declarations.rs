use super::traits::impl_node;
use super::{ConstExpression, Expression, IdentDef, Identifier, Qualident, Type};

/// Declarations of a module or procedure body, grouped by section.
///
/// This is not a node of its own: the owning `Module` or
/// `ProcedureDeclaration` visits the sections in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationSequence {
    pub constants: Vec<ConstDeclaration>,
    pub types: Vec<TypeDeclaration>,
    pub variables: VariableDeclarationList,
    pub procedures: Vec<ProcedureDeclaration>,
}

impl DeclarationSequence {
    pub fn new(
        constants: Vec<ConstDeclaration>,
        types: Vec<TypeDeclaration>,
        variables: VariableDeclarationList,
        procedures: Vec<ProcedureDeclaration>,
    ) -> Self {
        Self {
            constants,
            types,
            variables,
            procedures,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
            && self.types.is_empty()
            && self.variables.declarations.is_empty()
            && self.procedures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDeclaration {
    pub name: IdentDef,
    pub value: ConstExpression,
}

impl ConstDeclaration {
    pub fn new(name: IdentDef, value: ConstExpression) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: IdentDef,
    pub declared_type: Type,
}

impl TypeDeclaration {
    pub fn new(name: IdentDef, declared_type: Type) -> Self {
        Self {
            name,
            declared_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentDefList {
    pub defs: Vec<IdentDef>,
}

impl IdentDefList {
    pub fn new(defs: Vec<IdentDef>) -> Self {
        Self { defs }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub names: IdentDefList,
    pub var_type: Type,
}

impl VariableDeclaration {
    pub fn new(names: IdentDefList, var_type: Type) -> Self {
        Self { names, var_type }
    }
}

/// Contents of one `VAR` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDeclarationList {
    pub declarations: Vec<VariableDeclaration>,
}

impl VariableDeclarationList {
    pub fn new(declarations: Vec<VariableDeclaration>) -> Self {
        Self { declarations }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureHeading {
    pub name: IdentDef,
    pub parameters: Option<FormalParameters>,
}

impl ProcedureHeading {
    pub fn new(name: IdentDef, parameters: Option<FormalParameters>) -> Self {
        Self { name, parameters }
    }
}

/// `ProcedureHeading ";" DeclarationSequence [RETURN expression] END ident`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDeclaration {
    pub heading: ProcedureHeading,
    pub body: DeclarationSequence,
    pub return_value: Option<Expression>,
    pub end_name: Identifier,
}

impl ProcedureDeclaration {
    pub fn new(
        heading: ProcedureHeading,
        body: DeclarationSequence,
        return_value: Option<Expression>,
        end_name: Identifier,
    ) -> Self {
        Self {
            heading,
            body,
            return_value,
            end_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.heading.name.name
    }
}

/// `"(" [FPSection {";" FPSection}] ")" [":" qualident]`
#[derive(Debug, Clone, PartialEq)]
pub struct FormalParameters {
    pub sections: FPSectionList,
    pub result: Option<Qualident>,
}

impl FormalParameters {
    pub fn new(sections: FPSectionList, result: Option<Qualident>) -> Self {
        Self { sections, result }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FPSectionList {
    pub sections: Vec<FPSection>,
}

impl FPSectionList {
    pub fn new(sections: Vec<FPSection>) -> Self {
        Self { sections }
    }
}

/// `[VAR] ident {"," ident} ":" FormalType`
#[derive(Debug, Clone, PartialEq)]
pub struct FPSection {
    pub by_reference: bool,
    pub names: IdentifierList,
    pub formal_type: FormalType,
}

impl FPSection {
    pub fn new(by_reference: bool, names: IdentifierList, formal_type: FormalType) -> Self {
        Self {
            by_reference,
            names,
            formal_type,
        }
    }
}

/// `{ARRAY OF} qualident`; `open_arrays` counts the `ARRAY OF` prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct FormalType {
    pub open_arrays: usize,
    pub name: Qualident,
}

impl FormalType {
    pub fn new(open_arrays: usize, name: Qualident) -> Self {
        Self { open_arrays, name }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentifierList {
    pub identifiers: Vec<Identifier>,
}

impl IdentifierList {
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        Self { identifiers }
    }
}

impl_node! {
    ConstDeclaration => ConstDeclaration, visit_const_declaration;
    TypeDeclaration => TypeDeclaration, visit_type_declaration;
    IdentDefList => IdentDefList, visit_ident_def_list;
    VariableDeclaration => VariableDeclaration, visit_variable_declaration;
    VariableDeclarationList => VariableDeclarationList, visit_variable_declaration_list;
    ProcedureHeading => ProcedureHeading, visit_procedure_heading;
    ProcedureDeclaration => ProcedureDeclaration, visit_procedure_declaration;
    FormalParameters => FormalParameters, visit_formal_parameters;
    FPSectionList => FPSectionList, visit_fp_section_list;
    FPSection => FPSection, visit_fp_section;
    FormalType => FormalType, visit_formal_type;
    IdentifierList => IdentifierList, visit_identifier_list;
}
