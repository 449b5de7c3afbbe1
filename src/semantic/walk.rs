//! Default recursion helpers.
//!
//! `ASTVisitor` has no default method bodies, so recursion is always
//! explicit. These functions are an opt-in convenience: each `walk_*` calls
//! `accept` on every child of the node, in source order, and nothing else.
//! A pass calls them from its own visit methods when it wants the usual
//! top-down traversal, and simply skips the call to prune a subtree.
//!
//! Leaf nodes (identifiers, literals, operator tags) have no walk function.

use crate::ast::{
    ArrayType, BaseType, ConstDeclaration, ConstExpression, DeclarationSequence, Division,
    Expression, FPSection, FPSectionList, Factor, FieldList, FieldListSequence, FormalParameters,
    FormalType, IdentDefList, IdentifierList, IntegerDivision, Length, LengthList,
    LogicalConjunction, Module, Modulo, Multiplication, Node, Number, PointerType,
    ProcedureDeclaration, ProcedureHeading, ProcedureType, QualidentType, RecordType, Root,
    SimpleExpression, SingleTerm, Term, TermOperation, Type, TypeDeclaration, VariableDeclaration,
    VariableDeclarationList,
};
use crate::semantic::visiters::ASTVisitor;
use crate::utils::errors::OberonResult;

pub fn walk_root(visitor: &mut dyn ASTVisitor, root: &Root) -> OberonResult<()> {
    root.module.accept(visitor)
}

pub fn walk_module(visitor: &mut dyn ASTVisitor, module: &Module) -> OberonResult<()> {
    module.name.accept(visitor)?;
    if let Some(imports) = &module.imports {
        imports.accept(visitor)?;
    }
    walk_declarations(visitor, &module.declarations)?;
    module.end_name.accept(visitor)
}

/// Visits the sections of a declaration sequence: constants, types,
/// variables, procedures. An empty `VAR` section is still visited.
pub fn walk_declarations(
    visitor: &mut dyn ASTVisitor,
    declarations: &DeclarationSequence,
) -> OberonResult<()> {
    for constant in &declarations.constants {
        constant.accept(visitor)?;
    }
    for ty in &declarations.types {
        ty.accept(visitor)?;
    }
    declarations.variables.accept(visitor)?;
    for procedure in &declarations.procedures {
        procedure.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_const_declaration(
    visitor: &mut dyn ASTVisitor,
    declaration: &ConstDeclaration,
) -> OberonResult<()> {
    declaration.name.accept(visitor)?;
    declaration.value.accept(visitor)
}

pub fn walk_const_expression(
    visitor: &mut dyn ASTVisitor,
    expression: &ConstExpression,
) -> OberonResult<()> {
    expression.expression.accept(visitor)
}

pub fn walk_type_declaration(
    visitor: &mut dyn ASTVisitor,
    declaration: &TypeDeclaration,
) -> OberonResult<()> {
    declaration.name.accept(visitor)?;
    declaration.declared_type.accept(visitor)
}

pub fn walk_variable_declaration(
    visitor: &mut dyn ASTVisitor,
    declaration: &VariableDeclaration,
) -> OberonResult<()> {
    declaration.names.accept(visitor)?;
    declaration.var_type.accept(visitor)
}

pub fn walk_variable_declaration_list(
    visitor: &mut dyn ASTVisitor,
    list: &VariableDeclarationList,
) -> OberonResult<()> {
    for declaration in &list.declarations {
        declaration.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_procedure_declaration(
    visitor: &mut dyn ASTVisitor,
    declaration: &ProcedureDeclaration,
) -> OberonResult<()> {
    declaration.heading.accept(visitor)?;
    walk_declarations(visitor, &declaration.body)?;
    if let Some(value) = &declaration.return_value {
        value.accept(visitor)?;
    }
    declaration.end_name.accept(visitor)
}

pub fn walk_procedure_heading(
    visitor: &mut dyn ASTVisitor,
    heading: &ProcedureHeading,
) -> OberonResult<()> {
    heading.name.accept(visitor)?;
    if let Some(parameters) = &heading.parameters {
        parameters.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_ident_def_list(visitor: &mut dyn ASTVisitor, list: &IdentDefList) -> OberonResult<()> {
    for def in &list.defs {
        def.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_type(visitor: &mut dyn ASTVisitor, ty: &Type) -> OberonResult<()> {
    ty.as_node().accept(visitor)
}

pub fn walk_qualident_type(
    visitor: &mut dyn ASTVisitor,
    qualident_type: &QualidentType,
) -> OberonResult<()> {
    qualident_type.name.accept(visitor)
}

pub fn walk_array_type(visitor: &mut dyn ASTVisitor, array_type: &ArrayType) -> OberonResult<()> {
    array_type.lengths.accept(visitor)?;
    array_type.element.accept(visitor)
}

pub fn walk_length_list(visitor: &mut dyn ASTVisitor, list: &LengthList) -> OberonResult<()> {
    for length in &list.lengths {
        length.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_length(visitor: &mut dyn ASTVisitor, length: &Length) -> OberonResult<()> {
    length.value.accept(visitor)
}

pub fn walk_record_type(visitor: &mut dyn ASTVisitor, record_type: &RecordType) -> OberonResult<()> {
    if let Some(base) = &record_type.base {
        base.accept(visitor)?;
    }
    record_type.fields.accept(visitor)
}

pub fn walk_base_type(visitor: &mut dyn ASTVisitor, base_type: &BaseType) -> OberonResult<()> {
    base_type.name.accept(visitor)
}

pub fn walk_field_list_sequence(
    visitor: &mut dyn ASTVisitor,
    sequence: &FieldListSequence,
) -> OberonResult<()> {
    for field_list in &sequence.field_lists {
        field_list.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_field_list(visitor: &mut dyn ASTVisitor, field_list: &FieldList) -> OberonResult<()> {
    field_list.names.accept(visitor)?;
    field_list.field_type.accept(visitor)
}

pub fn walk_pointer_type(visitor: &mut dyn ASTVisitor, pointer_type: &PointerType) -> OberonResult<()> {
    pointer_type.target.accept(visitor)
}

pub fn walk_procedure_type(
    visitor: &mut dyn ASTVisitor,
    procedure_type: &ProcedureType,
) -> OberonResult<()> {
    if let Some(parameters) = &procedure_type.parameters {
        parameters.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_expression(visitor: &mut dyn ASTVisitor, expression: &Expression) -> OberonResult<()> {
    expression.simple.accept(visitor)
}

pub fn walk_simple_expression(
    visitor: &mut dyn ASTVisitor,
    expression: &SimpleExpression,
) -> OberonResult<()> {
    expression.first.accept(visitor)?;
    for operation in &expression.operations {
        operation.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_single_term(visitor: &mut dyn ASTVisitor, single_term: &SingleTerm) -> OberonResult<()> {
    if let Some(sign) = &single_term.sign {
        sign.as_node().accept(visitor)?;
    }
    single_term.term.accept(visitor)
}

pub fn walk_term_operation(
    visitor: &mut dyn ASTVisitor,
    operation: &TermOperation,
) -> OberonResult<()> {
    operation.operator.as_node().accept(visitor)?;
    operation.term.accept(visitor)
}

pub fn walk_term(visitor: &mut dyn ASTVisitor, term: &Term) -> OberonResult<()> {
    term.first.accept(visitor)?;
    for operation in &term.operations {
        operation.as_node().accept(visitor)?;
    }
    Ok(())
}

pub fn walk_factor(visitor: &mut dyn ASTVisitor, factor: &Factor) -> OberonResult<()> {
    factor.as_node().accept(visitor)
}

pub fn walk_number(visitor: &mut dyn ASTVisitor, number: &Number) -> OberonResult<()> {
    number.as_node().accept(visitor)
}

pub fn walk_multiplication(visitor: &mut dyn ASTVisitor, op: &Multiplication) -> OberonResult<()> {
    op.right.accept(visitor)
}

pub fn walk_division(visitor: &mut dyn ASTVisitor, op: &Division) -> OberonResult<()> {
    op.right.accept(visitor)
}

pub fn walk_integer_division(visitor: &mut dyn ASTVisitor, op: &IntegerDivision) -> OberonResult<()> {
    op.right.accept(visitor)
}

pub fn walk_modulo(visitor: &mut dyn ASTVisitor, op: &Modulo) -> OberonResult<()> {
    op.right.accept(visitor)
}

pub fn walk_logical_conjunction(
    visitor: &mut dyn ASTVisitor,
    op: &LogicalConjunction,
) -> OberonResult<()> {
    op.right.accept(visitor)
}

pub fn walk_formal_parameters(
    visitor: &mut dyn ASTVisitor,
    parameters: &FormalParameters,
) -> OberonResult<()> {
    parameters.sections.accept(visitor)?;
    if let Some(result) = &parameters.result {
        result.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_fp_section_list(visitor: &mut dyn ASTVisitor, list: &FPSectionList) -> OberonResult<()> {
    for section in &list.sections {
        section.accept(visitor)?;
    }
    Ok(())
}

pub fn walk_fp_section(visitor: &mut dyn ASTVisitor, section: &FPSection) -> OberonResult<()> {
    section.names.accept(visitor)?;
    section.formal_type.accept(visitor)
}

pub fn walk_formal_type(visitor: &mut dyn ASTVisitor, formal_type: &FormalType) -> OberonResult<()> {
    formal_type.name.accept(visitor)
}

pub fn walk_identifier_list(visitor: &mut dyn ASTVisitor, list: &IdentifierList) -> OberonResult<()> {
    for identifier in &list.identifiers {
        identifier.accept(visitor)?;
    }
    Ok(())
}
