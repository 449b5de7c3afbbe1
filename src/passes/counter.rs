use crate::ast::{
    ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression, Division,
    Expression, FPSection, FPSectionList, Factor, FieldList, FieldListSequence, FormalParameters,
    FormalType, IdentDef, IdentDefList, Identifier, IdentifierList, Integer, IntegerDivision,
    Length, LengthList, LogicalConjunction, LogicalDisjunction, Module, Modulo, Multiplication,
    Node, NodeKind, Number, PointerType, ProcedureDeclaration, ProcedureHeading, ProcedureType,
    Qualident, QualidentType, Real, RecordType, Root, SimpleExpression, SingleTerm, StringLiteral,
    Term, TermOperation, Type, TypeDeclaration, UnaryMinus, UnaryPlus, VariableDeclaration,
    VariableDeclarationList,
};
use crate::semantic::visiters::ASTVisitor;
use crate::semantic::walk;
use crate::utils::errors::OberonResult;
use std::collections::BTreeMap;
use tracing::trace;

/// Records every dispatched node, in visiting order and per kind.
#[derive(Debug, Default)]
pub struct NodeCounter {
    order: Vec<NodeKind>,
    by_kind: BTreeMap<NodeKind, usize>,
}

impl NodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the whole tree below `node`, `node` included.
    pub fn count_tree(node: &dyn Node) -> OberonResult<Self> {
        let mut counter = Self::new();
        node.accept(&mut counter)?;
        Ok(counter)
    }

    pub fn order(&self) -> &[NodeKind] {
        &self.order
    }

    pub fn by_kind(&self) -> &BTreeMap<NodeKind, usize> {
        &self.by_kind
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    fn record(&mut self, kind: NodeKind) {
        trace!(%kind, "visit");
        self.order.push(kind);
        *self.by_kind.entry(kind).or_insert(0) += 1;
    }
}

impl ASTVisitor for NodeCounter {
    fn visit_root(&mut self, root: &Root) -> OberonResult<()> {
        self.record(NodeKind::Root);
        walk::walk_root(self, root)
    }

    fn visit_module(&mut self, module: &Module) -> OberonResult<()> {
        self.record(NodeKind::Module);
        walk::walk_module(self, module)
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) -> OberonResult<()> {
        self.record(NodeKind::Identifier);
        Ok(())
    }

    fn visit_ident_def(&mut self, _def: &IdentDef) -> OberonResult<()> {
        self.record(NodeKind::IdentDef);
        Ok(())
    }

    fn visit_qualident(&mut self, _qualident: &Qualident) -> OberonResult<()> {
        self.record(NodeKind::Qualident);
        Ok(())
    }

    fn visit_number(&mut self, number: &Number) -> OberonResult<()> {
        self.record(NodeKind::Number);
        walk::walk_number(self, number)
    }

    fn visit_integer(&mut self, _integer: &Integer) -> OberonResult<()> {
        self.record(NodeKind::Integer);
        Ok(())
    }

    fn visit_real(&mut self, _real: &Real) -> OberonResult<()> {
        self.record(NodeKind::Real);
        Ok(())
    }

    fn visit_string(&mut self, _string: &StringLiteral) -> OberonResult<()> {
        self.record(NodeKind::String);
        Ok(())
    }

    fn visit_const_declaration(&mut self, declaration: &ConstDeclaration) -> OberonResult<()> {
        self.record(NodeKind::ConstDeclaration);
        walk::walk_const_declaration(self, declaration)
    }

    fn visit_const_expression(&mut self, expression: &ConstExpression) -> OberonResult<()> {
        self.record(NodeKind::ConstExpression);
        walk::walk_const_expression(self, expression)
    }

    fn visit_type_declaration(&mut self, declaration: &TypeDeclaration) -> OberonResult<()> {
        self.record(NodeKind::TypeDeclaration);
        walk::walk_type_declaration(self, declaration)
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> OberonResult<()> {
        self.record(NodeKind::VariableDeclaration);
        walk::walk_variable_declaration(self, declaration)
    }

    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList) -> OberonResult<()> {
        self.record(NodeKind::VariableDeclarationList);
        walk::walk_variable_declaration_list(self, list)
    }

    fn visit_procedure_declaration(&mut self, declaration: &ProcedureDeclaration) -> OberonResult<()> {
        self.record(NodeKind::ProcedureDeclaration);
        walk::walk_procedure_declaration(self, declaration)
    }

    fn visit_procedure_heading(&mut self, heading: &ProcedureHeading) -> OberonResult<()> {
        self.record(NodeKind::ProcedureHeading);
        walk::walk_procedure_heading(self, heading)
    }

    fn visit_type(&mut self, ty: &Type) -> OberonResult<()> {
        self.record(NodeKind::Type);
        walk::walk_type(self, ty)
    }

    fn visit_array_type(&mut self, array_type: &ArrayType) -> OberonResult<()> {
        self.record(NodeKind::ArrayType);
        walk::walk_array_type(self, array_type)
    }

    fn visit_base_type(&mut self, base_type: &BaseType) -> OberonResult<()> {
        self.record(NodeKind::BaseType);
        walk::walk_base_type(self, base_type)
    }

    fn visit_record_type(&mut self, record_type: &RecordType) -> OberonResult<()> {
        self.record(NodeKind::RecordType);
        walk::walk_record_type(self, record_type)
    }

    fn visit_pointer_type(&mut self, pointer_type: &PointerType) -> OberonResult<()> {
        self.record(NodeKind::PointerType);
        walk::walk_pointer_type(self, pointer_type)
    }

    fn visit_qualident_type(&mut self, qualident_type: &QualidentType) -> OberonResult<()> {
        self.record(NodeKind::QualidentType);
        walk::walk_qualident_type(self, qualident_type)
    }

    fn visit_procedure_type(&mut self, procedure_type: &ProcedureType) -> OberonResult<()> {
        self.record(NodeKind::ProcedureType);
        walk::walk_procedure_type(self, procedure_type)
    }

    fn visit_field_list(&mut self, field_list: &FieldList) -> OberonResult<()> {
        self.record(NodeKind::FieldList);
        walk::walk_field_list(self, field_list)
    }

    fn visit_field_list_sequence(&mut self, sequence: &FieldListSequence) -> OberonResult<()> {
        self.record(NodeKind::FieldListSequence);
        walk::walk_field_list_sequence(self, sequence)
    }

    fn visit_ident_def_list(&mut self, list: &IdentDefList) -> OberonResult<()> {
        self.record(NodeKind::IdentDefList);
        walk::walk_ident_def_list(self, list)
    }

    fn visit_length(&mut self, length: &Length) -> OberonResult<()> {
        self.record(NodeKind::Length);
        walk::walk_length(self, length)
    }

    fn visit_length_list(&mut self, list: &LengthList) -> OberonResult<()> {
        self.record(NodeKind::LengthList);
        walk::walk_length_list(self, list)
    }

    fn visit_expression(&mut self, expression: &Expression) -> OberonResult<()> {
        self.record(NodeKind::Expression);
        walk::walk_expression(self, expression)
    }

    fn visit_simple_expression(&mut self, expression: &SimpleExpression) -> OberonResult<()> {
        self.record(NodeKind::SimpleExpression);
        walk::walk_simple_expression(self, expression)
    }

    fn visit_single_term(&mut self, single_term: &SingleTerm) -> OberonResult<()> {
        self.record(NodeKind::SingleTerm);
        walk::walk_single_term(self, single_term)
    }

    fn visit_term_operation(&mut self, operation: &TermOperation) -> OberonResult<()> {
        self.record(NodeKind::TermOperation);
        walk::walk_term_operation(self, operation)
    }

    fn visit_term(&mut self, term: &Term) -> OberonResult<()> {
        self.record(NodeKind::Term);
        walk::walk_term(self, term)
    }

    fn visit_factor(&mut self, factor: &Factor) -> OberonResult<()> {
        self.record(NodeKind::Factor);
        walk::walk_factor(self, factor)
    }

    fn visit_binary_plus(&mut self, _op: &BinaryPlus) -> OberonResult<()> {
        self.record(NodeKind::BinaryPlus);
        Ok(())
    }

    fn visit_binary_minus(&mut self, _op: &BinaryMinus) -> OberonResult<()> {
        self.record(NodeKind::BinaryMinus);
        Ok(())
    }

    fn visit_logical_disjunction(&mut self, _op: &LogicalDisjunction) -> OberonResult<()> {
        self.record(NodeKind::LogicalDisjunction);
        Ok(())
    }

    fn visit_multiplication(&mut self, op: &Multiplication) -> OberonResult<()> {
        self.record(NodeKind::Multiplication);
        walk::walk_multiplication(self, op)
    }

    fn visit_division(&mut self, op: &Division) -> OberonResult<()> {
        self.record(NodeKind::Division);
        walk::walk_division(self, op)
    }

    fn visit_integer_division(&mut self, op: &IntegerDivision) -> OberonResult<()> {
        self.record(NodeKind::IntegerDivision);
        walk::walk_integer_division(self, op)
    }

    fn visit_modulo(&mut self, op: &Modulo) -> OberonResult<()> {
        self.record(NodeKind::Modulo);
        walk::walk_modulo(self, op)
    }

    fn visit_logical_conjunction(&mut self, op: &LogicalConjunction) -> OberonResult<()> {
        self.record(NodeKind::LogicalConjunction);
        walk::walk_logical_conjunction(self, op)
    }

    fn visit_unary_plus(&mut self, _op: &UnaryPlus) -> OberonResult<()> {
        self.record(NodeKind::UnaryPlus);
        Ok(())
    }

    fn visit_unary_minus(&mut self, _op: &UnaryMinus) -> OberonResult<()> {
        self.record(NodeKind::UnaryMinus);
        Ok(())
    }

    fn visit_formal_parameters(&mut self, parameters: &FormalParameters) -> OberonResult<()> {
        self.record(NodeKind::FormalParameters);
        walk::walk_formal_parameters(self, parameters)
    }

    fn visit_formal_type(&mut self, formal_type: &FormalType) -> OberonResult<()> {
        self.record(NodeKind::FormalType);
        walk::walk_formal_type(self, formal_type)
    }

    fn visit_fp_section(&mut self, section: &FPSection) -> OberonResult<()> {
        self.record(NodeKind::FPSection);
        walk::walk_fp_section(self, section)
    }

    fn visit_fp_section_list(&mut self, list: &FPSectionList) -> OberonResult<()> {
        self.record(NodeKind::FPSectionList);
        walk::walk_fp_section_list(self, list)
    }

    fn visit_identifier_list(&mut self, list: &IdentifierList) -> OberonResult<()> {
        self.record(NodeKind::IdentifierList);
        walk::walk_identifier_list(self, list)
    }
}
