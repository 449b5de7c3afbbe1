use crate::ast::{
    ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression, Division,
    Expression, FPSection, FPSectionList, Factor, FieldList, FieldListSequence, FormalParameters,
    FormalType, IdentDef, IdentDefList, Identifier, IdentifierList, Integer, IntegerDivision,
    Length, LengthList, LogicalConjunction, LogicalDisjunction, Module, Modulo, Multiplication,
    Number, PointerType, ProcedureDeclaration, ProcedureHeading, ProcedureType, Qualident,
    QualidentType, Real, RecordType, Root, SimpleExpression, SingleTerm, StringLiteral, Term,
    TermOperation, Type, TypeDeclaration, UnaryMinus, UnaryPlus, VariableDeclaration,
    VariableDeclarationList,
};
use crate::utils::errors::OberonResult;

/// One method per node variant, none of them defaulted: a pass that misses a
/// variant does not compile.
///
/// `Node::accept` calls exactly the method for the node's own variant and
/// nothing else. Each method decides whether, and in which order, to call
/// `accept` on the node's children. `crate::semantic::walk` has helpers that
/// visit every child in source order.
///
/// `Err` aborts the traversal; passes that continue after a semantic error
/// record it in their own diagnostics sink and return `Ok`.
pub trait ASTVisitor {
    // Root and module
    fn visit_root(&mut self, root: &Root) -> OberonResult<()>;
    fn visit_module(&mut self, module: &Module) -> OberonResult<()>;

    // Names and literals
    fn visit_identifier(&mut self, identifier: &Identifier) -> OberonResult<()>;
    fn visit_ident_def(&mut self, ident_def: &IdentDef) -> OberonResult<()>;
    fn visit_qualident(&mut self, qualident: &Qualident) -> OberonResult<()>;
    fn visit_number(&mut self, number: &Number) -> OberonResult<()>;
    fn visit_integer(&mut self, integer: &Integer) -> OberonResult<()>;
    fn visit_real(&mut self, real: &Real) -> OberonResult<()>;
    fn visit_string(&mut self, string: &StringLiteral) -> OberonResult<()>;

    // Declarations
    fn visit_const_declaration(&mut self, declaration: &ConstDeclaration) -> OberonResult<()>;
    fn visit_const_expression(&mut self, expression: &ConstExpression) -> OberonResult<()>;
    fn visit_type_declaration(&mut self, declaration: &TypeDeclaration) -> OberonResult<()>;
    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> OberonResult<()>;
    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList) -> OberonResult<()>;
    fn visit_procedure_declaration(&mut self, declaration: &ProcedureDeclaration) -> OberonResult<()>;
    fn visit_procedure_heading(&mut self, heading: &ProcedureHeading) -> OberonResult<()>;

    // Types
    fn visit_type(&mut self, ty: &Type) -> OberonResult<()>;
    fn visit_array_type(&mut self, array_type: &ArrayType) -> OberonResult<()>;
    fn visit_base_type(&mut self, base_type: &BaseType) -> OberonResult<()>;
    fn visit_record_type(&mut self, record_type: &RecordType) -> OberonResult<()>;
    fn visit_pointer_type(&mut self, pointer_type: &PointerType) -> OberonResult<()>;
    fn visit_qualident_type(&mut self, qualident_type: &QualidentType) -> OberonResult<()>;
    fn visit_procedure_type(&mut self, procedure_type: &ProcedureType) -> OberonResult<()>;
    fn visit_field_list(&mut self, field_list: &FieldList) -> OberonResult<()>;
    fn visit_field_list_sequence(&mut self, sequence: &FieldListSequence) -> OberonResult<()>;
    fn visit_ident_def_list(&mut self, list: &IdentDefList) -> OberonResult<()>;
    fn visit_length(&mut self, length: &Length) -> OberonResult<()>;
    fn visit_length_list(&mut self, list: &LengthList) -> OberonResult<()>;

    // Expressions
    fn visit_expression(&mut self, expression: &Expression) -> OberonResult<()>;
    fn visit_simple_expression(&mut self, expression: &SimpleExpression) -> OberonResult<()>;
    fn visit_single_term(&mut self, single_term: &SingleTerm) -> OberonResult<()>;
    fn visit_term_operation(&mut self, operation: &TermOperation) -> OberonResult<()>;
    fn visit_term(&mut self, term: &Term) -> OberonResult<()>;
    fn visit_factor(&mut self, factor: &Factor) -> OberonResult<()>;
    fn visit_binary_plus(&mut self, op: &BinaryPlus) -> OberonResult<()>;
    fn visit_binary_minus(&mut self, op: &BinaryMinus) -> OberonResult<()>;
    fn visit_logical_disjunction(&mut self, op: &LogicalDisjunction) -> OberonResult<()>;
    fn visit_multiplication(&mut self, op: &Multiplication) -> OberonResult<()>;
    fn visit_division(&mut self, op: &Division) -> OberonResult<()>;
    fn visit_integer_division(&mut self, op: &IntegerDivision) -> OberonResult<()>;
    fn visit_modulo(&mut self, op: &Modulo) -> OberonResult<()>;
    fn visit_logical_conjunction(&mut self, op: &LogicalConjunction) -> OberonResult<()>;
    fn visit_unary_plus(&mut self, op: &UnaryPlus) -> OberonResult<()>;
    fn visit_unary_minus(&mut self, op: &UnaryMinus) -> OberonResult<()>;

    // Procedure plumbing
    fn visit_formal_parameters(&mut self, parameters: &FormalParameters) -> OberonResult<()>;
    fn visit_formal_type(&mut self, formal_type: &FormalType) -> OberonResult<()>;
    fn visit_fp_section(&mut self, section: &FPSection) -> OberonResult<()>;
    fn visit_fp_section_list(&mut self, list: &FPSectionList) -> OberonResult<()>;
    fn visit_identifier_list(&mut self, list: &IdentifierList) -> OberonResult<()>;
}
