// Abstract Syntax Tree definitions for the Oberon front end
// This module contains all AST node types and related traits.

mod traits;
pub use traits::{Node, NodeKind};

// AST node modules
mod declarations;
mod expressions;
mod literals;
mod program;
mod types;

pub use declarations::{
    ConstDeclaration, DeclarationSequence, FPSection, FPSectionList, FormalParameters, FormalType,
    IdentDefList, IdentifierList, ProcedureDeclaration, ProcedureHeading, TypeDeclaration,
    VariableDeclaration, VariableDeclarationList,
};
pub use expressions::{
    AddOperator, BinaryMinus, BinaryPlus, ConstExpression, Division, Expression, Factor,
    FactorKind, IntegerDivision, LogicalConjunction, LogicalDisjunction, Modulo, MulOperator,
    Multiplication, Sign, SimpleExpression, SingleTerm, Term, TermOperation, UnaryMinus, UnaryPlus,
};
pub use literals::{IdentDef, Identifier, Integer, Number, NumberKind, Qualident, Real, StringLiteral};
pub use program::{Module, Root};
pub use types::{
    ArrayType, BaseType, FieldList, FieldListSequence, Length, LengthList, PointerType,
    ProcedureType, QualidentType, RecordType, Type, TypeKind,
};
