/*
*                    oberonc -- Oberon front end.
*
* module           = MODULE ident ";" [ImportList] DeclarationSequence END ident "." ;
* ImportList       = IMPORT ident { "," ident } ";" ;
* DeclarationSequence = [ CONST { ConstDeclaration ";" } ]
*                    [ TYPE { TypeDeclaration ";" } ]
*                    [ VAR { VariableDeclaration ";" } ]
*                    { ProcedureDeclaration ";" } ;
* ConstDeclaration = identdef "=" ConstExpression ;
* TypeDeclaration  = identdef "=" type ;
* VariableDeclaration = IdentList ":" type ;
* ProcedureDeclaration = ProcedureHeading ";" DeclarationSequence
*                    [ RETURN expression ] END ident ;
* ProcedureHeading = PROCEDURE identdef [ FormalParameters ] ;
* FormalParameters = "(" [ FPSection { ";" FPSection } ] ")" [ ":" qualident ] ;
* FPSection        = [ VAR ] ident { "," ident } ":" FormalType ;
* FormalType       = { ARRAY OF } qualident ;
* type             = qualident | ArrayType | RecordType | PointerType | ProcedureType ;
* ArrayType        = ARRAY length { "," length } OF type ;
* RecordType       = RECORD [ "(" BaseType ")" ] [ FieldListSequence ] END ;
* FieldListSequence = FieldList { ";" FieldList } ;
* FieldList        = IdentList ":" type ;
* PointerType      = POINTER TO type ;
* ProcedureType    = PROCEDURE [ FormalParameters ] ;
* expression       = SimpleExpression ;
* SimpleExpression = [ "+" | "-" ] term { ( "+" | "-" | OR ) term } ;
* term             = factor { ( "*" | "/" | DIV | MOD | "&" ) factor } ;
* factor           = number | string | qualident | "(" expression ")" ;
* identdef         = ident [ "*" ] ;
* qualident        = [ ident "." ] ident ;
*/

use crate::semantic::visiters::ASTVisitor;
use crate::utils::errors::OberonResult;
use std::fmt;

pub trait Node {
    /// Calls the one visit method matching this node's own variant.
    /// Children are never visited here; that is up to the visitor.
    fn accept(&self, visitor: &mut dyn ASTVisitor) -> OberonResult<()>;
    fn kind(&self) -> NodeKind;
}

/// One value per node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Root,
    Module,
    Identifier,
    IdentDef,
    Qualident,
    Number,
    Integer,
    Real,
    String,
    ConstDeclaration,
    ConstExpression,
    TypeDeclaration,
    VariableDeclaration,
    VariableDeclarationList,
    ProcedureDeclaration,
    ProcedureHeading,
    Type,
    ArrayType,
    BaseType,
    RecordType,
    PointerType,
    QualidentType,
    ProcedureType,
    FieldList,
    FieldListSequence,
    IdentDefList,
    Length,
    LengthList,
    Expression,
    SimpleExpression,
    SingleTerm,
    TermOperation,
    Term,
    Factor,
    BinaryPlus,
    BinaryMinus,
    LogicalDisjunction,
    Multiplication,
    Division,
    IntegerDivision,
    Modulo,
    LogicalConjunction,
    UnaryPlus,
    UnaryMinus,
    FormalParameters,
    FormalType,
    FPSection,
    FPSectionList,
    IdentifierList,
}

impl NodeKind {
    pub const ALL: [NodeKind; 49] = [
        NodeKind::Root,
        NodeKind::Module,
        NodeKind::Identifier,
        NodeKind::IdentDef,
        NodeKind::Qualident,
        NodeKind::Number,
        NodeKind::Integer,
        NodeKind::Real,
        NodeKind::String,
        NodeKind::ConstDeclaration,
        NodeKind::ConstExpression,
        NodeKind::TypeDeclaration,
        NodeKind::VariableDeclaration,
        NodeKind::VariableDeclarationList,
        NodeKind::ProcedureDeclaration,
        NodeKind::ProcedureHeading,
        NodeKind::Type,
        NodeKind::ArrayType,
        NodeKind::BaseType,
        NodeKind::RecordType,
        NodeKind::PointerType,
        NodeKind::QualidentType,
        NodeKind::ProcedureType,
        NodeKind::FieldList,
        NodeKind::FieldListSequence,
        NodeKind::IdentDefList,
        NodeKind::Length,
        NodeKind::LengthList,
        NodeKind::Expression,
        NodeKind::SimpleExpression,
        NodeKind::SingleTerm,
        NodeKind::TermOperation,
        NodeKind::Term,
        NodeKind::Factor,
        NodeKind::BinaryPlus,
        NodeKind::BinaryMinus,
        NodeKind::LogicalDisjunction,
        NodeKind::Multiplication,
        NodeKind::Division,
        NodeKind::IntegerDivision,
        NodeKind::Modulo,
        NodeKind::LogicalConjunction,
        NodeKind::UnaryPlus,
        NodeKind::UnaryMinus,
        NodeKind::FormalParameters,
        NodeKind::FormalType,
        NodeKind::FPSection,
        NodeKind::FPSectionList,
        NodeKind::IdentifierList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Module => "Module",
            NodeKind::Identifier => "Identifier",
            NodeKind::IdentDef => "IdentDef",
            NodeKind::Qualident => "Qualident",
            NodeKind::Number => "Number",
            NodeKind::Integer => "Integer",
            NodeKind::Real => "Real",
            NodeKind::String => "String",
            NodeKind::ConstDeclaration => "ConstDeclaration",
            NodeKind::ConstExpression => "ConstExpression",
            NodeKind::TypeDeclaration => "TypeDeclaration",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarationList => "VariableDeclarationList",
            NodeKind::ProcedureDeclaration => "ProcedureDeclaration",
            NodeKind::ProcedureHeading => "ProcedureHeading",
            NodeKind::Type => "Type",
            NodeKind::ArrayType => "ArrayType",
            NodeKind::BaseType => "BaseType",
            NodeKind::RecordType => "RecordType",
            NodeKind::PointerType => "PointerType",
            NodeKind::QualidentType => "QualidentType",
            NodeKind::ProcedureType => "ProcedureType",
            NodeKind::FieldList => "FieldList",
            NodeKind::FieldListSequence => "FieldListSequence",
            NodeKind::IdentDefList => "IdentDefList",
            NodeKind::Length => "Length",
            NodeKind::LengthList => "LengthList",
            NodeKind::Expression => "Expression",
            NodeKind::SimpleExpression => "SimpleExpression",
            NodeKind::SingleTerm => "SingleTerm",
            NodeKind::TermOperation => "TermOperation",
            NodeKind::Term => "Term",
            NodeKind::Factor => "Factor",
            NodeKind::BinaryPlus => "BinaryPlus",
            NodeKind::BinaryMinus => "BinaryMinus",
            NodeKind::LogicalDisjunction => "LogicalDisjunction",
            NodeKind::Multiplication => "Multiplication",
            NodeKind::Division => "Division",
            NodeKind::IntegerDivision => "IntegerDivision",
            NodeKind::Modulo => "Modulo",
            NodeKind::LogicalConjunction => "LogicalConjunction",
            NodeKind::UnaryPlus => "UnaryPlus",
            NodeKind::UnaryMinus => "UnaryMinus",
            NodeKind::FormalParameters => "FormalParameters",
            NodeKind::FormalType => "FormalType",
            NodeKind::FPSection => "FPSection",
            NodeKind::FPSectionList => "FPSectionList",
            NodeKind::IdentifierList => "IdentifierList",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implements `Node` for a list of `Type => Kind, visit_method` entries,
/// so every struct gets exactly one accept paired with its own visit method.
macro_rules! impl_node {
    ($($node:ident => $kind:ident, $visit:ident;)+) => {
        $(
            impl $crate::ast::Node for $node {
                fn accept(
                    &self,
                    visitor: &mut dyn $crate::semantic::visiters::ASTVisitor,
                ) -> $crate::utils::errors::OberonResult<()> {
                    visitor.$visit(self)
                }

                fn kind(&self) -> $crate::ast::NodeKind {
                    $crate::ast::NodeKind::$kind
                }
            }
        )+
    };
}

pub(crate) use impl_node;
