use super::traits::impl_node;
use super::{ConstExpression, FormalParameters, IdentDefList, Node, Qualident};

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Qualident(QualidentType),
    Array(ArrayType),
    Record(RecordType),
    Pointer(PointerType),
    Procedure(ProcedureType),
}

/// Any type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind }
    }

    pub fn named(name: Qualident) -> Self {
        Self::new(TypeKind::Qualident(QualidentType::new(name)))
    }

    pub fn as_node(&self) -> &dyn Node {
        match &self.kind {
            TypeKind::Qualident(named) => named,
            TypeKind::Array(array) => array,
            TypeKind::Record(record) => record,
            TypeKind::Pointer(pointer) => pointer,
            TypeKind::Procedure(procedure) => procedure,
        }
    }
}

/// A type referenced by name, resolved later through the symbol table.
#[derive(Debug, Clone, PartialEq)]
pub struct QualidentType {
    pub name: Qualident,
}

impl QualidentType {
    pub fn new(name: Qualident) -> Self {
        Self { name }
    }
}

/// `ARRAY length { "," length } OF type`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub lengths: LengthList,
    pub element: Box<Type>,
}

impl ArrayType {
    pub fn new(lengths: LengthList, element: Type) -> Self {
        Self {
            lengths,
            element: Box::new(element),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LengthList {
    pub lengths: Vec<Length>,
}

impl LengthList {
    pub fn new(lengths: Vec<Length>) -> Self {
        Self { lengths }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    pub value: ConstExpression,
}

impl Length {
    pub fn new(value: ConstExpression) -> Self {
        Self { value }
    }
}

/// `RECORD [ "(" BaseType ")" ] [ FieldListSequence ] END`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub base: Option<BaseType>,
    pub fields: FieldListSequence,
}

impl RecordType {
    pub fn new(base: Option<BaseType>, fields: FieldListSequence) -> Self {
        Self { base, fields }
    }
}

/// The record a record type extends.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseType {
    pub name: Qualident,
}

impl BaseType {
    pub fn new(name: Qualident) -> Self {
        Self { name }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldListSequence {
    pub field_lists: Vec<FieldList>,
}

impl FieldListSequence {
    pub fn new(field_lists: Vec<FieldList>) -> Self {
        Self { field_lists }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldList {
    pub names: IdentDefList,
    pub field_type: Type,
}

impl FieldList {
    pub fn new(names: IdentDefList, field_type: Type) -> Self {
        Self { names, field_type }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerType {
    pub target: Box<Type>,
}

impl PointerType {
    pub fn new(target: Type) -> Self {
        Self {
            target: Box::new(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureType {
    pub parameters: Option<FormalParameters>,
}

impl ProcedureType {
    pub fn new(parameters: Option<FormalParameters>) -> Self {
        Self { parameters }
    }
}

impl_node! {
    Type => Type, visit_type;
    QualidentType => QualidentType, visit_qualident_type;
    ArrayType => ArrayType, visit_array_type;
    LengthList => LengthList, visit_length_list;
    Length => Length, visit_length;
    RecordType => RecordType, visit_record_type;
    BaseType => BaseType, visit_base_type;
    FieldListSequence => FieldListSequence, visit_field_list_sequence;
    FieldList => FieldList, visit_field_list;
    PointerType => PointerType, visit_pointer_type;
    ProcedureType => ProcedureType, visit_procedure_type;
}
