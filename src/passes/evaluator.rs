use crate::ast::{
    ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression, Division,
    Expression, FPSection, FPSectionList, Factor, FactorKind, FieldList, FieldListSequence,
    FormalParameters, FormalType, IdentDef, IdentDefList, Identifier, IdentifierList, Integer,
    IntegerDivision, Length, LengthList, LogicalConjunction, LogicalDisjunction, Module, Modulo,
    Multiplication, Node, Number, PointerType, ProcedureDeclaration, ProcedureHeading,
    ProcedureType, Qualident, QualidentType, Real, RecordType, Root, SimpleExpression, SingleTerm,
    StringLiteral, Term, TermOperation, Type, TypeDeclaration, UnaryMinus, UnaryPlus,
    VariableDeclaration, VariableDeclarationList,
};
use crate::semantic::visiters::ASTVisitor;
use crate::semantic::walk;
use crate::utils::config::predeclared;
use crate::utils::errors::{OberonError, OberonResult};
use std::collections::HashMap;
use std::fmt;

/// The value of a constant expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "string",
        }
    }

    fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) if value.fract() == 0.0 && value.is_finite() => write!(f, "{:.1}", value),
            Value::Real(value) => write!(f, "{}", value),
            Value::Boolean(true) => write!(f, "{}", predeclared::TRUE),
            Value::Boolean(false) => write!(f, "{}", predeclared::FALSE),
            Value::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

#[derive(Clone, Copy)]
enum Arithmetic {
    Add,
    Subtract,
    Multiply,
}

impl Arithmetic {
    fn name(self) -> &'static str {
        match self {
            Arithmetic::Add => "addition",
            Arithmetic::Subtract => "subtraction",
            Arithmetic::Multiply => "multiplication",
        }
    }

    fn integers(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Arithmetic::Add => left.checked_add(right),
            Arithmetic::Subtract => left.checked_sub(right),
            Arithmetic::Multiply => left.checked_mul(right),
        }
    }

    fn reals(self, left: f64, right: f64) -> f64 {
        match self {
            Arithmetic::Add => left + right,
            Arithmetic::Subtract => left - right,
            Arithmetic::Multiply => left * right,
        }
    }
}

/// Computes the values of constant expressions.
///
/// Operands are pushed on a value stack and every operator node pops its
/// operands and pushes the result, so a `TermOperation` visits its term
/// before its operator. Named constants resolve to constants declared
/// earlier in the same run, innermost procedure first, then to `TRUE` and
/// `FALSE`. Parameters, variables, types and procedures are entered as
/// names without a value, so they hide outer constants of the same name.
pub struct Evaluator {
    stack: Vec<Value>,
    scopes: Vec<HashMap<String, Option<Value>>>,
    path: Vec<String>,
    values: Vec<(String, Value)>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            scopes: vec![HashMap::new()],
            path: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn evaluate(&mut self, expression: &ConstExpression) -> OberonResult<Value> {
        self.run(expression)
    }

    pub fn evaluate_expression(&mut self, expression: &Expression) -> OberonResult<Value> {
        self.run(expression)
    }

    fn run(&mut self, node: &dyn Node) -> OberonResult<Value> {
        self.stack.clear();
        let result = node.accept(self).and_then(|_| self.pop());
        self.stack.clear();
        result
    }

    /// Every constant evaluated by visiting declarations, in declaration
    /// order. Procedure-local constants are keyed by their dotted path,
    /// e.g. `P.k`.
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn value_of(&self, key: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn enter_scope(&mut self, name: &str) {
        self.scopes.push(HashMap::new());
        self.path.push(name.to_string());
    }

    pub fn leave_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            self.path.pop();
        }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.bind(name, Some(value));
    }

    /// Declares `name` in the innermost scope as something that is not a
    /// constant, or as a constant whose value is unknown.
    pub fn hide(&mut self, name: &str) {
        self.bind(name, None);
    }

    /// Hides the parameter names of a procedure heading.
    pub fn hide_parameters(&mut self, heading: &ProcedureHeading) {
        let sections = heading
            .parameters
            .iter()
            .flat_map(|parameters| &parameters.sections.sections);
        for identifier in sections.flat_map(|section| &section.names.identifiers) {
            self.hide(&identifier.name);
        }
    }

    /// The value of the innermost declaration of `name`, if that
    /// declaration is a constant with a known value.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.binding(name).and_then(Option::as_ref)
    }

    fn binding(&self, name: &str) -> Option<&Option<Value>> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn bind(&mut self, name: &str, value: Option<Value>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    fn push(&mut self, value: Value) -> OberonResult<()> {
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> OberonResult<Value> {
        self.stack
            .pop()
            .ok_or_else(|| OberonError::evaluation_error("value stack underflow"))
    }

    fn pop_pair(&mut self) -> OberonResult<(Value, Value)> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    fn arithmetic(&mut self, operation: Arithmetic) -> OberonResult<()> {
        let result = match self.pop_pair()? {
            (Value::Integer(left), Value::Integer(right)) => Value::Integer(
                operation
                    .integers(left, right)
                    .ok_or_else(|| OberonError::overflow(operation.name()))?,
            ),
            (left, right) => match (left.as_real(), right.as_real()) {
                (Some(left), Some(right)) => Value::Real(operation.reals(left, right)),
                _ => return Err(operand_error(operation.name(), "numbers", &left, &right)),
            },
        };
        self.push(result)
    }

    fn real_division(&mut self) -> OberonResult<()> {
        let (left, right) = self.pop_pair()?;
        match (left.as_real(), right.as_real()) {
            (Some(_), Some(divisor)) if divisor == 0.0 => Err(OberonError::DivisionByZero),
            (Some(dividend), Some(divisor)) => self.push(Value::Real(dividend / divisor)),
            _ => Err(operand_error("division", "numbers", &left, &right)),
        }
    }

    // DIV and MOD round towards negative infinity.
    fn integer_division(&mut self, modulo: bool) -> OberonResult<()> {
        let operation = if modulo { "MOD" } else { "DIV" };
        let (left, right) = match self.pop_pair()? {
            (Value::Integer(left), Value::Integer(right)) => (left, right),
            (left, right) => return Err(operand_error(operation, "integers", &left, &right)),
        };
        if right == 0 {
            return Err(OberonError::DivisionByZero);
        }
        let quotient = left
            .checked_div(right)
            .ok_or_else(|| OberonError::overflow(operation))?;
        let remainder = left
            .checked_rem(right)
            .ok_or_else(|| OberonError::overflow(operation))?;
        let adjust = remainder != 0 && ((remainder < 0) != (right < 0));
        let result = match (modulo, adjust) {
            (true, true) => remainder + right,
            (true, false) => remainder,
            (false, true) => quotient - 1,
            (false, false) => quotient,
        };
        self.push(Value::Integer(result))
    }

    fn logical(&mut self, conjunction: bool) -> OberonResult<()> {
        let operation = if conjunction { "&" } else { "OR" };
        match self.pop_pair()? {
            (Value::Boolean(left), Value::Boolean(right)) => {
                let result = if conjunction { left && right } else { left || right };
                self.push(Value::Boolean(result))
            }
            (left, right) => Err(operand_error(operation, "booleans", &left, &right)),
        }
    }

    fn binary(&mut self, right: &Factor, operator: impl FnOnce(&mut Self) -> OberonResult<()>) -> OberonResult<()> {
        right.accept(self)?;
        operator(self)
    }

    fn record(&mut self, name: &str, value: Value) {
        let key = self
            .path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(".");
        self.values.push((key, value));
    }
}

fn operand_error(operation: &str, expected: &str, left: &Value, right: &Value) -> OberonError {
    OberonError::evaluation_error(format!(
        "{} expects {}, found {} and {}",
        operation,
        expected,
        left.type_name(),
        right.type_name()
    ))
}

impl ASTVisitor for Evaluator {
    fn visit_root(&mut self, root: &Root) -> OberonResult<()> {
        walk::walk_root(self, root)
    }

    // Only declarations carry constants.
    fn visit_module(&mut self, module: &Module) -> OberonResult<()> {
        walk::walk_declarations(self, &module.declarations)
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) -> OberonResult<()> {
        Ok(())
    }

    fn visit_ident_def(&mut self, _def: &IdentDef) -> OberonResult<()> {
        Ok(())
    }

    fn visit_qualident(&mut self, qualident: &Qualident) -> OberonResult<()> {
        if qualident.is_qualified() {
            return Err(OberonError::evaluation_error(format!(
                "imported name '{}' has no known value",
                qualident
            )));
        }
        let value = match self.binding(&qualident.name) {
            Some(Some(value)) => value.clone(),
            Some(None) => {
                return Err(OberonError::evaluation_error(format!(
                    "'{}' is not a constant",
                    qualident.name
                )))
            }
            None => predeclared::boolean_constant(&qualident.name)
                .map(Value::Boolean)
                .ok_or_else(|| OberonError::UndefinedConstant {
                    name: qualident.name.clone(),
                })?,
        };
        self.push(value)
    }

    fn visit_number(&mut self, number: &Number) -> OberonResult<()> {
        walk::walk_number(self, number)
    }

    fn visit_integer(&mut self, integer: &Integer) -> OberonResult<()> {
        self.push(Value::Integer(integer.value))
    }

    fn visit_real(&mut self, real: &Real) -> OberonResult<()> {
        self.push(Value::Real(real.value))
    }

    fn visit_string(&mut self, string: &StringLiteral) -> OberonResult<()> {
        self.push(Value::String(string.value.clone()))
    }

    fn visit_const_declaration(&mut self, declaration: &ConstDeclaration) -> OberonResult<()> {
        let value = self.evaluate(&declaration.value)?;
        self.define(&declaration.name.name, value.clone());
        self.record(&declaration.name.name, value);
        Ok(())
    }

    fn visit_const_expression(&mut self, expression: &ConstExpression) -> OberonResult<()> {
        walk::walk_const_expression(self, expression)
    }

    fn visit_type_declaration(&mut self, declaration: &TypeDeclaration) -> OberonResult<()> {
        self.hide(&declaration.name.name);
        Ok(())
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> OberonResult<()> {
        for def in &declaration.names.defs {
            self.hide(&def.name);
        }
        Ok(())
    }

    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList) -> OberonResult<()> {
        walk::walk_variable_declaration_list(self, list)
    }

    fn visit_procedure_declaration(&mut self, declaration: &ProcedureDeclaration) -> OberonResult<()> {
        self.hide(declaration.name());
        self.enter_scope(declaration.name());
        self.hide_parameters(&declaration.heading);
        let result = walk::walk_declarations(self, &declaration.body);
        self.leave_scope();
        result
    }

    fn visit_procedure_heading(&mut self, _heading: &ProcedureHeading) -> OberonResult<()> {
        Ok(())
    }

    fn visit_type(&mut self, _ty: &Type) -> OberonResult<()> {
        Ok(())
    }

    fn visit_array_type(&mut self, _array_type: &ArrayType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_base_type(&mut self, _base_type: &BaseType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_record_type(&mut self, _record_type: &RecordType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_pointer_type(&mut self, _pointer_type: &PointerType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_qualident_type(&mut self, _qualident_type: &QualidentType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_procedure_type(&mut self, _procedure_type: &ProcedureType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_field_list(&mut self, _field_list: &FieldList) -> OberonResult<()> {
        Ok(())
    }

    fn visit_field_list_sequence(&mut self, _sequence: &FieldListSequence) -> OberonResult<()> {
        Ok(())
    }

    fn visit_ident_def_list(&mut self, _list: &IdentDefList) -> OberonResult<()> {
        Ok(())
    }

    fn visit_length(&mut self, length: &Length) -> OberonResult<()> {
        walk::walk_length(self, length)
    }

    fn visit_length_list(&mut self, _list: &LengthList) -> OberonResult<()> {
        Ok(())
    }

    fn visit_expression(&mut self, expression: &Expression) -> OberonResult<()> {
        walk::walk_expression(self, expression)
    }

    fn visit_simple_expression(&mut self, expression: &SimpleExpression) -> OberonResult<()> {
        walk::walk_simple_expression(self, expression)
    }

    // The sign applies to the whole leading term.
    fn visit_single_term(&mut self, single_term: &SingleTerm) -> OberonResult<()> {
        single_term.term.accept(self)?;
        if let Some(sign) = &single_term.sign {
            sign.as_node().accept(self)?;
        }
        Ok(())
    }

    fn visit_term_operation(&mut self, operation: &TermOperation) -> OberonResult<()> {
        operation.term.accept(self)?;
        operation.operator.as_node().accept(self)
    }

    fn visit_term(&mut self, term: &Term) -> OberonResult<()> {
        walk::walk_term(self, term)
    }

    fn visit_factor(&mut self, factor: &Factor) -> OberonResult<()> {
        match &factor.kind {
            FactorKind::Parenthesized(expression) => expression.accept(self),
            _ => walk::walk_factor(self, factor),
        }
    }

    fn visit_binary_plus(&mut self, _op: &BinaryPlus) -> OberonResult<()> {
        self.arithmetic(Arithmetic::Add)
    }

    fn visit_binary_minus(&mut self, _op: &BinaryMinus) -> OberonResult<()> {
        self.arithmetic(Arithmetic::Subtract)
    }

    fn visit_logical_disjunction(&mut self, _op: &LogicalDisjunction) -> OberonResult<()> {
        self.logical(false)
    }

    fn visit_multiplication(&mut self, op: &Multiplication) -> OberonResult<()> {
        self.binary(&op.right, |evaluator| evaluator.arithmetic(Arithmetic::Multiply))
    }

    fn visit_division(&mut self, op: &Division) -> OberonResult<()> {
        self.binary(&op.right, Self::real_division)
    }

    fn visit_integer_division(&mut self, op: &IntegerDivision) -> OberonResult<()> {
        self.binary(&op.right, |evaluator| evaluator.integer_division(false))
    }

    fn visit_modulo(&mut self, op: &Modulo) -> OberonResult<()> {
        self.binary(&op.right, |evaluator| evaluator.integer_division(true))
    }

    fn visit_logical_conjunction(&mut self, op: &LogicalConjunction) -> OberonResult<()> {
        self.binary(&op.right, |evaluator| evaluator.logical(true))
    }

    fn visit_unary_plus(&mut self, _op: &UnaryPlus) -> OberonResult<()> {
        match self.pop()? {
            value @ (Value::Integer(_) | Value::Real(_)) => self.push(value),
            value => Err(OberonError::evaluation_error(format!(
                "unary + expects a number, found {}",
                value.type_name()
            ))),
        }
    }

    fn visit_unary_minus(&mut self, _op: &UnaryMinus) -> OberonResult<()> {
        let negated = match self.pop()? {
            Value::Integer(value) => Value::Integer(
                value
                    .checked_neg()
                    .ok_or_else(|| OberonError::overflow("negation"))?,
            ),
            Value::Real(value) => Value::Real(-value),
            value => {
                return Err(OberonError::evaluation_error(format!(
                    "unary - expects a number, found {}",
                    value.type_name()
                )))
            }
        };
        self.push(negated)
    }

    fn visit_formal_parameters(&mut self, _parameters: &FormalParameters) -> OberonResult<()> {
        Ok(())
    }

    fn visit_formal_type(&mut self, _formal_type: &FormalType) -> OberonResult<()> {
        Ok(())
    }

    fn visit_fp_section(&mut self, _section: &FPSection) -> OberonResult<()> {
        Ok(())
    }

    fn visit_fp_section_list(&mut self, _list: &FPSectionList) -> OberonResult<()> {
        Ok(())
    }

    fn visit_identifier_list(&mut self, _list: &IdentifierList) -> OberonResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floored_division() {
        let mut evaluator = Evaluator::new();
        for (left, right, quotient, remainder) in [(7, 2, 3, 1), (-7, 2, -4, 1), (7, -2, -4, -1), (-7, -2, 3, -1)] {
            evaluator.stack = vec![Value::Integer(left), Value::Integer(right)];
            evaluator.integer_division(false).unwrap();
            assert_eq!(evaluator.stack.pop(), Some(Value::Integer(quotient)));
            evaluator.stack = vec![Value::Integer(left), Value::Integer(right)];
            evaluator.integer_division(true).unwrap();
            assert_eq!(evaluator.stack.pop(), Some(Value::Integer(remainder)));
        }
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(11).to_string(), "11");
        assert_eq!(Value::Real(2.0).to_string(), "2.0");
        assert_eq!(Value::Real(0.5).to_string(), "0.5");
        assert_eq!(Value::Boolean(true).to_string(), "TRUE");
        assert_eq!(Value::String("hi".to_string()).to_string(), "\"hi\"");
    }

    #[test]
    fn test_hidden_name_stops_lookup() {
        let mut evaluator = Evaluator::new();
        evaluator.define("n", Value::Integer(1));
        evaluator.enter_scope("P");
        evaluator.hide("n");
        assert_eq!(evaluator.lookup("n"), None);
        evaluator.leave_scope();
        assert_eq!(evaluator.lookup("n"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_scopes_shadow_outer_constants() {
        let mut evaluator = Evaluator::new();
        evaluator.define("n", Value::Integer(1));
        evaluator.enter_scope("P");
        evaluator.define("n", Value::Integer(2));
        assert_eq!(evaluator.lookup("n"), Some(&Value::Integer(2)));
        evaluator.leave_scope();
        assert_eq!(evaluator.lookup("n"), Some(&Value::Integer(1)));
    }
}
