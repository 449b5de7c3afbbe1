// Expression chain. Nesting depth encodes precedence:
// Expression > SimpleExpression > Term > Factor.
// Within one level, vector order is source order, so operators associate left.

use super::traits::impl_node;
use super::{Node, Number, Qualident, StringLiteral};

/// Constant-valued expression (constant declarations, array lengths).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstExpression {
    pub expression: Expression,
}

impl ConstExpression {
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub simple: SimpleExpression,
}

impl Expression {
    pub fn new(simple: SimpleExpression) -> Self {
        Self { simple }
    }
}

/// `["+" | "-"] term { AddOperator term }`
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleExpression {
    pub first: SingleTerm,
    pub operations: Vec<TermOperation>,
}

impl SimpleExpression {
    pub fn new(first: SingleTerm, operations: Vec<TermOperation>) -> Self {
        Self { first, operations }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sign {
    Plus(UnaryPlus),
    Minus(UnaryMinus),
}

impl Sign {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            Sign::Plus(plus) => plus,
            Sign::Minus(minus) => minus,
        }
    }
}

/// Leading term of a simple expression. The sign applies to the whole term.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleTerm {
    pub sign: Option<Sign>,
    pub term: Term,
}

impl SingleTerm {
    pub fn new(sign: Option<Sign>, term: Term) -> Self {
        Self { sign, term }
    }

    pub fn unsigned(term: Term) -> Self {
        Self::new(None, term)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddOperator {
    Plus(BinaryPlus),
    Minus(BinaryMinus),
    Or(LogicalDisjunction),
}

impl AddOperator {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            AddOperator::Plus(plus) => plus,
            AddOperator::Minus(minus) => minus,
            AddOperator::Or(or) => or,
        }
    }
}

/// An additive operator and its right operand; the left operand is
/// everything before it in the enclosing simple expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TermOperation {
    pub operator: AddOperator,
    pub term: Term,
}

impl TermOperation {
    pub fn new(operator: AddOperator, term: Term) -> Self {
        Self { operator, term }
    }
}

/// `factor { MulOperator factor }`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub first: Factor,
    pub operations: Vec<MulOperator>,
}

impl Term {
    pub fn new(first: Factor, operations: Vec<MulOperator>) -> Self {
        Self { first, operations }
    }

    pub fn single(first: Factor) -> Self {
        Self::new(first, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MulOperator {
    Multiplication(Multiplication),
    Division(Division),
    IntegerDivision(IntegerDivision),
    Modulo(Modulo),
    And(LogicalConjunction),
}

impl MulOperator {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            MulOperator::Multiplication(op) => op,
            MulOperator::Division(op) => op,
            MulOperator::IntegerDivision(op) => op,
            MulOperator::Modulo(op) => op,
            MulOperator::And(op) => op,
        }
    }

    pub fn right(&self) -> &Factor {
        match self {
            MulOperator::Multiplication(op) => &op.right,
            MulOperator::Division(op) => &op.right,
            MulOperator::IntegerDivision(op) => &op.right,
            MulOperator::Modulo(op) => &op.right,
            MulOperator::And(op) => &op.right,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MulOperator::Multiplication(_) => "*",
            MulOperator::Division(_) => "/",
            MulOperator::IntegerDivision(_) => "DIV",
            MulOperator::Modulo(_) => "MOD",
            MulOperator::And(_) => "&",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FactorKind {
    Number(Number),
    String(StringLiteral),
    Designator(Qualident),
    Parenthesized(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub kind: FactorKind,
}

impl Factor {
    pub fn new(kind: FactorKind) -> Self {
        Self { kind }
    }

    pub fn number(number: Number) -> Self {
        Self::new(FactorKind::Number(number))
    }

    pub fn designator(name: Qualident) -> Self {
        Self::new(FactorKind::Designator(name))
    }

    pub fn as_node(&self) -> &dyn Node {
        match &self.kind {
            FactorKind::Number(number) => number,
            FactorKind::String(string) => string,
            FactorKind::Designator(name) => name,
            FactorKind::Parenthesized(expression) => expression.as_ref(),
        }
    }
}

// Additive and sign operators are plain tags.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryPlus;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryMinus;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicalDisjunction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnaryPlus;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnaryMinus;

// Multiplicative operators own their right operand; the left operand is
// the product accumulated so far in the enclosing term.

#[derive(Debug, Clone, PartialEq)]
pub struct Multiplication {
    pub right: Factor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Division {
    pub right: Factor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerDivision {
    pub right: Factor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modulo {
    pub right: Factor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalConjunction {
    pub right: Factor,
}

impl Multiplication {
    pub fn new(right: Factor) -> Self {
        Self { right }
    }
}

impl Division {
    pub fn new(right: Factor) -> Self {
        Self { right }
    }
}

impl IntegerDivision {
    pub fn new(right: Factor) -> Self {
        Self { right }
    }
}

impl Modulo {
    pub fn new(right: Factor) -> Self {
        Self { right }
    }
}

impl LogicalConjunction {
    pub fn new(right: Factor) -> Self {
        Self { right }
    }
}

impl_node! {
    ConstExpression => ConstExpression, visit_const_expression;
    Expression => Expression, visit_expression;
    SimpleExpression => SimpleExpression, visit_simple_expression;
    SingleTerm => SingleTerm, visit_single_term;
    TermOperation => TermOperation, visit_term_operation;
    Term => Term, visit_term;
    Factor => Factor, visit_factor;
    BinaryPlus => BinaryPlus, visit_binary_plus;
    BinaryMinus => BinaryMinus, visit_binary_minus;
    LogicalDisjunction => LogicalDisjunction, visit_logical_disjunction;
    UnaryPlus => UnaryPlus, visit_unary_plus;
    UnaryMinus => UnaryMinus, visit_unary_minus;
    Multiplication => Multiplication, visit_multiplication;
    Division => Division, visit_division;
    IntegerDivision => IntegerDivision, visit_integer_division;
    Modulo => Modulo, visit_modulo;
    LogicalConjunction => LogicalConjunction, visit_logical_conjunction;
}
