use crate::ast::{
    AddOperator, ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression,
    DeclarationSequence, Division, Expression, FPSection, FPSectionList, Factor, FactorKind,
    FieldList, FieldListSequence, FormalParameters, FormalType, IdentDef, IdentDefList, Identifier,
    IdentifierList, IntegerDivision, Length, LengthList, LogicalConjunction, LogicalDisjunction,
    Module, Modulo, MulOperator, Multiplication, Number, PointerType, ProcedureDeclaration,
    ProcedureHeading, ProcedureType, Qualident, RecordType, Root, Sign, SimpleExpression,
    SingleTerm, StringLiteral, Term, TermOperation, Type, TypeDeclaration, TypeKind, UnaryMinus,
    UnaryPlus, VariableDeclaration, VariableDeclarationList,
};
use crate::frontend::token::Token;
use crate::utils::config::parser::{MAX_NESTING_DEPTH, MAX_OPEN_ARRAY_DEPTH};
use crate::utils::errors::{OberonError, OberonResult};
use std::slice::Iter;

pub struct Parser<'a> {
    current_token: Token,
    line_number: usize,
    iter: Iter<'a, (Token, usize)>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, usize)]) -> Self {
        let mut parser = Self {
            current_token: Token::Eof,
            line_number: 1,
            iter: tokens.iter(),
            depth: 0,
        };
        parser.next();
        parser
    }

    fn next(&mut self) {
        match self.iter.next() {
            Some((element, line)) => {
                self.current_token = element.clone();
                self.line_number = *line;
            }
            None => self.current_token = Token::Eof,
        }
    }

    // One token of lookahead past the current one.
    fn peek(&self) -> Option<&Token> {
        self.iter.clone().next().map(|(token, _)| token)
    }

    fn at(&self, token: Token) -> bool {
        self.current_token.same_kind(&token)
    }

    fn expect(&mut self, expected: Token) -> OberonResult<()> {
        if !self.at(expected.clone()) {
            return Err(self.unexpected(expected.to_string()));
        }
        self.next();
        Ok(())
    }

    fn unexpected(&self, expected: impl Into<String>) -> OberonError {
        OberonError::syntax_error(expected, self.current_token.to_string(), self.line_number)
    }

    // Expressions, types and procedures nest through recursion; the depth
    // is bounded so deep input is a syntax error, not a stack overflow.
    fn nested<T, F>(&mut self, what: &str, parse: F) -> OberonResult<T>
    where
        F: FnOnce(&mut Self) -> OberonResult<T>,
    {
        if self.depth == MAX_NESTING_DEPTH {
            return Err(self.unexpected(format!(
                "at most {} nested {}",
                MAX_NESTING_DEPTH, what
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expect_ident(&mut self) -> OberonResult<String> {
        match &self.current_token {
            Token::Ident(name) => {
                let name = name.clone();
                self.next();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn identifier(&mut self) -> OberonResult<Identifier> {
        Ok(Identifier::new(self.expect_ident()?))
    }

    /// identdef = ident ["*"]
    fn ident_def(&mut self) -> OberonResult<IdentDef> {
        let name = self.expect_ident()?;
        let exported = self.at(Token::Times);
        if exported {
            self.next();
        }
        Ok(IdentDef::new(name, exported))
    }

    /// qualident = [ident "."] ident
    fn qualident(&mut self) -> OberonResult<Qualident> {
        let first = self.expect_ident()?;
        if self.at(Token::Dot) && matches!(self.peek(), Some(Token::Ident(_))) {
            self.expect(Token::Dot)?;
            let name = self.expect_ident()?;
            return Ok(Qualident::qualified(first, name));
        }
        Ok(Qualident::simple(first))
    }

    /// IdentList = identdef {"," identdef}
    fn ident_def_list(&mut self) -> OberonResult<IdentDefList> {
        let mut defs = vec![self.ident_def()?];
        while self.at(Token::Comma) {
            self.next();
            defs.push(self.ident_def()?);
        }
        Ok(IdentDefList::new(defs))
    }

    fn identifier_list(&mut self) -> OberonResult<IdentifierList> {
        let mut identifiers = vec![self.identifier()?];
        while self.at(Token::Comma) {
            self.next();
            identifiers.push(self.identifier()?);
        }
        Ok(IdentifierList::new(identifiers))
    }

    /**
     * Parse a module according to the grammar:
     * module = MODULE ident ";" [ImportList] DeclarationSequence END ident "." .
     */
    fn module(&mut self) -> OberonResult<Module> {
        self.expect(Token::Module)?;
        let name = self.identifier()?;
        self.expect(Token::Semicolon)?;

        let imports = if self.at(Token::Import) {
            self.next();
            let imports = self.identifier_list()?;
            self.expect(Token::Semicolon)?;
            Some(imports)
        } else {
            None
        };

        let declarations = self.declaration_sequence()?;
        self.expect(Token::End)?;
        let end_name = self.identifier()?;
        self.expect(Token::Dot)?;
        Ok(Module::new(name, imports, declarations, end_name))
    }

    /**
     * Parse a declaration sequence according to the grammar:
     * DeclarationSequence = [CONST {ConstDeclaration ";"}]
     *                       [TYPE {TypeDeclaration ";"}]
     *                       [VAR {VariableDeclaration ";"}]
     *                       {ProcedureDeclaration ";"} .
     */
    fn declaration_sequence(&mut self) -> OberonResult<DeclarationSequence> {
        let mut constants = Vec::new();
        if self.at(Token::Const) {
            self.next();
            while matches!(self.current_token, Token::Ident(_)) {
                constants.push(self.const_declaration()?);
                self.expect(Token::Semicolon)?;
            }
        }

        let mut types = Vec::new();
        if self.at(Token::Type) {
            self.next();
            while matches!(self.current_token, Token::Ident(_)) {
                types.push(self.type_declaration()?);
                self.expect(Token::Semicolon)?;
            }
        }

        let mut variables = Vec::new();
        if self.at(Token::Var) {
            self.next();
            while matches!(self.current_token, Token::Ident(_)) {
                variables.push(self.variable_declaration()?);
                self.expect(Token::Semicolon)?;
            }
        }

        let mut procedures = Vec::new();
        while self.at(Token::Procedure) {
            procedures.push(self.procedure_declaration()?);
            self.expect(Token::Semicolon)?;
        }

        Ok(DeclarationSequence::new(
            constants,
            types,
            VariableDeclarationList::new(variables),
            procedures,
        ))
    }

    /// ConstDeclaration = identdef "=" ConstExpression
    fn const_declaration(&mut self) -> OberonResult<ConstDeclaration> {
        let name = self.ident_def()?;
        self.expect(Token::Equal)?;
        let value = self.const_expression()?;
        Ok(ConstDeclaration::new(name, value))
    }

    /// TypeDeclaration = identdef "=" type
    fn type_declaration(&mut self) -> OberonResult<TypeDeclaration> {
        let name = self.ident_def()?;
        self.expect(Token::Equal)?;
        let declared_type = self.parse_type()?;
        Ok(TypeDeclaration::new(name, declared_type))
    }

    /// VariableDeclaration = IdentList ":" type
    fn variable_declaration(&mut self) -> OberonResult<VariableDeclaration> {
        let names = self.ident_def_list()?;
        self.expect(Token::Colon)?;
        let var_type = self.parse_type()?;
        Ok(VariableDeclaration::new(names, var_type))
    }

    /**
     * Parse a procedure declaration according to the grammar:
     * ProcedureDeclaration = ProcedureHeading ";" DeclarationSequence
     *                        [RETURN expression] END ident .
     */
    fn procedure_declaration(&mut self) -> OberonResult<ProcedureDeclaration> {
        self.nested("procedures", Self::procedure_declaration_body)
    }

    fn procedure_declaration_body(&mut self) -> OberonResult<ProcedureDeclaration> {
        let heading = self.procedure_heading()?;
        self.expect(Token::Semicolon)?;
        let body = self.declaration_sequence()?;
        let return_value = if self.at(Token::Return) {
            self.next();
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(Token::End)?;
        let end_name = self.identifier()?;
        Ok(ProcedureDeclaration::new(heading, body, return_value, end_name))
    }

    /// ProcedureHeading = PROCEDURE identdef [FormalParameters]
    fn procedure_heading(&mut self) -> OberonResult<ProcedureHeading> {
        self.expect(Token::Procedure)?;
        let name = self.ident_def()?;
        let parameters = if self.at(Token::LParen) {
            Some(self.formal_parameters()?)
        } else {
            None
        };
        Ok(ProcedureHeading::new(name, parameters))
    }

    /// FormalParameters = "(" [FPSection {";" FPSection}] ")" [":" qualident]
    fn formal_parameters(&mut self) -> OberonResult<FormalParameters> {
        self.expect(Token::LParen)?;
        let mut sections = Vec::new();
        if !self.at(Token::RParen) {
            sections.push(self.fp_section()?);
            while self.at(Token::Semicolon) {
                self.next();
                sections.push(self.fp_section()?);
            }
        }
        self.expect(Token::RParen)?;

        let result = if self.at(Token::Colon) {
            self.next();
            Some(self.qualident()?)
        } else {
            None
        };
        Ok(FormalParameters::new(FPSectionList::new(sections), result))
    }

    /// FPSection = [VAR] ident {"," ident} ":" FormalType
    fn fp_section(&mut self) -> OberonResult<FPSection> {
        let by_reference = self.at(Token::Var);
        if by_reference {
            self.next();
        }
        let names = self.identifier_list()?;
        self.expect(Token::Colon)?;
        let formal_type = self.formal_type()?;
        Ok(FPSection::new(by_reference, names, formal_type))
    }

    /// FormalType = {ARRAY OF} qualident
    fn formal_type(&mut self) -> OberonResult<FormalType> {
        let mut open_arrays = 0;
        while self.at(Token::Array) {
            if open_arrays == MAX_OPEN_ARRAY_DEPTH {
                return Err(OberonError::syntax_error(
                    format!("at most {} open array dimensions", MAX_OPEN_ARRAY_DEPTH),
                    "ARRAY",
                    self.line_number,
                ));
            }
            self.next();
            self.expect(Token::Of)?;
            open_arrays += 1;
        }
        let name = self.qualident()?;
        Ok(FormalType::new(open_arrays, name))
    }

    /**
     * Parse a type according to the grammar:
     * type = qualident | ArrayType | RecordType | PointerType | ProcedureType .
     */
    fn parse_type(&mut self) -> OberonResult<Type> {
        self.nested("types", Self::type_kind)
    }

    fn type_kind(&mut self) -> OberonResult<Type> {
        let kind = match &self.current_token {
            Token::Ident(_) => return Ok(Type::named(self.qualident()?)),
            Token::Array => TypeKind::Array(self.array_type()?),
            Token::Record => TypeKind::Record(self.record_type()?),
            Token::Pointer => {
                self.next();
                self.expect(Token::To)?;
                TypeKind::Pointer(PointerType::new(self.parse_type()?))
            }
            Token::Procedure => {
                self.next();
                let parameters = if self.at(Token::LParen) {
                    Some(self.formal_parameters()?)
                } else {
                    None
                };
                TypeKind::Procedure(ProcedureType::new(parameters))
            }
            _ => return Err(self.unexpected("type")),
        };
        Ok(Type::new(kind))
    }

    /// ArrayType = ARRAY length {"," length} OF type
    fn array_type(&mut self) -> OberonResult<ArrayType> {
        self.expect(Token::Array)?;
        let mut lengths = vec![Length::new(self.const_expression()?)];
        while self.at(Token::Comma) {
            self.next();
            lengths.push(Length::new(self.const_expression()?));
        }
        self.expect(Token::Of)?;
        let element = self.parse_type()?;
        Ok(ArrayType::new(LengthList::new(lengths), element))
    }

    /// RecordType = RECORD ["(" BaseType ")"] [FieldListSequence] END
    fn record_type(&mut self) -> OberonResult<RecordType> {
        self.expect(Token::Record)?;
        let base = if self.at(Token::LParen) {
            self.next();
            let name = self.qualident()?;
            self.expect(Token::RParen)?;
            Some(BaseType::new(name))
        } else {
            None
        };

        // Empty field lists are allowed, so "a: INTEGER; END" parses.
        let mut field_lists = Vec::new();
        loop {
            if matches!(self.current_token, Token::Ident(_)) {
                let names = self.ident_def_list()?;
                self.expect(Token::Colon)?;
                let field_type = self.parse_type()?;
                field_lists.push(FieldList::new(names, field_type));
            }
            if !self.at(Token::Semicolon) {
                break;
            }
            self.next();
        }
        self.expect(Token::End)?;
        Ok(RecordType::new(base, FieldListSequence::new(field_lists)))
    }

    fn const_expression(&mut self) -> OberonResult<ConstExpression> {
        Ok(ConstExpression::new(self.expression()?))
    }

    /// expression = SimpleExpression
    fn expression(&mut self) -> OberonResult<Expression> {
        self.nested("expressions", |parser| {
            Ok(Expression::new(parser.simple_expression()?))
        })
    }

    /**
     * Parse a simple expression according to the grammar:
     * SimpleExpression = ["+" | "-"] term {("+" | "-" | OR) term} .
     */
    fn simple_expression(&mut self) -> OberonResult<SimpleExpression> {
        let sign = match self.current_token {
            Token::Plus => {
                self.next();
                Some(Sign::Plus(UnaryPlus))
            }
            Token::Minus => {
                self.next();
                Some(Sign::Minus(UnaryMinus))
            }
            _ => None,
        };
        let first = SingleTerm::new(sign, self.term()?);

        let mut operations = Vec::new();
        loop {
            let operator = match self.current_token {
                Token::Plus => AddOperator::Plus(BinaryPlus),
                Token::Minus => AddOperator::Minus(BinaryMinus),
                Token::Or => AddOperator::Or(LogicalDisjunction),
                _ => break,
            };
            self.next();
            operations.push(TermOperation::new(operator, self.term()?));
        }
        Ok(SimpleExpression::new(first, operations))
    }

    /**
     * Parse a term according to the grammar:
     * term = factor {("*" | "/" | DIV | MOD | "&") factor} .
     */
    fn term(&mut self) -> OberonResult<Term> {
        let first = self.factor()?;
        let mut operations = Vec::new();
        loop {
            let operator: fn(Factor) -> MulOperator = match self.current_token {
                Token::Times => |right| MulOperator::Multiplication(Multiplication::new(right)),
                Token::Slash => |right| MulOperator::Division(Division::new(right)),
                Token::Div => |right| MulOperator::IntegerDivision(IntegerDivision::new(right)),
                Token::Mod => |right| MulOperator::Modulo(Modulo::new(right)),
                Token::And => |right| MulOperator::And(LogicalConjunction::new(right)),
                _ => break,
            };
            self.next();
            operations.push(operator(self.factor()?));
        }
        Ok(Term::new(first, operations))
    }

    /**
     * Parse a factor according to the grammar:
     * factor = number | string | qualident | "(" expression ")" .
     */
    fn factor(&mut self) -> OberonResult<Factor> {
        let kind = match &self.current_token {
            Token::Integer(value) => {
                let value = *value;
                self.next();
                FactorKind::Number(Number::integer(value))
            }
            Token::Real(value) => {
                let value = *value;
                self.next();
                FactorKind::Number(Number::real(value))
            }
            Token::StringLiteral(value) => {
                let value = value.clone();
                self.next();
                FactorKind::String(StringLiteral::new(value))
            }
            Token::Ident(_) => FactorKind::Designator(self.qualident()?),
            Token::LParen => {
                self.next();
                let expression = self.expression()?;
                self.expect(Token::RParen)?;
                FactorKind::Parenthesized(Box::new(expression))
            }
            _ => return Err(self.unexpected("factor")),
        };
        Ok(Factor::new(kind))
    }

    pub fn parse(&mut self) -> OberonResult<Root> {
        let module = self.module()?;
        if !self.at(Token::Eof) {
            return Err(self.unexpected(Token::Eof.to_string()));
        }
        Ok(Root::new(module))
    }

    /// Parses a single expression; used by tools and tests that work on
    /// expression snippets rather than whole modules.
    pub fn parse_expression(&mut self) -> OberonResult<Expression> {
        let expression = self.expression()?;
        if !self.at(Token::Eof) {
            return Err(self.unexpected(Token::Eof.to_string()));
        }
        Ok(expression)
    }
}
