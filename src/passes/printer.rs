use crate::ast::{
    ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression,
    DeclarationSequence, Division, Expression, FPSection, FPSectionList, Factor, FactorKind,
    FieldList, FieldListSequence, FormalParameters, FormalType, IdentDef, IdentDefList, Identifier,
    IdentifierList, Integer, IntegerDivision, Length, LengthList, LogicalConjunction,
    LogicalDisjunction, Module, Modulo, Multiplication, Node, Number, PointerType,
    ProcedureDeclaration, ProcedureHeading, ProcedureType, Qualident, QualidentType, Real,
    RecordType, Root, SimpleExpression, SingleTerm, StringLiteral, Term, TermOperation, Type,
    TypeDeclaration, UnaryMinus, UnaryPlus, VariableDeclaration, VariableDeclarationList,
};
use crate::semantic::visiters::ASTVisitor;
use crate::semantic::walk;
use crate::utils::config::printer::{DEFAULT_INDENT, MAX_INDENT};
use crate::utils::errors::{OberonError, OberonResult};
use std::fmt::{self, Write};

/// Renders a tree back to canonical source text.
///
/// Keywords are upper case, every declaration sits on its own line and
/// binary operators are surrounded by single spaces. Parenthesised factors
/// keep their parentheses and nothing is folded, so printing a reparsed
/// printout yields the same text.
pub struct Printer {
    output: String,
    indent: usize,
    depth: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Printer {
    pub fn new(indent: usize) -> Self {
        Self {
            output: String::new(),
            indent: indent.min(MAX_INDENT),
            depth: 0,
        }
    }

    /// Prints any node, consuming the printer.
    pub fn print(mut self, node: &dyn Node) -> OberonResult<String> {
        node.accept(&mut self)?;
        Ok(self.output)
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn emit(&mut self, args: fmt::Arguments) -> OberonResult<()> {
        self.output
            .write_fmt(args)
            .map_err(|err| OberonError::OutputError(err.to_string()))
    }

    fn start_line(&mut self) {
        let width = self.depth * self.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn end_line(&mut self) {
        self.output.push('\n');
    }

    fn nested<F>(&mut self, body: F) -> OberonResult<()>
    where
        F: FnOnce(&mut Self) -> OberonResult<()>,
    {
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn print_declarations(&mut self, declarations: &DeclarationSequence) -> OberonResult<()> {
        if !declarations.constants.is_empty() {
            self.start_line();
            self.write("CONST");
            self.end_line();
            self.nested(|printer| {
                for constant in &declarations.constants {
                    constant.accept(printer)?;
                }
                Ok(())
            })?;
        }
        if !declarations.types.is_empty() {
            self.start_line();
            self.write("TYPE");
            self.end_line();
            self.nested(|printer| {
                for ty in &declarations.types {
                    ty.accept(printer)?;
                }
                Ok(())
            })?;
        }
        declarations.variables.accept(self)?;
        for procedure in &declarations.procedures {
            procedure.accept(self)?;
        }
        Ok(())
    }

    fn print_separated<T: Node>(&mut self, items: &[T], separator: &str) -> OberonResult<()> {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.write(separator);
            }
            item.accept(self)?;
        }
        Ok(())
    }

    fn print_operator(&mut self, symbol: &str, right: &Factor) -> OberonResult<()> {
        self.emit(format_args!(" {} ", symbol))?;
        right.accept(self)
    }
}

impl ASTVisitor for Printer {
    fn visit_root(&mut self, root: &Root) -> OberonResult<()> {
        walk::walk_root(self, root)
    }

    fn visit_module(&mut self, module: &Module) -> OberonResult<()> {
        self.emit(format_args!("MODULE {};\n", module.name.name))?;
        if let Some(imports) = &module.imports {
            self.write("IMPORT ");
            imports.accept(self)?;
            self.write(";\n");
        }
        self.print_declarations(&module.declarations)?;
        self.emit(format_args!("END {}.\n", module.end_name.name))
    }

    fn visit_identifier(&mut self, identifier: &Identifier) -> OberonResult<()> {
        self.write(&identifier.name);
        Ok(())
    }

    fn visit_ident_def(&mut self, def: &IdentDef) -> OberonResult<()> {
        self.write(&def.name);
        if def.exported {
            self.write("*");
        }
        Ok(())
    }

    fn visit_qualident(&mut self, qualident: &Qualident) -> OberonResult<()> {
        self.emit(format_args!("{}", qualident))
    }

    fn visit_number(&mut self, number: &Number) -> OberonResult<()> {
        walk::walk_number(self, number)
    }

    fn visit_integer(&mut self, integer: &Integer) -> OberonResult<()> {
        self.emit(format_args!("{}", integer.value))
    }

    // Reals always keep a decimal point so they reparse as reals.
    fn visit_real(&mut self, real: &Real) -> OberonResult<()> {
        let text = real.value.to_string();
        self.write(&text);
        if !text.contains('.') {
            self.write(".0");
        }
        Ok(())
    }

    fn visit_string(&mut self, string: &StringLiteral) -> OberonResult<()> {
        self.emit(format_args!("\"{}\"", string.value))
    }

    fn visit_const_declaration(&mut self, declaration: &ConstDeclaration) -> OberonResult<()> {
        self.start_line();
        declaration.name.accept(self)?;
        self.write(" = ");
        declaration.value.accept(self)?;
        self.write(";");
        self.end_line();
        Ok(())
    }

    fn visit_const_expression(&mut self, expression: &ConstExpression) -> OberonResult<()> {
        walk::walk_const_expression(self, expression)
    }

    fn visit_type_declaration(&mut self, declaration: &TypeDeclaration) -> OberonResult<()> {
        self.start_line();
        declaration.name.accept(self)?;
        self.write(" = ");
        declaration.declared_type.accept(self)?;
        self.write(";");
        self.end_line();
        Ok(())
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> OberonResult<()> {
        self.start_line();
        declaration.names.accept(self)?;
        self.write(": ");
        declaration.var_type.accept(self)?;
        self.write(";");
        self.end_line();
        Ok(())
    }

    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList) -> OberonResult<()> {
        if list.declarations.is_empty() {
            return Ok(());
        }
        self.start_line();
        self.write("VAR");
        self.end_line();
        self.nested(|printer| walk::walk_variable_declaration_list(printer, list))
    }

    fn visit_procedure_declaration(&mut self, declaration: &ProcedureDeclaration) -> OberonResult<()> {
        self.start_line();
        declaration.heading.accept(self)?;
        self.write(";");
        self.end_line();
        self.nested(|printer| {
            printer.print_declarations(&declaration.body)?;
            if let Some(value) = &declaration.return_value {
                printer.start_line();
                printer.write("RETURN ");
                value.accept(printer)?;
                printer.end_line();
            }
            Ok(())
        })?;
        self.start_line();
        self.write("END ");
        declaration.end_name.accept(self)?;
        self.write(";");
        self.end_line();
        Ok(())
    }

    fn visit_procedure_heading(&mut self, heading: &ProcedureHeading) -> OberonResult<()> {
        self.write("PROCEDURE ");
        walk::walk_procedure_heading(self, heading)
    }

    fn visit_type(&mut self, ty: &Type) -> OberonResult<()> {
        walk::walk_type(self, ty)
    }

    fn visit_array_type(&mut self, array_type: &ArrayType) -> OberonResult<()> {
        self.write("ARRAY ");
        array_type.lengths.accept(self)?;
        self.write(" OF ");
        array_type.element.accept(self)
    }

    fn visit_base_type(&mut self, base_type: &BaseType) -> OberonResult<()> {
        self.write("(");
        base_type.name.accept(self)?;
        self.write(")");
        Ok(())
    }

    fn visit_record_type(&mut self, record_type: &RecordType) -> OberonResult<()> {
        self.write("RECORD");
        if let Some(base) = &record_type.base {
            self.write(" ");
            base.accept(self)?;
        }
        if record_type.fields.field_lists.is_empty() {
            self.write(" END");
            return Ok(());
        }
        self.end_line();
        record_type.fields.accept(self)?;
        self.start_line();
        self.write("END");
        Ok(())
    }

    fn visit_pointer_type(&mut self, pointer_type: &PointerType) -> OberonResult<()> {
        self.write("POINTER TO ");
        walk::walk_pointer_type(self, pointer_type)
    }

    fn visit_qualident_type(&mut self, qualident_type: &QualidentType) -> OberonResult<()> {
        walk::walk_qualident_type(self, qualident_type)
    }

    fn visit_procedure_type(&mut self, procedure_type: &ProcedureType) -> OberonResult<()> {
        self.write("PROCEDURE");
        walk::walk_procedure_type(self, procedure_type)
    }

    fn visit_field_list(&mut self, field_list: &FieldList) -> OberonResult<()> {
        field_list.names.accept(self)?;
        self.write(": ");
        field_list.field_type.accept(self)
    }

    // One field list per line; the last one has no trailing semicolon.
    fn visit_field_list_sequence(&mut self, sequence: &FieldListSequence) -> OberonResult<()> {
        self.nested(|printer| {
            let count = sequence.field_lists.len();
            for (index, field_list) in sequence.field_lists.iter().enumerate() {
                printer.start_line();
                field_list.accept(printer)?;
                if index + 1 < count {
                    printer.write(";");
                }
                printer.end_line();
            }
            Ok(())
        })
    }

    fn visit_ident_def_list(&mut self, list: &IdentDefList) -> OberonResult<()> {
        self.print_separated(&list.defs, ", ")
    }

    fn visit_length(&mut self, length: &Length) -> OberonResult<()> {
        walk::walk_length(self, length)
    }

    fn visit_length_list(&mut self, list: &LengthList) -> OberonResult<()> {
        self.print_separated(&list.lengths, ", ")
    }

    fn visit_expression(&mut self, expression: &Expression) -> OberonResult<()> {
        walk::walk_expression(self, expression)
    }

    fn visit_simple_expression(&mut self, expression: &SimpleExpression) -> OberonResult<()> {
        walk::walk_simple_expression(self, expression)
    }

    fn visit_single_term(&mut self, single_term: &SingleTerm) -> OberonResult<()> {
        walk::walk_single_term(self, single_term)
    }

    fn visit_term_operation(&mut self, operation: &TermOperation) -> OberonResult<()> {
        walk::walk_term_operation(self, operation)
    }

    fn visit_term(&mut self, term: &Term) -> OberonResult<()> {
        walk::walk_term(self, term)
    }

    fn visit_factor(&mut self, factor: &Factor) -> OberonResult<()> {
        if let FactorKind::Parenthesized(expression) = &factor.kind {
            self.write("(");
            expression.accept(self)?;
            self.write(")");
            return Ok(());
        }
        walk::walk_factor(self, factor)
    }

    fn visit_binary_plus(&mut self, _op: &BinaryPlus) -> OberonResult<()> {
        self.write(" + ");
        Ok(())
    }

    fn visit_binary_minus(&mut self, _op: &BinaryMinus) -> OberonResult<()> {
        self.write(" - ");
        Ok(())
    }

    fn visit_logical_disjunction(&mut self, _op: &LogicalDisjunction) -> OberonResult<()> {
        self.write(" OR ");
        Ok(())
    }

    fn visit_multiplication(&mut self, op: &Multiplication) -> OberonResult<()> {
        self.print_operator("*", &op.right)
    }

    fn visit_division(&mut self, op: &Division) -> OberonResult<()> {
        self.print_operator("/", &op.right)
    }

    fn visit_integer_division(&mut self, op: &IntegerDivision) -> OberonResult<()> {
        self.print_operator("DIV", &op.right)
    }

    fn visit_modulo(&mut self, op: &Modulo) -> OberonResult<()> {
        self.print_operator("MOD", &op.right)
    }

    fn visit_logical_conjunction(&mut self, op: &LogicalConjunction) -> OberonResult<()> {
        self.print_operator("&", &op.right)
    }

    fn visit_unary_plus(&mut self, _op: &UnaryPlus) -> OberonResult<()> {
        self.write("+");
        Ok(())
    }

    fn visit_unary_minus(&mut self, _op: &UnaryMinus) -> OberonResult<()> {
        self.write("-");
        Ok(())
    }

    fn visit_formal_parameters(&mut self, parameters: &FormalParameters) -> OberonResult<()> {
        self.write("(");
        parameters.sections.accept(self)?;
        self.write(")");
        if let Some(result) = &parameters.result {
            self.write(": ");
            result.accept(self)?;
        }
        Ok(())
    }

    fn visit_formal_type(&mut self, formal_type: &FormalType) -> OberonResult<()> {
        for _ in 0..formal_type.open_arrays {
            self.write("ARRAY OF ");
        }
        walk::walk_formal_type(self, formal_type)
    }

    fn visit_fp_section(&mut self, section: &FPSection) -> OberonResult<()> {
        if section.by_reference {
            self.write("VAR ");
        }
        section.names.accept(self)?;
        self.write(": ");
        section.formal_type.accept(self)
    }

    fn visit_fp_section_list(&mut self, list: &FPSectionList) -> OberonResult<()> {
        self.print_separated(&list.sections, "; ")
    }

    fn visit_identifier_list(&mut self, list: &IdentifierList) -> OberonResult<()> {
        self.print_separated(&list.identifiers, ", ")
    }
}

/// Prints `node` with the default indent width.
pub fn print(node: &dyn Node) -> OberonResult<String> {
    Printer::default().print(node)
}
