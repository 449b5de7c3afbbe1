use crate::ast::{
    ArrayType, BaseType, BinaryMinus, BinaryPlus, ConstDeclaration, ConstExpression,
    DeclarationSequence, Division, Expression, FPSection, FPSectionList, Factor, FieldList,
    FieldListSequence, FormalParameters, FormalType, IdentDef, IdentDefList, Identifier,
    IdentifierList, Integer, IntegerDivision, Length, LengthList, LogicalConjunction,
    LogicalDisjunction, Module, Modulo, Multiplication, Node, Number, PointerType,
    ProcedureDeclaration, ProcedureHeading, ProcedureType, Qualident, QualidentType, Real,
    RecordType, Root, SimpleExpression, SingleTerm, StringLiteral, Term, TermOperation, Type,
    TypeDeclaration, TypeKind, UnaryMinus, UnaryPlus, VariableDeclaration, VariableDeclarationList,
};
use crate::passes::evaluator::{Evaluator, Value};
use crate::semantic::symboltable::{Symbol, SymbolTable, SymbolType};
use crate::semantic::visiters::ASTVisitor;
use crate::semantic::walk;
use crate::utils::config::predeclared;
use crate::utils::diagnostics::{Diagnostic, DiagnosticSink};
use crate::utils::errors::{OberonError, OberonResult};
use std::collections::HashSet;
use tracing::debug;

// Scope level of module-wide declarations; level 0 holds the predeclared names.
const MODULE_LEVEL: usize = 1;

/// What a name is expected to denote where it appears.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Context {
    Type,
    Value,
    ConstValue,
}

/// Declaration checks over a whole module.
///
/// Every problem becomes a diagnostic and checking carries on, so one run
/// reports all of them. Constant expressions are evaluated as they are
/// declared; an expression that already produced a diagnostic is not
/// evaluated again.
pub struct Checker {
    symbols: SymbolTable,
    diagnostics: DiagnosticSink,
    evaluator: Evaluator,
    imports: HashSet<String>,
    path: Vec<String>,
    context: Context,
    declaring: Option<SymbolType>,
    tainted: bool,
    // Pointer targets not yet declared while a TYPE section is checked.
    forward_pointers: Option<Vec<Qualident>>,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::with_predeclared(),
            diagnostics: DiagnosticSink::new(),
            evaluator: Evaluator::new(),
            imports: HashSet::new(),
            path: Vec::new(),
            context: Context::Value,
            declaring: None,
            tainted: false,
            forward_pointers: None,
        }
    }

    /// Checks `node` and returns everything that was reported.
    pub fn check(mut self, node: &dyn Node) -> OberonResult<DiagnosticSink> {
        node.accept(&mut self)?;
        Ok(self.diagnostics)
    }

    fn report(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::error(message).in_context(self.path.join("."));
        self.diagnostics.add(diagnostic);
    }

    fn warn(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(message).in_context(self.path.join("."));
        self.diagnostics.add(diagnostic);
    }

    fn in_context<F>(&mut self, context: Context, body: F) -> OberonResult<()>
    where
        F: FnOnce(&mut Self) -> OberonResult<()>,
    {
        let saved = std::mem::replace(&mut self.context, context);
        let result = body(self);
        self.context = saved;
        result
    }

    fn declaring_as<F>(&mut self, kind: SymbolType, body: F) -> OberonResult<()>
    where
        F: FnOnce(&mut Self) -> OberonResult<()>,
    {
        let saved = self.declaring.replace(kind);
        let result = body(self);
        self.declaring = saved;
        result
    }

    /// Enters `name` into the innermost scope. Returns false when the name
    /// was already declared there.
    fn declare(&mut self, name: &str, exported: bool, kind: SymbolType) -> bool {
        let level = self.symbols.level();
        if exported && level != MODULE_LEVEL {
            self.report(format!(
                "export mark on '{}' is only allowed at module level",
                name
            ));
        }
        // Parameters are hidden by the procedure that owns them; those of a
        // procedure type never reach a constant expression.
        let hides_constants = !matches!(kind, SymbolType::Constant | SymbolType::Parameter);
        match self.symbols.insert(name, Symbol::new(kind, exported)) {
            Ok(()) => {
                if hides_constants {
                    self.evaluator.hide(name);
                }
                true
            }
            Err(OberonError::SymbolAlreadyDefined { name }) => {
                self.report(format!("'{}' is already declared in this scope", name));
                false
            }
            Err(err) => {
                self.report(err.to_string());
                false
            }
        }
    }

    fn check_end_name(&mut self, what: &str, name: &str, end_name: &Identifier) {
        if end_name.name != name {
            self.report(format!(
                "{} '{}' is closed by 'END {}'",
                what, name, end_name.name
            ));
        }
    }

    /// Resolves the names in a constant expression and, when they all
    /// denote known constants, evaluates it.
    fn constant_value(&mut self, expression: &ConstExpression) -> OberonResult<Option<Value>> {
        self.tainted = false;
        self.in_context(Context::ConstValue, |checker| expression.accept(checker))?;
        if self.tainted {
            return Ok(None);
        }
        match self.evaluator.evaluate(expression) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.report(format!("invalid constant expression: {}", err));
                Ok(None)
            }
        }
    }

    fn check_declarations(&mut self, declarations: &DeclarationSequence) -> OberonResult<()> {
        for constant in &declarations.constants {
            constant.accept(self)?;
        }

        // A pointer may name a type declared later in the same TYPE section.
        let outer = self.forward_pointers.replace(Vec::new());
        let result = declarations.types.iter().try_for_each(|ty| ty.accept(self));
        let pending = std::mem::replace(&mut self.forward_pointers, outer);
        result?;
        for target in pending.unwrap_or_default() {
            self.in_context(Context::Type, |checker| target.accept(checker))?;
        }

        declarations.variables.accept(self)?;
        for procedure in &declarations.procedures {
            procedure.accept(self)?;
        }
        Ok(())
    }

    fn resolve_qualified(&mut self, qualident: &Qualident, module: &str) {
        if !self.imports.contains(module) {
            self.report(format!(
                "'{}' is qualified by module '{}', which is not imported",
                qualident, module
            ));
            self.tainted = true;
        } else if self.context == Context::ConstValue {
            self.warn(format!(
                "value of imported constant '{}' is unknown here",
                qualident
            ));
            self.tainted = true;
        }
    }

    fn resolve(&mut self, qualident: &Qualident) {
        if let Some(module) = &qualident.module {
            self.resolve_qualified(qualident, module);
            return;
        }
        let name = qualident.name.as_str();
        let symbol_type = match self.symbols.get(name) {
            Some(symbol) => symbol.symbol_type.clone(),
            None => {
                self.report(format!("undeclared identifier '{}'", name));
                self.tainted = true;
                return;
            }
        };
        let problem = match (self.context, &symbol_type) {
            (Context::Type, SymbolType::Type) => None,
            (Context::Type, other) => Some(format!("{} '{}' is not a type", other.describe(), name)),
            (_, SymbolType::Type) => Some(format!("type '{}' used as a value", name)),
            (_, SymbolType::Module) => Some(format!("module '{}' used as a value", name)),
            (Context::ConstValue, SymbolType::Constant) => {
                // A constant whose own value could not be computed was
                // already reported where it was declared.
                if self.evaluator.lookup(name).is_none()
                    && predeclared::boolean_constant(name).is_none()
                {
                    self.tainted = true;
                }
                None
            }
            (Context::ConstValue, other) => Some(format!(
                "{} '{}' is not a constant",
                other.describe(),
                name
            )),
            (Context::Value, _) => None,
        };
        if let Some(message) = problem {
            self.report(message);
            self.tainted = true;
        }
    }
}

impl ASTVisitor for Checker {
    fn visit_root(&mut self, root: &Root) -> OberonResult<()> {
        walk::walk_root(self, root)
    }

    fn visit_module(&mut self, module: &Module) -> OberonResult<()> {
        let name = module.name.name.clone();
        debug!(module = %name, "checking module");
        self.path.push(name.clone());
        self.symbols.push_scope();

        if let Some(imports) = &module.imports {
            imports.accept(self)?;
        }
        self.check_declarations(&module.declarations)?;
        self.check_end_name("module", &name, &module.end_name);

        self.symbols.drop_scope()?;
        self.path.pop();
        Ok(())
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) -> OberonResult<()> {
        Ok(())
    }

    fn visit_ident_def(&mut self, def: &IdentDef) -> OberonResult<()> {
        if let Some(kind) = self.declaring.clone() {
            self.declare(&def.name, def.exported, kind);
        }
        Ok(())
    }

    fn visit_qualident(&mut self, qualident: &Qualident) -> OberonResult<()> {
        self.resolve(qualident);
        Ok(())
    }

    fn visit_number(&mut self, number: &Number) -> OberonResult<()> {
        walk::walk_number(self, number)
    }

    fn visit_integer(&mut self, _integer: &Integer) -> OberonResult<()> {
        Ok(())
    }

    fn visit_real(&mut self, _real: &Real) -> OberonResult<()> {
        Ok(())
    }

    fn visit_string(&mut self, _string: &StringLiteral) -> OberonResult<()> {
        Ok(())
    }

    fn visit_const_declaration(&mut self, declaration: &ConstDeclaration) -> OberonResult<()> {
        let name = declaration.name.name.as_str();
        debug!(constant = %name, "checking constant");
        // The name is not in scope inside its own value.
        let value = self.constant_value(&declaration.value)?;
        if self.declare(name, declaration.name.exported, SymbolType::Constant) {
            match value {
                Some(value) => {
                    debug!(constant = %name, value = %value, "constant value");
                    self.evaluator.define(name, value);
                }
                None => self.evaluator.hide(name),
            }
        }
        Ok(())
    }

    fn visit_const_expression(&mut self, expression: &ConstExpression) -> OberonResult<()> {
        walk::walk_const_expression(self, expression)
    }

    // The name is declared once its type is checked, so only a pointer
    // target can refer to it from inside.
    fn visit_type_declaration(&mut self, declaration: &TypeDeclaration) -> OberonResult<()> {
        debug!(type_name = %declaration.name.name, "checking type");
        self.in_context(Context::Type, |checker| declaration.declared_type.accept(checker))?;
        self.declare(&declaration.name.name, declaration.name.exported, SymbolType::Type);
        Ok(())
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> OberonResult<()> {
        debug!(variables = declaration.names.defs.len(), "checking variables");
        self.declaring_as(SymbolType::Variable, |checker| declaration.names.accept(checker))?;
        self.in_context(Context::Type, |checker| declaration.var_type.accept(checker))
    }

    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList) -> OberonResult<()> {
        walk::walk_variable_declaration_list(self, list)
    }

    fn visit_procedure_declaration(&mut self, declaration: &ProcedureDeclaration) -> OberonResult<()> {
        let name = declaration.name().to_string();
        debug!(procedure = %name, "checking procedure");
        let heading = &declaration.heading;
        self.declare(&name, heading.name.exported, SymbolType::Procedure);

        self.path.push(name.clone());
        self.symbols.push_scope();
        self.evaluator.enter_scope(&name);
        self.evaluator.hide_parameters(heading);

        heading.accept(self)?;
        self.check_declarations(&declaration.body)?;

        let has_result = heading
            .parameters
            .as_ref()
            .is_some_and(|parameters| parameters.result.is_some());
        match (&declaration.return_value, has_result) {
            (Some(value), true) => {
                self.in_context(Context::Value, |checker| value.accept(checker))?;
            }
            (Some(value), false) => {
                self.report(format!(
                    "procedure '{}' returns a value but declares no result type",
                    name
                ));
                self.in_context(Context::Value, |checker| value.accept(checker))?;
            }
            (None, true) => self.report(format!(
                "procedure '{}' declares a result type but has no RETURN",
                name
            )),
            (None, false) => {}
        }
        self.check_end_name("procedure", &name, &declaration.end_name);

        self.evaluator.leave_scope();
        self.symbols.drop_scope()?;
        self.path.pop();
        Ok(())
    }

    // Only the parameters; the procedure name is declared in the enclosing scope.
    fn visit_procedure_heading(&mut self, heading: &ProcedureHeading) -> OberonResult<()> {
        if let Some(parameters) = &heading.parameters {
            parameters.accept(self)?;
        }
        Ok(())
    }

    fn visit_type(&mut self, ty: &Type) -> OberonResult<()> {
        walk::walk_type(self, ty)
    }

    fn visit_array_type(&mut self, array_type: &ArrayType) -> OberonResult<()> {
        array_type.lengths.accept(self)?;
        self.in_context(Context::Type, |checker| array_type.element.accept(checker))
    }

    fn visit_base_type(&mut self, base_type: &BaseType) -> OberonResult<()> {
        self.in_context(Context::Type, |checker| base_type.name.accept(checker))
    }

    fn visit_record_type(&mut self, record_type: &RecordType) -> OberonResult<()> {
        walk::walk_record_type(self, record_type)
    }

    fn visit_pointer_type(&mut self, pointer_type: &PointerType) -> OberonResult<()> {
        if let TypeKind::Qualident(named) = &pointer_type.target.kind {
            let undeclared =
                !named.name.is_qualified() && self.symbols.get(&named.name.name).is_none();
            if let (true, Some(pending)) = (undeclared, self.forward_pointers.as_mut()) {
                pending.push(named.name.clone());
                return Ok(());
            }
        }
        self.in_context(Context::Type, |checker| pointer_type.target.accept(checker))
    }

    fn visit_qualident_type(&mut self, qualident_type: &QualidentType) -> OberonResult<()> {
        self.in_context(Context::Type, |checker| qualident_type.name.accept(checker))
    }

    // Parameter names of a procedure type live in a scope of their own.
    fn visit_procedure_type(&mut self, procedure_type: &ProcedureType) -> OberonResult<()> {
        self.symbols.push_scope();
        let result = walk::walk_procedure_type(self, procedure_type);
        self.symbols.drop_scope()?;
        result
    }

    fn visit_field_list(&mut self, field_list: &FieldList) -> OberonResult<()> {
        self.in_context(Context::Type, |checker| field_list.field_type.accept(checker))
    }

    fn visit_field_list_sequence(&mut self, sequence: &FieldListSequence) -> OberonResult<()> {
        let mut seen = HashSet::new();
        for def in sequence.field_lists.iter().flat_map(|list| &list.names.defs) {
            if !seen.insert(def.name.as_str()) {
                self.report(format!("field '{}' is declared twice in one record", def.name));
            }
        }
        walk::walk_field_list_sequence(self, sequence)
    }

    fn visit_ident_def_list(&mut self, list: &IdentDefList) -> OberonResult<()> {
        walk::walk_ident_def_list(self, list)
    }

    fn visit_length(&mut self, length: &Length) -> OberonResult<()> {
        match self.constant_value(&length.value)? {
            Some(Value::Integer(value)) if value > 0 => {}
            Some(value) => self.report(format!(
                "array length must be a positive integer, found {}",
                value
            )),
            None => {}
        }
        Ok(())
    }

    fn visit_length_list(&mut self, list: &LengthList) -> OberonResult<()> {
        walk::walk_length_list(self, list)
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
        walk::walk_factor(self, factor)
    }

    fn visit_binary_plus(&mut self, _op: &BinaryPlus) -> OberonResult<()> {
        Ok(())
    }

    fn visit_binary_minus(&mut self, _op: &BinaryMinus) -> OberonResult<()> {
        Ok(())
    }

    fn visit_logical_disjunction(&mut self, _op: &LogicalDisjunction) -> OberonResult<()> {
        Ok(())
    }

    fn visit_multiplication(&mut self, op: &Multiplication) -> OberonResult<()> {
        walk::walk_multiplication(self, op)
    }

    fn visit_division(&mut self, op: &Division) -> OberonResult<()> {
        walk::walk_division(self, op)
    }

    fn visit_integer_division(&mut self, op: &IntegerDivision) -> OberonResult<()> {
        walk::walk_integer_division(self, op)
    }

    fn visit_modulo(&mut self, op: &Modulo) -> OberonResult<()> {
        walk::walk_modulo(self, op)
    }

    fn visit_logical_conjunction(&mut self, op: &LogicalConjunction) -> OberonResult<()> {
        walk::walk_logical_conjunction(self, op)
    }

    fn visit_unary_plus(&mut self, _op: &UnaryPlus) -> OberonResult<()> {
        Ok(())
    }

    fn visit_unary_minus(&mut self, _op: &UnaryMinus) -> OberonResult<()> {
        Ok(())
    }

    fn visit_formal_parameters(&mut self, parameters: &FormalParameters) -> OberonResult<()> {
        parameters.sections.accept(self)?;
        if let Some(result) = &parameters.result {
            self.in_context(Context::Type, |checker| result.accept(checker))?;
        }
        Ok(())
    }

    fn visit_formal_type(&mut self, formal_type: &FormalType) -> OberonResult<()> {
        self.in_context(Context::Type, |checker| formal_type.name.accept(checker))
    }

    fn visit_fp_section(&mut self, section: &FPSection) -> OberonResult<()> {
        for identifier in &section.names.identifiers {
            self.declare(&identifier.name, false, SymbolType::Parameter);
        }
        section.formal_type.accept(self)
    }

    fn visit_fp_section_list(&mut self, list: &FPSectionList) -> OberonResult<()> {
        walk::walk_fp_section_list(self, list)
    }

    fn visit_identifier_list(&mut self, list: &IdentifierList) -> OberonResult<()> {
        // Only the import list reaches here.
        for identifier in &list.identifiers {
            self.declare(&identifier.name, false, SymbolType::Module);
            self.imports.insert(identifier.name.clone());
        }
        Ok(())
    }
}

/// Checks a parsed module with a fresh checker.
pub fn check(root: &Root) -> OberonResult<DiagnosticSink> {
    Checker::new().check(root)
}
