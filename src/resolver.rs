use std::collections::HashMap;

use crate::error::Reporter;
use crate::expr::*;
use crate::stmt::*;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Resolves every `Variable`/`Assign`/`This`/`Super` expression to a
/// lexical distance, producing the side-table the interpreter uses to
/// look bindings up without a name search at runtime.
pub struct Resolver<'a> {
    reporter: &'a mut Reporter,
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<u64, usize>,
    current_function: FunctionType,
    current_class: ClassType,
    loop_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(reporter: &'a mut Reporter) -> Self {
        Resolver {
            reporter,
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loop_depth: 0,
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<u64, usize> {
        self.resolve_statements(statements);
        self.locals
    }

    fn resolve_statements(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                self.reporter.error_at_token(
                    name,
                    "Already a variable with this name in this scope.",
                );
            }
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: u64, name: &str) {
        for (i, scope) in self.scopes.iter().enumerate().rev() {
            if scope.contains_key(name) {
                self.locals.insert(id, self.scopes.len() - 1 - i);
                return;
            }
        }
        // unresolved: falls back to global lookup at runtime
    }

    fn resolve_function(&mut self, function: &FunctionData, kind: FunctionType) {
        let enclosing_function = self.current_function;
        self.current_function = kind;
        // A function body starts a fresh loop context: `break` cannot
        // cross a function boundary, so a loop enclosing this function
        // declaration must not make `break` legal inside it.
        let enclosing_loop_depth = self.loop_depth;
        self.loop_depth = 0;

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_statements(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
        self.loop_depth = enclosing_loop_depth;
    }
}

impl<'a> StmtVisitor<()> for Resolver<'a> {
    fn visit_expression(&mut self, data: &ExpressionData) {
        self.resolve_expr(&data.expression);
    }

    fn visit_print(&mut self, data: &PrintData) {
        self.resolve_expr(&data.expression);
    }

    fn visit_var(&mut self, data: &VarData) {
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_block(&mut self, data: &BlockData) {
        self.begin_scope();
        self.resolve_statements(&data.statements);
        self.end_scope();
    }

    fn visit_if(&mut self, data: &IfData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while(&mut self, data: &WhileData) {
        self.resolve_expr(&data.condition);
        self.loop_depth += 1;
        self.resolve_stmt(&data.body);
        self.loop_depth -= 1;
    }

    fn visit_function(&mut self, data: &std::rc::Rc<FunctionData>) {
        self.declare(&data.name);
        self.define(&data.name);
        self.resolve_function(data, FunctionType::Function);
    }

    fn visit_return(&mut self, data: &ReturnData) {
        if self.current_function == FunctionType::None {
            self.reporter
                .error_at_token(&data.keyword, "Can't return from top-level code.");
        }
        if let Some(value) = &data.value {
            if self.current_function == FunctionType::Initializer {
                self.reporter.error_at_token(
                    &data.keyword,
                    "Can't return a value from an initializer.",
                );
            }
            self.resolve_expr(value);
        }
    }

    fn visit_break(&mut self, data: &BreakData) {
        if self.loop_depth == 0 {
            self.reporter
                .error_at_token(&data.keyword, "Can't break outside of a loop.");
        }
    }

    fn visit_class(&mut self, data: &ClassData) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            if superclass.name.lexeme == data.name.lexeme {
                self.reporter
                    .error_at_token(&superclass.name, "A class can't inherit from itself.");
            }
            self.current_class = ClassType::Subclass;
            self.resolve_local(superclass.id, &superclass.name.lexeme);

            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope just pushed")
                .insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope just pushed")
            .insert("this".to_string(), true);

        for method in &data.methods {
            let kind = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, kind);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}

impl<'a> ExprVisitor<()> for Resolver<'a> {
    fn visit_literal(&mut self, _data: &LiteralData) {}

    fn visit_grouping(&mut self, data: &GroupingData) {
        self.resolve_expr(&data.expression);
    }

    fn visit_unary(&mut self, data: &UnaryData) {
        self.resolve_expr(&data.right);
    }

    fn visit_binary(&mut self, data: &BinaryData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_logical(&mut self, data: &LogicalData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_variable(&mut self, data: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&false) {
                self.reporter.error_at_token(
                    &data.name,
                    "Can't read local variable in its own initializer.",
                );
            }
        }
        self.resolve_local(data.id, &data.name.lexeme);
    }

    fn visit_assign(&mut self, data: &AssignData) {
        self.resolve_expr(&data.value);
        self.resolve_local(data.id, &data.name.lexeme);
    }

    fn visit_call(&mut self, data: &CallData) {
        self.resolve_expr(&data.callee);
        for argument in &data.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get(&mut self, data: &GetData) {
        self.resolve_expr(&data.object);
    }

    fn visit_set(&mut self, data: &SetData) {
        self.resolve_expr(&data.value);
        self.resolve_expr(&data.object);
    }

    fn visit_this(&mut self, data: &ThisData) {
        if self.current_class == ClassType::None {
            self.reporter
                .error_at_token(&data.keyword, "Can't use 'this' outside of a class.");
            return;
        }
        self.resolve_local(data.id, "this");
    }

    fn visit_super(&mut self, data: &SuperData) {
        match self.current_class {
            ClassType::None => {
                self.reporter
                    .error_at_token(&data.keyword, "Can't use 'super' outside of a class.");
            }
            ClassType::Class => {
                self.reporter.error_at_token(
                    &data.keyword,
                    "Can't use 'super' in a class with no superclass.",
                );
            }
            ClassType::Subclass => {
                self.resolve_local(data.id, "super");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reporter;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn resolve(source: &str) -> (HashMap<u64, usize>, bool) {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        let statements = Parser::new(tokens, 0).parse(&mut reporter);
        let locals = Resolver::new(&mut reporter).resolve(&statements);
        (locals, reporter.had_error())
    }

    #[test]
    fn flags_self_reference_in_initializer() {
        let (_, had_error) = resolve("{ var a = a; }");
        assert!(had_error);
    }

    #[test]
    fn flags_return_outside_function() {
        let (_, had_error) = resolve("return 1;");
        assert!(had_error);
    }

    #[test]
    fn flags_break_outside_loop() {
        let (_, had_error) = resolve("break;");
        assert!(had_error);
    }

    #[test]
    fn resolves_shadowed_local_to_nonzero_depth() {
        let (locals, had_error) = resolve("var a = 1; fun f() { var a = 2; print a; }");
        assert!(!had_error);
        assert!(!locals.is_empty());
    }
}
