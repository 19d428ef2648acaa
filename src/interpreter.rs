use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Instance, LoxClass};
use crate::environment::Environment;
use crate::error::{Reporter, RuntimeError};
use crate::expr::*;
use crate::function::{self, Callable, LoxFunction};
use crate::object::Object;
use crate::stmt::*;
use crate::token::{Token, TokenKind};

/// Non-local control flow out of statement execution. `Return` and
/// `Break` are not diagnostics — they never reach the `Reporter` — but
/// sharing one type with `RuntimeError` lets `?` thread both uniformly
/// through nested `execute`/`evaluate` calls.
pub enum Unwind {
    Return(Object),
    Break,
    RuntimeError(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(err: RuntimeError) -> Self {
        Unwind::RuntimeError(err)
    }
}

pub struct Interpreter {
    pub globals: Rc<Environment>,
    environment: Rc<Environment>,
    locals: HashMap<u64, usize>,
    output: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(locals: HashMap<u64, usize>, output: Box<dyn Write>) -> Self {
        let globals = Environment::new_global();
        globals.define("clock", Object::NativeFn(Rc::new(function::clock())));
        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals,
            output,
        }
    }

    /// Folds in another resolver pass's side-table. Used by the REPL,
    /// which resolves each line separately but keeps one `Interpreter`
    /// (and any closures it already created) alive across lines.
    pub fn merge_locals(&mut self, locals: HashMap<u64, usize>) {
        self.locals.extend(locals);
    }

    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut Reporter) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::RuntimeError(err) => {
                        reporter.runtime_error(&err);
                        return;
                    }
                    // A bare top-level `return`/`break` is rejected by the
                    // resolver before interpretation ever begins.
                    Unwind::Return(_) | Unwind::Break => return,
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<Environment>) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = (|| {
            for statement in statements {
                self.execute(statement)?;
            }
            Ok(())
        })();
        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        expr.accept(self)
    }

    fn lookup_variable(&mut self, id: u64, name: &Token) -> Result<Object, Unwind> {
        if let Some(&distance) = self.locals.get(&id) {
            Ok(self.environment.get_at(distance, &name.lexeme))
        } else {
            Ok(self.globals.get(name)?)
        }
    }
}

fn is_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Number(n) => Some(*n),
        _ => None,
    }
}

impl StmtVisitor<Result<(), Unwind>> for Interpreter {
    fn visit_expression(&mut self, data: &ExpressionData) -> Result<(), Unwind> {
        self.evaluate(&data.expression)?;
        Ok(())
    }

    fn visit_print(&mut self, data: &PrintData) -> Result<(), Unwind> {
        let value = self.evaluate(&data.expression)?;
        writeln!(self.output, "{value}").expect("write to output");
        Ok(())
    }

    fn visit_var(&mut self, data: &VarData) -> Result<(), Unwind> {
        let value = match &data.initializer {
            Some(expr) => self.evaluate(expr)?,
            None => Object::Nil,
        };
        self.environment.define(data.name.lexeme.clone(), value);
        Ok(())
    }

    fn visit_block(&mut self, data: &BlockData) -> Result<(), Unwind> {
        let env = Environment::new_enclosed(Rc::clone(&self.environment));
        self.execute_block(&data.statements, env)
    }

    fn visit_if(&mut self, data: &IfData) -> Result<(), Unwind> {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)?;
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)?;
        }
        Ok(())
    }

    fn visit_while(&mut self, data: &WhileData) -> Result<(), Unwind> {
        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body) {
                Err(Unwind::Break) => break,
                other => other?,
            }
        }
        Ok(())
    }

    fn visit_function(&mut self, data: &Rc<FunctionData>) -> Result<(), Unwind> {
        let function = LoxFunction::new(Rc::clone(data), Rc::clone(&self.environment), false);
        self.environment
            .define(data.name.lexeme.clone(), Object::Fn(Rc::new(function)));
        Ok(())
    }

    fn visit_return(&mut self, data: &ReturnData) -> Result<(), Unwind> {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::Nil,
        };
        Err(Unwind::Return(value))
    }

    fn visit_break(&mut self, _data: &BreakData) -> Result<(), Unwind> {
        Err(Unwind::Break)
    }

    fn visit_class(&mut self, data: &ClassData) -> Result<(), Unwind> {
        let superclass = match &data.superclass {
            Some(var) => {
                let value = self.lookup_variable(var.id, &var.name)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError::new(
                            var.name.clone(),
                            "Superclass must be a class.",
                        )
                        .into())
                    }
                }
            }
            None => None,
        };

        self.environment.define(data.name.lexeme.clone(), Object::Nil);

        let method_env = if let Some(superclass) = &superclass {
            let env = Environment::new_enclosed(Rc::clone(&self.environment));
            env.define("super", Object::Class(Rc::clone(superclass)));
            env
        } else {
            Rc::clone(&self.environment)
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = LoxFunction::new(Rc::clone(method), Rc::clone(&method_env), is_initializer);
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = LoxClass::new(data.name.lexeme.clone(), superclass, methods);
        self.environment
            .assign(&data.name, Object::Class(Rc::new(class)))?;
        Ok(())
    }
}

impl ExprVisitor<Result<Object, Unwind>> for Interpreter {
    fn visit_literal(&mut self, data: &LiteralData) -> Result<Object, Unwind> {
        Ok(data.value.clone())
    }

    fn visit_grouping(&mut self, data: &GroupingData) -> Result<Object, Unwind> {
        self.evaluate(&data.expression)
    }

    fn visit_unary(&mut self, data: &UnaryData) -> Result<Object, Unwind> {
        let right = self.evaluate(&data.right)?;
        match data.operator.kind {
            TokenKind::Minus => {
                let n = is_number(&right)
                    .ok_or_else(|| RuntimeError::new(data.operator.clone(), "Operand must be a number."))?;
                Ok(Object::Number(-n))
            }
            TokenKind::Bang => Ok(Object::Bool(!right.is_truthy())),
            _ => unreachable!("unary operator must be '!' or '-'"),
        }
    }

    fn visit_binary(&mut self, data: &BinaryData) -> Result<Object, Unwind> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        let numbers = |l: &Object, r: &Object| -> Option<(f64, f64)> {
            match (is_number(l), is_number(r)) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            }
        };

        match op.kind {
            TokenKind::Minus => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Number(a - b))
            }
            TokenKind::Slash => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Number(a / b))
            }
            TokenKind::Star => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Number(a * b))
            }
            TokenKind::Plus => match (&left, &right) {
                (Object::Number(a), Object::Number(b)) => Ok(Object::Number(a + b)),
                (Object::Str(a), Object::Str(b)) => Ok(Object::Str(format!("{a}{b}"))),
                _ => Err(RuntimeError::new(
                    op.clone(),
                    "Operands must be two numbers or two strings.",
                )
                .into()),
            },
            TokenKind::Greater => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Bool(a > b))
            }
            TokenKind::GreaterEqual => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Bool(a >= b))
            }
            TokenKind::Less => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Bool(a < b))
            }
            TokenKind::LessEqual => {
                let (a, b) = numbers(&left, &right)
                    .ok_or_else(|| RuntimeError::new(op.clone(), "Operands must be numbers."))?;
                Ok(Object::Bool(a <= b))
            }
            TokenKind::BangEqual => Ok(Object::Bool(left != right)),
            TokenKind::EqualEqual => Ok(Object::Bool(left == right)),
            _ => unreachable!("unexpected binary operator"),
        }
    }

    fn visit_logical(&mut self, data: &LogicalData) -> Result<Object, Unwind> {
        let left = self.evaluate(&data.left)?;
        if data.operator.kind == TokenKind::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }
        self.evaluate(&data.right)
    }

    fn visit_variable(&mut self, data: &VariableData) -> Result<Object, Unwind> {
        self.lookup_variable(data.id, &data.name)
    }

    fn visit_assign(&mut self, data: &AssignData) -> Result<Object, Unwind> {
        let value = self.evaluate(&data.value)?;
        if let Some(&distance) = self.locals.get(&data.id) {
            self.environment.assign_at(distance, &data.name, value.clone());
        } else {
            self.globals.assign(&data.name, value.clone())?;
        }
        Ok(value)
    }

    fn visit_call(&mut self, data: &CallData) -> Result<Object, Unwind> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for arg in &data.arguments {
            arguments.push(self.evaluate(arg)?);
        }

        let arity = match &callee {
            Object::Fn(f) => f.arity(),
            Object::NativeFn(f) => f.arity(),
            Object::Class(class) => class.arity(),
            _ => {
                return Err(RuntimeError::new(
                    data.paren.clone(),
                    "Can only call functions and classes.",
                )
                .into())
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError::new(
                data.paren.clone(),
                format!("Expected {} arguments but got {}.", arity, arguments.len()),
            )
            .into());
        }

        match callee {
            Object::Fn(f) => f.call(self, arguments),
            Object::NativeFn(f) => f.call(self, arguments),
            Object::Class(class) => {
                let instance = Rc::new(Instance::new(Rc::clone(&class)));
                if let Some(init) = class.find_method("init") {
                    let bound = init.bind(Rc::clone(&instance));
                    bound.call(self, arguments)?;
                }
                Ok(Object::Instance(instance))
            }
            _ => unreachable!("non-callable already rejected above"),
        }
    }

    fn visit_get(&mut self, data: &GetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(instance) => Ok(instance.get(&data.name)?),
            _ => Err(RuntimeError::new(data.name.clone(), "Only instances have properties.").into()),
        }
    }

    fn visit_set(&mut self, data: &SetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&data.object)?;
        let instance = match object {
            Object::Instance(instance) => instance,
            _ => return Err(RuntimeError::new(data.name.clone(), "Only instances have fields.").into()),
        };
        let value = self.evaluate(&data.value)?;
        instance.set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this(&mut self, data: &ThisData) -> Result<Object, Unwind> {
        self.lookup_variable(data.id, &data.keyword)
    }

    fn visit_super(&mut self, data: &SuperData) -> Result<Object, Unwind> {
        let distance = *self
            .locals
            .get(&data.id)
            .expect("resolver must have resolved 'super'");
        let superclass = match self.environment.get_at(distance, "super") {
            Object::Class(class) => class,
            _ => unreachable!("'super' must resolve to a class"),
        };
        // `this` lives one scope closer to the method body than `super`.
        let this = match self.environment.get_at(distance - 1, "this") {
            Object::Instance(instance) => instance,
            _ => unreachable!("'this' must resolve to an instance"),
        };

        let method = superclass.find_method(&data.method.lexeme).ok_or_else(|| {
            RuntimeError::new(
                data.method.clone(),
                format!("Undefined property '{}'.", data.method.lexeme),
            )
        })?;

        Ok(Object::Fn(Rc::new(method.bind(this))))
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter").finish_non_exhaustive()
    }
}
