use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::class::Instance;
use crate::environment::Environment;
use crate::interpreter::{Interpreter, Unwind};
use crate::object::Object;
use crate::stmt::FunctionData;

pub trait Callable {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind>;
}

/// A user-defined function or method, paired with the environment it
/// closed over at the point of declaration.
#[derive(Debug)]
pub struct LoxFunction {
    declaration: Rc<FunctionData>,
    closure: Rc<Environment>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<Environment>, is_initializer: bool) -> Self {
        LoxFunction {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    /// Returns a new `LoxFunction` whose closure is a fresh scope, child
    /// of this function's closure, with `this` bound to `instance`.
    pub fn bind(&self, instance: Rc<Instance>) -> LoxFunction {
        let env = Environment::new_enclosed(Rc::clone(&self.closure));
        env.define("this", Object::Instance(instance));
        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        let env = Environment::new_enclosed(Rc::clone(&self.closure));
        for (param, arg) in self.declaration.params.iter().zip(arguments.into_iter()) {
            env.define(param.lexeme.clone(), arg);
        }

        let result = interpreter.execute_block(&self.declaration.body, env);

        if self.is_initializer {
            return Ok(self.closure.get_at(0, "this"));
        }

        match result {
            Ok(()) => Ok(Object::Nil),
            Err(Unwind::Return(value)) => Ok(value),
            Err(other) => Err(other),
        }
    }
}

/// A host-provided callable. `clock` is the only one this interpreter
/// exposes.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub implementation: fn(&[Object]) -> Object,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        Ok((self.implementation)(&arguments))
    }
}

pub fn clock() -> NativeFunction {
    NativeFunction {
        name: "clock",
        arity: 0,
        implementation: |_args| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock is before the Unix epoch");
            Object::Number(now.as_secs_f64())
        },
    }
}
