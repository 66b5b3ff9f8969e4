use crate::ast::{BlockStatement, InfixOperator, PrefixOperator};
pub use crate::object::builtins::BuiltIn;
pub use crate::object::environment::{Env, Environment};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub mod builtins;
pub mod environment;

/// Runtime values. Arrays and functions are reference counted so that copying a value is cheap
/// and `==` on them can compare identity.
#[derive(Clone, Debug)]
pub enum Object {
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Rc<Vec<Object>>),
    Function(Rc<Function>),
    BuiltIn(&'static BuiltIn),
    /// A runtime error handed back to the host by `evaluator::eval_program`.
    Error(String),
}

/// A closure: the parameters and body of a function literal, plus the environment it was
/// evaluated in.
pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    pub env: Env,
}

// The captured environment is left out; it may well contain this function.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Integer(v) => write!(f, "{}", v),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Function(function) => {
                write!(f, "fn({}) {}", function.parameters.join(", "), function.body)
            }
            Object::BuiltIn(_) => write!(f, "builtin function"),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// Structural equality, used by tests and hosts. The language's own `==` lives in the
/// evaluator and compares arrays and functions by identity.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Null, Object::Null) => true,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::BuiltIn(a), Object::BuiltIn(b)) => a.name == b.name,
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Object {
    /// Zero, `false` and `null` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null => false,
            Object::Boolean(b) => *b,
            Object::Integer(v) => *v != 0,
            _ => true,
        }
    }

    /// Identity comparison backing `==` and `!=` for non-numeric values.
    pub fn is_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            _ => self == other,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Boolean(_) => "BOOLEAN",
            Object::Integer(_) => "INTEGER",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Function(_) => "FUNCTION",
            Object::BuiltIn(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }
}

impl From<Vec<Object>> for Object {
    fn from(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(elements))
    }
}

pub type EvalResult = std::result::Result<Object, EvalError>;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("not a function: {}", .0.type_name())]
    NotCallable(Object),
    #[error("unknown operator: {} {} {}", .1.type_name(), .0, .2.type_name())]
    UnsupportedInfixOperator(InfixOperator, Object, Object),
    #[error("unknown operator: {}{}", .0, .1.type_name())]
    UnsupportedPrefixOperator(PrefixOperator, Object),
    #[error("type mismatch: {} {} {}", .1.type_name(), .0, .2.type_name())]
    TypeMismatch(InfixOperator, Object, Object),
    #[error("index operator not supported: {}[{}]", .0.type_name(), .1.type_name())]
    UnsupportedIndexOperator(Object, Object),
    #[error("arguments mismatch. Defined {defined}, received: {received}")]
    ArgumentsMismatch { defined: usize, received: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong number of arguments: received {received}, expected {expected}")]
    WrongArgumentCount { expected: usize, received: usize },
    #[error("argument to `{}` not supported, received {}", .0, .1.type_name())]
    UnsupportedArgument(&'static str, Object),
}

pub fn assert_argument_count(expected: usize, args: &[Object]) -> Result<(), EvalError> {
    if args.len() != expected {
        return Err(EvalError::WrongArgumentCount {
            expected,
            received: args.len(),
        });
    }

    Ok(())
}
