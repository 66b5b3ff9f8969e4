use super::{assert_argument_count, EvalError, EvalResult, Object};
use std::fmt;

pub type BuiltinFunction = fn(Vec<Object>) -> EvalResult;

/// A native function callable from scripts. Each one checks its own arguments and reports
/// misuse as an `EvalError`.
pub struct BuiltIn {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BuiltIn({})", self.name)
    }
}

/// The fixed set of built-ins, consulted when an identifier is not bound in any scope.
pub static BUILTINS: &[BuiltIn] = &[
    BuiltIn {
        name: "len",
        func: len,
    },
    BuiltIn {
        name: "puts",
        func: puts,
    },
    BuiltIn {
        name: "first",
        func: first,
    },
    BuiltIn {
        name: "last",
        func: last,
    },
    BuiltIn {
        name: "rest",
        func: rest,
    },
    BuiltIn {
        name: "push",
        func: push,
    },
];

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.name == name)
        .map(Object::BuiltIn)
}

fn len(args: Vec<Object>) -> EvalResult {
    assert_argument_count(1, &args)?;

    match &args[0] {
        Object::String(value) => Ok(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        _ => Err(EvalError::UnsupportedArgument("len", args[0].clone())),
    }
}

fn first(args: Vec<Object>) -> EvalResult {
    assert_argument_count(1, &args)?;

    match &args[0] {
        Object::Array(elements) => Ok(elements.first().cloned().unwrap_or(Object::Null)),
        _ => Err(EvalError::UnsupportedArgument("first", args[0].clone())),
    }
}

fn last(args: Vec<Object>) -> EvalResult {
    assert_argument_count(1, &args)?;

    match &args[0] {
        Object::Array(elements) => Ok(elements.last().cloned().unwrap_or(Object::Null)),
        _ => Err(EvalError::UnsupportedArgument("last", args[0].clone())),
    }
}

fn rest(args: Vec<Object>) -> EvalResult {
    assert_argument_count(1, &args)?;

    match &args[0] {
        Object::Array(elements) => Ok(match elements.split_first() {
            Some((_, tail)) => Object::from(tail.to_vec()),
            None => Object::Null,
        }),
        _ => Err(EvalError::UnsupportedArgument("rest", args[0].clone())),
    }
}

fn push(args: Vec<Object>) -> EvalResult {
    assert_argument_count(2, &args)?;

    match &args[0] {
        Object::Array(elements) => {
            let mut new_elements = Vec::with_capacity(elements.len() + 1);
            new_elements.extend(elements.iter().cloned());
            new_elements.push(args[1].clone());
            Ok(Object::from(new_elements))
        }
        _ => Err(EvalError::UnsupportedArgument("push", args[0].clone())),
    }
}

/// Writes to the process's standard output, not to the writer handed to `repl::start`.
fn puts(args: Vec<Object>) -> EvalResult {
    for arg in args {
        println!("{}", arg);
    }

    Ok(Object::Null)
}
