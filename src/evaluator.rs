use crate::ast::{BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::object::{builtins, Env, Environment, EvalError, EvalResult, Function, Object};
use std::rc::Rc;
use tracing::debug;

/// Ways of leaving an evaluation early. Both travel on the `Err` side of `Flow` so that `?`
/// carries them out through every enclosing expression until a call boundary or the program
/// root deals with them; operators only ever see values that arrived on the `Ok` side.
#[derive(Debug)]
enum Exit {
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Exit {
    fn from(err: EvalError) -> Self {
        Exit::Error(err)
    }
}

type Flow = std::result::Result<Object, Exit>;

/// Evaluates `program` in `env`. Bindings made by top-level `let` statements stay in `env`, so
/// a host can feed successive inputs through the same environment.
#[tracing::instrument(level = "trace", skip_all, fields(statements = program.statements.len()))]
pub fn eval(program: &Program, env: &Env) -> EvalResult {
    match eval_statements(&program.statements, env) {
        Ok(obj) | Err(Exit::Return(obj)) => Ok(obj),
        Err(Exit::Error(err)) => Err(err),
    }
}

/// Like `eval`, but folds a runtime failure into an `Object::Error` value for the host to render.
pub fn eval_program(program: &Program, env: &Env) -> Object {
    eval(program, env).unwrap_or_else(|err| Object::Error(err.to_string()))
}

fn eval_statements(statements: &[Statement], env: &Env) -> Flow {
    let mut res = Object::Null;

    for statement in statements {
        res = eval_statement(statement, env)?;
    }

    Ok(res)
}

fn eval_block_statement(block: &BlockStatement, env: &Env) -> Flow {
    eval_statements(&block.statements, env)
}

fn eval_statement(statement: &Statement, env: &Env) -> Flow {
    match statement {
        Statement::Expression(exp) => eval_expression(exp, env),
        Statement::Let(name, exp) => {
            let value = eval_expression(exp, env)?;
            env.borrow_mut().set(name, value);
            Ok(Object::Null)
        }
        Statement::Return(exp) => Err(Exit::Return(eval_expression(exp, env)?)),
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Flow {
    match expression {
        Expression::IntegerLiteral(v) => Ok(Object::Integer(*v)),
        Expression::Boolean(b) => Ok(Object::Boolean(*b)),
        Expression::StringLiteral(s) => Ok(Object::String(s.clone())),
        Expression::Identifier(name) => Ok(eval_identifier(name, env)?),
        Expression::ArrayLiteral(elements) => Ok(Object::from(eval_expressions(elements, env)?)),
        Expression::Prefix(operator, right) => {
            let right = eval_expression(right, env)?;
            Ok(eval_prefix_expression(*operator, right)?)
        }
        Expression::Infix(operator, left, right) => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            Ok(eval_infix_expression(*operator, left, right)?)
        }
        Expression::If(condition, consequence, alternative) => {
            if eval_expression(condition, env)?.is_truthy() {
                eval_block_statement(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, env)
            } else {
                Ok(Object::Null)
            }
        }
        Expression::FunctionLiteral(parameters, body) => Ok(Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        }))),
        Expression::Call(function, arguments) => {
            let function = eval_expression(function, env)?;
            let arguments = eval_expressions(arguments, env)?;
            Ok(apply_function(function, arguments)?)
        }
        Expression::IndexExpression(left, index) => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            Ok(eval_index_expression(left, index)?)
        }
    }
}

fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Object>, Exit> {
    expressions
        .iter()
        .map(|exp| eval_expression(exp, env))
        .collect()
}

fn eval_identifier(name: &str, env: &Env) -> EvalResult {
    env.borrow()
        .get(name)
        .or_else(|| builtins::lookup(name))
        .ok_or_else(|| EvalError::IdentifierNotFound(name.to_string()))
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> EvalResult {
    match (operator, right) {
        (PrefixOperator::Bang, right) => Ok(Object::Boolean(!right.is_truthy())),
        (PrefixOperator::Minus, Object::Integer(v)) => Ok(Object::Integer(v.wrapping_neg())),
        (operator, right) => Err(EvalError::UnsupportedPrefixOperator(operator, right)),
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> EvalResult {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) if operator == InfixOperator::Plus => {
            Ok(Object::String(format!("{}{}", l, r)))
        }
        (Object::String(_), Object::String(_)) => {
            Err(EvalError::UnsupportedInfixOperator(operator, left, right))
        }
        _ if left.type_name() != right.type_name() => {
            Err(EvalError::TypeMismatch(operator, left, right))
        }
        _ => match operator {
            InfixOperator::Eq => Ok(Object::Boolean(left.is_identical(&right))),
            InfixOperator::NotEq => Ok(Object::Boolean(!left.is_identical(&right))),
            _ => Err(EvalError::UnsupportedInfixOperator(operator, left, right)),
        },
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> EvalResult {
    let res = match operator {
        InfixOperator::Plus => Object::Integer(left.wrapping_add(right)),
        InfixOperator::Minus => Object::Integer(left.wrapping_sub(right)),
        InfixOperator::Asterisk => Object::Integer(left.wrapping_mul(right)),
        InfixOperator::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        InfixOperator::Lt => Object::Boolean(left < right),
        InfixOperator::Gt => Object::Boolean(left > right),
        InfixOperator::Le => Object::Boolean(left <= right),
        InfixOperator::Ge => Object::Boolean(left >= right),
        InfixOperator::Eq => Object::Boolean(left == right),
        InfixOperator::NotEq => Object::Boolean(left != right),
    };

    Ok(res)
}

fn eval_index_expression(left: Object, index: Object) -> EvalResult {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(Object::Null)),
        _ => Err(EvalError::UnsupportedIndexOperator(left, index)),
    }
}

fn apply_function(function: Object, arguments: Vec<Object>) -> EvalResult {
    match function {
        Object::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(EvalError::ArgumentsMismatch {
                    defined: function.parameters.len(),
                    received: arguments.len(),
                });
            }

            debug!(parameters = ?function.parameters, "applying function");

            let mut scope = Environment::new_enclosed(&function.env);
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                scope.set(parameter, argument);
            }

            match eval_block_statement(&function.body, &scope.into_env()) {
                Ok(obj) | Err(Exit::Return(obj)) => Ok(obj),
                Err(Exit::Error(err)) => Err(err),
            }
        }
        Object::BuiltIn(builtin) => {
            debug!(name = builtin.name, "applying builtin");
            (builtin.func)(arguments)
        }
        other => Err(EvalError::NotCallable(other)),
    }
}
