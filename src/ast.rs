//! Syntax tree produced by the parser.
//!
//! Every node implements `Display`, rendering a canonical form where each prefix and infix
//! expression is wrapped in parentheses and every statement of a block or program ends in `;`.
//! Parsing that rendering again yields the same tree.

use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    Boolean(bool),
    StringLiteral(String),
    ArrayLiteral(Vec<Expression>),
    Prefix(PrefixOperator, Box<Expression>),
    Infix(InfixOperator, Box<Expression>, Box<Expression>),
    If(Box<Expression>, BlockStatement, Option<BlockStatement>),
    FunctionLiteral(Vec<String>, BlockStatement),
    Call(Box<Expression>, Vec<Expression>),
    IndexExpression(Box<Expression>, Box<Expression>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    Let(String, Expression),
    Return(Expression),
    Expression(Expression),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Default, Eq, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrefixOperator::Bang => write!(f, "!"),
            PrefixOperator::Minus => write!(f, "-"),
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Le => "<=",
            InfixOperator::Ge => ">=",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        };
        write!(f, "{}", op)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(v) => write!(f, "{}", v),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::StringLiteral(s) => write!(f, "\"{}\"", s),
            Expression::ArrayLiteral(elements) => write!(f, "[{}]", join(elements)),
            Expression::Prefix(operator, right) => write!(f, "({}{})", operator, right),
            Expression::Infix(operator, left, right) => {
                write!(f, "({} {} {})", left, operator, right)
            }
            Expression::If(condition, consequence, alternative) => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral(parameters, body) => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expression::Call(function, arguments) => {
                write!(f, "{}({})", function, join(arguments))
            }
            Expression::IndexExpression(left, index) => write!(f, "({}[{}])", left, index),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let(name, value) => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(exp) => write!(f, "{}", exp),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_terminated(f, &self.statements)?;
        write!(f, " }}")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_terminated(f, &self.statements)
    }
}

/// Writes statements separated by spaces, each ending in `;` so that `a; -b` does not read
/// back as `a - b`.
fn write_terminated(f: &mut fmt::Formatter, statements: &[Statement]) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        match stmt {
            Statement::Expression(exp) => write!(f, "{};", exp)?,
            _ => write!(f, "{}", stmt)?,
        }
    }
    Ok(())
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Box<Expression> {
        Box::new(Expression::Identifier(name.to_string()))
    }

    #[test]
    fn program_string() {
        let program = Program {
            statements: vec![Statement::Let(
                "myVar".to_string(),
                Expression::Identifier("anotherVar".to_string()),
            )],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn nested_expression_string() {
        let exp = Expression::Infix(
            InfixOperator::Plus,
            ident("a"),
            Box::new(Expression::Infix(
                InfixOperator::Asterisk,
                ident("b"),
                Box::new(Expression::Prefix(PrefixOperator::Minus, ident("c"))),
            )),
        );

        assert_eq!(exp.to_string(), "(a + (b * (-c)))");
    }

    #[test]
    fn function_and_if_strings() {
        let body = BlockStatement {
            statements: vec![Statement::Return(Expression::Infix(
                InfixOperator::Plus,
                ident("x"),
                ident("y"),
            ))],
        };
        let function = Expression::FunctionLiteral(vec!["x".to_string(), "y".to_string()], body);
        assert_eq!(function.to_string(), "fn(x, y) { return (x + y); }");

        let exp = Expression::If(
            ident("x"),
            BlockStatement {
                statements: vec![Statement::Expression(Expression::StringLiteral(
                    "yes".to_string(),
                ))],
            },
            Some(BlockStatement::default()),
        );
        assert_eq!(exp.to_string(), "if (x) { \"yes\"; } else { }");
    }

    #[test]
    fn statements_are_terminated() {
        let body = BlockStatement {
            statements: vec![
                Statement::Expression(Expression::Identifier("a".to_string())),
                Statement::Expression(Expression::Prefix(PrefixOperator::Minus, ident("b"))),
                Statement::Return(Expression::IntegerLiteral(1)),
            ],
        };
        assert_eq!(body.to_string(), "{ a; (-b); return 1; }");

        let program = Program {
            statements: vec![
                Statement::Let("x".to_string(), Expression::IntegerLiteral(1)),
                Statement::Expression(Expression::Identifier("x".to_string())),
            ],
        };
        assert_eq!(program.to_string(), "let x = 1; x;");
    }
}
