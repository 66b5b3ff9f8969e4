use crate::ast::{
    BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::lexer::Lexer;
use crate::token::Token;
use thiserror::Error;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ParserError>;

type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Result<Expression>;
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression) -> Result<Expression>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("expected next token to be {}, got {} instead", .expected.name(), .found.name())]
    UnexpectedToken { expected: Token, found: Token },
    #[error("expected next token to be IDENT, got {} instead", .0.name())]
    ExpectedIdentifier(Token),
    #[error("no prefix parse function for {} found", .0.name())]
    NoPrefixParseFn(Token),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}

/// Binding power of operators, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// == or !=
    Equals,
    /// <, >, <= or >=
    LessGreater,
    /// + or -
    Sum,
    /// * or /
    Product,
    /// -X or !X
    Prefix,
    /// myFunction(X)
    Call,
    /// array[index]
    Index,
}

fn token_precedence(token: &Token) -> Precedence {
    match token {
        Token::Eq | Token::Ne => Precedence::Equals,
        Token::Lt | Token::Gt | Token::Le | Token::Ge => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Asterisk | Token::Slash => Precedence::Product,
        Token::OpenParen => Precedence::Call,
        Token::OpenBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_operator(token: &Token) -> Option<InfixOperator> {
    match token {
        Token::Plus => Some(InfixOperator::Plus),
        Token::Minus => Some(InfixOperator::Minus),
        Token::Asterisk => Some(InfixOperator::Asterisk),
        Token::Slash => Some(InfixOperator::Slash),
        Token::Lt => Some(InfixOperator::Lt),
        Token::Gt => Some(InfixOperator::Gt),
        Token::Le => Some(InfixOperator::Le),
        Token::Ge => Some(InfixOperator::Ge),
        Token::Eq => Some(InfixOperator::Eq),
        Token::Ne => Some(InfixOperator::NotEq),
        _ => None,
    }
}

/// Parser builds a `Program` from the tokens of a `Lexer` using Pratt parsing. It does not
/// stop at the first problem; every error found is collected and available via `errors`.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParserError>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut p = Parser {
            lexer,
            cur_token: Token::Eof,
            peek_token: Token::Eof,
            errors: vec![],
        };

        // Read 2 tokens so that cur_token and peek_token are both initialised
        p.next_token();
        p.next_token();

        p
    }

    pub fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// The collected errors rendered as human-readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.cur_token != Token::Eof {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.record(err),
            }
            self.next_token();
        }

        trace!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Program { statements }
    }

    fn record(&mut self, err: ParserError) {
        debug!(%err, "parse error");
        self.errors.push(err);
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement> {
        let name = self.expect_ident()?;

        self.expect_peek(Token::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Let(name, value))
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let exp = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(Statement::Expression(exp))
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token == Token::SemiColon {
            self.next_token();
        }
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut statements = vec![];

        self.next_token();

        while self.cur_token != Token::CloseBrace && self.cur_token != Token::Eof {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.record(err),
            }
            self.next_token();
        }

        BlockStatement { statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let prefix = self
            .prefix_parse_fn()
            .ok_or_else(|| ParserError::NoPrefixParseFn(self.cur_token.clone()))?;

        let mut left = prefix(self)?;

        while self.peek_token != Token::SemiColon && precedence < self.peek_precedence() {
            let infix = match self.infix_parse_fn() {
                Some(infix) => infix,
                None => return Ok(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn prefix_parse_fn(&self) -> Option<PrefixParseFn<'a>> {
        match self.cur_token {
            Token::Ident(_) => Some(Self::parse_identifier),
            Token::Int(_) => Some(Self::parse_integer_literal),
            Token::String(_) => Some(Self::parse_string_literal),
            Token::True | Token::False => Some(Self::parse_boolean),
            Token::Bang | Token::Minus => Some(Self::parse_prefix_expression),
            Token::OpenParen => Some(Self::parse_grouped_expression),
            Token::OpenBracket => Some(Self::parse_array_literal),
            Token::If => Some(Self::parse_if_expression),
            Token::Function => Some(Self::parse_function_literal),
            _ => None,
        }
    }

    fn infix_parse_fn(&self) -> Option<InfixParseFn<'a>> {
        match self.peek_token {
            Token::OpenParen => Some(Self::parse_call_expression),
            Token::OpenBracket => Some(Self::parse_index_expression),
            ref token if infix_operator(token).is_some() => Some(Self::parse_infix_expression),
            _ => None,
        }
    }

    fn parse_identifier(&mut self) -> Result<Expression> {
        match &self.cur_token {
            Token::Ident(name) => Ok(Expression::Identifier(name.clone())),
            other => Err(ParserError::ExpectedIdentifier(other.clone())),
        }
    }

    fn parse_integer_literal(&mut self) -> Result<Expression> {
        let literal = self.cur_token.to_string();

        literal
            .parse()
            .map(Expression::IntegerLiteral)
            .map_err(|_| ParserError::InvalidInteger(literal))
    }

    fn parse_string_literal(&mut self) -> Result<Expression> {
        Ok(Expression::StringLiteral(self.cur_token.to_string()))
    }

    fn parse_boolean(&mut self) -> Result<Expression> {
        Ok(Expression::Boolean(self.cur_token == Token::True))
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let operator = match self.cur_token {
            Token::Bang => PrefixOperator::Bang,
            _ => PrefixOperator::Minus,
        };

        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(operator, Box::new(right)))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let operator = infix_operator(&self.cur_token)
            .ok_or_else(|| ParserError::NoPrefixParseFn(self.cur_token.clone()))?;
        let precedence = self.cur_precedence();

        self.next_token();

        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(operator, Box::new(left), Box::new(right)))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();

        let exp = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::CloseParen)?;

        Ok(exp)
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let elements = self.parse_expression_list(Token::CloseBracket)?;

        Ok(Expression::ArrayLiteral(elements))
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        self.expect_peek(Token::OpenParen)?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::CloseParen)?;
        self.expect_peek(Token::OpenBrace)?;

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token == Token::Else {
            self.next_token();
            self.expect_peek(Token::OpenBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Ok(Expression::If(Box::new(condition), consequence, alternative))
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(Token::OpenParen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(Token::OpenBrace)?;

        let body = self.parse_block_statement();

        Ok(Expression::FunctionLiteral(parameters, body))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut identifiers = vec![];

        if self.peek_token == Token::CloseParen {
            self.next_token();
            return Ok(identifiers);
        }

        identifiers.push(self.expect_ident()?);

        while self.peek_token == Token::Comma {
            self.next_token();
            identifiers.push(self.expect_ident()?);
        }

        self.expect_peek(Token::CloseParen)?;

        Ok(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let arguments = self.parse_expression_list(Token::CloseParen)?;

        Ok(Expression::Call(Box::new(function), arguments))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::CloseBracket)?;

        Ok(Expression::IndexExpression(Box::new(left), Box::new(index)))
    }

    /// Parses a comma separated list of expressions. The current token is the opening
    /// delimiter; on success the current token is `end`.
    fn parse_expression_list(&mut self, end: Token) -> Result<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token == end {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token == Token::Comma {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;

        Ok(list)
    }

    /// Advances onto the next token if it is an identifier, returning its name.
    fn expect_ident(&mut self) -> Result<String> {
        if let Token::Ident(ident) = &self.peek_token {
            let ident = ident.clone();
            self.next_token();
            Ok(ident)
        } else {
            Err(ParserError::ExpectedIdentifier(self.peek_token.clone()))
        }
    }

    /// Advances onto the next token if it is `token`.
    fn expect_peek(&mut self, token: Token) -> Result<()> {
        if self.peek_token != token {
            return Err(ParserError::UnexpectedToken {
                expected: token,
                found: self.peek_token.clone(),
            });
        }

        self.next_token();

        Ok(())
    }

    fn peek_precedence(&self) -> Precedence {
        token_precedence(&self.peek_token)
    }

    fn cur_precedence(&self) -> Precedence {
        token_precedence(&self.cur_token)
    }
}
