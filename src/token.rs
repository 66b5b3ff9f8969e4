use std::fmt;

/// Enum representing common lexeme types.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    Illegal(char),
    Eof,

    Ident(String),
    /// Integer literals keep their source text; the parser decides whether they fit in an i64.
    Int(String),
    String(String),

    /// "="
    Assign,
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "!"
    Bang,
    /// "*"
    Asterisk,
    /// "/"
    Slash,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "<="
    Le,
    /// ">="
    Ge,
    /// "=="
    Eq,
    /// "!="
    Ne,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "["
    OpenBracket,
    /// "]"
    CloseBracket,
    /// ","
    Comma,
    /// ";"
    SemiColon,
    /// ":"
    Colon,

    // Keywords
    /// "fn"
    Function,
    /// "let"
    Let,
    /// "if"
    If,
    /// "else"
    Else,
    /// "true"
    True,
    /// "false"
    False,
    /// "return"
    Return,
}

impl Token {
    /// The kind of the token, as reported in parse errors.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Illegal(_) => "ILLEGAL",
            Token::Eof => "EOF",
            Token::Ident(_) => "IDENT",
            Token::Int(_) => "INT",
            Token::String(_) => "STRING",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Bang => "!",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Le => "<=",
            Token::Ge => ">=",
            Token::Eq => "==",
            Token::Ne => "!=",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Comma => ",",
            Token::SemiColon => ";",
            Token::Colon => ":",
            Token::Function => "FUNCTION",
            Token::Let => "LET",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::Return => "RETURN",
        }
    }
}

/// Displays the literal text the token was lexed from.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Illegal(c) => write!(f, "{}", c),
            Token::Eof => Ok(()),
            Token::Ident(s) | Token::Int(s) | Token::String(s) => write!(f, "{}", s),
            Token::Function => write!(f, "fn"),
            Token::Let => write!(f, "let"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Return => write!(f, "return"),
            operator => write!(f, "{}", operator.name()),
        }
    }
}

pub fn lookup_ident(ident: &str) -> Token {
    keyword_to_token(ident).unwrap_or_else(|| Token::Ident(ident.to_owned()))
}

fn keyword_to_token(keyword: &str) -> Option<Token> {
    match keyword {
        "fn" => Some(Token::Function),
        "let" => Some(Token::Let),
        "if" => Some(Token::If),
        "else" => Some(Token::Else),
        "true" => Some(Token::True),
        "false" => Some(Token::False),
        "return" => Some(Token::Return),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{lookup_ident, Token};
    use pretty_assertions::assert_eq;

    #[test]
    fn keywords_are_reclassified() {
        assert_eq!(lookup_ident("fn"), Token::Function);
        assert_eq!(lookup_ident("return"), Token::Return);
        assert_eq!(lookup_ident("fnord"), Token::Ident("fnord".to_owned()));
    }

    #[test]
    fn literal_text() {
        assert_eq!(Token::Let.to_string(), "let");
        assert_eq!(Token::Ne.to_string(), "!=");
        assert_eq!(Token::Int("42".to_owned()).to_string(), "42");
        assert_eq!(Token::Illegal('@').to_string(), "@");
        assert_eq!(Token::Eof.to_string(), "");
    }
}
