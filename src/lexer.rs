use std::iter::Peekable;
use std::str::Chars;

use crate::token;
use crate::token::Token;

/// Lexer turns source text into tokens on demand. It never fails: characters it does not
/// understand come back as `Token::Illegal` for the parser to report.
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &str) -> Lexer {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    fn read_char(&mut self) -> Option<char> {
        self.input.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn peek_if<F>(&mut self, predicate: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        match self.peek_char() {
            Some(ch) => predicate(ch),
            None => false,
        }
    }

    fn read_while<F>(&mut self, first: char, mut predicate: F) -> String
    where
        F: FnMut(char) -> bool,
    {
        let mut res = String::new();
        res.push(first);

        while let Some(c) = self.input.next_if(|c| predicate(*c)) {
            res.push(c);
        }

        res
    }

    fn read_string(&mut self) -> String {
        let mut res = String::new();

        // An unterminated string runs to the end of the input.
        while let Some(c) = self.read_char() {
            if c == '"' {
                break;
            }
            res.push(c);
        }

        res
    }

    fn skip_whitespace(&mut self) {
        while self.peek_if(is_whitespace) {
            self.read_char();
        }
    }

    /// Consumes the next character if it is `=`, choosing between the two-character and the
    /// one-character form of an operator.
    fn with_eq(&mut self, double: Token, single: Token) -> Token {
        if self.input.next_if_eq(&'=').is_some() {
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.read_char() {
            Some('=') => self.with_eq(Token::Eq, Token::Assign),
            Some('!') => self.with_eq(Token::Ne, Token::Bang),
            Some('<') => self.with_eq(Token::Le, Token::Lt),
            Some('>') => self.with_eq(Token::Ge, Token::Gt),
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Asterisk,
            Some('/') => Token::Slash,
            Some('(') => Token::OpenParen,
            Some(')') => Token::CloseParen,
            Some('{') => Token::OpenBrace,
            Some('}') => Token::CloseBrace,
            Some('[') => Token::OpenBracket,
            Some(']') => Token::CloseBracket,
            Some(',') => Token::Comma,
            Some(';') => Token::SemiColon,
            Some(':') => Token::Colon,
            Some('"') => Token::String(self.read_string()),
            Some(c) if is_letter(c) => token::lookup_ident(&self.read_while(c, is_letter)),
            Some(c) if c.is_ascii_digit() => Token::Int(self.read_while(c, |c| c.is_ascii_digit())),
            Some(c) => Token::Illegal(c),
            None => Token::Eof,
        }
    }
}

/// Iterates over every token up to, but not including, `Token::Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::Token;
    use pretty_assertions::assert_eq;

    fn test_lexing(input: &str, expected_tokens: Vec<Token>) {
        let mut l = Lexer::new(input);

        for expected in expected_tokens {
            let actual = l.next_token();

            assert_eq!(expected, actual);
        }
    }

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_owned())
    }

    fn int(s: &str) -> Token {
        Token::Int(s.to_owned())
    }

    #[test]
    fn test_next_token() {
        test_lexing(
            "=+(){},;",
            vec![
                Token::Assign,
                Token::Plus,
                Token::OpenParen,
                Token::CloseParen,
                Token::OpenBrace,
                Token::CloseBrace,
                Token::Comma,
                Token::SemiColon,
                Token::Eof,
            ],
        );
    }

    #[test]
    fn let_statement_literals() {
        let literals: Vec<(&str, String)> = Lexer::new("let five = 5;")
            .map(|t| (t.name(), t.to_string()))
            .collect();

        assert_eq!(
            literals,
            vec![
                ("LET", "let".to_owned()),
                ("IDENT", "five".to_owned()),
                ("=", "=".to_owned()),
                ("INT", "5".to_owned()),
                (";", ";".to_owned()),
            ]
        );

        let mut l = Lexer::new("let five = 5;");
        assert_eq!(l.by_ref().count(), 5);
        assert_eq!(l.next_token(), Token::Eof);
        assert_eq!(Token::Eof.to_string(), "");
    }

    #[test]
    fn test_next_token_on_monkey() {
        test_lexing(
            r#"let five = 5;

let ten = 10;

let add = fn( x, y) {
    x + y;
};

let result = add( five, ten);

!-/* 5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;

10 != 9;
"foobar"
"foo bar"
[1, 2]
{"foo": "bar"}
1 <= 2 >= 3
"#,
            vec![
                Token::Let,
                ident("five"),
                Token::Assign,
                int("5"),
                Token::SemiColon,
                Token::Let,
                ident("ten"),
                Token::Assign,
                int("10"),
                Token::SemiColon,
                Token::Let,
                ident("add"),
                Token::Assign,
                Token::Function,
                Token::OpenParen,
                ident("x"),
                Token::Comma,
                ident("y"),
                Token::CloseParen,
                Token::OpenBrace,
                ident("x"),
                Token::Plus,
                ident("y"),
                Token::SemiColon,
                Token::CloseBrace,
                Token::SemiColon,
                Token::Let,
                ident("result"),
                Token::Assign,
                ident("add"),
                Token::OpenParen,
                ident("five"),
                Token::Comma,
                ident("ten"),
                Token::CloseParen,
                Token::SemiColon,
                Token::Bang,
                Token::Minus,
                Token::Slash,
                Token::Asterisk,
                int("5"),
                Token::SemiColon,
                int("5"),
                Token::Lt,
                int("10"),
                Token::Gt,
                int("5"),
                Token::SemiColon,
                Token::If,
                Token::OpenParen,
                int("5"),
                Token::Lt,
                int("10"),
                Token::CloseParen,
                Token::OpenBrace,
                Token::Return,
                Token::True,
                Token::SemiColon,
                Token::CloseBrace,
                Token::Else,
                Token::OpenBrace,
                Token::Return,
                Token::False,
                Token::SemiColon,
                Token::CloseBrace,
                int("10"),
                Token::Eq,
                int("10"),
                Token::SemiColon,
                int("10"),
                Token::Ne,
                int("9"),
                Token::SemiColon,
                Token::String("foobar".to_owned()),
                Token::String("foo bar".to_owned()),
                Token::OpenBracket,
                int("1"),
                Token::Comma,
                int("2"),
                Token::CloseBracket,
                Token::OpenBrace,
                Token::String("foo".to_owned()),
                Token::Colon,
                Token::String("bar".to_owned()),
                Token::CloseBrace,
                int("1"),
                Token::Le,
                int("2"),
                Token::Ge,
                int("3"),
                Token::Eof,
            ],
        );
    }

    #[test]
    fn identifiers_stop_at_digits() {
        test_lexing("x1 foo_bar", vec![ident("x"), int("1"), ident("foo_bar"), Token::Eof]);
    }

    #[test]
    fn oversized_integers_are_kept_as_text() {
        test_lexing(
            "99999999999999999999",
            vec![int("99999999999999999999"), Token::Eof],
        );
    }

    #[test]
    fn unterminated_string_runs_to_end_of_input() {
        test_lexing(
            "\"abc def",
            vec![Token::String("abc def".to_owned()), Token::Eof],
        );
    }

    #[test]
    fn strings_do_not_process_escapes() {
        test_lexing(
            r#""a\nb""#,
            vec![Token::String(r"a\nb".to_owned()), Token::Eof],
        );
    }

    #[test]
    fn illegal_characters() {
        test_lexing(
            "@ 5 # é",
            vec![
                Token::Illegal('@'),
                int("5"),
                Token::Illegal('#'),
                Token::Illegal('é'),
                Token::Eof,
            ],
        );
    }

    #[test]
    fn eof_is_sticky() {
        test_lexing("", vec![Token::Eof, Token::Eof]);
    }
}
