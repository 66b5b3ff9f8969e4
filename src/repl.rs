use std::io::{self, BufRead, Write};

use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::Environment;
use crate::parser::{Parser, ParserError};

const PROMPT: &str = ">> ";

/// Reads lines from `input` until it is exhausted, evaluating each one and writing the result
/// to `output`. All lines share one environment, so earlier bindings remain visible. `puts`
/// bypasses `output` and prints to standard output.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new().into_env();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let lexer = Lexer::new(&line);
        let mut parser = Parser::new(lexer);

        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            print_parser_errors(&mut output, parser.errors())?;
            continue;
        }

        let evaluated = evaluator::eval_program(&program, &env);
        writeln!(output, "{}", evaluated)?;
    }
}

fn print_parser_errors<W: Write>(output: &mut W, errors: &[ParserError]) -> io::Result<()> {
    writeln!(
        output,
        r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#
    )?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }

    Ok(())
}
