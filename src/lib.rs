pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

use std::io::Write;

use codegen::Codegen;
use error::Result;
use lexer::Lexer;
use parser::Parser;

/// Compiles `user_input` into assembly with a `main` entry point.
pub fn compile(user_input: &str) -> Result<String> {
    let out = compile_to(user_input, "main", Vec::new())?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Compiles `user_input`, writing assembly for the `entry` label to `out`.
///
/// Nothing is written unless lexing and parsing both succeed.
pub fn compile_to<W: Write>(user_input: &str, entry: &str, out: W) -> Result<W> {
    let tokens = Lexer::tokenize(user_input)?;

    let mut parser = Parser::new(user_input, &tokens);
    let node = parser.parse()?;

    let mut codegen = Codegen::new(out).with_entry(entry);
    codegen.generate(&node)?;
    Ok(codegen.into_inner())
}
