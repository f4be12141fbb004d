use std::fmt;
use std::io;

use thiserror::Error;

use crate::lexer::Token;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{0}")]
    Lex(Diagnostic),
    #[error("{0}")]
    Parse(Diagnostic),
    #[error("{0}")]
    Message(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl CompileError {
    /// The located diagnostic, if this error points into the source.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            CompileError::Lex(d) | CompileError::Parse(d) => Some(d),
            CompileError::Message(_) | CompileError::Io(_) => None,
        }
    }
}

/// A message anchored at a byte offset of the source text.
///
/// Rendered as two lines: the source line holding the offset, then a caret
/// under the offending column followed by the message.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub loc: usize,
    pub line: String,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line)?;
        write!(f, "{:width$}^ {}", "", self.message, width = self.column)
    }
}

/// Builds errors against the source text being compiled.
#[derive(Clone, Copy, Debug)]
pub struct Diagnostics<'a> {
    input: &'a str,
}

impl<'a> Diagnostics<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// An error with no source location.
    pub fn error(message: impl Into<String>) -> CompileError {
        CompileError::Message(message.into())
    }

    pub fn error_at(&self, loc: usize, message: impl Into<String>) -> Diagnostic {
        let bytes = self.input.as_bytes();
        let loc = loc.min(bytes.len());
        let line_start = bytes[..loc]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line_end = bytes[loc..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| loc + i);

        let column = self.input[line_start..line_end]
            .char_indices()
            .take_while(|&(i, _)| line_start + i < loc)
            .count();

        Diagnostic {
            loc,
            line: self.input[line_start..line_end].to_string(),
            column,
            message: message.into(),
        }
    }

    pub fn error_tok(&self, token: &Token, message: impl Into<String>) -> Diagnostic {
        self.error_at(token.loc, message)
    }
}
