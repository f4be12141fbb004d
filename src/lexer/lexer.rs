use crate::error::{CompileError, Diagnostics, Result};

use super::{
    token::{ONE_SYMBOL_TOKENS, TWO_SYMBOLS_TOKENS},
    Token, TokenKind,
};

#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
    diagnostics: Diagnostics<'a>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: vec![],
            index: 0,
            diagnostics: Diagnostics::new(input),
        }
    }

    fn new_token(&mut self, kind: TokenKind, len: usize) {
        self.tokens.push(Token {
            kind,
            loc: self.index,
            len,
        });
        self.index += len;
    }

    fn parse_number(&mut self) -> Result<()> {
        let input = self.input;
        let s = &input[self.index..];
        let len = s.bytes().take_while(u8::is_ascii_digit).count();
        let value = s[..len].parse::<i64>().map_err(|_| {
            CompileError::Lex(self.diagnostics.error_at(self.index, "number too large"))
        })?;
        self.new_token(TokenKind::Num(value), len);
        Ok(())
    }

    fn _tokenize(&mut self) -> Result<()> {
        let input = self.input;

        while let Some(c) = input[self.index..].chars().next() {
            let c2 = input.get(self.index..self.index + 2);

            if c.is_whitespace() {
                self.index += c.len_utf8();
            } else if c.is_ascii_digit() {
                self.parse_number()?;
            } else if let Some(&punct) = c2.and_then(|s| TWO_SYMBOLS_TOKENS.get(s)) {
                self.new_token(TokenKind::Punct(punct), 2);
            } else if let Some(&punct) = ONE_SYMBOL_TOKENS.get(&c) {
                self.new_token(TokenKind::Punct(punct), 1);
            } else {
                return Err(CompileError::Lex(
                    self.diagnostics.error_at(self.index, "invalid token"),
                ));
            }
        }

        self.new_token(TokenKind::Eof, 0);
        Ok(())
    }

    /// Splits `s` into tokens. The result always ends with an `Eof` token.
    pub fn tokenize(s: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(s);
        lexer._tokenize()?;

        Ok(lexer.tokens)
    }
}
