use crate::error::{CompileError, Diagnostics, Result};
use crate::lexer::{Punct, Token, TokenKind};

use super::{BinOpKind, Node};

/// Deepest accepted nesting: parentheses and unary operators on the way
/// down, operator levels of the finished tree on the way up. Code generation
/// and dropping the tree recurse once per level.
pub const MAX_DEPTH: usize = 1000;

/// A parsed node together with its height in operator levels (a number is 0).
struct Subtree {
    node: Node,
    height: usize,
}

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    nesting: usize,
    diagnostics: Diagnostics<'a>,
}

impl<'a> Parser<'a> {
    /// `tokens` must come from `Lexer::tokenize(source)`, so it ends with `Eof`.
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: 0,
            nesting: 0,
            diagnostics: Diagnostics::new(source),
        }
    }

    /// Parses one complete expression. Anything left before `Eof` is an error.
    pub fn parse(&mut self) -> Result<Node> {
        let tree = self.parse_expr()?;

        let t = self.peek();
        if t.kind != TokenKind::Eof {
            return Err(self.error_tok(t, "extra token"));
        }

        Ok(tree.node)
    }

    fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.index.min(tokens.len() - 1)]
    }

    fn error_tok(&self, token: &Token, message: impl Into<String>) -> CompileError {
        CompileError::Parse(self.diagnostics.error_tok(token, message))
    }

    fn too_deep(&self, token: &Token) -> CompileError {
        self.error_tok(token, "expression nested too deeply")
    }

    fn consume(&mut self, punct: Punct) -> bool {
        if !self.peek().is(punct) {
            return false;
        }
        self.index += 1;
        true
    }

    fn expect(&mut self, punct: Punct) -> Result<()> {
        if !self.consume(punct) {
            let t = self.peek();
            return Err(self.error_tok(t, format!("expect '{punct}'")));
        }
        Ok(())
    }

    /// Runs `f` one nesting level deeper; `t` is the token opening the level.
    fn nested(
        &mut self,
        t: &Token,
        f: impl FnOnce(&mut Self) -> Result<Subtree>,
    ) -> Result<Subtree> {
        if self.nesting == MAX_DEPTH {
            return Err(self.too_deep(t));
        }
        self.nesting += 1;
        let tree = f(self);
        self.nesting -= 1;
        tree
    }

    fn new_num(&self, num: i64) -> Subtree {
        Subtree {
            node: Node::Num(num),
            height: 0,
        }
    }

    fn new_neg(&self, t: &Token, operand: Subtree) -> Result<Subtree> {
        let height = operand.height + 1;
        if height > MAX_DEPTH {
            return Err(self.too_deep(t));
        }
        Ok(Subtree {
            node: Node::neg(operand.node),
            height,
        })
    }

    fn new_binary(
        &self,
        t: &Token,
        kind: BinOpKind,
        left: Subtree,
        right: Subtree,
    ) -> Result<Subtree> {
        let height = left.height.max(right.height) + 1;
        if height > MAX_DEPTH {
            return Err(self.too_deep(t));
        }
        Ok(Subtree {
            node: Node::binary(kind, left.node, right.node),
            height,
        })
    }

    /// expr = equality
    fn parse_expr(&mut self) -> Result<Subtree> {
        self.parse_equality()
    }

    /// equality = relational ("==" relational | "!=" relational)*
    fn parse_equality(&mut self) -> Result<Subtree> {
        let mut tree = self.parse_relational()?;

        loop {
            let t = self.peek();
            if self.consume(Punct::DoubleEqual) {
                let rhs = self.parse_relational()?;
                tree = self.new_binary(t, BinOpKind::Equal, tree, rhs)?;
            } else if self.consume(Punct::NotEqual) {
                let rhs = self.parse_relational()?;
                tree = self.new_binary(t, BinOpKind::NotEqual, tree, rhs)?;
            } else {
                return Ok(tree);
            }
        }
    }

    /// relational = add ("<" add | "<=" add | ">" add | ">=" add)*
    ///
    /// `a > b` is built as `b < a`, `a >= b` as `b <= a`.
    fn parse_relational(&mut self) -> Result<Subtree> {
        let mut tree = self.parse_add()?;

        loop {
            let t = self.peek();
            if self.consume(Punct::LessThan) {
                let rhs = self.parse_add()?;
                tree = self.new_binary(t, BinOpKind::LessThan, tree, rhs)?;
            } else if self.consume(Punct::LessEqual) {
                let rhs = self.parse_add()?;
                tree = self.new_binary(t, BinOpKind::LessEqual, tree, rhs)?;
            } else if self.consume(Punct::GreaterThan) {
                let rhs = self.parse_add()?;
                tree = self.new_binary(t, BinOpKind::LessThan, rhs, tree)?;
            } else if self.consume(Punct::GreaterEqual) {
                let rhs = self.parse_add()?;
                tree = self.new_binary(t, BinOpKind::LessEqual, rhs, tree)?;
            } else {
                return Ok(tree);
            }
        }
    }

    /// add = mul ("+" mul | "-" mul)*
    fn parse_add(&mut self) -> Result<Subtree> {
        let mut tree = self.parse_mul()?;

        loop {
            let t = self.peek();
            if self.consume(Punct::Plus) {
                let rhs = self.parse_mul()?;
                tree = self.new_binary(t, BinOpKind::Add, tree, rhs)?;
            } else if self.consume(Punct::Minus) {
                let rhs = self.parse_mul()?;
                tree = self.new_binary(t, BinOpKind::Sub, tree, rhs)?;
            } else {
                return Ok(tree);
            }
        }
    }

    /// mul = unary ("*" unary | "/" unary)*
    fn parse_mul(&mut self) -> Result<Subtree> {
        let mut tree = self.parse_unary()?;

        loop {
            let t = self.peek();
            if self.consume(Punct::Star) {
                let rhs = self.parse_unary()?;
                tree = self.new_binary(t, BinOpKind::Mul, tree, rhs)?;
            } else if self.consume(Punct::Slash) {
                let rhs = self.parse_unary()?;
                tree = self.new_binary(t, BinOpKind::Div, tree, rhs)?;
            } else {
                return Ok(tree);
            }
        }
    }

    /// unary = ("+" | "-") unary | primary
    fn parse_unary(&mut self) -> Result<Subtree> {
        let t = self.peek();
        if self.consume(Punct::Plus) {
            self.nested(t, |p| p.parse_unary())
        } else if self.consume(Punct::Minus) {
            let operand = self.nested(t, |p| p.parse_unary())?;
            self.new_neg(t, operand)
        } else {
            self.parse_primary()
        }
    }

    /// primary = "(" expr ")" | num
    fn parse_primary(&mut self) -> Result<Subtree> {
        let t = self.peek();
        if self.consume(Punct::LeftParen) {
            let tree = self.nested(t, |p| p.parse_expr())?;
            self.expect(Punct::RightParen)?;
            return Ok(tree);
        }

        match t.kind {
            TokenKind::Num(num) => {
                self.index += 1;
                Ok(self.new_num(num))
            }
            _ => Err(self.error_tok(t, "expected an expression")),
        }
    }
}
