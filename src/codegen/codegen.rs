use std::io::{self, Write};

use crate::parser::{BinOpKind, Node};

/// Emits RV64 assembly. Every value ends up in `a0`; the right operand of a
/// binary node is parked on the stack while the left one is computed, then
/// popped into `a1`.
pub struct Codegen<W: Write> {
    out: W,
    entry: String,
    depth: usize,
}

impl<W: Write> Codegen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entry: "main".to_string(),
            depth: 0,
        }
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn generate(&mut self, node: &Node) -> io::Result<()> {
        writeln!(self.out, "  .globl {}", self.entry)?;
        writeln!(self.out, "{}:", self.entry)?;

        self.gen_expr(node)?;
        assert_eq!(self.depth, 0, "stack not cleared");

        writeln!(self.out, "  ret")
    }

    fn push(&mut self) -> io::Result<()> {
        writeln!(self.out, "  addi sp, sp, -8")?;
        writeln!(self.out, "  sd a0, 0(sp)")?;
        self.depth += 1;
        Ok(())
    }

    fn pop(&mut self, reg: &str) -> io::Result<()> {
        writeln!(self.out, "  ld {}, 0(sp)", reg)?;
        writeln!(self.out, "  addi sp, sp, 8")?;
        self.depth -= 1;
        Ok(())
    }

    fn gen_expr(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Num(num) => writeln!(self.out, "  li a0, {}", num),
            Node::Neg(operand) => {
                self.gen_expr(operand)?;
                writeln!(self.out, "  neg a0, a0")
            }
            Node::Binary(kind, left, right) => {
                let depth = self.depth;

                self.gen_expr(right)?;
                self.push()?;
                self.gen_expr(left)?;
                self.pop("a1")?;

                debug_assert_eq!(self.depth, depth, "unbalanced push/pop");
                self.gen_binop(*kind)
            }
        }
    }

    fn gen_binop(&mut self, kind: BinOpKind) -> io::Result<()> {
        match kind {
            BinOpKind::Add => writeln!(self.out, "  add a0, a0, a1"),
            BinOpKind::Sub => writeln!(self.out, "  sub a0, a0, a1"),
            BinOpKind::Mul => writeln!(self.out, "  mul a0, a0, a1"),
            BinOpKind::Div => writeln!(self.out, "  div a0, a0, a1"),
            BinOpKind::Equal => {
                writeln!(self.out, "  xor a0, a0, a1")?;
                writeln!(self.out, "  seqz a0, a0")
            }
            BinOpKind::NotEqual => {
                writeln!(self.out, "  xor a0, a0, a1")?;
                writeln!(self.out, "  snez a0, a0")
            }
            BinOpKind::LessThan => writeln!(self.out, "  slt a0, a0, a1"),
            // a0 <= a1 is !(a1 < a0)
            BinOpKind::LessEqual => {
                writeln!(self.out, "  slt a0, a1, a0")?;
                writeln!(self.out, "  xori a0, a0, 1")
            }
        }
    }
}
