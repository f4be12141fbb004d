#![allow(dead_code)]

use std::collections::HashMap;
use std::thread;

use rvcc::lexer::Lexer;
use rvcc::parser::{BinOpKind, Node, Parser};

const STACK_TOP: i64 = 0x10000;

pub fn parse(input: &str) -> Node {
    let tokens = Lexer::tokenize(input).unwrap();
    Parser::new(input, &tokens).parse().unwrap()
}

/// Runs `f` on a thread with a roomy stack, for inputs near the nesting limit.
pub fn with_big_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    thread::Builder::new()
        .stack_size(64 << 20)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

fn riscv_div(a: i64, b: i64) -> i64 {
    if b == 0 {
        -1
    } else {
        a.wrapping_div(b)
    }
}

/// Evaluates the tree directly with 64-bit RISC-V arithmetic.
pub fn eval(node: &Node) -> i64 {
    match node {
        Node::Num(n) => *n,
        Node::Neg(operand) => eval(operand).wrapping_neg(),
        Node::Binary(kind, left, right) => {
            let (l, r) = (eval(left), eval(right));
            match kind {
                BinOpKind::Add => l.wrapping_add(r),
                BinOpKind::Sub => l.wrapping_sub(r),
                BinOpKind::Mul => l.wrapping_mul(r),
                BinOpKind::Div => riscv_div(l, r),
                BinOpKind::Equal => (l == r) as i64,
                BinOpKind::NotEqual => (l != r) as i64,
                BinOpKind::LessThan => (l < r) as i64,
                BinOpKind::LessEqual => (l <= r) as i64,
            }
        }
    }
}

#[derive(Debug, Default)]
struct Machine {
    regs: HashMap<String, i64>,
    memory: HashMap<i64, i64>,
}

impl Machine {
    fn get(&self, reg: &str) -> i64 {
        *self.regs.get(reg).unwrap_or(&0)
    }

    fn set(&mut self, reg: &str, value: i64) {
        self.regs.insert(reg.to_string(), value);
    }

    fn address(&self, operand: &str) -> i64 {
        let (offset, base) = operand.split_once('(').unwrap();
        let base = base.strip_suffix(')').unwrap();
        self.get(base) + offset.parse::<i64>().unwrap()
    }
}

/// Runs the emitted assembly on a tiny RV64 subset and returns `a0` at `ret`.
///
/// Panics on unknown instructions, loads from unwritten memory, or if `sp`
/// is not back at its initial value when returning.
pub fn run(asm: &str) -> i64 {
    let mut m = Machine::default();
    m.set("sp", STACK_TOP);

    for line in asm.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('.') || line.ends_with(':') {
            continue;
        }

        let (op, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args: Vec<&str> = rest
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        match op {
            "li" => m.set(args[0], args[1].parse().unwrap()),
            "neg" => m.set(args[0], m.get(args[1]).wrapping_neg()),
            "addi" => m.set(
                args[0],
                m.get(args[1]).wrapping_add(args[2].parse().unwrap()),
            ),
            "xori" => m.set(args[0], m.get(args[1]) ^ args[2].parse::<i64>().unwrap()),
            "seqz" => m.set(args[0], (m.get(args[1]) == 0) as i64),
            "snez" => m.set(args[0], (m.get(args[1]) != 0) as i64),
            "sd" => {
                let (addr, value) = (m.address(args[1]), m.get(args[0]));
                m.memory.insert(addr, value);
            }
            "ld" => {
                let addr = m.address(args[1]);
                let value = *m.memory.get(&addr).expect("load from unwritten slot");
                m.set(args[0], value);
            }
            "ret" => {
                assert_eq!(m.get("sp"), STACK_TOP, "sp not restored");
                return m.get("a0");
            }
            _ => {
                let (a, b) = (m.get(args[1]), m.get(args[2]));
                let value = match op {
                    "add" => a.wrapping_add(b),
                    "sub" => a.wrapping_sub(b),
                    "mul" => a.wrapping_mul(b),
                    "div" => riscv_div(a, b),
                    "xor" => a ^ b,
                    "slt" => (a < b) as i64,
                    _ => panic!("unknown instruction: {line}"),
                };
                m.set(args[0], value);
            }
        }
    }

    panic!("program has no ret");
}
