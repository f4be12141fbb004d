use std::fmt;

use phf::phf_map;

pub static TWO_SYMBOLS_TOKENS: phf::Map<&str, Punct> = phf_map! {
    "==" => Punct::DoubleEqual,
    "!=" => Punct::NotEqual,
    "<=" => Punct::LessEqual,
    ">=" => Punct::GreaterEqual,
};

pub static ONE_SYMBOL_TOKENS: phf::Map<char, Punct> = phf_map! {
    '+' => Punct::Plus,
    '-' => Punct::Minus,
    '*' => Punct::Star,
    '/' => Punct::Slash,
    '(' => Punct::LeftParen,
    ')' => Punct::RightParen,
    '<' => Punct::LessThan,
    '>' => Punct::GreaterThan,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Punct {
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,

    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    DoubleEqual,
    NotEqual,
}

impl Punct {
    pub fn as_str(&self) -> &'static str {
        match self {
            Punct::Plus => "+",
            Punct::Minus => "-",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::LeftParen => "(",
            Punct::RightParen => ")",
            Punct::LessThan => "<",
            Punct::LessEqual => "<=",
            Punct::GreaterThan => ">",
            Punct::GreaterEqual => ">=",
            Punct::DoubleEqual => "==",
            Punct::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Num(i64),
    Punct(Punct),
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the lexeme in the source.
    pub loc: usize,
    pub len: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.loc..self.loc + self.len]
    }

    pub fn is(&self, punct: Punct) -> bool {
        self.kind == TokenKind::Punct(punct)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Num(n) => write!(f, "Num({n})"),
            TokenKind::Punct(p) => write!(f, "Punct({p})"),
            TokenKind::Eof => f.write_str("Eof"),
        }
    }
}
