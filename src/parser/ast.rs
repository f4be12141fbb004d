use std::fmt;
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
}

impl BinOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Equal => "==",
            BinOpKind::NotEqual => "!=",
            BinOpKind::LessThan => "<",
            BinOpKind::LessEqual => "<=",
        }
    }
}

/// Expression tree. Every node owns its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Num(i64),
    Neg(Box<Node>),
    Binary(BinOpKind, Box<Node>, Box<Node>),
}

impl Node {
    pub fn neg(operand: Node) -> Self {
        Node::Neg(Box::new(operand))
    }

    pub fn binary(kind: BinOpKind, left: Node, right: Node) -> Self {
        Node::Binary(kind, Box::new(left), Box::new(right))
    }

    /// Writes the tree rotated a quarter turn: right subtree above its
    /// parent, left subtree below, three spaces per level.
    pub fn write_tree(&self, f: &mut impl io::Write) -> io::Result<()> {
        self.write_tree_level(f, 0)
    }

    fn write_tree_level(&self, f: &mut impl io::Write, level: usize) -> io::Result<()> {
        let indent = "   ".repeat(level);
        match self {
            Node::Num(n) => writeln!(f, "{indent}{n}"),
            Node::Neg(operand) => {
                writeln!(f, "{indent}neg")?;
                operand.write_tree_level(f, level + 1)
            }
            Node::Binary(kind, left, right) => {
                right.write_tree_level(f, level + 1)?;
                writeln!(f, "{indent}{}", kind.as_str())?;
                left.write_tree_level(f, level + 1)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Num(n) => write!(f, "{n}"),
            Node::Neg(operand) => write!(f, "(-{operand})"),
            Node::Binary(kind, left, right) => write!(f, "({left} {} {right})", kind.as_str()),
        }
    }
}
