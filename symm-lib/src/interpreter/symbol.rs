use std::fmt;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};

/// The lexical category of a symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
    Operator,
    Parenthesis,
}

/// A discrete part of an expression.
///
/// Two symbols are equal when their canonical text is equal, regardless of kind.
#[derive(Clone, Eq)]
pub struct Symbol {
    kind: SymbolKind,
    token: String,
}

pub const OPEN_PARENTHESIS: &str = "(";
pub const CLOSE_PARENTHESIS: &str = ")";
pub const EXPONENT: &str = "**";

impl Symbol {
    /// Creates a symbol from the text matched for the given kind,
    /// canonicalizing the text where several spellings mean the same thing.
    pub fn new(kind: SymbolKind, text: &str) -> Symbol {
        let token = match (kind, text) {
            (SymbolKind::Operator, "^") => EXPONENT,
            (SymbolKind::Parenthesis, "[" | "{") => OPEN_PARENTHESIS,
            (SymbolKind::Parenthesis, "]" | "}") => CLOSE_PARENTHESIS,
            (_, text) => text,
        };
        Symbol {
            kind,
            token: token.to_string(),
        }
    }

    pub fn variable(name: char) -> Symbol {
        Symbol::new(SymbolKind::Variable, &name.to_string())
    }

    pub fn constant(value: i64) -> Symbol {
        Symbol::new(SymbolKind::Constant, &value.to_string())
    }

    pub fn operator(text: &str) -> Symbol {
        Symbol::new(SymbolKind::Operator, text)
    }

    pub fn close_parenthesis() -> Symbol {
        Symbol::new(SymbolKind::Parenthesis, CLOSE_PARENTHESIS)
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_operator(&self) -> bool {
        self.kind == SymbolKind::Operator
    }

    pub fn is_opening(&self) -> bool {
        self.kind == SymbolKind::Parenthesis && self.token == OPEN_PARENTHESIS
    }

    pub fn is_closing(&self) -> bool {
        self.kind == SymbolKind::Parenthesis && self.token == CLOSE_PARENTHESIS
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
