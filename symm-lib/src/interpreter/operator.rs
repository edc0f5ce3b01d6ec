use crate::interpreter::error::ParseError;
use crate::interpreter::evaluator::Value;
use crate::interpreter::symbol::{Symbol, EXPONENT};
use itertools::Itertools;
use std::cmp::Reverse;
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

/// An unary mathematical operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Identity,
    /// A dot-function such as `.sqrt`, stored without the leading dot.
    Function(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 5] = [
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Exponentiate,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponentiate => EXPONENT,
        }
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::operator(self.token())
    }

    pub(crate) fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => Associativity::Left,
            BinaryOperator::Exponentiate => Associativity::Right,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide => 1,
            BinaryOperator::Exponentiate => 2,
        }
    }

    /// The operators that share a precedence level, ordered from the tightest-binding level.
    pub(crate) fn levels() -> Vec<Vec<BinaryOperator>> {
        let grouped = Self::ALL
            .into_iter()
            .sorted_by_key(|operator| Reverse(operator.precedence()))
            .group_by(|operator| operator.precedence());
        let levels = grouped
            .into_iter()
            .map(|(_, level)| level.collect())
            .collect();
        levels
    }

    /// Finds the operator whose token equals the given symbol's token.
    pub fn from_symbol(symbol: &Symbol) -> Option<BinaryOperator> {
        Self::ALL
            .into_iter()
            .find(|operator| operator.symbol() == *symbol)
    }

    /// Applies the operator using real arithmetic. Division by zero and any other
    /// non-finite result is undefined.
    pub fn evaluate(&self, a: f64, b: f64) -> Value {
        match self {
            BinaryOperator::Add => Value::from(a + b),
            BinaryOperator::Subtract => Value::from(a - b),
            BinaryOperator::Multiply => Value::from(a * b),
            BinaryOperator::Divide if b == 0.0 => Value::Undefined,
            BinaryOperator::Divide => Value::from(a / b),
            BinaryOperator::Exponentiate => Value::from(a.powf(b)),
        }
    }
}

impl UnaryOperator {
    /// Interprets an operator symbol found in prefix position.
    pub fn from_symbol(symbol: &Symbol) -> Result<UnaryOperator, ParseError> {
        match symbol.token() {
            "-" => Ok(UnaryOperator::Negate),
            "+" => Ok(UnaryOperator::Identity),
            token => match token.strip_prefix('.') {
                Some(name) if !name.is_empty() => Ok(UnaryOperator::Function(name.to_string())),
                _ => Err(ParseError::InvalidPrefixOperator {
                    operator: token.to_string(),
                }),
            },
        }
    }

    pub fn token(&self) -> String {
        match self {
            UnaryOperator::Negate => "-".to_string(),
            UnaryOperator::Identity => "+".to_string(),
            UnaryOperator::Function(name) => format!(".{}", name),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
