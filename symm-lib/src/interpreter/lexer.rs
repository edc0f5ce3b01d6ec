use crate::interpreter::error::LexError;
use crate::interpreter::symbol::{Symbol, SymbolKind};
use regex::Regex;
use std::sync::OnceLock;

/// Recognizes one kind of symbol at the start of the remaining input.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: SymbolKind,
    pattern: Regex,
}

impl Rule {
    /// Creates a rule from an unanchored pattern. The pattern is anchored to the
    /// cursor position, so it only ever matches a prefix.
    pub fn new(kind: SymbolKind, pattern: &str) -> Result<Rule, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Rule { kind, pattern })
    }

    fn matched_len(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|found| found.end())
    }
}

/// An ordered list of rules. The first rule that matches decides the kind of symbol.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Classifier {
        Classifier { rules }
    }

    /// The classifier for the standard grammar: single-letter variables, integer
    /// constants, arithmetic and dot-function operators and the three bracket styles.
    pub fn standard() -> &'static Classifier {
        static STANDARD: OnceLock<Classifier> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let rules = [
                (SymbolKind::Variable, r"[a-zA-Z]"),
                (SymbolKind::Constant, r"[0-9]+"),
                (SymbolKind::Operator, r"\*\*|\+|-|\*|/|\^|\.[a-z0-9]+"),
                (SymbolKind::Parenthesis, r"[()\[\]{}]"),
            ];
            let rules = rules
                .into_iter()
                .filter_map(|(kind, pattern)| Rule::new(kind, pattern).ok())
                .collect();
            Classifier::new(rules)
        })
    }

    /// Matches a single symbol at the start of `text`.
    ///
    /// returns: The symbol and the unconsumed remainder, or `None` if no rule matches.
    pub fn classify<'a>(&self, text: &'a str) -> Option<(Symbol, &'a str)> {
        self.rules.iter().find_map(|rule| {
            let length = rule.matched_len(text).filter(|length| *length > 0)?;
            let (matched, rest) = text.split_at(length);
            Some((Symbol::new(rule.kind, matched), rest))
        })
    }
}

/// Splits the given expression into symbols using the standard classifier.
///
/// # Arguments
///
/// * `expression`: The text of an infix expression.
///
/// returns: The symbols, in the order they appear in the text.
///
/// # Examples
///
/// ```
/// use symm::interpreter::lexer::tokenize;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let symbols = tokenize("2x + 1")?;
/// assert_eq!(symbols.len(), 4);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Symbol>, LexError> {
    tokenize_with(Classifier::standard(), expression)
}

pub fn tokenize_with(classifier: &Classifier, expression: &str) -> Result<Vec<Symbol>, LexError> {
    let mut symbols = Vec::new();
    let mut rest = expression.trim_start();

    while !rest.is_empty() {
        let position = expression.len() - rest.len();
        let (symbol, remainder) = classifier
            .classify(rest)
            .ok_or_else(|| unrecognized_character(expression, position))?;

        if symbol.kind() == SymbolKind::Constant && symbol.token().parse::<i64>().is_err() {
            return Err(LexError::ConstantOutOfRange {
                text: symbol.token().to_string(),
                position: char_position(expression, position),
            });
        }

        symbols.push(symbol);
        rest = remainder.trim_start();
    }

    Ok(symbols)
}

fn unrecognized_character(expression: &str, byte_position: usize) -> LexError {
    LexError::UnrecognizedCharacter {
        character: expression[byte_position..].chars().next().unwrap_or_default(),
        position: char_position(expression, byte_position),
    }
}

fn char_position(expression: &str, byte_position: usize) -> usize {
    expression[..byte_position].chars().count()
}
