mod folding;

use crate::interpreter::error::ParseError;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::symbol::{Symbol, SymbolKind};
use crate::interpreter::syntax::expression_tree::Node;
use folding::{fold_binaries, fold_unaries};
use log::trace;

/// An entry of a partially built expression: either a symbol that has not been
/// consumed yet, or a subtree that has already been built.
#[derive(Debug, Clone, PartialEq)]
enum Element {
    Symbol(Symbol),
    Tree(Node),
}

impl Element {
    fn is_operator(&self) -> bool {
        matches!(self, Element::Symbol(symbol) if symbol.is_operator())
    }

    fn is_opening(&self) -> bool {
        matches!(self, Element::Symbol(symbol) if symbol.is_opening())
    }

    fn is_closing(&self) -> bool {
        matches!(self, Element::Symbol(symbol) if symbol.is_closing())
    }

    /// Converts the element into an operand of the given operator.
    fn into_operand(self, operator: &Symbol) -> Result<Node, ParseError> {
        match self {
            Element::Tree(node) => Ok(node),
            Element::Symbol(symbol) => leaf(&symbol).ok_or_else(|| ParseError::MissingOperand {
                operator: operator.to_string(),
            }),
        }
    }

    fn into_root(self) -> Result<Node, ParseError> {
        match self {
            Element::Tree(node) => Ok(node),
            Element::Symbol(symbol) => leaf(&symbol).ok_or(ParseError::IncompleteSyntaxTree),
        }
    }
}

fn leaf(symbol: &Symbol) -> Option<Node> {
    match symbol.kind() {
        SymbolKind::Variable => symbol.token().chars().next().map(Node::new_variable),
        SymbolKind::Constant => symbol.token().parse().ok().map(Node::new_constant),
        SymbolKind::Operator | SymbolKind::Parenthesis => None,
    }
}

/// Builds an expression tree out of the given symbols.
///
/// Parenthesized groups are built first, then implicit multiplication is made explicit,
/// and finally operators are folded into the tree from the tightest-binding to the
/// loosest-binding: prefix operators, `^` (right to left), `*` and `/`, `+` and `-`.
///
/// # Arguments
///
/// * `symbols`: The symbols to build a tree of, in the order they appear in the text.
///
/// returns: The root of the expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use symm::interpreter::lexer::tokenize;
/// use symm::interpreter::parser::build;
/// use symm::interpreter::syntax::expression_tree::Notation;
///
/// let symbols = tokenize("2x^2")?;
/// let tree = build(symbols)?;
/// assert_eq!(tree.format(Notation::Infix), "(2*(x**2))");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn build(symbols: Vec<Symbol>) -> Result<Node, ParseError> {
    build_group(symbols.into_iter().map(Element::Symbol).collect())
}

fn build_group(elements: Vec<Element>) -> Result<Node, ParseError> {
    let elements = resolve_parentheses(elements)?;
    if elements.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let elements = insert_implicit_multiplication(elements);
    trace!("explicit: {:?}", elements);

    let mut elements = fold_unaries(elements)?;
    for level in BinaryOperator::levels() {
        elements = fold_binaries(elements, &level)?;
    }

    let mut elements = elements.into_iter();
    match (elements.next(), elements.next()) {
        (Some(root), None) => root.into_root(),
        _ => Err(ParseError::IncompleteSyntaxTree),
    }
}

/// Replaces every parenthesized group, innermost first, with the subtree built from
/// its contents.
fn resolve_parentheses(mut elements: Vec<Element>) -> Result<Vec<Element>, ParseError> {
    while let Some(close) = elements.iter().position(Element::is_closing) {
        let open = elements[..close]
            .iter()
            .rposition(Element::is_opening)
            .ok_or(ParseError::MismatchedParentheses)?;

        let group: Vec<Element> = elements.drain(open..=close).collect();
        let inner = group[1..group.len() - 1].to_vec();
        let subtree = build_group(inner)?;
        elements.insert(open, Element::Tree(subtree));
    }

    if elements.iter().any(Element::is_opening) {
        return Err(ParseError::MismatchedParentheses);
    }
    Ok(elements)
}

/// Puts a `*` between every two adjacent elements that are both operands.
fn insert_implicit_multiplication(elements: Vec<Element>) -> Vec<Element> {
    let mut explicit: Vec<Element> = Vec::with_capacity(elements.len() * 2);
    for element in elements {
        if let Some(previous) = explicit.last() {
            if !previous.is_operator() && !element.is_operator() {
                explicit.push(Element::Symbol(BinaryOperator::Multiply.symbol()));
            }
        }
        explicit.push(element);
    }
    explicit
}
