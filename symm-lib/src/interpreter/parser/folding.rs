use super::Element;
use crate::interpreter::error::ParseError;
use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::symbol::Symbol;
use crate::interpreter::syntax::expression_tree::Node;
use log::trace;
use std::collections::VecDeque;

/// Attaches every operator in prefix position (at the start, or right after another
/// operator) to the operand that follows it. Scans right to left so that chains such as
/// `- - x` and `- .sqrt x` nest correctly.
pub(super) fn fold_unaries(elements: Vec<Element>) -> Result<Vec<Element>, ParseError> {
    let operators: Vec<bool> = elements.iter().map(Element::is_operator).collect();
    let mut elements = elements.into_iter().enumerate().rev();
    let mut folded: VecDeque<Element> = VecDeque::with_capacity(operators.len());

    if let Some((_, last)) = elements.next() {
        folded.push_front(last);
    }

    for (index, element) in elements {
        let in_prefix_position = operators[index] && (index == 0 || operators[index - 1]);
        match element {
            Element::Symbol(symbol) if in_prefix_position => {
                let operator = UnaryOperator::from_symbol(&symbol)?;
                let operand = pop_operand(folded.pop_front(), &symbol)?;
                folded.push_front(Element::Tree(Node::new_unary(operator, operand)));
            }
            element => folded.push_front(element),
        }
    }

    trace!("unaries folded: {:?}", folded);
    Ok(folded.into())
}

/// Combines every operator of the given precedence level with its neighbours, in the
/// direction given by the level's associativity.
pub(super) fn fold_binaries(
    elements: Vec<Element>,
    level: &[BinaryOperator],
) -> Result<Vec<Element>, ParseError> {
    let associativity = match level.first() {
        Some(operator) => operator.associativity(),
        None => return Ok(elements),
    };

    let folded = match associativity {
        Associativity::Left => fold_left_to_right(elements, level)?,
        Associativity::Right => fold_right_to_left(elements, level)?,
    };

    trace!("{:?} folded: {:?}", level, folded);
    Ok(folded)
}

fn fold_left_to_right(
    elements: Vec<Element>,
    level: &[BinaryOperator],
) -> Result<Vec<Element>, ParseError> {
    let mut folded: Vec<Element> = Vec::with_capacity(elements.len());
    let mut elements = elements.into_iter();

    if let Some(first) = elements.next() {
        folded.push(first);
    }

    while let Some(element) = elements.next() {
        match level_operator(&element, level) {
            Some(operator) => {
                let symbol = operator.symbol();
                let left_operand = pop_operand(folded.pop(), &symbol)?;
                let right_operand = pop_operand(elements.next(), &symbol)?;
                folded.push(Element::Tree(Node::new_binary(
                    operator,
                    left_operand,
                    right_operand,
                )));
            }
            None => folded.push(element),
        }
    }

    Ok(folded)
}

fn fold_right_to_left(
    elements: Vec<Element>,
    level: &[BinaryOperator],
) -> Result<Vec<Element>, ParseError> {
    let mut folded: VecDeque<Element> = VecDeque::with_capacity(elements.len());
    let mut elements = elements.into_iter().rev();

    if let Some(last) = elements.next() {
        folded.push_front(last);
    }

    while let Some(element) = elements.next() {
        match level_operator(&element, level) {
            Some(operator) => {
                let symbol = operator.symbol();
                let right_operand = pop_operand(folded.pop_front(), &symbol)?;
                let left_operand = pop_operand(elements.next(), &symbol)?;
                folded.push_front(Element::Tree(Node::new_binary(
                    operator,
                    left_operand,
                    right_operand,
                )));
            }
            None => folded.push_front(element),
        }
    }

    Ok(folded.into())
}

/// The operator the element stands for, if it is an operator symbol of the given level.
fn level_operator(element: &Element, level: &[BinaryOperator]) -> Option<BinaryOperator> {
    match element {
        Element::Symbol(symbol) if symbol.is_operator() => {
            BinaryOperator::from_symbol(symbol).filter(|operator| level.contains(operator))
        }
        _ => None,
    }
}

fn pop_operand(element: Option<Element>, operator: &Symbol) -> Result<Node, ParseError> {
    element
        .ok_or_else(|| ParseError::MissingOperand {
            operator: operator.to_string(),
        })?
        .into_operand(operator)
}
