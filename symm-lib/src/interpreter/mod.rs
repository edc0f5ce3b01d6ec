pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod symbol;
pub mod syntax;

use crate::interpreter::error::SyntaxError;
use crate::interpreter::evaluator::Value;
use crate::interpreter::symbol::{Symbol, SymbolKind};
use crate::interpreter::syntax::expression_tree::{Node, Notation, Substitutions};
use anyhow::{Context, Result};
use log::debug;
use string_builder::Builder;

pub use crate::interpreter::lexer::tokenize;

/// Converts the given input string into an equivalent expression tree,
/// which is easier to manipulate than the original string.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use symm::interpreter::parse;
/// use symm::interpreter::syntax::expression_tree::Notation;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = parse("n(n+1)/2")?;
/// assert_eq!(tree.format(Notation::Infix), "((n*(n+1))/2)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(expression: &str) -> Result<Node, SyntaxError> {
    let symbols = lexer::tokenize(expression)?;
    debug!("symbols: {:?}", symbols);
    let tree = parser::build(symbols)?;
    debug!("tree: {}", tree.format(Notation::Infix));
    Ok(tree)
}

/// Parses an expression, substitutes values for its variables and evaluates it.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `substitutions`: Values for the variables in the expression.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use symm::interpreter::evaluate_expression;
/// use symm::interpreter::evaluator::Value;
/// use symm::interpreter::syntax::expression_tree::Substitutions;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let substitutions = Substitutions::from([('n', 5)]);
/// let value = evaluate_expression("n(n+1)(2n+1)/6", &substitutions)?;
/// assert_eq!(value, Value::Number(55.0));
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate_expression(expression: &str, substitutions: &Substitutions) -> Result<Value> {
    let tree = parse(expression).with_context(|| format!("Failed to parse {}", expression))?;
    let value = tree
        .substitute(substitutions)
        .evaluate()
        .with_context(|| format!("Failed to evaluate {}", expression))?;
    Ok(value)
}

/// Pretty-prints the given symbols with added whitespace.
///
/// # Arguments
///
/// * `symbols`: The symbols to print.
///
/// returns: A pretty-printed text-version of the given symbols.
///
/// # Examples
///
/// ```
/// use symm::interpreter::{symbols_to_string, tokenize};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let symbols = tokenize("2x^(y+1)")?;
/// let pretty_printed_symbols = symbols_to_string(&symbols)?;
/// assert_eq!(pretty_printed_symbols, "2x**(y + 1)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn symbols_to_string(symbols: &[Symbol]) -> Result<String> {
    let mut builder = Builder::new(symbols.len());

    for (index, symbol) in symbols.iter().enumerate() {
        let follows_operand = index > 0 && {
            let previous = &symbols[index - 1];
            matches!(previous.kind(), SymbolKind::Variable | SymbolKind::Constant)
                || previous.is_closing()
        };
        match (symbol.kind(), symbol.token()) {
            (SymbolKind::Operator, "+" | "-" | "*" | "/") if follows_operand => {
                builder.append(" ");
                builder.append(symbol.token());
                builder.append(" ");
            }
            (SymbolKind::Operator, token) if token.starts_with('.') => {
                builder.append(token);
                builder.append(" ");
            }
            (_, token) => builder.append(token),
        }
    }

    builder.string().context("Failed to build symbol string")
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;
    use crate::interpreter::error::{EvalError, LexError, ParseError};
    use parameterized_macro::parameterized;

    fn sample_substitutions() -> Substitutions {
        Substitutions::from([
            ('a', 2),
            ('b', 5),
            ('c', 3),
            ('n', 5),
            ('x', 6),
            ('y', 7),
            ('z', 8),
        ])
    }

    fn evaluate_number(expression: &str, substitutions: &Substitutions) -> f64 {
        evaluate_expression(expression, substitutions)
            .unwrap()
            .number()
            .unwrap()
    }

    #[parameterized(
    expression = {
    "a + b",
    "a + b * (c - d) / e^2",
    "-2/5x + 3yz - .sqrt 7",
    "(-b+.sqrt(b^2-4ac))/(2a)",
    "n(n+1)(2n+1)/6",
    "a^b^c",
    "ab + bc + ac",
    "(x+y)(x-y) - x^2 + y^2",
    "- - x",
    "[a]{b}(c)",
    }
    )]
    fn formatted_infix_parses_to_the_same_tree(expression: &str) {
        let tree = parse(expression).unwrap();

        let formatted = tree.format(Notation::Infix);
        let reparsed = parse(&formatted).unwrap();

        assert_eq!(reparsed, tree);
    }

    #[test]
    fn exponentiation_is_right_associative() {
        let substitutions = Substitutions::from([('a', 2), ('b', 2), ('c', 3)]);

        assert_eq!(evaluate_number("a^b^c", &substitutions), 256.0);
    }

    #[test]
    fn implicit_multiplication_sums_squares() {
        let substitutions = Substitutions::from([('n', 5)]);

        assert_eq!(evaluate_number("n(n+1)(2n+1)/6", &substitutions), 55.0);
    }

    #[test]
    fn unary_chains_and_dot_functions_evaluate() {
        let expected = -2.0 / 5.0 * 6.0 + 3.0 * 7.0 * 8.0 - 7f64.sqrt();

        let actual = evaluate_number("-2/5x + 3yz - .sqrt 7", &sample_substitutions());

        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn quadratic_formula_finds_root() {
        // 2x^2 + 5x + 3 = 0 has the root -1
        let actual = evaluate_number("(-b+.sqrt(b^2-4ac))/(2a)", &sample_substitutions());

        assert!((actual + 1.0).abs() < 1e-9);
    }

    #[test]
    fn difference_of_squares_is_zero_for_all_integers() {
        for x in -10..=10 {
            for y in -10..=10 {
                let substitutions = Substitutions::from([('x', x), ('y', y)]);

                let value = evaluate_number("(x+y)[x-y]-x^2+y^2", &substitutions);

                assert_eq!(value, 0.0);
            }
        }
    }

    #[parameterized(
    expression = {
    "a/b",
    "ab + bc + ac",
    "-x^2",
    "2^-2",
    "+c",
    },
    expected = {
    0.4,
    31.0,
    36.0,
    0.25,
    3.0,
    }
    )]
    fn expression_evaluates_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(evaluate_number(expression, &sample_substitutions()), expected);
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let value = evaluate_expression("x / (y - y)", &sample_substitutions()).unwrap();

        assert!(value.is_undefined());
    }

    #[test]
    fn unresolved_variable_is_undefined() {
        let value = evaluate_expression("x + q", &sample_substitutions()).unwrap();

        assert!(value.is_undefined());
    }

    #[test]
    fn unknown_function_is_an_error() {
        let failure = evaluate_expression(".nope 4", &Substitutions::new()).unwrap_err();

        assert_eq!(
            failure.downcast_ref::<EvalError>(),
            Some(&EvalError::UnknownFunction {
                name: "nope".into()
            })
        );
    }

    #[test]
    fn mismatched_parentheses_fail_to_parse() {
        assert_eq!(
            parse("(a+b"),
            Err(SyntaxError::Parse(ParseError::MismatchedParentheses))
        );
        assert_eq!(
            parse("a+b)"),
            Err(SyntaxError::Parse(ParseError::MismatchedParentheses))
        );
    }

    #[test]
    fn unrecognized_character_fails_to_parse() {
        assert_eq!(
            parse("a#b"),
            Err(SyntaxError::Lex(LexError::UnrecognizedCharacter {
                character: '#',
                position: 1
            }))
        );
    }

    #[test]
    fn syntax_errors_are_recoverable_from_context() {
        let error = evaluate_expression("a#b", &Substitutions::new()).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<SyntaxError>(),
            Some(SyntaxError::Lex(_))
        ));
    }

    #[test]
    fn symbols_are_pretty_printed() {
        let symbols = tokenize("-2/5x + 3yz - .sqrt 7").unwrap();

        let printed = symbols_to_string(&symbols).unwrap();

        assert_eq!(printed, "-2 / 5x + 3yz - .sqrt 7");
    }

    #[test]
    fn prefix_operators_are_not_spaced() {
        let symbols = tokenize("(-b + c)(-a)").unwrap();

        let printed = symbols_to_string(&symbols).unwrap();

        assert_eq!(printed, "(-b + c)(-a)");
    }
}
