use thiserror::Error;

/// The input contains text that matches none of the symbol kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized character {character:?} at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },
    #[error("constant {text} at position {position} does not fit in a 64-bit integer")]
    ConstantOutOfRange { text: String, position: usize },
}

/// The symbols could not be folded into a single expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("incomplete syntax tree")]
    IncompleteSyntaxTree,
    #[error("empty expression")]
    EmptyExpression,
    #[error("operator {operator} is missing an operand")]
    MissingOperand { operator: String },
    #[error("operator {operator} cannot be used as a prefix")]
    InvalidPrefixOperator { operator: String },
}

/// Any failure that can occur while converting text into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown function .{name}")]
    UnknownFunction { name: String },
}
