use crate::interpreter::error::EvalError;
use crate::interpreter::evaluator::{self, FunctionRegistry, Value};
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, SyntaxVisitor,
};
use itertools::Itertools;
use ptree::{write_tree, TreeBuilder};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Values to put in place of variables, keyed by variable name.
pub type Substitutions = HashMap<char, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Terminal symbols (leaves)
    Constant(i64),
    Variable(char),
    // Non-terminal symbols (non-leaves)
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
}

/// How a tree is written out as text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notation {
    /// Fully parenthesized, e.g. `(a+(b*c))`.
    Infix,
    /// Operands before operators, e.g. `a b c * +`.
    Postfix,
}

impl Node {
    pub fn new_constant(value: i64) -> Node {
        Node::Constant(value)
    }

    pub fn new_variable(name: char) -> Node {
        Node::Variable(name)
    }

    pub fn new_unary(operator: UnaryOperator, operand: Node) -> Node {
        Node::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn new_binary(operator: BinaryOperator, left_operand: Node, right_operand: Node) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Constant(value) => visitor.visit_constant(*value),
            Node::Variable(name) => visitor.visit_variable(*name),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
        }
    }

    /// Writes the tree out as text in the given notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use symm::interpreter::parse;
    /// use symm::interpreter::syntax::expression_tree::Notation;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let tree = parse("a + b * c")?;
    /// assert_eq!(tree.format(Notation::Infix), "(a+(b*c))");
    /// assert_eq!(tree.format(Notation::Postfix), "a b c * +");
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn format(&self, notation: Notation) -> String {
        self.display(notation).to_string()
    }

    pub fn display(&self, notation: Notation) -> Formatted<'_> {
        Formatted {
            node: self,
            notation,
        }
    }

    /// Creates a new tree where every variable that has a substitution is replaced by a
    /// constant. The rest of the tree is copied unchanged.
    pub fn substitute(&self, substitutions: &Substitutions) -> Node {
        match self {
            Node::Variable(name) => match substitutions.get(name) {
                Some(value) => Node::new_constant(*value),
                None => self.clone(),
            },
            Node::Constant(_) => self.clone(),
            Node::UnaryOperation { operator, operand } => {
                Node::new_unary(operator.clone(), operand.substitute(substitutions))
            }
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => Node::new_binary(
                *operator,
                left_operand.substitute(substitutions),
                right_operand.substitute(substitutions),
            ),
        }
    }

    /// The names of all variables that appear in the tree.
    pub fn variables(&self) -> BTreeSet<char> {
        let mut visitor = VariableCollector {
            variables: BTreeSet::new(),
        };
        self.accept(&mut visitor);
        visitor.variables
    }

    /// Evaluates the tree using the standard function registry.
    ///
    /// returns: The value of the expression, which is undefined if a variable is left
    /// unsubstituted or the arithmetic is invalid.
    pub fn evaluate(&self) -> Result<Value, EvalError> {
        self.evaluate_with(FunctionRegistry::standard())
    }

    pub fn evaluate_with(&self, registry: &FunctionRegistry) -> Result<Value, EvalError> {
        evaluator::evaluate(self, registry)
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

/// A tree paired with the notation to write it in.
pub struct Formatted<'a> {
    node: &'a Node,
    notation: Notation,
}

impl Display for Formatted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::Infix => write_infix(self.node, f),
            Notation::Postfix => {
                let mut visitor = PostfixVisitor { tokens: vec![] };
                self.node.accept(&mut visitor);
                write!(f, "{}", visitor.tokens.iter().join(" "))
            }
        }
    }
}

fn write_infix(node: &Node, f: &mut Formatter<'_>) -> fmt::Result {
    match node {
        Node::Constant(value) => write!(f, "{}", value),
        Node::Variable(name) => write!(f, "{}", name),
        Node::UnaryOperation { operator, operand } => {
            write!(f, "{}(", operator)?;
            write_infix(operand, f)?;
            f.write_str(")")
        }
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            f.write_str("(")?;
            write_infix(left_operand, f)?;
            write!(f, "{}", operator)?;
            write_infix(right_operand, f)?;
            f.write_str(")")
        }
    }
}

struct PostfixVisitor {
    tokens: Vec<String>,
}

impl SyntaxVisitor for PostfixVisitor {
    fn visit_constant(&mut self, value: i64) {
        self.tokens.push(value.to_string());
    }
    fn visit_variable(&mut self, name: char) {
        self.tokens.push(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand);
        self.tokens.push(operator.to_string());
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand);
        self.tokens.push(operator.to_string());
    }
}

struct VariableCollector {
    variables: BTreeSet<char>,
}

impl SyntaxVisitor for VariableCollector {
    fn visit_variable(&mut self, name: char) {
        self.variables.insert(name);
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_constant(&mut self, value: i64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_variable(&mut self, name: char) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
}
