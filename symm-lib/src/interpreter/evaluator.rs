use crate::interpreter::error::EvalError;
use crate::interpreter::operator::UnaryOperator;
use crate::interpreter::syntax::expression_tree::Node;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::sync::OnceLock;

/// The result of evaluating an expression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// Not a valid number: a variable was left unsubstituted, or the arithmetic was
    /// invalid (division by zero, out-of-domain function argument, overflow).
    Undefined,
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Undefined => None,
        }
    }

    fn map(self, function: impl FnOnce(f64) -> f64) -> Value {
        match self {
            Value::Number(value) => Value::from(function(value)),
            Value::Undefined => Value::Undefined,
        }
    }
}

impl From<f64> for Value {
    /// Non-finite numbers are undefined.
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Value::Number(value)
        } else {
            Value::Undefined
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

pub type Function = fn(f64) -> f64;

/// The numeric functions that dot-functions (e.g. `.sqrt`) dispatch to.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    pub fn empty() -> FunctionRegistry {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    pub fn standard() -> &'static FunctionRegistry {
        static STANDARD: OnceLock<FunctionRegistry> = OnceLock::new();
        STANDARD.get_or_init(FunctionRegistry::default)
    }

    /// Adds a function, returning the one it replaced, if any.
    pub fn register(&mut self, name: impl Into<String>, function: Function) -> Option<Function> {
        self.functions.insert(name.into(), function)
    }

    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).sorted().collect()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = FunctionRegistry::empty();
        let functions: [(&str, Function); 21] = [
            ("sqrt", f64::sqrt),
            ("cbrt", f64::cbrt),
            ("exp", f64::exp),
            ("log", f64::ln),
            ("ln", f64::ln),
            ("log2", f64::log2),
            ("log10", f64::log10),
            ("sin", f64::sin),
            ("cos", f64::cos),
            ("tan", f64::tan),
            ("arcsin", f64::asin),
            ("arccos", f64::acos),
            ("arctan", f64::atan),
            ("sinh", f64::sinh),
            ("cosh", f64::cosh),
            ("tanh", f64::tanh),
            ("abs", f64::abs),
            ("floor", f64::floor),
            ("ceil", f64::ceil),
            ("round", f64::round),
            ("sign", sign),
        ];
        for (name, function) in functions {
            registry.register(name, function);
        }
        registry
    }
}

fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

/// Evaluates an expression tree.
///
/// # Arguments
///
/// * `node`: The root of the tree to evaluate.
/// * `registry`: The functions that dot-functions are looked up in.
///
/// returns: The value of the tree, or an error if it calls a function that is not in the
/// registry.
pub fn evaluate(node: &Node, registry: &FunctionRegistry) -> Result<Value, EvalError> {
    match node {
        Node::Constant(value) => Ok(Value::from(*value as f64)),
        Node::Variable(_) => Ok(Value::Undefined),
        Node::UnaryOperation { operator, operand } => {
            let function: Function = match operator {
                UnaryOperator::Negate => |x| -x,
                UnaryOperator::Identity => |x| x,
                UnaryOperator::Function(name) => {
                    registry
                        .get(name)
                        .ok_or_else(|| EvalError::UnknownFunction {
                            name: name.to_string(),
                        })?
                }
            };
            Ok(evaluate(operand, registry)?.map(function))
        }
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand, registry)?;
            let right = evaluate(right_operand, registry)?;
            match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(operator.evaluate(a, b)),
                _ => Ok(Value::Undefined),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::operator::BinaryOperator;

    fn evaluate_standard(node: &Node) -> Value {
        evaluate(node, FunctionRegistry::standard()).unwrap()
    }

    fn function(name: &str, operand: Node) -> Node {
        Node::new_unary(UnaryOperator::Function(name.into()), operand)
    }

    #[test]
    fn constant_evaluates_to_itself() {
        assert_eq!(evaluate_standard(&Node::new_constant(7)), Value::Number(7.0));
    }

    #[test]
    fn variable_is_undefined() {
        let tree = Node::new_binary(
            BinaryOperator::Add,
            Node::new_constant(1),
            Node::new_variable('x'),
        );
        assert!(evaluate_standard(&tree).is_undefined());
    }

    #[test]
    fn division_is_real_division() {
        let tree = Node::new_binary(
            BinaryOperator::Divide,
            Node::new_constant(2),
            Node::new_constant(5),
        );
        assert_eq!(evaluate_standard(&tree), Value::Number(0.4));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let tree = Node::new_binary(
            BinaryOperator::Divide,
            Node::new_constant(2),
            Node::new_constant(0),
        );
        assert!(evaluate_standard(&tree).is_undefined());
    }

    #[test]
    fn negative_exponent_gives_fraction() {
        let tree = Node::new_binary(
            BinaryOperator::Exponentiate,
            Node::new_constant(2),
            Node::new_unary(UnaryOperator::Negate, Node::new_constant(2)),
        );
        assert_eq!(evaluate_standard(&tree), Value::Number(0.25));
    }

    #[test]
    fn domain_errors_are_undefined() {
        let negative = Node::new_unary(UnaryOperator::Negate, Node::new_constant(4));
        assert!(evaluate_standard(&function("sqrt", negative)).is_undefined());
        assert!(evaluate_standard(&function("log", Node::new_constant(0))).is_undefined());
    }

    #[test]
    fn functions_are_dispatched_by_name() {
        assert_eq!(
            evaluate_standard(&function("sqrt", Node::new_constant(16))),
            Value::Number(4.0)
        );
        assert_eq!(
            evaluate_standard(&function(
                "abs",
                Node::new_unary(UnaryOperator::Negate, Node::new_constant(3))
            )),
            Value::Number(3.0)
        );
        assert_eq!(
            evaluate_standard(&function("sign", Node::new_constant(0))),
            Value::Number(0.0)
        );
    }

    #[test]
    fn unknown_function_is_an_error() {
        let tree = function("frobnicate", Node::new_constant(1));
        assert_eq!(
            evaluate(&tree, FunctionRegistry::standard()),
            Err(EvalError::UnknownFunction {
                name: "frobnicate".into()
            })
        );
    }

    #[test]
    fn unknown_function_is_reported_even_with_free_variables() {
        let tree = function("nope", Node::new_variable('x'));
        assert!(evaluate(&tree, FunctionRegistry::standard()).is_err());
    }

    #[test]
    fn registered_functions_are_available() {
        let mut registry = FunctionRegistry::empty();
        assert!(evaluate(&function("double", Node::new_constant(3)), &registry).is_err());

        registry.register("double", |x| 2.0 * x);

        assert_eq!(
            evaluate(&function("double", Node::new_constant(3)), &registry),
            Ok(Value::Number(6.0))
        );
        assert_eq!(registry.names(), ["double"]);
    }

    #[test]
    fn value_reports_number() {
        assert_eq!(Value::Number(1.5).number(), Some(1.5));
        assert_eq!(Value::Undefined.number(), None);
        assert_eq!(Value::from(f64::NAN), Value::Undefined);
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }
}
