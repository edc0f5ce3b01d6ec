use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_constant(&mut self, _value: i64) {}
    fn visit_variable(&mut self, _name: char) {}
    fn visit_binary_operation(
        &mut self,
        _operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operator: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_complex_tree() -> Node {
        let a = Node::new_variable('a');
        let b = Node::new_variable('b');
        let c = Node::new_constant(3);
        let d = Node::new_variable('d');
        let plus = Node::new_binary(BinaryOperator::Add, b, c);
        let star = Node::new_binary(BinaryOperator::Multiply, plus, d);
        let negated = Node::new_unary(UnaryOperator::Negate, star);
        Node::new_binary(BinaryOperator::Subtract, a, negated)
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_constant(&mut self, value: i64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_variable(&mut self, name: char) {
            self.prints.push(name.to_string())
        }
        fn visit_binary_operation(
            &mut self,
            operator: &BinaryOperator,
            left_operand: &Node,
            right_operand: &Node,
        ) {
            self.prints.push(format!("{:?}", operator));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operator));
        }
        fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
            self.prints.push(format!("{:?}", operator));
            walk_unary_operation(self, operand);
            self.prints.push(format!("exit {:?}", operator));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Subtract",
                "a",
                "Negate",
                "Multiply",
                "Add",
                "b",
                "3",
                "exit Add",
                "d",
                "exit Multiply",
                "exit Negate",
                "exit Subtract",
            ]
        )
    }

    struct LeafCounter {
        leaves: usize,
    }

    impl SyntaxVisitor for LeafCounter {
        fn visit_constant(&mut self, _value: i64) {
            self.leaves += 1
        }
        fn visit_variable(&mut self, _name: char) {
            self.leaves += 1
        }
    }

    #[test]
    fn default_methods_reach_every_leaf() {
        let mut visitor = LeafCounter { leaves: 0 };
        create_complex_tree().accept(&mut visitor);
        assert_eq!(visitor.leaves, 4);
    }
}
