//! A dispatch-by-node-kind traversal over [`Expr`], in the same shape as the scanner/parser's
//! recursive-descent code: each rewrite-rule module that needs whole-tree recursion (rather than
//! the single-step driver in [`crate::driver`]) can implement this trait instead of hand-rolling
//! its own `match`.

use crate::grammar::*;

/// A post-order expression visitor. Implementors return a (possibly unchanged) replacement for
/// each node; the default methods handle recursing into children so only the node kinds a
/// particular visitor cares about need overriding.
pub trait Visitor {
    /// Visits any node, dispatching to the method for its specific kind.
    fn visit_expr(&mut self, item: &RcExpr) -> RcExpr {
        match item.as_ref() {
            Expr::Const(_) | Expr::Symbol(_) => item.clone(),
            Expr::Operator(op) => self.visit_operator(item, op),
            Expr::UnaryMinus(inner) => self.visit_unary_minus(item, inner),
            Expr::Parens(inner) => self.visit_parens(item, inner),
            Expr::Function(call) => self.visit_function(item, call),
        }
    }

    /// Visits an operator node after recursing into its children.
    fn visit_operator(&mut self, item: &RcExpr, op: &Operator) -> RcExpr {
        let children: Vec<RcExpr> = op.children.iter().map(|c| self.visit_expr(c)).collect();
        if children
            .iter()
            .zip(op.children.iter())
            .all(|(new, old)| std::rc::Rc::ptr_eq(new, old))
        {
            item.clone()
        } else {
            let mut new_op = op.clone();
            new_op.children = children;
            std::rc::Rc::new(Expr::Operator(new_op))
        }
    }

    /// Visits a unary-minus node after recursing into its operand.
    fn visit_unary_minus(&mut self, item: &RcExpr, inner: &RcExpr) -> RcExpr {
        let new_inner = self.visit_expr(inner);
        if std::rc::Rc::ptr_eq(&new_inner, inner) {
            item.clone()
        } else {
            Expr::unary_minus(new_inner)
        }
    }

    /// Visits a parenthesized node after recursing into its operand.
    fn visit_parens(&mut self, item: &RcExpr, inner: &RcExpr) -> RcExpr {
        let new_inner = self.visit_expr(inner);
        if std::rc::Rc::ptr_eq(&new_inner, inner) {
            item.clone()
        } else {
            Expr::parens(new_inner)
        }
    }

    /// Visits a function-call node after recursing into its argument.
    fn visit_function(&mut self, item: &RcExpr, call: &FunctionCall) -> RcExpr {
        let new_arg = self.visit_expr(&call.arg);
        if std::rc::Rc::ptr_eq(&new_arg, &call.arg) {
            item.clone()
        } else {
            std::rc::Rc::new(Expr::Function(FunctionCall {
                name: call.name,
                arg: new_arg,
            }))
        }
    }
}
