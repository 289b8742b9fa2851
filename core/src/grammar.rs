//! The expression tree at the heart of the rewrite engine.
//!
//! Nodes are held behind [`Rc`] rather than interned in a global table: two simplification calls
//! never share a tree, so there is no benefit to interning and a real cost to the shared mutable
//! state a global interner would require.

use std::fmt;
use std::rc::Rc;

use crate::rational::Rational;

/// A reference-counted, immutable expression node.
pub type RcExpr = Rc<Expr>;

/// The operator of an [`Operator`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    /// `a + b + ...`, n-ary once flattened.
    Add,
    /// `a - b`, binary; eliminated by [`flatten`][crate::normalize::flatten] in favor of
    /// `a + UnaryMinus(b)`.
    Sub,
    /// `a * b * ...`, n-ary once flattened.
    Mult,
    /// `a / b`, always binary.
    Div,
    /// `a ^ b`, always binary.
    Exp,
}

impl Op {
    /// True for the two operators collapsed into n-ary nodes by
    /// [`flatten`][crate::normalize::flatten].
    pub fn is_flattenable(self) -> bool {
        matches!(self, Op::Add | Op::Mult)
    }

    /// The operator's printed symbol, e.g. `"+"`.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mult => "*",
            Op::Div => "/",
            Op::Exp => "^",
        }
    }
}

/// An operator applied to its (possibly n-ary) children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operator {
    /// Which operator this node applies.
    pub op: Op,
    /// The operator's operands, in left-to-right order.
    pub children: Vec<RcExpr>,
}

impl Operator {
    /// Builds an operator node from an explicit child list.
    pub fn new(op: Op, children: Vec<RcExpr>) -> Self {
        Self { op, children }
    }

    /// Builds a two-child operator node.
    pub fn binary(op: Op, lhs: RcExpr, rhs: RcExpr) -> Self {
        Self::new(op, vec![lhs, rhs])
    }
}

/// The name of a supported function call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionName {
    /// `abs(x)`.
    Abs,
}

impl FunctionName {
    /// The function's printed name, e.g. `"abs"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionName::Abs => "abs",
        }
    }
}

/// A function call node, e.g. `abs(x - 1)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionCall {
    /// Which function is being called.
    pub name: FunctionName,
    /// The single argument it is called with.
    pub arg: RcExpr,
}

/// A node of the expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// An exact rational constant.
    Const(Rational),
    /// A free variable.
    Symbol(String),
    /// `op(children...)`; `+`/`*` are n-ary post-flatten, `-`/`/`/`^` are always binary.
    Operator(Operator),
    /// `-x`, distinguished from a binary subtraction.
    UnaryMinus(RcExpr),
    /// `(x)`, an explicit grouping the printer and normalizer reason about separately from
    /// operator precedence.
    Parens(RcExpr),
    /// `abs(x)` and other supported function calls.
    Function(FunctionCall),
}

impl Expr {
    /// Builds an integer constant.
    pub fn constant(n: i64) -> RcExpr {
        Rc::new(Expr::Const(Rational::from_int(n)))
    }

    /// Builds a constant from an exact rational value.
    pub fn rational(r: Rational) -> RcExpr {
        Rc::new(Expr::Const(r))
    }

    /// Builds a free variable node.
    pub fn symbol<S: Into<String>>(name: S) -> RcExpr {
        Rc::new(Expr::Symbol(name.into()))
    }

    /// Builds an operator node from an explicit child list.
    pub fn operator(op: Op, children: Vec<RcExpr>) -> RcExpr {
        Rc::new(Expr::Operator(Operator::new(op, children)))
    }

    /// Builds a two-child operator node.
    pub fn binary(op: Op, lhs: RcExpr, rhs: RcExpr) -> RcExpr {
        Rc::new(Expr::Operator(Operator::binary(op, lhs, rhs)))
    }

    /// Builds a `-x` node.
    pub fn unary_minus(e: RcExpr) -> RcExpr {
        Rc::new(Expr::UnaryMinus(e))
    }

    /// Builds a `(x)` node.
    pub fn parens(e: RcExpr) -> RcExpr {
        Rc::new(Expr::Parens(e))
    }

    /// Builds an `abs(x)` node.
    pub fn abs(e: RcExpr) -> RcExpr {
        Rc::new(Expr::Function(FunctionCall {
            name: FunctionName::Abs,
            arg: e,
        }))
    }

    /// Unwraps a value through any number of enclosing [`Expr::Parens`].
    pub fn unwrap_parens(self: &RcExpr) -> &RcExpr {
        let mut cur = self;
        while let Expr::Parens(inner) = cur.as_ref() {
            cur = inner;
        }
        cur
    }

    /// Returns the rational value of a bare [`Expr::Const`], or `None` for anything else.
    pub fn as_const(&self) -> Option<Rational> {
        match self {
            Expr::Const(r) => Some(*r),
            _ => None,
        }
    }

    /// True for a bare [`Expr::Const`].
    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    /// True for a value that prints with a `/` and therefore never takes a `*` when used as a
    /// polynomial term's coefficient: either `Operator(Div, [Const, Const])`, or a bare `Const`
    /// whose value is non-integer.
    pub fn is_constant_fraction(&self) -> bool {
        match self {
            Expr::Const(r) => !r.is_integer(),
            Expr::Operator(Operator {
                op: Op::Div,
                children,
                ..
            }) => children.len() == 2 && children[0].is_const() && children[1].is_const(),
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::emit::pretty_string(self))
    }
}

/// A parsed comparator relating the two sides of an equation or inequality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `=`.
    Eq,
    /// `<`.
    Lt,
    /// `<=`.
    Le,
    /// `>`.
    Gt,
    /// `>=`.
    Ge,
}

impl Comparator {
    /// The comparator obtained by swapping the two sides it relates.
    pub fn flip_sides(self) -> Comparator {
        match self {
            Comparator::Eq => Comparator::Eq,
            Comparator::Lt => Comparator::Gt,
            Comparator::Le => Comparator::Ge,
            Comparator::Gt => Comparator::Lt,
            Comparator::Ge => Comparator::Le,
        }
    }

    /// The comparator obtained by multiplying or dividing both sides by a negative number.
    pub fn negate_direction(self) -> Comparator {
        self.flip_sides()
    }

    /// The comparator's printed symbol, e.g. `"<="`.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }
}

/// A two-sided relation, e.g. `2x + 1 = 5` or `x - 1 < 4`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: RcExpr,
    /// The relation between the two sides.
    pub comparator: Comparator,
    /// The right-hand side.
    pub rhs: RcExpr,
}

/// A top-level parsed program: either a bare expression or an equation to solve.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// A bare expression, to be simplified.
    Expr(RcExpr),
    /// An equation or inequality, to be solved.
    Equation(Equation),
}

/// A virtual view of a subtree as a polynomial term `coefficient * symbol ^ exponent`.
///
/// This is not a reified node kind: any subtree matching the shape below is interpreted as a
/// polynomial term on demand by rules that need one, then reconstructed with
/// [`PolyTerm::into_expr`].
#[derive(Clone, Debug, PartialEq)]
pub struct PolyTerm {
    /// The term's scalar factor.
    pub coefficient: Rational,
    /// The variable name.
    pub symbol: String,
    /// `None` means an implicit exponent of `1`.
    pub exponent: Option<RcExpr>,
}

impl PolyTerm {
    /// Tries to view `expr` as a polynomial term. Returns `None` if it isn't one.
    pub fn from_expr(expr: &RcExpr) -> Option<PolyTerm> {
        match expr.as_ref() {
            Expr::Symbol(name) => Some(PolyTerm {
                coefficient: Rational::from_int(1),
                symbol: name.clone(),
                exponent: None,
            }),
            Expr::UnaryMinus(inner) => {
                let mut term = PolyTerm::from_expr(inner)?;
                term.coefficient = -term.coefficient;
                Some(term)
            }
            Expr::Operator(Operator {
                op: Op::Exp,
                children,
                ..
            }) if children.len() == 2 => {
                if let Expr::Symbol(name) = children[0].as_ref() {
                    Some(PolyTerm {
                        coefficient: Rational::from_int(1),
                        symbol: name.clone(),
                        exponent: Some(Rc::clone(&children[1])),
                    })
                } else {
                    None
                }
            }
            Expr::Operator(Operator {
                op: Op::Mult,
                children,
                ..
            }) if children.len() == 2 => {
                let (coef_expr, rest) =
                    if children[0].is_const() || children[0].is_constant_fraction() {
                        (&children[0], &children[1])
                    } else if children[1].is_const() || children[1].is_constant_fraction() {
                        (&children[1], &children[0])
                    } else {
                        return None;
                    };
                let coefficient = const_value(coef_expr)?;
                let mut term = PolyTerm::from_expr(rest)?;
                term.coefficient = term.coefficient * coefficient;
                Some(term)
            }
            // `symbol / constant` or `(coefficient * symbol) / constant` is a term whose
            // coefficient is the fraction `coefficient / constant`.
            Expr::Operator(Operator {
                op: Op::Div,
                children,
                ..
            }) if children.len() == 2 => {
                let divisor = children[1].as_const()?;
                let mut term = PolyTerm::from_expr(&children[0])?;
                term.coefficient = term.coefficient / divisor;
                Some(term)
            }
            _ => None,
        }
    }

    /// Rebuilds a concrete [`Expr`] from this term.
    pub fn into_expr(self) -> RcExpr {
        let symbol = Expr::symbol(self.symbol);
        let base = match self.exponent {
            Some(exp) => Expr::binary(Op::Exp, symbol, exp),
            None => symbol,
        };
        if self.coefficient.is_one() {
            base
        } else if self.coefficient == Rational::from_int(-1) {
            Expr::unary_minus(base)
        } else {
            Expr::operator(Op::Mult, vec![Expr::rational(self.coefficient), base])
        }
    }
}

/// Reads the rational value out of a constant or constant-fraction node.
fn const_value(expr: &RcExpr) -> Option<Rational> {
    match expr.as_ref() {
        Expr::Const(r) => Some(*r),
        Expr::Operator(Operator {
            op: Op::Div,
            children,
            ..
        }) if children.len() == 2 => {
            let n = children[0].as_const()?;
            let d = children[1].as_const()?;
            Some(n / d)
        }
        Expr::UnaryMinus(inner) => const_value(inner).map(|r| -r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_term_roundtrip_plain_symbol() {
        let e = Expr::symbol("x");
        let term = PolyTerm::from_expr(&e).unwrap();
        assert_eq!(term.coefficient, Rational::from_int(1));
        assert_eq!(term.symbol, "x");
        assert!(term.exponent.is_none());
    }

    #[test]
    fn poly_term_roundtrip_coefficient() {
        let e = Expr::operator(Op::Mult, vec![Expr::constant(2), Expr::symbol("x")]);
        let term = PolyTerm::from_expr(&e).unwrap();
        assert_eq!(term.coefficient, Rational::from_int(2));
        assert_eq!(term.symbol, "x");
    }

    #[test]
    fn poly_term_roundtrip_exponent() {
        let e = Expr::binary(Op::Exp, Expr::symbol("x"), Expr::constant(3));
        let term = PolyTerm::from_expr(&e).unwrap();
        assert_eq!(term.symbol, "x");
        assert!(term.exponent.is_some());
    }

    #[test]
    fn non_poly_term() {
        let e = Expr::operator(Op::Add, vec![Expr::symbol("x"), Expr::constant(1)]);
        assert!(PolyTerm::from_expr(&e).is_none());
    }

    #[test]
    fn poly_term_fractional_coefficient_via_division() {
        let e = Expr::binary(Op::Div, Expr::symbol("x"), Expr::constant(2));
        let term = PolyTerm::from_expr(&e).unwrap();
        assert_eq!(term.coefficient, Rational::new(1, 2));
        assert_eq!(term.symbol, "x");
    }
}
