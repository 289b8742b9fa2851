//! Rendering an [`Expr`] (or [`Equation`]/[`Stmt`]) back out as ASCII math, an S-expression debug
//! form, or LaTeX.

use std::rc::Rc;

use crate::grammar::*;

/// The format in which a tree should be emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmitFormat {
    /// Canonical, human-readable form. For example, `1+1` is output as `1 + 1`.
    Pretty,
    /// S-expression form. For example, `1+1` is output as `(+ 1 1)`.
    SExpression,
    /// LaTeX output form. For example, `x/y` is output as `\frac{x}{y}`.
    Latex,
}

/// Implemented by anything that can be rendered in all three [`EmitFormat`]s. Implemented for
/// [`RcExpr`], [`Equation`], and [`Stmt`].
pub trait Emit {
    /// Renders `self` in the given format.
    fn emit(&self, format: EmitFormat) -> String {
        match format {
            EmitFormat::Pretty => self.emit_pretty(),
            EmitFormat::SExpression => self.emit_s_expression(),
            EmitFormat::Latex => self.emit_latex(),
        }
    }

    /// Renders `self` in canonical, human-readable form.
    fn emit_pretty(&self) -> String;
    /// Renders `self` as an S-expression.
    fn emit_s_expression(&self) -> String;
    /// Renders `self` as LaTeX.
    fn emit_latex(&self) -> String;
}

/// Used by [`Expr`]'s `Display` impl.
pub fn pretty_string(expr: &Expr) -> String {
    pretty(expr)
}

impl Emit for RcExpr {
    fn emit_pretty(&self) -> String {
        pretty(self)
    }
    fn emit_s_expression(&self) -> String {
        s_expr(self)
    }
    fn emit_latex(&self) -> String {
        latex(self)
    }
}

impl Emit for Equation {
    fn emit_pretty(&self) -> String {
        format!(
            "{} {} {}",
            pretty(&self.lhs),
            self.comparator.symbol(),
            pretty(&self.rhs)
        )
    }
    fn emit_s_expression(&self) -> String {
        format!(
            "({} {} {})",
            self.comparator.symbol(),
            s_expr(&self.lhs),
            s_expr(&self.rhs)
        )
    }
    fn emit_latex(&self) -> String {
        format!(
            "{} {} {}",
            latex(&self.lhs),
            comparator_latex(self.comparator),
            latex(&self.rhs)
        )
    }
}

/// The LaTeX spelling of a [`Comparator`], e.g. `Le` as `\le`.
pub fn comparator_latex(comparator: Comparator) -> &'static str {
    match comparator {
        Comparator::Eq => "=",
        Comparator::Lt => "<",
        Comparator::Le => r"\le",
        Comparator::Gt => ">",
        Comparator::Ge => r"\ge",
    }
}

impl Emit for Stmt {
    fn emit_pretty(&self) -> String {
        match self {
            Stmt::Expr(e) => e.emit_pretty(),
            Stmt::Equation(eq) => eq.emit_pretty(),
        }
    }
    fn emit_s_expression(&self) -> String {
        match self {
            Stmt::Expr(e) => e.emit_s_expression(),
            Stmt::Equation(eq) => eq.emit_s_expression(),
        }
    }
    fn emit_latex(&self) -> String {
        match self {
            Stmt::Expr(e) => e.emit_latex(),
            Stmt::Equation(eq) => eq.emit_latex(),
        }
    }
}

/// Binding power used to decide when a child needs explicit parentheses in pretty/LaTeX output.
fn precedence(op: Op) -> u8 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mult | Op::Div => 2,
        Op::Exp => 3,
    }
}

fn child_precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Operator(o) => precedence(o.op),
        Expr::UnaryMinus(_) => 1,
        _ => 4,
    }
}

fn pretty(expr: &Expr) -> String {
    match expr {
        Expr::Const(r) => r.to_string(),
        Expr::Symbol(name) => name.clone(),
        Expr::Parens(inner) => format!("({})", pretty(inner)),
        Expr::Function(call) => format!("{}({})", call.name.as_str(), pretty(&call.arg)),
        Expr::UnaryMinus(inner) => {
            if matches!(inner.as_ref(), Expr::Operator(o) if matches!(o.op, Op::Add | Op::Sub)) {
                format!("-({})", pretty(inner))
            } else {
                format!("-{}", pretty(inner))
            }
        }
        Expr::Operator(op) => pretty_operator(op),
    }
}

fn pretty_operator(op: &Operator) -> String {
    match op.op {
        Op::Add => {
            let mut out = String::new();
            for (i, child) in op.children.iter().enumerate() {
                match child.as_ref() {
                    Expr::UnaryMinus(inner) if i > 0 => {
                        out.push_str(" - ");
                        out.push_str(&pretty_paren_if(inner, 1));
                    }
                    _ => {
                        if i > 0 {
                            out.push_str(" + ");
                        }
                        out.push_str(&pretty_paren_if(child, 1));
                    }
                }
            }
            out
        }
        Op::Sub => format!(
            "{} - {}",
            pretty_paren_if(&op.children[0], 1),
            pretty_paren_if(&op.children[1], 1)
        ),
        Op::Mult => {
            if op.children.len() == 2 && op.children[0].is_constant_fraction() {
                return format!(
                    "{} {}",
                    pretty(&op.children[0]),
                    pretty_paren_if(&op.children[1], 2)
                );
            }
            // An integer coefficient directly against a single term is juxtaposed, not joined:
            // `5x^3`, not `5 * x^3` or `5·x^3`.
            if op.children.len() == 2
                && op.children[0].is_const()
                && !op.children[1].is_const()
            {
                return format!(
                    "{}{}",
                    pretty(&op.children[0]),
                    pretty_paren_if(&op.children[1], 2)
                );
            }
            op.children
                .iter()
                .map(|c| pretty_paren_if(c, 2))
                .collect::<Vec<_>>()
                .join("·")
        }
        Op::Div => {
            if op.children[0].is_const() && op.children[1].is_const() {
                format!("{}/{}", pretty(&op.children[0]), pretty(&op.children[1]))
            } else {
                format!(
                    "{} / {}",
                    pretty_paren_if(&op.children[0], 2),
                    pretty_paren_if(&op.children[1], 3)
                )
            }
        }
        Op::Exp => format!(
            "{}^{}",
            pretty_paren_if(&op.children[0], 4),
            pretty_paren_if(&op.children[1], 3)
        ),
    }
}

fn pretty_paren_if(expr: &RcExpr, min_prec: u8) -> String {
    if child_precedence(expr) < min_prec {
        format!("({})", pretty(expr))
    } else {
        pretty(expr)
    }
}

fn s_expr(expr: &Expr) -> String {
    match expr {
        Expr::Const(r) => r.to_string(),
        Expr::Symbol(name) => name.clone(),
        Expr::Parens(inner) => format!("(paren {})", s_expr(inner)),
        Expr::UnaryMinus(inner) => format!("(neg {})", s_expr(inner)),
        Expr::Function(call) => format!("({} {})", call.name.as_str(), s_expr(&call.arg)),
        Expr::Operator(op) => {
            let children = op
                .children
                .iter()
                .map(|c| s_expr(c))
                .collect::<Vec<_>>()
                .join(" ");
            format!("({} {})", op.op.symbol(), children)
        }
    }
}

fn latex(expr: &Expr) -> String {
    match expr {
        Expr::Const(r) => r.to_string(),
        Expr::Symbol(name) => name.clone(),
        Expr::Parens(inner) => format!("\\left({}\\right)", latex(inner)),
        Expr::Function(call) => format!(
            "\\operatorname{{{}}}\\left({}\\right)",
            call.name.as_str(),
            latex(&call.arg)
        ),
        Expr::UnaryMinus(inner) => format!("-{}", latex(inner)),
        Expr::Operator(op) => match op.op {
            Op::Add => op
                .children
                .iter()
                .enumerate()
                .map(|(i, c)| match c.as_ref() {
                    Expr::UnaryMinus(inner) if i > 0 => format!("- {}", latex(inner)),
                    _ if i > 0 => format!("+ {}", latex(c)),
                    _ => latex(c),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Op::Sub => format!("{} - {}", latex(&op.children[0]), latex(&op.children[1])),
            Op::Mult => op
                .children
                .iter()
                .map(|c| latex(c))
                .collect::<Vec<_>>()
                .join(" \\cdot "),
            Op::Div => format!(
                "\\frac{{{}}}{{{}}}",
                latex(&op.children[0]),
                latex(&op.children[1])
            ),
            Op::Exp => format!(
                "{{{}}}^{{{}}}",
                latex(&op.children[0]),
                latex(&op.children[1])
            ),
        },
    }
}

/// Colors cycled through for consecutive change groups, keyed by group index modulo length.
const HIGHLIGHT_PALETTE: &[&str] = &["red", "blue", "teal", "purple", "orange", "brown"];

/// Finds the subtree of `after` that a single rewrite step actually touched, given the tree
/// before that step. Walks both trees in lockstep through matching shape and stops descending at
/// the first point where they diverge; that divergent `after` node is the change.
///
/// Returns `after` itself if the two trees are already equal (nothing changed) or diverge at the
/// root.
pub fn changed_subtree<'a>(before: &RcExpr, after: &'a RcExpr) -> &'a RcExpr {
    if before == after {
        return after;
    }
    match (before.as_ref(), after.as_ref()) {
        (Expr::Operator(b), Expr::Operator(a)) if b.op == a.op && b.children.len() == a.children.len() => {
            for (bc, ac) in b.children.iter().zip(a.children.iter()) {
                if bc != ac {
                    return changed_subtree(bc, ac);
                }
            }
            after
        }
        (Expr::UnaryMinus(b), Expr::UnaryMinus(a)) => changed_subtree(b, a),
        (Expr::Parens(b), Expr::Parens(a)) => changed_subtree(b, a),
        (Expr::Function(b), Expr::Function(a)) if b.name == a.name => changed_subtree(&b.arg, &a.arg),
        _ => after,
    }
}

/// Renders `expr` as LaTeX, wrapping the subtree identical (by pointer) to `changed` in a
/// `\textcolor` directive. `group` selects a color from [`HIGHLIGHT_PALETTE`], cycling once there
/// are more groups than colors. Pair with [`changed_subtree`] to highlight what a step rewrote.
pub fn emit_latex_highlighted(expr: &RcExpr, changed: &RcExpr, group: usize) -> String {
    let color = HIGHLIGHT_PALETTE[group % HIGHLIGHT_PALETTE.len()];
    highlight(expr, changed, color)
}

fn highlight(expr: &RcExpr, changed: &RcExpr, color: &str) -> String {
    if Rc::ptr_eq(expr, changed) {
        return format!("\\textcolor{{{}}}{{{}}}", color, latex(expr));
    }
    match expr.as_ref() {
        Expr::Const(_) | Expr::Symbol(_) => latex(expr),
        Expr::Parens(inner) => format!("\\left({}\\right)", highlight(inner, changed, color)),
        Expr::Function(call) => format!(
            "\\operatorname{{{}}}\\left({}\\right)",
            call.name.as_str(),
            highlight(&call.arg, changed, color)
        ),
        Expr::UnaryMinus(inner) => format!("-{}", highlight(inner, changed, color)),
        Expr::Operator(op) => match op.op {
            Op::Add => op
                .children
                .iter()
                .enumerate()
                .map(|(i, c)| match c.as_ref() {
                    Expr::UnaryMinus(inner) if i > 0 => format!("- {}", highlight(inner, changed, color)),
                    _ if i > 0 => format!("+ {}", highlight(c, changed, color)),
                    _ => highlight(c, changed, color),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Op::Sub => format!(
                "{} - {}",
                highlight(&op.children[0], changed, color),
                highlight(&op.children[1], changed, color)
            ),
            Op::Mult => op
                .children
                .iter()
                .map(|c| highlight(c, changed, color))
                .collect::<Vec<_>>()
                .join(" \\cdot "),
            Op::Div => format!(
                "\\frac{{{}}}{{{}}}",
                highlight(&op.children[0], changed, color),
                highlight(&op.children[1], changed, color)
            ),
            Op::Exp => format!(
                "{{{}}}^{{{}}}",
                highlight(&op.children[0], changed, color),
                highlight(&op.children[1], changed, color)
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expr;

    #[test]
    fn pretty_addition_with_unary_minus() {
        let e = parse_expr!("1 + 2 + -3");
        assert_eq!(pretty(&e), "1 + 2 - 3");
    }

    #[test]
    fn pretty_constant_fraction_no_spaces() {
        let e = parse_expr!("1 / 2");
        assert_eq!(pretty(&e), "1/2");
    }

    #[test]
    fn pretty_variable_division_has_spaces() {
        let e = parse_expr!("x / y");
        assert_eq!(pretty(&e), "x / y");
    }

    #[test]
    fn s_expression_basic() {
        let e = parse_expr!("1 + 2");
        assert_eq!(s_expr(&e), "(+ 1 2)");
    }

    #[test]
    fn latex_fraction() {
        let e = parse_expr!("x / y");
        assert_eq!(latex(&e), "\\frac{x}{y}");
    }

    #[test]
    fn changed_subtree_finds_the_divergent_node() {
        let before = parse_expr!("2 * x + 3 * x");
        let after = parse_expr!("5 * x");
        let changed = changed_subtree(&before, &after);
        assert_eq!(changed.to_string(), "5x");
    }

    #[test]
    fn changed_subtree_descends_into_matching_structure() {
        let before = parse_expr!("1 + 2 + 3");
        let after = parse_expr!("1 + 5");
        let changed = changed_subtree(&before, &after);
        assert_eq!(changed.to_string(), "5");
    }

    #[test]
    fn highlight_wraps_only_the_changed_node() {
        let before = parse_expr!("1 + 2 + 3");
        let after = parse_expr!("1 + 5");
        let changed = changed_subtree(&before, &after).clone();
        let rendered = emit_latex_highlighted(&after, &changed, 0);
        assert_eq!(rendered, "1 + \\textcolor{red}{5}");
    }
}
