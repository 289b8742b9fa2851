//! The rewrite rule library: independent functions that each try to transform exactly one node,
//! reporting whether they changed anything and what kind of change it was.
//!
//! Rules never recurse into children themselves; that is the driver's job
//! ([`crate::driver::step`]). Keeping a rule's scope to a single node is what makes each one
//! independently readable, testable, and terminating.

mod arithmetic;
mod cancel;
mod distribute;
mod fractions;
mod poly_terms;
mod sign;

use crate::grammar::RcExpr;

/// The public vocabulary of step kinds a rule firing is tagged with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Added two fractions already sharing a denominator.
    AddFractions,
    /// Put two fractions over a common denominator.
    CommonDenominator,
    /// Multiplied two fractions.
    MultiplyFractions,
    /// Reduced a fraction to lowest terms.
    SimplifyFraction,
    /// Cancelled a shared factor out of a polynomial term.
    DividePolyTerm,
    /// Combined terms with the same symbol and exponent.
    CombineLikeTerms,
    /// Multiplied two terms with the same symbol.
    MultiplyPolyTerms,
    /// Distributed a factor over a sum.
    Distribute,
    /// Cancelled matching factors in a division.
    Cancel,
    /// Removed an exponent that had collapsed to 0 or 1.
    NormalizeExponent,
    /// Evaluated a purely numeric expression.
    Arithmetic,
    /// Rewrote addition of a negation as subtraction.
    ResolveAddUnaryMinus,
    /// Cancelled a double negation.
    DoubleUnaryMinus,
    /// Evaluated an absolute value of a constant.
    AbsoluteValue,
    /// Subtracted a term from both sides of an equation.
    SubtractFromBothSides,
    /// Added a term to both sides of an equation.
    AddToBothSides,
    /// Multiplied both sides of an equation by a factor.
    MultiplyBothSides,
    /// Divided both sides of an equation by a factor.
    DivideFromBothSides,
    /// Swapped the left and right sides of an equation.
    SwapSides,
}

impl ChangeKind {
    /// A short, user-facing description of what this kind of step does.
    pub fn description(self) -> &'static str {
        use ChangeKind::*;
        match self {
            AddFractions => "added fractions with a common denominator",
            CommonDenominator => "put fractions over a common denominator",
            MultiplyFractions => "multiplied fractions",
            SimplifyFraction => "simplified a fraction",
            DividePolyTerm => "cancelled a polynomial term factor",
            CombineLikeTerms => "combined like terms",
            MultiplyPolyTerms => "multiplied like terms",
            Distribute => "distributed a factor over a sum",
            Cancel => "cancelled common factors",
            NormalizeExponent => "removed an exponent of 0 or 1",
            Arithmetic => "evaluated an arithmetic expression",
            ResolveAddUnaryMinus => "rewrote addition of a negation as subtraction",
            DoubleUnaryMinus => "cancelled a double negation",
            AbsoluteValue => "evaluated an absolute value",
            SubtractFromBothSides => "subtracted a term from both sides",
            AddToBothSides => "added a term to both sides",
            MultiplyBothSides => "multiplied both sides",
            DivideFromBothSides => "divided both sides",
            SwapSides => "swapped the two sides",
        }
    }
}

/// A single-node rewrite rule.
pub type Rule = fn(&RcExpr) -> Option<(RcExpr, ChangeKind)>;

/// The rule list in firing-priority order: arithmetic collapse, then sign rules, then fraction
/// rules, then polynomial-term rules, then distribution, then cancellation.
/// [`crate::driver::step`] walks the tree and, at each node, tries these in order; the first one
/// that fires wins.
pub const RULES: &[Rule] = &[
    arithmetic::arithmetic_collapse,
    sign::simplify_double_unary_minus,
    sign::evaluate_abs,
    fractions::simplify_fraction,
    fractions::add_constant_fractions,
    fractions::multiply_constants_and_fractions,
    poly_terms::combine_like_terms,
    poly_terms::multiply_like_terms,
    distribute::distribute,
    cancel::cancel_division,
    cancel::normalize_exponent,
];

pub use arithmetic::arithmetic_collapse;
pub use cancel::{cancel_division, normalize_exponent};
pub use distribute::distribute;
pub use fractions::{add_constant_fractions, multiply_constants_and_fractions, simplify_fraction};
pub use poly_terms::{combine_like_terms, multiply_like_terms};
pub use sign::{evaluate_abs, simplify_double_unary_minus};
