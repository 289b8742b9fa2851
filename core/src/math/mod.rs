//! A small collection of number-theoretic algorithms used by [`crate::rational`].
//!
//! Kept decoupled from the expression tree: these functions operate on plain integers and know
//! nothing about [`crate::grammar::Expr`].

mod gcd;
pub use gcd::*;
