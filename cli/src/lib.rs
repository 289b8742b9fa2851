//! The stepalg command-line interface.
//!
//! Parses a program, then either simplifies an expression or solves an equation for its
//! variable, printing the result (or, with `--steps`, every intermediate move) in the requested
//! format.

#[cfg(test)]
mod tests;

mod diagnostics;
use diagnostics::emit_diagnostics;

use stepalg_core::emit::{changed_subtree, comparator_latex, emit_latex_highlighted};
use stepalg_core::{
    parse, simplify, solve, solve_steps, step_through, Emit, EmitFormat, Equation, RcExpr, Solved,
    Stmt,
};

/// Options controlling a single run of the CLI.
pub struct Opts {
    /// The program text to parse.
    pub program: String,
    /// The format results are printed in.
    pub output_form: OutputForm,
    /// Stop after parsing and print the raw parse tree.
    pub parse_only: bool,
    /// Print every intermediate step instead of only the final result.
    pub steps: bool,
    /// Whether to color diagnostic output.
    pub color: bool,
    /// Suppress all printing; used by tests that only care about the exit code.
    pub no_emit: bool,
}

/// The format a result (or diagnostic source) is printed in.
#[derive(Copy, Clone)]
pub enum OutputForm {
    /// Canonical human-readable form, e.g. `2x + 1`.
    Pretty,
    /// S-expression debug form, e.g. `(+ (* 2 x) 1)`.
    SExpression,
    /// LaTeX form, e.g. `2x + 1`.
    Latex,
    /// Rust `Debug` form of the underlying tree.
    Debug,
}

/// Runs the CLI with `opts`, returning the process exit code.
pub fn run(opts: Opts) -> i32 {
    let Opts {
        program,
        output_form,
        parse_only,
        steps,
        color,
        no_emit,
    } = opts;
    let emit = !no_emit;
    let file: Option<&str> = None;

    let stmt = match parse(&program) {
        Ok(stmt) => stmt,
        Err(diagnostics) => {
            if emit {
                print!("{}", emit_diagnostics(file, program, diagnostics, color));
            }
            return 1;
        }
    };

    if parse_only {
        if emit {
            println!("{}", render(&stmt, output_form));
        }
        return 0;
    }

    let result = match &stmt {
        Stmt::Expr(expr) => run_expr(expr, steps, output_form, color, emit),
        Stmt::Equation(eq) => run_equation(eq, steps, output_form, color, emit),
    };

    match result {
        Ok(()) => 0,
        Err(msg) => {
            if emit {
                eprintln!("{}", msg);
            }
            1
        }
    }
}

fn run_expr(
    expr: &RcExpr,
    steps: bool,
    output_form: OutputForm,
    color: bool,
    emit: bool,
) -> Result<(), String> {
    if steps {
        let trace = step_through(expr).map_err(|e| e.to_string())?;
        if emit {
            for (i, step) in trace.iter().enumerate() {
                let rendered = if color && matches!(output_form, OutputForm::Latex) {
                    let changed = changed_subtree(&step.before, &step.after).clone();
                    emit_latex_highlighted(&step.after, &changed, i)
                } else {
                    render(&step.after, output_form)
                };
                println!("{}   ({})", rendered, step.kind.description());
            }
        }
    } else {
        let simplified = simplify(expr).map_err(|e| e.to_string())?;
        if emit {
            println!("{}", render(&simplified, output_form));
        }
    }
    Ok(())
}

fn run_equation(
    eq: &Equation,
    steps: bool,
    output_form: OutputForm,
    color: bool,
    emit: bool,
) -> Result<(), String> {
    if steps {
        let (trace, solved) = solve_steps(eq).map_err(|e| e.to_string())?;
        if emit {
            for (i, step) in trace.iter().enumerate() {
                let rendered = if color && matches!(output_form, OutputForm::Latex) {
                    render_equation_step_latex(step, i)
                } else {
                    render(&step.after, output_form)
                };
                println!("{}   ({})", rendered, step.kind.description());
            }
            if trace.is_empty() {
                if let Solved::Boolean(b) = solved {
                    println!("{}", render_bool(b));
                }
            }
        }
    } else {
        let solved = solve(eq).map_err(|e| e.to_string())?;
        if emit {
            match solved {
                Solved::Equation(eq) => println!("{}", render(&eq, output_form)),
                Solved::Boolean(b) => println!("{}", render_bool(b)),
            }
        }
    }
    Ok(())
}

/// Renders a boolean verdict the same way across output forms; it has no tree for LaTeX or
/// S-expression rendering to highlight, so "True"/"False" is printed as-is everywhere.
fn render_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Renders an equation step as LaTeX, highlighting whichever side actually changed. An equation
/// has no single root [`RcExpr`] to diff, so each side is diffed against itself and only the side
/// that moved gets a highlight.
fn render_equation_step_latex(step: &stepalg_core::EquationStep, group: usize) -> String {
    let comparator = comparator_latex(step.after.comparator);
    let lhs = if step.before.lhs != step.after.lhs {
        let changed = changed_subtree(&step.before.lhs, &step.after.lhs).clone();
        emit_latex_highlighted(&step.after.lhs, &changed, group)
    } else {
        step.after.lhs.emit_latex()
    };
    let rhs = if step.before.rhs != step.after.rhs {
        let changed = changed_subtree(&step.before.rhs, &step.after.rhs).clone();
        emit_latex_highlighted(&step.after.rhs, &changed, group)
    } else {
        step.after.rhs.emit_latex()
    };
    format!("{} {} {}", lhs, comparator, rhs)
}

fn render<T: Emit + std::fmt::Debug>(obj: &T, form: OutputForm) -> String {
    match form {
        OutputForm::Pretty => obj.emit(EmitFormat::Pretty),
        OutputForm::SExpression => obj.emit(EmitFormat::SExpression),
        OutputForm::Latex => obj.emit(EmitFormat::Latex),
        OutputForm::Debug => format!("{:#?}", obj),
    }
}
