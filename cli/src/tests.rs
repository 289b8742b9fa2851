use crate::{run, Opts, OutputForm};

fn opts(program: &str) -> Opts {
    Opts {
        program: program.to_string(),
        output_form: OutputForm::Pretty,
        parse_only: false,
        steps: false,
        color: false,
        no_emit: true,
    }
}

#[test]
fn simplifies_an_expression() {
    assert_eq!(run(opts("2 + 3 * 4")), 0);
}

#[test]
fn solves_an_equation() {
    assert_eq!(run(opts("2x + 1 = 5")), 0);
}

#[test]
fn reports_scan_errors() {
    assert_eq!(run(opts("1 + @")), 1);
}

#[test]
fn reports_parse_errors() {
    assert_eq!(run(opts("1 + 2 3")), 1);
}

#[test]
fn reports_unsolvable_equations() {
    assert_eq!(run(opts("x ^ 2 = 4")), 1);
}

#[test]
fn steps_mode_runs_to_completion() {
    let mut o = opts("2x + 3x + 1 = 1 + 4");
    o.steps = true;
    assert_eq!(run(o), 0);
}

#[test]
fn parse_only_skips_simplification() {
    let mut o = opts("1 + 1");
    o.parse_only = true;
    assert_eq!(run(o), 0);
}

#[test]
fn colored_latex_steps_highlight_the_changed_subtree() {
    let mut o = opts("2x + 3x + 1 = 1 + 4");
    o.output_form = OutputForm::Latex;
    o.steps = true;
    o.color = true;
    assert_eq!(run(o), 0);
}

#[test]
fn every_output_form_runs_without_error() {
    for form in [
        OutputForm::Pretty,
        OutputForm::SExpression,
        OutputForm::Latex,
        OutputForm::Debug,
    ] {
        let mut o = opts("2x + 3x");
        o.output_form = form;
        assert_eq!(run(o), 0);
    }
}
