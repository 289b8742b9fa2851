use stepalg::{run, Opts, OutputForm};

fn get_opts() -> Opts {
    let matches = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("program")
                .help("Program to simplify or solve")
                .required(true),
        )
        .arg(
            clap::Arg::with_name("output-form")
                .short("o")
                .long("output-form")
                .default_value("pretty")
                .takes_value(true)
                .possible_values(&["pretty", "s-expression", "latex", "debug"]),
        )
        .arg(
            clap::Arg::with_name("parse-only")
                .long("parse-only")
                .help("Stop after parsing and dump the parse tree"),
        )
        .arg(
            clap::Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("Print every intermediate step, not just the final result"),
        )
        .arg(
            clap::Arg::with_name("no-color")
                .long("no-color")
                .help("Disable colored diagnostic output"),
        )
        .get_matches();

    Opts {
        program: matches.value_of("program").unwrap().into(),
        output_form: match matches.value_of("output-form").unwrap() {
            "pretty" => OutputForm::Pretty,
            "s-expression" => OutputForm::SExpression,
            "latex" => OutputForm::Latex,
            "debug" => OutputForm::Debug,
            _ => unreachable!(),
        },
        parse_only: matches.is_present("parse-only"),
        steps: matches.is_present("steps"),
        color: !matches.is_present("no-color") && atty::is(atty::Stream::Stdout),
        no_emit: false,
    }
}

fn main() {
    let opts = get_opts();
    let out = std::panic::catch_unwind(|| run(opts));

    match out {
        Ok(code) => std::process::exit(code),
        Err(..) => {
            eprint!("\nnote: you found an internal stepalg error!\n");
            eprint!("\nnote: we would appreciate a bug report.\n");
            std::process::exit(1);
        }
    }
}
