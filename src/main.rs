use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use reckon::{
    interpreter::{
        calculator::Calculator,
        options::{ErrorPolicy, Options},
    },
    util::num::format_number,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// reckon evaluates arithmetic expressions with variables, implicit
/// multiplication and `;`-separated sequences.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as a path and evaluate each non-empty line of that file.
    #[arg(short, long, requires = "contents")]
    file: bool,

    /// Use NaN for a malformed operand and keep going instead of stopping at
    /// the first syntax error.
    #[arg(short, long)]
    recover: bool,

    /// Forget variables between evaluations.
    #[arg(long)]
    fresh: bool,

    /// Print all variable bindings after each evaluation.
    #[arg(short, long)]
    vars: bool,

    /// The expression to evaluate. Without it, reckon reads expressions from
    /// standard input one line at a time.
    contents: Option<String>,
}

impl Args {
    fn options(&self) -> Options {
        let policy = if self.recover {
            ErrorPolicy::SubstituteNan
        } else {
            ErrorPolicy::Abort
        };
        Options::default().with_error_policy(policy)
                          .with_persist_variables(!self.fresh)
    }
}

/// Logging is off unless `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Evaluates one line, writing its result to `out` and any error or recovered
/// diagnostic to `err`. Returns whether the line succeeded.
fn run_line(calculator: &mut Calculator,
            line: &str,
            show_vars: bool,
            out: &mut impl Write,
            err: &mut impl Write)
            -> io::Result<bool> {
    let ok = match calculator.calculate(line) {
        Ok(value) => {
            if let Some(diagnostic) = calculator.last_diagnostic() {
                writeln!(err, "warning: {diagnostic}")?;
            }
            writeln!(out, "{}", format_number(value))?;
            true
        },
        Err(e) => {
            writeln!(err, "{e}")?;
            false
        },
    };

    if show_vars {
        for (name, value) in calculator.environment().iter() {
            writeln!(out, "  {name} = {}", format_number(value))?;
        }
    }
    Ok(ok)
}

/// Evaluates every non-empty line of `script` in one session. A failing line
/// does not stop the ones after it.
fn run_script(calculator: &mut Calculator,
              script: &str,
              show_vars: bool,
              out: &mut impl Write,
              err: &mut impl Write)
              -> io::Result<bool> {
    let mut ok = true;
    for line in script.lines()
                      .map(|line| line.trim_end_matches('\r'))
                      .filter(|line| !line.trim().is_empty())
    {
        ok &= run_line(calculator, line, show_vars, out, err)?;
    }
    Ok(ok)
}

fn repl(calculator: &mut Calculator, show_vars: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut line = String::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            continue;
        }
        run_line(calculator, input, show_vars, &mut stdout, &mut stderr)?;
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut calculator = Calculator::with_options(args.options());

    let (mut stdout, mut stderr) = (io::stdout(), io::stderr());

    let result = match &args.contents {
        Some(path) if args.file => {
            let Ok(script) = fs::read_to_string(path) else {
                eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                return ExitCode::FAILURE;
            };
            run_script(&mut calculator, &script, args.vars, &mut stdout, &mut stderr)
        },
        Some(expression) => run_line(&mut calculator, expression, args.vars, &mut stdout, &mut stderr),
        None => repl(&mut calculator, args.vars).map(|()| true),
    };

    let succeeded = result.unwrap_or_else(|e| {
                              eprintln!("{e}");
                              false
                          });

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
