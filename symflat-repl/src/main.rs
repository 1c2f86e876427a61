mod error;
mod meta;

use ariadne::Source;
use log::LevelFilter;
use meta::MetaCommand;
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode, sync::Arc};
use symflat_core::{flatten::Output, FormatWith, Session, StatementOutcome};

/// Installs the terminal logger, with the level read from `SYMFLAT_LOG`.
fn init_logging() {
    let level = std::env::var("SYMFLAT_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("failed to install the logger");
    }
}

/// Prints the side-channel output, value or error of each statement. Returns true if every
/// statement succeeded.
fn print_outcomes(input: &str, outcomes: &[StatementOutcome], session: &Session) -> bool {
    let format = session.config().format_options();
    let mut ok = true;

    for outcome in outcomes {
        for output in &outcome.outputs {
            match output {
                Output::Text(text) => println!("{}", text),
                Output::Image(image) => println!("<image {}x{}>", image.width, image.height),
            }
        }

        match &outcome.result {
            Ok(Some(value)) => println!("{}", value.display(format)),
            Ok(None) => (), // intentionally print nothing
            Err(err) => {
                ok = false;
                let report = err.build_report("input", outcome.span.clone());
                if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                    eprintln!("{}: {}", err, io_err);
                }
            },
        }
    }

    ok
}

/// Submits the input on the session's worker thread and prints the outcomes.
fn execute(input: &str, session: &Arc<Session>) -> bool {
    let handle = match session.spawn_submit(input.to_string()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("error: {}", err);
            return false;
        },
    };

    match handle.join() {
        Ok(outcomes) => print_outcomes(input, &outcomes, session),
        Err(_) => {
            eprintln!("error: the evaluation thread panicked");
            false
        },
    }
}

/// Runs a meta command against the session.
fn run_meta(command: MetaCommand, session: &Session) {
    let format = session.config().format_options();
    match command {
        MetaCommand::Vars => {
            for (name, value) in session.variables() {
                println!("{} = {}", name, value.display(format));
            }
        },
        MetaCommand::Funcs => {
            println!("user: {}", session.function_names().join(", "));
            println!("built-in: {}", session.builtin_names().join(", "));
        },
        MetaCommand::Help => println!("{}", meta::HELP),
        MetaCommand::Precision(_) | MetaCommand::Rounding(_) | MetaCommand::Display(_) => {
            if let Some(config) = command.apply(session.config()) {
                if let Err(err) = session.set_config(config) {
                    eprintln!("error: {}", err);
                }
            }
        },
    }
}

fn main() -> ExitCode {
    init_logging();

    let session = match Session::new(Default::default()) {
        Ok(session) => Arc::new(session),
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        },
    };

    let mut args = std::env::args();
    args.next();

    let input = if let Some(filename) = args.next() {
        // run source file
        fs::read_to_string(&filename).map_err(|err| format!("could not read `{}`: {}", filename, err))
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)
            .map(|_| input)
            .map_err(|err| format!("could not read stdin: {}", err))
    } else {
        return repl(&session);
    };

    match input {
        Ok(input) if execute(&input, &session) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        },
    }
}

/// Runs the interactive mode.
fn repl(session: &Arc<Session>) -> ExitCode {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, session: &Arc<Session>) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        match MetaCommand::parse(&input) {
            Some(Ok(command)) => run_meta(command, session),
            Some(Err(err)) => err.report_to_stderr(&input),
            None => {
                execute(&input, session);
            },
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, session) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }

    ExitCode::SUCCESS
}
