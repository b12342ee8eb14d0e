use clap::Parser;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use turing::trace::{render_illegal_input, trace_run};
use turing::{
    analyze, Halt, Program, ProgramLoader, ProgramManager, Step, TuringMachine,
    TuringMachineError,
};

/// Runs a multi-tape Turing machine description on an input string.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  turing programs/increment.tm 1011
  turing -v --builtin palindrome 0110
  RUST_LOG=debug turing --check programs/copy.tm 10")]
struct Cli {
    /// The Turing machine description file to execute
    #[clap(required_unless_present = "list")]
    program: Option<String>,

    /// The input to the Turing machine
    #[clap(default_value = "")]
    input: String,

    /// Print each step of the execution and detailed error messages
    #[clap(short, long)]
    verbose: bool,

    /// Check the description for undeclared states and symbols before running
    #[clap(long)]
    check: bool,

    /// Print the parsed description as JSON instead of running it
    #[clap(long)]
    dump: bool,

    /// Treat the program argument as the name of a built-in machine
    #[clap(short, long)]
    builtin: bool,

    /// List the built-in machines
    #[clap(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&cli, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TuringMachineError> {
    if cli.list {
        for name in ProgramManager::list_program_names() {
            let info = ProgramManager::get_program_info(name)?;
            println!(
                "{:<12} {} tape(s), {} states, {} transitions",
                info.name, info.tape_count, info.state_count, info.transition_count
            );
        }
        return Ok(());
    }

    let program = load_program(cli)?;

    if cli.dump {
        println!(
            "{}",
            serde_json::to_string_pretty(&program).unwrap_or_default()
        );
        return Ok(());
    }

    if cli.check {
        analyze(&program)?;
        debug!("description passed analysis");
    }

    let mut machine = TuringMachine::new(program, &cli.input)?;

    let step = if cli.verbose {
        trace_run(&mut machine, &cli.input, &mut io::stdout().lock())
            .map_err(|e| TuringMachineError::FileError(format!("Failed to write trace: {}", e)))?
    } else {
        let step = machine.run();
        if step == Step::Halt(Halt::Ok) {
            println!("{}", machine.output());
        }
        step
    };

    info!(
        steps = machine.step_count(),
        state = machine.state(),
        accepting = machine.is_final(),
        "machine halted"
    );

    match step {
        Step::Halt(Halt::Err(e)) => Err(e),
        _ => Ok(()),
    }
}

/// Loads the description named on the command line, from disk or from the built-in set.
fn load_program(cli: &Cli) -> Result<Program, TuringMachineError> {
    let name = cli.program.as_deref().unwrap_or_default();

    if cli.builtin {
        ProgramManager::get_program_by_name(name)
    } else {
        ProgramLoader::load_program(Path::new(name))
    }
}

/// Prints the error on stderr, in detail when running verbosely.
fn report(cli: &Cli, error: &TuringMachineError) {
    if !cli.verbose {
        eprintln!("{}", error.brief());
        return;
    }

    match error {
        TuringMachineError::IllegalInputSymbol { symbol, position } => {
            eprint!("{}", render_illegal_input(&cli.input, *symbol, *position));
        }
        e if e.is_syntax_error() => eprintln!("syntax error : {}", e),
        e => eprintln!("error: {}", e),
    }
}
