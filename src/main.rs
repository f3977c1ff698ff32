use clap::{Parser as ClapParser, Subcommand};
use monkey_lang::cli::{self, CliError, ReplOptions, RunOptions, RunResult};
use monkey_lang::to_json_string;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "monkey")]
#[command(about = "Monkey - a small dynamically typed language with first-class functions")]
#[command(version)]
struct Cli {
    /// Log interpreter activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a Monkey program and print its result
    Run {
        /// Program source (reads from stdin if neither this nor --file is given)
        source: Option<String>,

        /// Read the program from a file
        #[arg(short, long, conflicts_with = "source")]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long, requires = "json")]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Print the parsed program before the result
        #[arg(long)]
        print_ast: bool,
    },

    /// Start an interactive session
    Repl {
        /// Echo each parsed line before evaluating it
        #[arg(long)]
        show_ast: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            source,
            file,
            json,
            pretty,
            syntax_only,
            print_ast,
        } => run(source, file, json, pretty, syntax_only, print_ast),
        Commands::Repl { show_ast } => repl(show_ast),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    source: Option<String>,
    file: Option<PathBuf>,
    json: bool,
    pretty: bool,
    syntax_only: bool,
    print_ast: bool,
) -> Result<(), CliError> {
    let source = match (source, file) {
        (Some(s), _) => s,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (None, None) => return Err(CliError::NoInput),
    };

    let options = RunOptions {
        source,
        syntax_only,
    };

    match cli::execute_run(&options)? {
        RunResult::SyntaxValid(program) => {
            if print_ast {
                println!("{}", program);
            }
            println!("Syntax is valid");
        }
        RunResult::Success { program, value } => {
            if print_ast {
                println!("{}", program);
            }
            if json {
                println!("{}", to_json_string(&value, pretty)?);
            } else {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

fn repl(show_ast: bool) -> Result<(), CliError> {
    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        println!("Monkey {} - type expressions, Ctrl-D to exit", env!("CARGO_PKG_VERSION"));
    }

    let options = ReplOptions {
        prompt: if interactive { ">> ".to_string() } else { String::new() },
        show_ast,
    };

    let stdin = io::stdin();
    cli::run_repl(stdin.lock(), io::stdout(), io::stderr(), &options)?;
    if interactive {
        println!();
    }
    Ok(())
}
