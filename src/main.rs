use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use ka::{
    config::Settings,
    display::ValueFormatter,
    error::{Error, RuntimeError},
    interpreter::{Interpreter, evaluator::environment::Environment},
    util::text::close_matches,
};

/// ka is a calculator language with units, exact fractions and lazy
/// combinatorics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells ka to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Print the parsed expression tree instead of evaluating it.
    #[arg(long)]
    show_tree: bool,

    /// Significant digits shown for floats. Overrides the config file.
    #[arg(short, long)]
    precision: Option<usize>,

    /// Settings file. Defaults to `$HOME/.config/ka/config` when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// List every unit and exit.
    #[arg(long)]
    units: bool,

    /// List every unit prefix and exit.
    #[arg(long)]
    prefixes: bool,

    /// List every function signature and exit.
    #[arg(long)]
    functions: bool,

    /// Describe a unit or function and exit.
    #[arg(long, value_name = "NAME")]
    describe: Option<String>,

    /// The script, or with `--file` its path. Read from stdin when absent.
    contents: Option<String>,
}

/// Installs a log subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn load_settings(path: Option<&Path>) -> Settings {
    let default_path = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/ka/config"));
    let Some(path) = path.map(Path::to_path_buf).or(default_path.filter(|p| p.exists())) else {
        return Settings::default();
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read the config file '{}': {e}", path.display());
            return Settings::default();
        },
    };
    let (settings, warnings) = Settings::parse(&text);
    for warning in warnings {
        eprintln!("{}: {warning}", path.display());
    }
    settings
}

fn read_script(args: &Args) -> Result<String, String> {
    match (&args.contents, args.file) {
        (Some(path), true) => fs::read_to_string(path).map_err(|_| {
                                                          format!("Failed to read the input file '{path}'. Perhaps this file does not exist?")
                                                      }),
        (Some(script), false) => Ok(script.clone()),
        (None, _) => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)
                       .map_err(|e| format!("Failed to read from stdin: {e}"))?;
            Ok(script)
        },
    }
}

/// The output of the listing flags, when one was given.
fn introspection(args: &Args, interpreter: &Interpreter) -> Option<Result<Vec<String>, String>> {
    if let Some(name) = &args.describe {
        return Some(interpreter.describe(name).map(|line| vec![line]).ok_or_else(|| {
                                                                         let mut message = format!("Unknown unit or function '{name}'.");
                                                                         let mut candidates = interpreter.functions().close_matches(name);
                                                                         candidates.extend(close_matches(name, interpreter.units().names()));
                                                                         if !candidates.is_empty() {
                                                                             message.push_str(&format!("\nDid you mean: {}?", candidates.join(", ")));
                                                                         }
                                                                         message
                                                                     }));
    }
    if args.units {
        return Some(Ok(interpreter.unit_table()));
    }
    if args.prefixes {
        return Some(Ok(interpreter.prefix_table()));
    }
    if args.functions {
        return Some(Ok(interpreter.function_table()));
    }
    None
}

/// Up to five characters either side of `index`, with a caret under it.
fn caret_context(source: &str, index: usize) -> String {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let at = chars.iter().position(|&(i, _)| i >= index).unwrap_or(chars.len());
    let start = at.saturating_sub(5);
    let end = (at + 6).min(chars.len());
    let excerpt: String = chars[start..end].iter()
                                           .map(|&(_, c)| if c.is_whitespace() { ' ' } else { c })
                                           .collect();
    format!("    {excerpt}\n    {}^", " ".repeat(at - start))
}

/// "Did you mean" candidates for errors about unknown names.
fn suggestions(error: &Error, interpreter: &Interpreter, env: &Environment) -> Vec<String> {
    match error {
        Error::Runtime(RuntimeError::UnknownFunction { name }) => interpreter.functions().close_matches(name),
        Error::Runtime(RuntimeError::UnknownUnit { name }) => close_matches(name, interpreter.units().names()),
        Error::Runtime(RuntimeError::UnassignedVariable { name }) => close_matches(name, env.names()),
        _ => Vec::new(),
    }
}

fn report(error: &Error, source: &str, interpreter: &Interpreter, env: &Environment) {
    eprintln!("Error: {error}");
    if let Some(offset) = error.offset(source) {
        eprintln!("{}", caret_context(source, offset));
    }
    let candidates = suggestions(error, interpreter, env);
    if !candidates.is_empty() {
        eprintln!("Did you mean: {}?", candidates.join(", "));
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(precision) = args.precision {
        settings.precision = precision;
    }

    let interpreter = Interpreter::new();
    match introspection(&args, &interpreter) {
        Some(Ok(lines)) => {
            for line in lines {
                println!("{line}");
            }
            return ExitCode::SUCCESS;
        },
        Some(Err(message)) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        },
        None => {},
    }

    let script = match read_script(&args) {
        Ok(script) => script,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        },
    };

    let mut env = Environment::new();

    if args.show_tree {
        return match interpreter.parse(&script) {
            Ok(tree) => {
                println!("{tree:#?}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                report(&e, &script, &interpreter, &env);
                ExitCode::FAILURE
            },
        };
    }

    match interpreter.execute(&script, &mut env) {
        Ok(Some(value)) => {
            println!("{}", ValueFormatter::new(settings.precision).format(&value));
            ExitCode::SUCCESS
        },
        Ok(None) | Err(Error::Signal(_)) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &script, &interpreter, &env);
            ExitCode::FAILURE
        },
    }
}
