mod error;
mod evaluator;
mod lexer;
mod repl;
mod runner;

use clap::{Arg, Command};
use std::fs;
use std::path::Path;

fn main() {
    let matches = Command::new("sdbx")
        .about("Expression evaluator for a CPU-simulator debugger shell")
        .arg(
            Arg::new("file")
                .help("File of expressions to evaluate, one per line")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .help("Evaluate a single expression and exit")
                .value_name("EXPR"),
        )
        .get_matches();

    if let Some(expression) = matches.get_one::<String>("expr") {
        match evaluator::evaluate(expression) {
            Ok(value) => println!("{}", value),
            Err(error) => {
                error.report(expression, None);
                std::process::exit(1);
            }
        }
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path);
    } else {
        repl::start();
    }
}

fn run_file(path: &str) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            if !runner::run(&source, path.to_str()) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
