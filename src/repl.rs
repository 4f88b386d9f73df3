use crate::evaluator;
use std::io::{self, Write};

/// Interactive prompt of the debugger shell. Each line is evaluated as an
/// arithmetic expression and the 32-bit unsigned result is printed in
/// decimal; failures are reported with a span into the typed line.

pub fn start() {
    println!("sdbx expression evaluator v0.1.0");
    println!("Type 'exit' or press Ctrl+C to quit");
    println!();

    loop {
        print!("(sdbx) ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!(); // Add newline for clean exit
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" || line == "q" {
                    println!("Goodbye!");
                    break;
                }

                match evaluator::evaluate(line) {
                    Ok(value) => println!("{}", value),
                    Err(error) => error.report(line, None),
                }
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}
