// sdbx - debugger expression evaluation core
//
// This is the expression-evaluation core of an interactive debugger shell
// for a CPU simulator: a rule-table lexer feeding a recursive evaluator
// that computes 32-bit unsigned results with precedence, associativity,
// and parenthesization handled over flat token ranges.

// Public modules
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use error::{ErrorKind, SdbxError, Span};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{tokenize, OpKind, Token, TokenKind};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
