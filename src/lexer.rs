use crate::error::{SdbxError, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on the width of a decimal literal. Nothing that fits in a
/// 32-bit value comes close to this; a longer match is rejected before it
/// ever reaches numeric conversion.
pub const MAX_LITERAL_LEN: usize = 32;

/// The four binary arithmetic operators the evaluator knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpKind {
    /// Precedence tier: `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(self) -> u8 {
        match self {
            OpKind::Add | OpKind::Sub => 1,
            OpKind::Mul | OpKind::Div => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            OpKind::Add => '+',
            OpKind::Sub => '-',
            OpKind::Mul => '*',
            OpKind::Div => '/',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    // Tokenized but not evaluable; reserved for a future comparison grammar
    Equal,
    LeftParen,
    RightParen,
    Op(OpKind),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, span: Span) -> Self {
        Self { kind, lexeme, span }
    }
}

/// The lexical rule table. Rules are tried top-to-bottom at every cursor
/// position and the first match wins, so order is load-bearing: `==` must
/// come before any single-character rule that is a prefix of it. `None`
/// marks a rule that consumes input without emitting a token.
static RULES: &[(&str, Option<TokenKind>)] = &[
    (r"[ \t]+", None),                              // whitespace
    (r"\+", Some(TokenKind::Op(OpKind::Add))),      // plus
    (r"==", Some(TokenKind::Equal)),                // equality
    (r"-", Some(TokenKind::Op(OpKind::Sub))),       // minus
    (r"\*", Some(TokenKind::Op(OpKind::Mul))),      // multiply
    (r"/", Some(TokenKind::Op(OpKind::Div))),       // divide
    (r"[0-9]+", Some(TokenKind::Number)),           // decimal literal
    (r"\(", Some(TokenKind::LeftParen)),            // left parenthesis
    (r"\)", Some(TokenKind::RightParen)),           // right parenthesis
];

/// Rules are used on every evaluation, so compile them only once,
/// process-wide, before first use. The patterns are build-time constants:
/// one failing to compile is a configuration bug, not a user error.
static COMPILED_RULES: Lazy<Vec<(Regex, Option<TokenKind>)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|&(pattern, kind)| {
            let anchored = format!("^(?:{})", pattern);
            let regex = Regex::new(&anchored)
                .unwrap_or_else(|e| panic!("rule table regex failed to compile: {}: {}", pattern, e));
            (regex, kind)
        })
        .collect()
});

/// Convert an input string into the ordered token sequence, skipping
/// whitespace. A position where no rule matches is a definitive lex
/// failure carrying the byte offset and the offending remainder.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SdbxError> {
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < input.len() {
        let rest = &input[position..];

        // Try all rules one by one; first match at the cursor wins.
        let matched = COMPILED_RULES.iter().find_map(|(regex, kind)| {
            regex.find(rest).map(|m| (m.end(), *kind))
        });

        let (len, kind) = match matched {
            Some(hit) => hit,
            None => {
                return Err(SdbxError::lex_error(
                    Span::single(position),
                    format!("no rule matches at position {}: '{}'", position, rest),
                ));
            }
        };

        let span = Span::new(position, position + len);
        if let Some(kind) = kind {
            if kind == TokenKind::Number && len > MAX_LITERAL_LEN {
                return Err(SdbxError::lex_error(
                    span,
                    format!(
                        "numeric literal is {} characters long (limit {})",
                        len, MAX_LITERAL_LEN
                    ),
                ));
            }
            tokens.push(Token::new(kind, rest[..len].to_string(), span));
        }
        position += len;
    }

    Ok(tokens)
}
