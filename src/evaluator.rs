use crate::error::{SdbxError, Span};
use crate::lexer::{self, OpKind, Token, TokenKind};

/// Result of scanning a token range for parenthesis structure.
#[derive(Debug, Clone, Copy)]
struct ParenScan {
    /// Every `(` in the range has its matching `)` inside the range and
    /// no `)` arrives before its `(`.
    well_formed: bool,
    /// The whole range is exactly one matched pair: token `p` is `(` and
    /// it is not closed until token `q`.
    fully_wrapped: bool,
}

/// Recursive evaluator over an immutable token slice. Each evaluation call
/// owns its own token buffer, so nested or back-to-back calls (watchpoint
/// checks interleaved with interactive commands) never share state.
pub struct Evaluator<'a> {
    tokens: &'a [Token],
}

impl<'a> Evaluator<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    /// Evaluate the whole token sequence.
    pub fn evaluate(&self) -> Result<u32, SdbxError> {
        if self.tokens.is_empty() {
            return Err(SdbxError::empty_range(
                Span::single(0),
                "expression is empty".to_string(),
            ));
        }
        self.eval_range(0, self.tokens.len() - 1)
    }

    /// Evaluate the closed range `[p, q]`. The checks run in a fixed
    /// order: degenerate range, single literal, redundant outer
    /// parentheses, balance, then the dominant-operator split.
    fn eval_range(&self, p: usize, q: usize) -> Result<u32, SdbxError> {
        if p > q {
            // Adjacent operators or a missing operand collapse to this
            let span = self
                .tokens
                .get(q)
                .map(|t| t.span.clone())
                .unwrap_or_else(|| Span::single(0));
            return Err(SdbxError::empty_range(
                span,
                "expression is missing an operand".to_string(),
            ));
        }

        if p == q {
            return self.literal_value(p);
        }

        let paren = self.scan_parentheses(p, q);
        if paren.fully_wrapped {
            // Redundant outer pair carries no value of its own
            return self.eval_range(p + 1, q - 1);
        }
        if !paren.well_formed {
            return Err(SdbxError::unbalanced_parens(
                self.span_of_range(p, q),
                "parentheses in this expression are not balanced".to_string(),
            ));
        }

        let (m, op) = self.find_dominant_op(p, q)?;
        if m == p {
            return Err(SdbxError::empty_range(
                self.tokens[m].span.clone(),
                format!("'{}' is missing its left operand", op.symbol()),
            ));
        }

        let left = self.eval_range(p, m - 1)?;
        let right = self.eval_range(m + 1, q)?;

        match op {
            OpKind::Add => Ok(left.wrapping_add(right)),
            OpKind::Sub => Ok(left.wrapping_sub(right)),
            OpKind::Mul => Ok(left.wrapping_mul(right)),
            OpKind::Div => {
                if right == 0 {
                    return Err(SdbxError::division_by_zero(
                        self.tokens[m].span.clone(),
                        "right operand of '/' is zero".to_string(),
                    ));
                }
                Ok(left / right)
            }
        }
    }

    /// Convert the single token at `i` to its unsigned 32-bit value.
    /// Values past 2^32 - 1 fail rather than wrap.
    fn literal_value(&self, i: usize) -> Result<u32, SdbxError> {
        let token = &self.tokens[i];
        if token.kind != TokenKind::Number {
            return Err(SdbxError::malformed_literal(
                token.span.clone(),
                format!("expected a decimal literal, found '{}'", token.lexeme),
            ));
        }
        debug_assert!(token.lexeme.len() <= lexer::MAX_LITERAL_LEN);
        token.lexeme.parse::<u32>().map_err(|_| {
            SdbxError::malformed_literal(
                token.span.clone(),
                format!("'{}' does not fit in an unsigned 32-bit value", token.lexeme),
            )
        })
    }

    /// Single pass over `[p, q]` with a depth counter: push on `(`, pop on
    /// `)`, malformed as soon as a `)` has nothing to pop. The range is
    /// fully wrapped iff the opening `(` at `p` stays open until `q`.
    fn scan_parentheses(&self, p: usize, q: usize) -> ParenScan {
        let mut depth: u32 = 0;
        let mut fully_wrapped = self.tokens[p].kind == TokenKind::LeftParen
            && self.tokens[q].kind == TokenKind::RightParen;

        for i in p..=q {
            match self.tokens[i].kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    if depth == 0 {
                        return ParenScan {
                            well_formed: false,
                            fully_wrapped: false,
                        };
                    }
                    depth -= 1;
                    if depth == 0 && i < q {
                        // The first pair closed early, so the outer
                        // parentheses do not enclose the whole range
                        fully_wrapped = false;
                    }
                }
                _ => {
                    if depth == 0 {
                        fully_wrapped = false;
                    }
                }
            }
        }

        ParenScan {
            well_formed: depth == 0,
            fully_wrapped: fully_wrapped && depth == 0,
        }
    }

    /// Find the operator the range splits on: the last operator to be
    /// applied. Only operators at depth 0 are eligible; anything inside a
    /// nested pair belongs to a sub-range. Scanning left to right, a new
    /// eligible operator replaces the held candidate whenever its tier is
    /// not strictly tighter, so among equal-precedence operators the
    /// rightmost wins and the left recursion resolves the earlier ones
    /// first.
    fn find_dominant_op(&self, p: usize, q: usize) -> Result<(usize, OpKind), SdbxError> {
        let mut depth: u32 = 0;
        let mut candidate: Option<(usize, OpKind)> = None;

        for i in p..=q {
            let token = &self.tokens[i];
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                TokenKind::Equal if depth == 0 => {
                    return Err(SdbxError::unsupported_operator(
                        token.span.clone(),
                        "'==' has no evaluation rule".to_string(),
                        "comparisons are not part of the arithmetic grammar yet; \
                         only '+', '-', '*' and '/' can be evaluated"
                            .to_string(),
                    ));
                }
                TokenKind::Op(op) if depth == 0 => {
                    let replace = match candidate {
                        None => true,
                        Some((_, held)) => op.precedence() <= held.precedence(),
                    };
                    if replace {
                        candidate = Some((i, op));
                    }
                }
                _ => {}
            }
        }

        // Reachable from inputs like "1 2" or "(1)(2)", so this is a user
        // error, not an internal invariant
        candidate.ok_or_else(|| {
            SdbxError::missing_operator(
                self.span_of_range(p, q),
                "operands are not joined by an operator".to_string(),
            )
        })
    }

    fn span_of_range(&self, p: usize, q: usize) -> Span {
        Span::new(self.tokens[p].span.start, self.tokens[q].span.end)
    }
}

/// The single external entry point: lex the input, and only if lexing
/// fully succeeds, evaluate the whole token range. Idempotent and free of
/// side effects, so it is safe to call once per simulated instruction step.
pub fn evaluate(input: &str) -> Result<u32, SdbxError> {
    let tokens = lexer::tokenize(input)?;
    Evaluator::new(&tokens).evaluate()
}
