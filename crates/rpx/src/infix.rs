//! Infix-to-RPN compiler (shunting yard).
//!
//! When the evaluation loop meets a `(`, control passes here. The
//! compiler keeps reading tokens from the same line cursor until the
//! parenthesis that started the expression closes, reordering operators
//! by precedence onto an output queue. The queue is then drained by the
//! evaluation loop before any fresh input is read, so the expression
//! executes exactly as if the user had typed the equivalent RPN.
//!
//! An expression never spans lines, and a malformed expression produces
//! no RPN at all: on any error the queued output is discarded wholesale.

use std::collections::VecDeque;

use log::trace;

use crate::catalog::{self, Arity, OpKind};
use crate::error::SyntaxError;
use crate::token::Token;
use crate::tokenizer::Cursor;

/// Compiles one parenthesized expression. The opening `(` has already
/// been consumed by the caller.
struct InfixCompiler {
    operator_stack: Vec<Token>,
    output_stack: Vec<Token>,
    paren_count: u32,
}

/// Compile the infix expression at the cursor into an RPN token queue.
pub fn compile(cursor: &mut Cursor, raw_hex_ok: bool) -> Result<VecDeque<Token>, SyntaxError> {
    let open = catalog::must("(");

    let mut st = InfixCompiler {
        // a synthetic "(" stands for the paren the user already typed
        operator_stack: vec![Token::Op(open)],
        output_stack: Vec::new(),
        paren_count: 1,
    };
    let mut prev = Token::Op(open);

    loop {
        if cursor.at_end() {
            break;
        }
        let tok = match cursor.next_token(false, raw_hex_ok) {
            Some(t) => t,
            None => break,
        };

        // an assignable register must be followed by '='
        if matches!(&prev, Token::Op(p) if p.arity == Arity::Assignable)
            && !matches!(&tok, Token::Op(op) if op.kind == OpKind::Assign)
        {
            return Err(bad_sequence(&prev, &tok));
        }

        trace!(
            "infix: {} (operators {}, output {})",
            tok.describe(),
            st.operator_stack.len(),
            st.output_stack.len()
        );

        let effective = st.step(tok, &prev, cursor)?;

        if st.paren_count == 0 {
            break;
        }
        prev = effective;
    }

    if st.paren_count != 0 {
        return Err(SyntaxError::MismatchedParens);
    }

    // output_stack was produced in execution order; hand it over as the
    // queue the evaluation loop drains front to back.
    trace!("infix: compiled {} rpn tokens", st.output_stack.len());
    Ok(st.output_stack.into())
}

fn bad_sequence(prev: &Token, found: &Token) -> SyntaxError {
    SyntaxError::BadSequence {
        prev: prev.describe(),
        found: found.describe(),
    }
}

impl InfixCompiler {
    /// Process one token. Returns the token as it should be remembered
    /// for sequencing (`+`/`-` may have been rewritten to `nop`/`chs`).
    fn step(&mut self, tok: Token, prev: &Token, cursor: &Cursor) -> Result<Token, SyntaxError> {
        match tok {
            Token::Number { .. } | Token::Variable { write: false, .. } => {
                if prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.output_stack.push(tok.clone());
                Ok(tok)
            }
            Token::Op(op) if op.arity == Arity::Constant => {
                if prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.output_stack.push(tok.clone());
                Ok(tok)
            }
            Token::Op(op) if op.kind == OpKind::OpenParen => {
                if prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.operator_stack.push(tok.clone());
                self.paren_count += 1;
                Ok(tok)
            }
            Token::Op(op) if op.kind == OpKind::CloseParen => {
                if !prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.close_paren()?;
                Ok(tok)
            }
            Token::Op(op) if op.kind == OpKind::Assign => {
                // rewire the variable reference just queued from read to
                // write; it executes after the value it assigns
                match self.output_stack.last() {
                    Some(Token::Variable { write: false, .. }) if variable(prev) => {
                        let rewired = match self.output_stack.pop() {
                            Some(Token::Variable { name, .. }) => Token::Variable { name, write: true },
                            _ => unreachable!("checked above"),
                        };
                        self.operator_stack.push(rewired);
                        Ok(tok)
                    }
                    _ if matches!(prev, Token::Op(p) if p.arity == Arity::Assignable) => {
                        // register is already on the operator stack
                        Ok(tok)
                    }
                    _ => Err(bad_sequence(prev, &tok)),
                }
            }
            Token::Op(op) if op.arity == Arity::Assignable => {
                // registers may only open an assignment: "(s1 = ...)"
                if !matches!(prev, Token::Op(p) if p.kind == OpKind::OpenParen) {
                    return Err(bad_sequence(prev, &tok));
                }
                self.operator_stack.push(tok.clone());
                Ok(tok)
            }
            Token::Op(op) if op.arity == Arity::Unary => {
                if prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.push_unary(tok.clone());
                Ok(tok)
            }
            Token::Op(op) if op.arity == Arity::Binary => {
                // +/- are unary when the previous token won't produce an
                // operand and the next character binds tightly (not
                // whitespace, ')', '+', '-', or end of line). The unary
                // forms are rewritten to internal chs/nop tokens.
                if matches!(op.kind, OpKind::Add | OpKind::Sub)
                    && !prev.is_operand()
                    && !matches!(
                        cursor.peek_char(),
                        None | Some(' ' | '\t' | '\x0b' | '\r' | '\n' | ')' | '+' | '-')
                    )
                {
                    let rewritten = if op.kind == OpKind::Sub {
                        Token::Op(catalog::must("chs"))
                    } else {
                        Token::Op(catalog::must("nop"))
                    };
                    trace!("infix: {} is unary, now {}", op.name, rewritten.describe());
                    self.push_unary(rewritten.clone());
                    return Ok(rewritten);
                }

                if !prev.is_operand() {
                    return Err(bad_sequence(prev, &tok));
                }
                self.push_binary(tok.clone());
                Ok(tok)
            }
            Token::Op(op) => Err(SyntaxError::NotInfix(op.name)),
            Token::Unknown(text) => Err(SyntaxError::Unrecognized(text)),
            Token::Variable { write: true, .. } | Token::Eol => {
                unreachable!("tokenizer never produces these here")
            }
        }
    }

    /// Pop operators to the output until the matching `(`; then, if a
    /// unary operator is exposed, pop it too so `f(x)`-style application
    /// binds tightly.
    fn close_paren(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.operator_stack.pop() {
                None => return Err(SyntaxError::MismatchedParens),
                Some(Token::Op(op)) if op.kind == OpKind::OpenParen => break,
                Some(t) => self.output_stack.push(t),
            }
        }
        if matches!(
            self.operator_stack.last(),
            Some(Token::Op(op)) if op.arity == Arity::Unary
        ) {
            let f = self.operator_stack.pop().expect("just inspected");
            self.output_stack.push(f);
        }
        self.paren_count -= 1;
        Ok(())
    }

    /// Unary operators are right-associative: yield only to strictly
    /// greater precedence.
    fn push_unary(&mut self, tok: Token) {
        let prec = token_prec(&tok);
        while let Some(top) = self.operator_stack.last() {
            if is_open_paren(top) || token_prec(top) <= prec {
                break;
            }
            let popped = self.operator_stack.pop().expect("non-empty");
            self.output_stack.push(popped);
        }
        self.operator_stack.push(tok);
    }

    /// Binary operators yield to greater-or-equal precedence, except
    /// that the power operator never yields to itself (right
    /// associative).
    fn push_binary(&mut self, tok: Token) {
        let prec = token_prec(&tok);
        while let Some(top) = self.operator_stack.last() {
            if is_open_paren(top) || token_prec(top) < prec {
                break;
            }
            if token_prec(top) == prec
                && matches!(top, Token::Op(op) if op.kind == OpKind::Pow)
            {
                break;
            }
            let popped = self.operator_stack.pop().expect("non-empty");
            self.output_stack.push(popped);
        }
        self.operator_stack.push(tok);
    }
}

fn variable(tok: &Token) -> bool {
    matches!(tok, Token::Variable { .. })
}

fn is_open_paren(tok: &Token) -> bool {
    matches!(tok, Token::Op(op) if op.kind == OpKind::OpenParen)
}

/// Infix precedence of a stacked token. Variable writes and registers
/// sit below every real operator so they drain only at their paren.
fn token_prec(tok: &Token) -> u8 {
    match tok {
        Token::Op(op) => op.prec,
        _ => 0,
    }
}
