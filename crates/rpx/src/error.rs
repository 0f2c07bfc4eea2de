//! Error taxonomy for the evaluation engine.
//!
//! Everything here is recoverable: the evaluation loop reports one line
//! per occurrence and keeps going (unless exit-on-error is armed). No
//! error leaves the operand stack in a non-canonical state.

use rpx_core::StackError;
use thiserror::Error;

/// An error surfaced while evaluating calculator input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// An operator needed an operand that was not present. Operands
    /// already popped are restored before this is reported.
    #[error("empty stack")]
    EmptyStack,

    /// An operand was outside an operator's domain. The operation is not
    /// applied and its operands are restored unchanged.
    #[error("error: {0}")]
    Domain(#[from] DomainError),

    /// Malformed input. The current expression or line is abandoned and
    /// no partial RPN is queued.
    #[error("error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl From<StackError> for EvalError {
    fn from(_: StackError) -> Self {
        EvalError::EmptyStack
    }
}

/// Domain validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("square root of a negative number")]
    NegativeSqrt,
    #[error("logarithm of a negative number")]
    NegativeLog,
    #[error("shift by negative not allowed")]
    NegativeShift,
    #[error("negative bit number not allowed")]
    NegativeBit,
    #[error("bitwise operand(s) outside the 64-bit integer range")]
    BitwiseRange,
    #[error("trig functions make no sense in integer mode")]
    TrigInIntegerMode,
    #[error("nothing to {0}")]
    NothingToReduce(&'static str),
    #[error("bad mark: range is 0 to stack depth, or -1 to clear")]
    BadMark,
}

/// Malformed-input failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unrecognized input '{0}'")]
    Unrecognized(String),
    #[error("illegal character '{0}' in input")]
    IllegalChar(char),
    #[error("mismatched or missing parentheses")]
    MismatchedParens,
    #[error("bad expression sequence, at {prev} and {found}")]
    BadSequence { prev: String, found: String },
    #[error("'{0}' unsuitable in infix expression")]
    NotInfix(&'static str),
}
