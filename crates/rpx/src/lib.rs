//! rpx: an RPN calculator with on-demand infix expressions.
//!
//! Input is evaluated left to right: numbers push onto the operand
//! stack, operators pop one or two values and push their result. A
//! parenthesized expression switches to infix notation for its extent;
//! the expression is compiled to RPN on the fly and spliced into the
//! token stream, so `(2 + 3 * 4)` and `2 3 4 * +` are interchangeable.
//!
//! A numeric mode governs how stack values are stored and displayed:
//! floating point, or fixed-width (2-53 bit) signed, unsigned, hex,
//! octal, or binary integers.
//!
//! # Example
//!
//! ```
//! let stack = rpx::eval("3 4 + (2 ^ 10)").unwrap();
//! assert_eq!(stack, vec![7.0, 1024.0]);
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod format;
pub mod infix;
pub mod ops;
pub mod token;
pub mod tokenizer;

pub use engine::{AngleUnit, Engine, Outcome, OutputLine};
pub use error::{DomainError, EvalError, SyntaxError};
pub use rpx_core::{FloatPolicy, Mode, Stack, StackError, Width};

/// Evaluate calculator input and return the final stack, bottom to top.
///
/// Convenience entry for tests and embedding: output text is discarded
/// and the first recorded error (if any) is returned instead of the
/// stack.
pub fn eval(source: &str) -> Result<Vec<f64>, EvalError> {
    let mut engine = Engine::new();
    for line in source.lines() {
        if let Outcome::Exit(_) = engine.eval_line(line) {
            break;
        }
    }
    match engine.take_diagnostics().into_iter().next() {
        Some(err) => Err(err),
        None => Ok(engine.stack_values().to_vec()),
    }
}
