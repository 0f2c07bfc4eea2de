//! Error handling: every failure is reported once, recovers, and
//! leaves the stack invariants intact.

use crate::assert_error;
use rpx::{Engine, EvalError};

fn stack_after(code: &str) -> Vec<f64> {
    let mut engine = Engine::new();
    for line in code.lines() {
        engine.eval_line(line);
    }
    engine.stack_values().to_vec()
}

#[test]
fn division_by_zero_restores_operands() {
    assert_error("5 0 /", "division by zero");
    assert_eq!(stack_after("5 0 /"), vec![5.0, 0.0]);
}

#[test]
fn modulo_by_zero_restores_operands() {
    assert_error("5 0 %", "division by zero");
    assert_eq!(stack_after("5 0 %"), vec![5.0, 0.0]);
}

#[test]
fn reciprocal_of_zero() {
    assert_error("0 recip", "division by zero");
    assert_eq!(stack_after("0 recip"), vec![0.0]);
}

#[test]
fn negative_sqrt_restores_operand() {
    assert_error("-4 sqrt", "square root of a negative number");
    assert_eq!(stack_after("-4 sqrt"), vec![-4.0]);
}

#[test]
fn negative_log_restores_operand() {
    assert_error("-1 ln", "logarithm of a negative number");
    assert_eq!(stack_after("-2 log10"), vec![-2.0]);
}

#[test]
fn negative_shift_rejected() {
    assert_error("1 -2 <<", "shift by negative");
    assert_eq!(stack_after("1 -2 >>"), vec![1.0, -2.0]);
}

#[test]
fn negative_bit_number_rejected() {
    assert_error("1 -2 setb", "negative bit number");
    assert_eq!(stack_after("1 -2 clearb"), vec![1.0, -2.0]);
}

#[test]
fn oversized_bitwise_operands_rejected() {
    assert_error("1e300 2 &", "64-bit integer range");
    assert_eq!(stack_after("1e300 2 |"), vec![1e300, 2.0]);
    assert_eq!(stack_after("1e300 ~"), vec![1e300]);
}

#[test]
fn nan_propagates_through_bitwise_ops() {
    // asin outside [-1, 1] produces NaN, which then poisons the AND
    let stack = stack_after("2 asin 3 &");
    assert_eq!(stack.len(), 1);
    assert!(stack[0].is_nan());
}

#[test]
fn trig_needs_float_mode() {
    assert_error("D 30 sin", "no sense in integer mode");
    assert_eq!(stack_after("H 30 cos"), vec![30.0]);
}

#[test]
fn trig_works_again_after_returning_to_float() {
    assert_eq!(stack_after("D F 0 sin"), vec![0.0]);
}

#[test]
fn empty_stack_is_recoverable() {
    assert_error("+", "empty stack");
    assert_error("sqrt", "empty stack");
    // one operand present: it survives
    assert_eq!(stack_after("5 *"), vec![5.0]);
}

#[test]
fn unrecognized_input() {
    assert_error("bogus", "unrecognized input 'bogus'");
    assert_error("3 4 +!", "unrecognized input");
}

#[test]
fn mismatched_parens_produce_nothing() {
    assert_error("(2 + 3", "parentheses");
    assert_eq!(stack_after("(2 + 3"), vec![]);
}

#[test]
fn stray_close_paren() {
    assert_error(")", "parentheses");
}

#[test]
fn bad_infix_sequencing() {
    assert_error("(2 3)", "bad expression sequence");
    assert_error("(* 3)", "bad expression sequence");
    assert_error("(2 + +)", "bad expression sequence");
}

#[test]
fn errors_do_not_leak_partial_rpn() {
    // the failed expression contributes nothing; later input still works
    let mut engine = Engine::new();
    engine.eval_line("(2 + 3");
    engine.eval_line("1 2 +");
    assert_eq!(engine.stack_values(), &[3.0]);
    assert_eq!(
        engine.take_diagnostics(),
        vec![EvalError::Syntax(rpx::SyntaxError::MismatchedParens)]
    );
}

#[test]
fn bad_mark_restores_argument() {
    assert_error("1 5 mark", "bad mark");
    assert_eq!(stack_after("1 5 mark"), vec![1.0, 5.0]);
}

#[test]
fn sum_with_nothing_above_the_mark() {
    assert_error("1 0 mark sum", "nothing to sum");
}
