//! Infix expressions end to end.
//!
//! Every expression here is compiled to RPN and spliced into the token
//! stream, so each test is really checking the compiler and the
//! evaluation loop together.

use crate::{assert_stack_eq, eval_to_reals};
use rpx::Engine;

#[test]
fn rpn_and_infix_agree() {
    assert_eq!(eval_to_reals("3 4 +"), eval_to_reals("(3 + 4)"));
    assert_eq!(eval_to_reals("2 3 4 * +"), eval_to_reals("(2 + 3 * 4)"));
}

#[test]
fn precedence() {
    assert_stack_eq("(2 + 3 * 4)", &[14.0]);
    assert_stack_eq("(2 * 3 + 4)", &[10.0]);
    assert_stack_eq("((2 + 3) * 4)", &[20.0]);
}

#[test]
fn power_is_right_associative() {
    // 2^(3^2), not (2^3)^2
    assert_stack_eq("(2 ^ 3 ^ 2)", &[512.0]);
    assert_stack_eq("(2 ** 3 ** 2)", &[512.0]);
}

#[test]
fn left_associative_subtraction() {
    assert_stack_eq("(8 - 4 - 2)", &[2.0]);
    assert_stack_eq("(16 / 4 / 2)", &[2.0]);
}

#[test]
fn unary_disambiguation() {
    assert_stack_eq("(-3 + 4)", &[1.0]);
    assert_stack_eq("(3 - -4)", &[7.0]);
    assert_stack_eq("(+3 + 4)", &[7.0]);
    assert_stack_eq("(-3 - -4)", &[1.0]);
}

#[test]
fn spaced_minus_is_binary() {
    assert_stack_eq("(3 - 4)", &[-1.0]);
}

#[test]
fn function_style_application() {
    assert_stack_eq("(sqrt(16) + 1)", &[5.0]);
    // the unary result is squared, not its argument
    assert_stack_eq("(sqrt(16) ^ 2)", &[16.0]);
}

#[test]
fn trig_identity_snaps_to_one() {
    assert_eq!(eval_to_reals("(sin(30)^2 + cos(30)^2)"), vec![1.0]);
}

#[test]
fn snapping_makes_thirds_exact() {
    assert_eq!(eval_to_reals("((1/3) * 3)"), vec![1.0]);
}

#[test]
fn comparison_chains() {
    assert_stack_eq("(1 + 1 == 2)", &[1.0]);
    assert_stack_eq("(2 < 1 || 1 < 2)", &[1.0]);
    assert_stack_eq("(1 < 2 && 2 < 1)", &[0.0]);
}

#[test]
fn bitwise_infix_layers() {
    // shifts bind tighter than &, which binds tighter than |
    assert_stack_eq("(1 << 4 | 1)", &[17.0]);
    assert_stack_eq("(0xFF & 0x0F | 0xF0)", &[255.0]);
}

#[test]
fn expression_result_joins_the_stack() {
    assert_stack_eq("10 (2 + 3) *", &[50.0]);
    assert_stack_eq("(2 + 3) (4 + 5)", &[5.0, 9.0]);
}

#[test]
fn constants_in_expressions() {
    assert_stack_eq("(pi / pi)", &[1.0]);
    assert_stack_eq("(e / e)", &[1.0]);
}

#[test]
fn variables_assign_and_read() {
    assert_stack_eq("(_a = 2 + 3) (_a * _a)", &[5.0, 25.0]);
}

#[test]
fn assignment_keeps_value_on_stack() {
    assert_stack_eq("(_x = 7)", &[7.0]);
}

#[test]
fn unreferenced_variable_reads_as_zero() {
    assert_stack_eq("(_nothing + 1)", &[1.0]);
}

#[test]
fn register_assignment_in_infix() {
    assert_stack_eq("(s1 = 6 * 7) pop r1", &[42.0]);
}

#[test]
fn atan2_as_infix_binary() {
    assert_stack_eq("(3 atan2 3)", &[45.0]);
}

#[test]
fn lastx_unchanged_by_expression_internals() {
    let mut engine = Engine::new();
    engine.eval_line("10 4 -");
    engine.eval_line("(100 / 5 / 2)");
    // lastx still reflects the world before the expression
    engine.eval_line("lastx");
    let stack = engine.stack_values();
    assert_eq!(stack, &[6.0, 10.0, 6.0]);
}

#[test]
fn nested_depth() {
    assert_stack_eq("(((((1 + 1)))))", &[2.0]);
    assert_stack_eq("((1 + (2 * (3 + 4))) - 5)", &[10.0]);
}
