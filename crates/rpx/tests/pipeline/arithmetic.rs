//! Basic RPN arithmetic.

use crate::{assert_stack_eq, eval_to_reals};

#[test]
fn addition() {
    assert_stack_eq("3 4 +", &[7.0]);
    assert_stack_eq("1.5 2.25 +", &[3.75]);
}

#[test]
fn subtraction_is_y_minus_x() {
    assert_stack_eq("10 4 -", &[6.0]);
    assert_stack_eq("4 10 -", &[-6.0]);
}

#[test]
fn multiplication_and_alias() {
    assert_stack_eq("6 7 *", &[42.0]);
    assert_stack_eq("6 7 x", &[42.0]);
}

#[test]
fn division_is_y_over_x() {
    assert_stack_eq("10 4 /", &[2.5]);
}

#[test]
fn modulo() {
    assert_stack_eq("10 3 %", &[1.0]);
    assert_stack_eq("10.5 3 %", &[1.5]);
}

#[test]
fn power_and_alias() {
    assert_stack_eq("2 10 ^", &[1024.0]);
    assert_stack_eq("2 10 **", &[1024.0]);
    assert_stack_eq("9 0.5 ^", &[3.0]);
}

#[test]
fn chained_rpn() {
    // (3 + 4) * (10 - 8)
    assert_stack_eq("3 4 + 10 8 - *", &[14.0]);
}

#[test]
fn negative_literals_bind_in_rpn() {
    // "1 2 -3" is three pushes, not a subtraction
    assert_stack_eq("1 2 -3", &[1.0, 2.0, -3.0]);
}

#[test]
fn sign_change_and_abs() {
    assert_stack_eq("5 chs", &[-5.0]);
    assert_stack_eq("5 negate", &[-5.0]);
    assert_stack_eq("-5 abs", &[5.0]);
}

#[test]
fn reciprocal_and_sqrt() {
    assert_stack_eq("4 recip", &[0.25]);
    assert_stack_eq("9 sqrt", &[3.0]);
}

#[test]
fn frac_and_int_truncate_toward_zero() {
    assert_stack_eq("3.75 frac", &[0.75]);
    assert_stack_eq("3.75 int", &[3.0]);
    assert_stack_eq("-3.75 frac", &[-0.75]);
    assert_stack_eq("-3.75 int", &[-3.0]);
}

#[test]
fn comparisons_yield_0_or_1() {
    assert_stack_eq("2 3 <", &[1.0]);
    assert_stack_eq("3 2 <", &[0.0]);
    assert_stack_eq("2 2 <=", &[1.0]);
    assert_stack_eq("2 2 ==", &[1.0]);
    assert_stack_eq("2 3 !=", &[1.0]);
    assert_stack_eq("3 2 >", &[1.0]);
    assert_stack_eq("2 3 >=", &[0.0]);
}

#[test]
fn logical_operators() {
    assert_stack_eq("1 1 &&", &[1.0]);
    assert_stack_eq("1 0 &&", &[0.0]);
    assert_stack_eq("0 0 ||", &[0.0]);
    assert_stack_eq("0 5 ||", &[1.0]);
    assert_stack_eq("0 !", &[1.0]);
    assert_stack_eq("7 !", &[0.0]);
}

#[test]
fn snapping_hides_float_noise() {
    // 0.1 + 0.2 displays and compares as exactly 0.3
    assert_eq!(eval_to_reals("0.1 0.2 +"), vec![0.3]);
    // literals themselves are untouched
    assert_eq!(
        eval_to_reals("0.30000000000000004"),
        vec![0.30000000000000004]
    );
}

#[test]
fn snapping_can_be_disabled() {
    let stack = eval_to_reals("0 rounding 0.1 0.2 +");
    assert_eq!(stack, vec![0.1 + 0.2]);
    assert_ne!(stack, vec![0.3]);
}

#[test]
fn unit_conversions_round_trip() {
    assert_stack_eq("1 i2mm", &[25.4]);
    assert_stack_eq("25.4 mm2i", &[1.0]);
    assert_stack_eq("32 f2c", &[0.0]);
    assert_stack_eq("100 c2f", &[212.0]);
    assert_stack_eq("180 d2r pi /", &[1.0]);
    assert_stack_eq("1 ft2m m2ft", &[1.0]);
    assert_stack_eq("1 mi2km km2mi", &[1.0]);
    assert_stack_eq("1 oz2g g2oz", &[1.0]);
    assert_stack_eq("1 q2l l2q", &[1.0]);
    assert_stack_eq("1 oz2ml ml2oz", &[1.0]);
}
