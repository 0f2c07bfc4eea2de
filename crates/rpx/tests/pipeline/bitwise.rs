//! Bitwise and shift operators.
//!
//! These are integer-domain but callable from any mode; the math runs
//! on 64-bit values regardless of the display width.

use crate::assert_stack_eq;

#[test]
fn and_or_xor() {
    assert_stack_eq("0xF0 0x0F &", &[0.0]);
    assert_stack_eq("0xFF 0x0F &", &[15.0]);
    assert_stack_eq("0xF0 0x0F |", &[255.0]);
    assert_stack_eq("0xFF 0xF0 xor", &[15.0]);
    assert_stack_eq("0xFF 0xFF xor", &[0.0]);
}

#[test]
fn not_is_ones_complement() {
    assert_stack_eq("0 ~", &[-1.0]);
    assert_stack_eq("-1 ~", &[0.0]);
}

#[test]
fn shifts() {
    assert_stack_eq("1 4 <<", &[16.0]);
    assert_stack_eq("16 4 >>", &[1.0]);
    assert_stack_eq("0xFF 8 <<", &[65280.0]);
}

#[test]
fn right_shift_is_logical() {
    // -1 shifted right pulls in zeros, not sign bits
    assert_stack_eq("-1 63 >>", &[1.0]);
}

#[test]
fn shift_counts_past_the_word_saturate_to_zero() {
    assert_stack_eq("1 64 <<", &[0.0]);
    assert_stack_eq("1 100 >>", &[0.0]);
}

#[test]
fn set_and_clear_bits() {
    assert_stack_eq("0 3 setb", &[8.0]);
    assert_stack_eq("0xFF 4 clearb", &[239.0]);
    // bit numbers past the word leave the value alone
    assert_stack_eq("5 99 setb", &[5.0]);
    assert_stack_eq("5 99 clearb", &[5.0]);
}

#[test]
fn masking_applies_in_integer_mode() {
    // at 8 bits, the shifted-up byte wraps away
    assert_stack_eq("8 w H 0xAB 8 <<", &[0.0]);
    // and the sign bit reads as negative
    assert_stack_eq("8 w D 0x80", &[-128.0]);
}

#[test]
fn fractions_truncate_for_bitwise_ops() {
    assert_stack_eq("3.9 5 &", &[1.0]);
    assert_stack_eq("7.2 8 |", &[15.0]);
}
