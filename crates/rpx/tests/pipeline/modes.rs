//! Numeric modes, widths, and display formats.

use crate::{assert_stack_eq, output_of};
use rpx::{Engine, Outcome};

#[test]
fn width_truncation_round_trip() {
    // 300 at 8 bits is 44; going back to float does not restore it
    assert_stack_eq("300 8 w D F", &[44.0]);
}

#[test]
fn width_sign_extension() {
    assert_stack_eq("200 8 w D", &[-56.0]);
    assert_stack_eq("200 9 w D", &[200.0]);
}

#[test]
fn push_pop_is_idempotent_in_integer_mode() {
    // once canonical, re-pushing changes nothing
    assert_stack_eq("8 w D 300 dup", &[44.0, 44.0]);
}

#[test]
fn width_changes_remask_the_stack() {
    assert_stack_eq("D 300 8 w", &[44.0]);
    // widening afterwards does not recover the lost bits
    assert_stack_eq("D 300 8 w 16 w", &[44.0]);
}

#[test]
fn float_mode_records_width_without_masking() {
    assert_stack_eq("300 8 w", &[300.0]);
}

#[test]
fn radix_literals_from_any_mode() {
    // prefixes are required even in hex mode, so digits stay unambiguous
    assert_stack_eq("H 0x10 0x10 +", &[32.0]);
    assert_stack_eq("O 011 01 +", &[10.0]);
    assert_stack_eq("B 0b101 0b10 +", &[7.0]);
}

#[test]
fn hex_display() {
    assert_eq!(output_of("255 h"), vec![" 0xff"]);
    assert_eq!(output_of("255 o"), vec![" 0377"]);
}

#[test]
fn unsigned_display_shows_the_masked_bits() {
    assert_eq!(output_of("8 w -1 u"), vec![" 255"]);
}

#[test]
fn signed_display_at_reduced_width() {
    // the sign is rebuilt from the reduced-width sign bit
    assert_eq!(output_of("8 w D 0xFF p"), vec![" -1"]);
}

#[test]
fn binary_display_at_reduced_width() {
    assert_eq!(output_of("8 w B 5 p"), vec![" 0b00000101"]);
}

#[test]
fn autoprint_uses_the_active_mode() {
    let mut engine = Engine::new();
    engine.eval_line("8 w");
    engine.eval_line("H");
    engine.take_output();
    engine.eval_line("15 16 +");
    let out = output_lines(&mut engine);
    assert_eq!(out, vec![" 0x1f"]);
}

#[test]
fn mode_switch_warns_about_truncation() {
    let mut engine = Engine::new();
    engine.eval_line("3.5");
    engine.eval_line("D");
    let warned = engine
        .take_output()
        .iter()
        .any(|l| matches!(l, rpx::OutputLine::Stderr(s) if s.contains("accuracy lost")));
    assert!(warned);
    assert_eq!(engine.stack_values(), &[3.0]);
}

#[test]
fn printing_in_another_format_does_not_convert() {
    let mut engine = Engine::new();
    engine.eval_line("3.5 h");
    // displayed as hex, but the stored value is untouched
    assert_eq!(engine.stack_values(), &[3.5]);
}

#[test]
fn raw_hex_output_enables_raw_hex_input() {
    let mut engine = Engine::new();
    assert_eq!(engine.eval_line("3 r"), Outcome::Continue);
    let out = output_lines(&mut engine);
    assert_eq!(out, vec![" 0x1.8000000000000p+1"]);
    // the printed form is now valid input
    engine.eval_line("0x1.8000000000000p+1");
    assert_eq!(engine.stack_values(), &[3.0, 3.0]);
}

#[test]
fn precision_controls_float_display() {
    assert_eq!(output_of("3 k 3.14159 p"), vec![" 3.14"]);
    assert_eq!(output_of("2 K 3.14159 p"), vec![" 3.14"]);
    assert_eq!(output_of("0 K 3.14159 p"), vec![" 3"]);
}

#[test]
fn separators_group_digits() {
    assert_eq!(output_of("1 s 12345 p"), vec![" 12,345"]);
    assert_eq!(output_of("1 s 9 k 1234567 p"), vec![" 1,234,567"]);
    assert_eq!(output_of("1 s 0xdeadbeef h"), vec![" 0xdead,beef"]);
}

#[test]
fn width_clamps_to_the_mantissa() {
    let mut engine = Engine::new();
    engine.eval_line("64 w");
    assert_eq!(engine.width().bits(), 53);
    engine.eval_line("1 w");
    assert_eq!(engine.width().bits(), 2);
    engine.eval_line("0 w");
    assert_eq!(engine.width().bits(), 53);
}

fn output_lines(engine: &mut Engine) -> Vec<String> {
    engine
        .take_output()
        .into_iter()
        .filter_map(|l| match l {
            rpx::OutputLine::Stdout(s) => Some(s),
            rpx::OutputLine::Stderr(_) => None,
        })
        .collect()
}
