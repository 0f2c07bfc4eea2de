//! Stack manipulation commands.

use crate::assert_stack_eq;
use rpx::Engine;

#[test]
fn stack_is_lifo() {
    assert_stack_eq("1 2 3", &[1.0, 2.0, 3.0]);
}

#[test]
fn dup_and_push_alias() {
    assert_stack_eq("7 dup", &[7.0, 7.0]);
    assert_stack_eq("7 push", &[7.0, 7.0]);
}

#[test]
fn swap_and_exch_alias() {
    assert_stack_eq("1 2 swap", &[2.0, 1.0]);
    assert_stack_eq("1 2 exch", &[2.0, 1.0]);
}

#[test]
fn pop_discards_the_top() {
    assert_stack_eq("1 2 pop", &[1.0]);
}

#[test]
fn pop_feeds_lastx() {
    assert_stack_eq("1 2 pop lastx", &[1.0, 2.0]);
}

#[test]
fn clear_empties_everything() {
    assert_stack_eq("1 2 3 clear", &[]);
    // and remembers the old top in lastx
    assert_stack_eq("1 2 3 clear lastx", &[3.0]);
}

#[test]
fn lastx_and_lx_alias() {
    assert_stack_eq("10 4 - lx", &[6.0, 4.0]);
    assert_stack_eq("10 4 - lastx", &[6.0, 4.0]);
}

#[test]
fn lastx_after_unary() {
    assert_stack_eq("5 chs lastx", &[-5.0, 5.0]);
    assert_stack_eq("8 log2 lastx", &[3.0, 8.0]);
}

#[test]
fn registers_are_independent() {
    assert_stack_eq("1 s1 pop 2 s2 pop 3 s3 pop r1 r2 r3", &[1.0, 2.0, 3.0]);
    assert_stack_eq("5 store pop recall", &[5.0]);
}

#[test]
fn store_keeps_the_value_on_stack() {
    assert_stack_eq("42 s4", &[42.0]);
}

#[test]
fn sum_entire_stack() {
    assert_stack_eq("1 2 3 4 sum", &[10.0]);
}

#[test]
fn avg_entire_stack() {
    assert_stack_eq("2 4 6 avg", &[4.0]);
}

#[test]
fn marked_sum_leaves_values_below() {
    assert_stack_eq("100 1 2 3 3 mark sum", &[100.0, 6.0]);
    assert_stack_eq("100 1 2 3 3 mark avg", &[100.0, 2.0]);
}

#[test]
fn popping_below_the_mark_clears_it() {
    // the mark at depth 2 dies when pop reaches depth 1, so sum folds
    // the whole stack
    assert_stack_eq("5 7 1 mark pop pop 1 2 sum", &[3.0]);
}

#[test]
fn clearing_the_mark() {
    assert_stack_eq("1 2 3 2 mark -1 mark sum", &[6.0]);
}

#[test]
fn sum_is_usable_mid_line() {
    assert_stack_eq("1 2 3 sum 2 *", &[12.0]);
}

#[test]
fn deep_stack_survives() {
    let mut engine = Engine::new();
    for i in 0..100 {
        engine.eval_line(&format!("{}", i));
    }
    assert_eq!(engine.stack_values().len(), 100);
    assert_eq!(engine.stack_values()[99], 99.0);
    engine.eval_line("sum");
    assert_eq!(engine.stack_values(), &[4950.0]);
}
