//! Operator implementations.
//!
//! Every operator is a pure function of the engine state: pop what it
//! needs, validate, push at most one result. A validation failure pushes
//! the operands back unchanged and reports an error, so a failed
//! operation never perturbs the stack. Binary operators apply
//! `y OP x`, where x is the top of stack and y the value beneath it.

use std::f64::consts;

use rpx_core::Mode;

use crate::catalog::{OpDesc, OpKind};
use crate::engine::Engine;
use crate::error::{DomainError, EvalError};

/// Execute one catalog operator against the engine.
pub(crate) fn apply(desc: &'static OpDesc, eng: &mut Engine) -> Result<(), EvalError> {
    use OpKind::*;

    match desc.kind {
        // arithmetic
        Add => binary(eng, |y, x| y + x),
        Sub => binary(eng, |y, x| y - x),
        Mul => binary(eng, |y, x| y * x),
        Div => checked_divide(eng, |y, x| y / x),
        Mod => checked_divide(eng, |y, x| y % x),
        Pow => binary(eng, f64::powf),

        // bitwise and shifts
        Shr => shift(eng, |i, j| ((i as u64) >> j) as i64),
        Shl => shift(eng, |i, j| i << j),
        BitAnd => bitwise(eng, |i, j| i & j),
        BitOr => bitwise(eng, |i, j| i | j),
        BitXor => bitwise(eng, |i, j| i ^ j),
        SetBit => bit_modify(eng, |i, j| i | (1i64 << j)),
        ClearBit => bit_modify(eng, |i, j| i & !(1i64 << j)),
        BitNot => {
            let a = eng.pop()?;
            if !a.is_finite() {
                eng.push(a);
                return Ok(());
            }
            if out_of_i64(a) {
                eng.push(a);
                return Err(DomainError::BitwiseRange.into());
            }
            eng.push(!(a as i64) as f64);
            eng.lastx = a;
            Ok(())
        }

        // the assignment marker only matters inside infix expressions,
        // where the compiler rewires it away; bare it does nothing
        Assign => Ok(()),
        Nop => Ok(()),

        ChSign => {
            let a = eng.pop()?;
            eng.push(-a);
            eng.lastx = a;
            Ok(())
        }
        Abs => {
            let a = eng.pop()?;
            eng.push(a.abs());
            eng.lastx = a;
            Ok(())
        }
        Recip => {
            let a = eng.pop()?;
            if a == 0.0 {
                eng.push(a);
                return Err(DomainError::DivisionByZero.into());
            }
            eng.result_push(1.0 / a);
            Ok(())
        }
        Sqrt => {
            let a = eng.pop()?;
            if a < 0.0 {
                eng.push(a);
                return Err(DomainError::NegativeSqrt.into());
            }
            eng.result_push(a.sqrt());
            Ok(())
        }
        Frac => {
            let a = eng.pop()?;
            let r = if a > 0.0 { a - a.floor() } else { a - a.ceil() };
            eng.result_push(r);
            eng.lastx = a;
            Ok(())
        }
        Int => {
            let a = eng.pop()?;
            let r = if a > 0.0 { a.floor() } else { a.ceil() };
            eng.result_push(r);
            eng.lastx = a;
            Ok(())
        }

        // transcendentals; trig honors the degrees/radians toggle
        Sin => trig(eng, |eng, a| eng.user_angle_to_radians(a).sin()),
        Cos => trig(eng, |eng, a| eng.user_angle_to_radians(a).cos()),
        Tan => {
            require_floating(eng)?;
            let a = eng.pop()?;
            // tan() goes undefined at +/-90
            let deg = eng.policy.stabilize(eng.user_angle_to_degrees(a));
            if (deg - 90.0) % 180.0 == 0.0 {
                eng.result_push(f64::NAN);
            } else {
                eng.result_push(eng.user_angle_to_radians(a).tan());
            }
            eng.lastx = a;
            Ok(())
        }
        Asin => trig(eng, |eng, a| eng.radians_to_user_angle(a.asin())),
        Acos => trig(eng, |eng, a| eng.radians_to_user_angle(a.acos())),
        Atan => trig(eng, |eng, a| eng.radians_to_user_angle(a.atan())),
        Atan2 => {
            require_floating(eng)?;
            let (y, x) = eng.pop2()?;
            let r = eng.radians_to_user_angle(y.atan2(x));
            eng.result_push(r);
            eng.lastx = x;
            Ok(())
        }
        Exp => {
            let a = eng.pop()?;
            eng.result_push(a.exp());
            eng.lastx = a;
            Ok(())
        }
        Ln => log(eng, f64::ln),
        Log2 => log(eng, f64::log2),
        Log10 => log(eng, f64::log10),

        // logical and comparison operators yield 0/1
        LogicalAnd => compare(eng, |y, x| y != 0.0 && x != 0.0),
        LogicalOr => compare(eng, |y, x| y != 0.0 || x != 0.0),
        Eq => compare(eng, |y, x| y == x),
        Ne => compare(eng, |y, x| y != x),
        Lt => compare(eng, |y, x| y < x),
        Le => compare(eng, |y, x| y <= x),
        Gt => compare(eng, |y, x| y > x),
        Ge => compare(eng, |y, x| y >= x),
        LogicalNot => {
            let a = eng.pop()?;
            eng.push(if a == 0.0 { 1.0 } else { 0.0 });
            eng.lastx = a;
            Ok(())
        }

        // '(' is intercepted by the evaluation loop; a stray ')' is a
        // leftover from a finished expression
        OpenParen => Ok(()),
        CloseParen => Err(crate::error::SyntaxError::MismatchedParens.into()),

        // stack manipulation
        Clear => {
            if let Ok(top) = eng.stack.top() {
                eng.lastx = top;
                eng.stack.clear();
                eng.stack_mark = 0;
            }
            Ok(())
        }
        Pop => {
            eng.lastx = eng.pop()?;
            Ok(())
        }
        Dup => {
            let a = eng.pop()?;
            eng.push(a);
            eng.push(a);
            Ok(())
        }
        LastX => {
            let v = eng.frozen_lastx.unwrap_or(eng.lastx);
            eng.push(v);
            Ok(())
        }
        Exchange => {
            let (y, x) = eng.pop2()?;
            eng.push(x);
            eng.push(y);
            Ok(())
        }
        Mark => {
            let n = eng.pop()?;
            let depth = eng.stack.len() as f64;
            if n > depth || n < -1.0 {
                eng.push(n);
                return Err(DomainError::BadMark.into());
            }
            eng.stack_mark = if n == -1.0 { 0 } else { (depth - n) as usize };
            Ok(())
        }
        Sum => reduce(eng, true),
        Avg => reduce(eng, false),

        // registers and constants
        Store(slot) => {
            let a = eng.pop()?;
            eng.push(a);
            eng.regs[(slot - 1) as usize] = a;
            Ok(())
        }
        Recall(slot) => {
            eng.push(eng.regs[(slot - 1) as usize]);
            Ok(())
        }
        Pi => {
            eng.result_push(consts::PI);
            Ok(())
        }
        E => {
            eng.result_push(consts::E);
            Ok(())
        }

        // unit conversions
        InToMm => convert(eng, |a| a * 25.4),
        MmToIn => convert(eng, |a| a / 25.4),
        FtToM => convert(eng, |a| a / 3.28084),
        MToFt => convert(eng, |a| a * 3.28084),
        MiToKm => convert(eng, |a| a / 0.6213712),
        KmToMi => convert(eng, |a| a * 0.6213712),
        FToC => convert(eng, |a| (a - 32.0) / 1.8),
        CToF => convert(eng, |a| a * 1.8 + 32.0),
        OzToG => convert(eng, |a| a * 28.3495),
        GToOz => convert(eng, |a| a / 28.3495),
        OzToMl => convert(eng, |a| a * 29.5735),
        MlToOz => convert(eng, |a| a / 29.5735),
        QtToL => convert(eng, |a| a / 1.05669),
        LToQt => convert(eng, |a| a * 1.05669),
        DegToRad => convert(eng, |a| a.to_radians()),
        RadToDeg => convert(eng, |a| a.to_degrees()),

        // display
        PrintStack => {
            eng.print_stack(false);
            Ok(())
        }
        PrintTop => {
            eng.print_top(eng.mode);
            Ok(())
        }
        PrintFloat => {
            eng.print_top(Mode::Float);
            Ok(())
        }
        PrintDec => {
            eng.print_top(Mode::Signed);
            Ok(())
        }
        PrintUns => {
            eng.print_top(Mode::Unsigned);
            Ok(())
        }
        PrintHex => {
            eng.print_top(Mode::Hex);
            Ok(())
        }
        PrintOct => {
            eng.print_top(Mode::Octal);
            Ok(())
        }
        PrintBin => {
            eng.print_top(Mode::Binary);
            Ok(())
        }
        PrintRaw => {
            eng.print_top(Mode::RawFloat);
            Ok(())
        }
        PrintState => {
            eng.print_state();
            Ok(())
        }

        // modes and toggles
        ModeFloat => {
            eng.switch_mode(Mode::Float);
            Ok(())
        }
        ModeDec => {
            eng.switch_mode(Mode::Signed);
            Ok(())
        }
        ModeUns => {
            eng.switch_mode(Mode::Unsigned);
            Ok(())
        }
        ModeHex => {
            eng.switch_mode(Mode::Hex);
            Ok(())
        }
        ModeOct => {
            eng.switch_mode(Mode::Octal);
            Ok(())
        }
        ModeBin => {
            eng.switch_mode(Mode::Binary);
            Ok(())
        }
        ModeRaw => {
            eng.switch_mode(Mode::RawFloat);
            Ok(())
        }
        Precision => eng.set_precision(),
        Decimals => eng.set_decimals(),
        SetWidth => eng.set_width_op(),
        Degrees => eng.set_degrees(),
        AutoPrint => eng.set_autoprint(),
        Separators => eng.set_separators(),
        ModeInfo => {
            eng.show_mode();
            Ok(())
        }
        Rounding => eng.set_rounding(),
        ErrorExit => eng.set_error_exit(),

        // housekeeping
        Help => {
            eng.print_help();
            Ok(())
        }
        Precedence => {
            eng.print_precedence();
            Ok(())
        }
        Quit => eng.quit(),
    }
}

fn binary(eng: &mut Engine, f: impl FnOnce(f64, f64) -> f64) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    eng.result_push(f(y, x));
    eng.lastx = x;
    Ok(())
}

/// Division and modulo: an exactly-zero divisor is a domain error and
/// both operands go back.
fn checked_divide(eng: &mut Engine, f: impl FnOnce(f64, f64) -> f64) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    if x == 0.0 {
        eng.push(y);
        eng.push(x);
        return Err(DomainError::DivisionByZero.into());
    }
    eng.result_push(f(y, x));
    eng.lastx = x;
    Ok(())
}

fn compare(eng: &mut Engine, f: impl FnOnce(f64, f64) -> bool) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    eng.push(if f(y, x) { 1.0 } else { 0.0 });
    eng.lastx = x;
    Ok(())
}

fn convert(eng: &mut Engine, f: impl FnOnce(f64) -> f64) -> Result<(), EvalError> {
    let a = eng.pop()?;
    let a = f(a);
    eng.result_push(a);
    eng.lastx = a;
    Ok(())
}

fn require_floating(eng: &Engine) -> Result<(), EvalError> {
    if eng.mode.is_floating() {
        Ok(())
    } else {
        Err(DomainError::TrigInIntegerMode.into())
    }
}

fn trig(eng: &mut Engine, f: impl FnOnce(&Engine, f64) -> f64) -> Result<(), EvalError> {
    require_floating(eng)?;
    let a = eng.pop()?;
    let r = f(&*eng, a);
    eng.result_push(r);
    eng.lastx = a;
    Ok(())
}

fn log(eng: &mut Engine, f: impl FnOnce(f64) -> f64) -> Result<(), EvalError> {
    let a = eng.pop()?;
    if a < 0.0 {
        eng.push(a);
        return Err(DomainError::NegativeLog.into());
    }
    eng.result_push(f(a));
    eng.lastx = a;
    Ok(())
}

fn out_of_i64(a: f64) -> bool {
    a < i64::MIN as f64 || a > i64::MAX as f64
}

/// NaN is more insidious than infinity, so propagate it first if
/// present. The poison value becomes the result; the other operand is
/// consumed.
fn propagate_non_finite(eng: &mut Engine, y: f64, x: f64) -> bool {
    if y.is_nan() {
        eng.push(y);
        true
    } else if x.is_nan() {
        eng.push(x);
        true
    } else if !y.is_finite() {
        eng.push(y);
        true
    } else if !x.is_finite() {
        eng.push(x);
        true
    } else {
        false
    }
}

fn check_i64_range(eng: &mut Engine, y: f64, x: f64) -> Result<(), EvalError> {
    if out_of_i64(y) || out_of_i64(x) {
        eng.push(y);
        eng.push(x);
        return Err(DomainError::BitwiseRange.into());
    }
    Ok(())
}

fn bitwise(eng: &mut Engine, f: impl FnOnce(i64, i64) -> i64) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    if propagate_non_finite(eng, y, x) {
        return Ok(());
    }
    check_i64_range(eng, y, x)?;
    eng.push(f(y as i64, x as i64) as f64);
    eng.lastx = x;
    Ok(())
}

/// Shifts are logical. Negative counts are rejected; counts past the
/// native word saturate the result to zero.
fn shift(eng: &mut Engine, f: impl FnOnce(i64, u32) -> i64) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    if propagate_non_finite(eng, y, x) {
        return Ok(());
    }
    check_i64_range(eng, y, x)?;
    if x < 0.0 {
        eng.push(y);
        eng.push(x);
        return Err(DomainError::NegativeShift.into());
    }
    if x >= 64.0 {
        eng.push(0.0);
    } else {
        eng.push(f(y as i64, x as u32) as f64);
    }
    eng.lastx = x;
    Ok(())
}

/// Bit set/clear. A bit number past the native word leaves the value
/// unchanged.
fn bit_modify(eng: &mut Engine, f: impl FnOnce(i64, u32) -> i64) -> Result<(), EvalError> {
    let (y, x) = eng.pop2()?;
    if propagate_non_finite(eng, y, x) {
        return Ok(());
    }
    check_i64_range(eng, y, x)?;
    if x < 0.0 {
        eng.push(y);
        eng.push(x);
        return Err(DomainError::NegativeBit.into());
    }
    if x >= 64.0 {
        eng.push(y);
    } else {
        eng.push(f(y as i64, x as u32) as f64);
    }
    eng.lastx = x;
    Ok(())
}

/// Fold the stack down to the mark (or entirely) into a sum or average.
fn reduce(eng: &mut Engine, do_sum: bool) -> Result<(), EvalError> {
    let name = if do_sum { "sum" } else { "avg" };
    if eng.stack.len() <= eng.stack_mark {
        return Err(DomainError::NothingToReduce(name).into());
    }
    let mut tot = 0.0;
    let mut n = 0.0;
    while eng.stack.len() > eng.stack_mark {
        tot += eng.pop()?;
        n += 1.0;
    }
    eng.stack_mark = 0;
    eng.result_push(if do_sum { tot } else { tot / n });
    Ok(())
}
