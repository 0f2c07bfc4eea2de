//! Float stabilization ("snapping").
//!
//! All arithmetic happens in binary floating point, even in conceptually
//! exact contexts, so results accumulate representation noise like
//! `2.9999999999999996`. Every computed result is passed through
//! [`FloatPolicy::stabilize`], which snaps near-integers to the integer
//! and rounds everything else to the float's genuine decimal precision.
//! Literals typed by the user are never stabilized.

use log::trace;

/// Runtime float-stabilization parameters.
///
/// `epsilon` and `max_precision` are measured once at startup rather than
/// taken from constants, mirroring the displayed-precision math used at
/// print time.
#[derive(Clone, Copy, Debug)]
pub struct FloatPolicy {
    epsilon: f64,
    max_precision: i32,
    /// Snapping/rounding can be disabled for debugging.
    pub rounding: bool,
}

impl FloatPolicy {
    /// Detect machine epsilon by repeated halving and derive the number
    /// of trustworthy decimal digits from it.
    pub fn detect() -> Self {
        let mut epsilon = 1.0f64;
        while 1.0 + epsilon / 2.0 > 1.0 {
            epsilon /= 2.0;
        }
        // 15 digits for a 53-bit mantissa
        let max_precision = (-epsilon.log10()) as i32;
        FloatPolicy {
            epsilon,
            max_precision,
            rounding: true,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Decimal digits the representation can actually carry.
    pub fn max_precision(&self) -> i32 {
        self.max_precision
    }

    /// Clean up floating point detritus on a computed result: snap values
    /// very close to an integer, otherwise round away digits beyond the
    /// representable precision. Zero and non-finite values pass through.
    pub fn stabilize(&self, x: f64) -> f64 {
        if !self.rounding {
            return x;
        }

        if x == 0.0 || !x.is_finite() {
            return x;
        }

        let abs_x = x.abs();

        // snap to integer; scale the tolerance by magnitude above 1.
        // 20 * epsilon is about 4e-15.
        let mut tolerance = self.epsilon * 20.0;
        if abs_x > 1.0 {
            tolerance *= abs_x;
        }

        let r = x.round();
        if (x - r).abs() <= tolerance {
            if x != r {
                trace!("snap {:e} to {:e}", x, r);
            }
            return r;
        }

        // round to max_precision significant digits
        let factor = 10f64.powf(self.max_precision as f64 - abs_x.log10().ceil());
        let r = (x * factor).round() / factor;
        if x != r {
            trace!("round {:e} to {:e}", x, r);
        }

        r
    }
}
