//! The evaluation engine.
//!
//! `Engine` owns every piece of calculator state: operand stack,
//! numeric mode and width, variables and registers, the lastx register,
//! display toggles, and the queue of RPN tokens produced by the infix
//! compiler. Keeping it all in one explicit struct (instead of
//! globals) means each test can run against a fresh calculator.
//!
//! The loop in [`Engine::eval_line`] prefers tokens from the infix
//! queue; only when the queue is dry does it tokenize fresh input. The
//! lastx register is frozen at its pre-expression value while queued
//! tokens execute, so an infix expression's internal operator
//! applications never corrupt the RPN-visible "previous value".

use std::collections::VecDeque;

use log::trace;

use rpx_core::{FloatPolicy, Mode, Stack, Width, MAX_BITS, MIN_BITS};

use crate::catalog::{self, Arity, OpKind};
use crate::error::{EvalError, SyntaxError};
use crate::format::{self, FloatFormat, FloatStyle};
use crate::infix;
use crate::ops;
use crate::token::Token;
use crate::tokenizer::Cursor;

/// One line of feedback produced during evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// What the driver should do after a line is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

/// Angle unit consulted by the trig operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// All calculator state, plus the output produced while evaluating.
pub struct Engine {
    pub(crate) stack: Stack,
    pub(crate) mode: Mode,
    pub(crate) width: Width,
    pub(crate) policy: FloatPolicy,
    pub(crate) angle: AngleUnit,
    /// Most recent top-of-stack consumed by an operator.
    pub(crate) lastx: f64,
    /// While an infix expression runs, lastx stays at its pre-expression
    /// value; the freeze is committed when fresh input resumes.
    pub(crate) frozen_lastx: Option<f64>,
    pub(crate) stack_mark: usize,
    pub(crate) regs: [f64; 5],
    /// Append-only variable store, searched linearly.
    vars: Vec<(String, f64)>,
    pub(crate) raw_hex_input_ok: bool,
    autoprint: bool,
    suppress_autoprint: bool,
    exit_on_error: bool,
    separators: bool,
    float_digits: u32,
    float_style: FloatStyle,
    infix_queue: VecDeque<Token>,
    last_was_operator: bool,
    last_op_ok: bool,
    pending: Vec<String>,
    output: Vec<OutputLine>,
    diagnostics: Vec<EvalError>,
    exit_request: Option<i32>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            stack: Stack::new(),
            mode: Mode::Float,
            width: Width::default(),
            policy: FloatPolicy::detect(),
            angle: AngleUnit::Degrees,
            lastx: 0.0,
            frozen_lastx: None,
            stack_mark: 0,
            regs: [0.0; 5],
            vars: Vec::new(),
            raw_hex_input_ok: false,
            autoprint: true,
            suppress_autoprint: false,
            exit_on_error: false,
            separators: false,
            float_digits: 6,
            float_style: FloatStyle::Significant,
            infix_queue: VecDeque::new(),
            last_was_operator: false,
            last_op_ok: false,
            pending: Vec::new(),
            output: Vec::new(),
            diagnostics: Vec::new(),
            exit_request: None,
        }
    }

    // ------------------------------------------------------------------
    // stack primitives

    /// Push a value, canonicalizing it for the active mode. Non-finite
    /// values pass through even in integer modes.
    pub(crate) fn push(&mut self, v: f64) {
        if self.mode.is_floating() || !v.is_finite() {
            self.stack.push(v);
        } else {
            self.stack.push(self.width.canonical(v));
        }
    }

    /// Push a computed floating result: stabilized first, then pushed.
    pub(crate) fn result_push(&mut self, v: f64) {
        let v = if v.is_finite() {
            self.policy.stabilize(v)
        } else {
            v
        };
        self.push(v);
    }

    pub(crate) fn pop(&mut self) -> Result<f64, EvalError> {
        let v = self.stack.pop()?;
        // a mark below the surviving depth is meaningless
        if self.stack.len() < self.stack_mark {
            self.stack_mark = 0;
        }
        Ok(v)
    }

    /// Pop two operands as (y, x). If only one is present it goes back
    /// and the underflow is reported.
    pub(crate) fn pop2(&mut self) -> Result<(f64, f64), EvalError> {
        let x = self.pop()?;
        match self.pop() {
            Ok(y) => Ok((y, x)),
            Err(e) => {
                self.push(x);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // angle conversions

    pub(crate) fn user_angle_to_radians(&self, a: f64) -> f64 {
        match self.angle {
            AngleUnit::Degrees => a.to_radians(),
            AngleUnit::Radians => a,
        }
    }

    pub(crate) fn radians_to_user_angle(&self, r: f64) -> f64 {
        match self.angle {
            AngleUnit::Degrees => r.to_degrees(),
            AngleUnit::Radians => r,
        }
    }

    pub(crate) fn user_angle_to_degrees(&self, a: f64) -> f64 {
        match self.angle {
            AngleUnit::Degrees => a,
            AngleUnit::Radians => a.to_degrees(),
        }
    }

    // ------------------------------------------------------------------
    // output plumbing

    fn say(&mut self, line: impl Into<String>) {
        self.output.push(OutputLine::Stdout(line.into()));
    }

    fn warn(&mut self, line: impl Into<String>) {
        self.output.push(OutputLine::Stderr(line.into()));
        if self.exit_on_error {
            self.exit_request = Some(4);
        }
    }

    fn report(&mut self, err: EvalError) {
        let line = format!(" {}", err);
        self.output.push(OutputLine::Stderr(line));
        self.diagnostics.push(err);
        if self.exit_on_error {
            self.exit_request = Some(4);
        }
    }

    /// Informative feedback is shown only if the command that produced
    /// it was the last thing on its line.
    fn pending_line(&mut self, line: impl Into<String>) {
        self.pending.push(line.into());
    }

    fn pending_clear(&mut self) {
        self.pending.clear();
    }

    fn pending_flush(&mut self) {
        for line in std::mem::take(&mut self.pending) {
            self.output.push(OutputLine::Stdout(line));
        }
    }

    /// Drain the output produced so far.
    pub fn take_output(&mut self) -> Vec<OutputLine> {
        std::mem::take(&mut self.output)
    }

    /// Drain the errors recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<EvalError> {
        std::mem::take(&mut self.diagnostics)
    }

    // ------------------------------------------------------------------
    // state inspection

    pub fn stack_values(&self) -> &[f64] {
        self.stack.as_slice()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn last_x(&self) -> f64 {
        self.lastx
    }

    /// Look a variable up without creating it.
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    // ------------------------------------------------------------------
    // the evaluation loop

    /// Evaluate one line of input. Tokens queued by an infix expression
    /// are consumed before any further text from the line.
    pub fn eval_line(&mut self, line: &str) -> Outcome {
        let mut cursor = Cursor::new(line);

        loop {
            let tok = if let Some(t) = self.infix_queue.pop_front() {
                self.freeze_lastx();
                t
            } else {
                self.thaw_lastx();
                match cursor.next_token(true, self.raw_hex_input_ok) {
                    Some(t) => t,
                    None => Token::Eol,
                }
            };

            if matches!(tok, Token::Eol) {
                self.end_of_line();
                break;
            }

            self.pending_clear();
            self.dispatch(tok, &mut cursor);

            if let Some(code) = self.exit_request.take() {
                return Outcome::Exit(code);
            }
        }

        match self.exit_request.take() {
            Some(code) => Outcome::Exit(code),
            None => Outcome::Continue,
        }
    }

    fn dispatch(&mut self, tok: Token, cursor: &mut Cursor) {
        match tok {
            Token::Number { value, radix } => {
                trace!("push literal {} ({:?})", value, radix);
                self.push(value);
                self.last_was_operator = false;
            }
            Token::Op(op) if op.kind == OpKind::OpenParen => {
                match infix::compile(cursor, self.raw_hex_input_ok) {
                    Ok(queue) => {
                        self.infix_queue = queue;
                        self.last_op_ok = true;
                    }
                    Err(e) => {
                        // a malformed expression poisons the whole line
                        cursor.finish();
                        self.report(e.into());
                        self.last_op_ok = false;
                    }
                }
                self.last_was_operator = true;
            }
            Token::Op(op) => {
                trace!("invoking {}", op.name);
                match ops::apply(op, self) {
                    Ok(()) => self.last_op_ok = true,
                    Err(e) => {
                        self.report(e);
                        self.last_op_ok = false;
                    }
                }
                // assignable registers, like numbers, do not autoprint
                self.last_was_operator = op.arity != Arity::Assignable;
            }
            Token::Variable { name, write } => {
                if write {
                    match self.stack.top() {
                        Ok(top) => {
                            self.var_write(&name, top);
                            self.last_op_ok = true;
                        }
                        Err(_) => {
                            self.report(EvalError::EmptyStack);
                            self.last_op_ok = false;
                        }
                    }
                    self.last_was_operator = false;
                } else {
                    let v = self.var_read(&name);
                    self.push(v);
                    self.last_was_operator = true;
                    self.last_op_ok = true;
                }
            }
            Token::Unknown(text) => {
                let err = match text.chars().next() {
                    Some(c) if !c.is_ascii_graphic() => SyntaxError::IllegalChar(c),
                    _ => SyntaxError::Unrecognized(text),
                };
                self.report(err.into());
                cursor.finish();
                self.last_was_operator = false;
            }
            Token::Eol => {}
        }
    }

    fn end_of_line(&mut self) {
        self.pending_flush();
        if !self.suppress_autoprint && self.autoprint && self.last_was_operator && self.last_op_ok
        {
            self.print_top(self.mode);
        }
        self.suppress_autoprint = false;
    }

    fn freeze_lastx(&mut self) {
        if self.frozen_lastx.is_none() {
            self.frozen_lastx = Some(self.stack.top().unwrap_or(0.0));
        }
    }

    fn thaw_lastx(&mut self) {
        if let Some(v) = self.frozen_lastx.take() {
            self.lastx = v;
        }
    }

    // ------------------------------------------------------------------
    // variables

    /// Plain reference. A never-assigned variable comes into existence
    /// with value zero.
    fn var_read(&mut self, name: &str) -> f64 {
        if let Some(v) = self.variable(name) {
            return v;
        }
        self.vars.push((name.to_string(), 0.0));
        0.0
    }

    fn var_write(&mut self, name: &str, v: f64) {
        if let Some(entry) = self.vars.iter_mut().find(|(n, _)| n == name) {
            entry.1 = v;
        } else {
            self.vars.push((name.to_string(), v));
        }
    }

    // ------------------------------------------------------------------
    // printing

    fn float_format(&self) -> FloatFormat {
        FloatFormat {
            digits: self.float_digits,
            style: self.float_style,
            separators: self.separators,
            max_precision: self.policy.max_precision(),
        }
    }

    pub(crate) fn print_top(&mut self, format: Mode) {
        if let Ok(top) = self.stack.top() {
            self.print_value(top, format, false);
        }
    }

    /// Print the whole stack, bottom first. With `convert`, values that
    /// are not canonical for the active width are truncated in place
    /// (this is how a mode switch re-canonicalizes the stack).
    pub(crate) fn print_stack(&mut self, convert: bool) {
        for i in 0..self.stack.len() {
            let v = self.stack.as_slice()[i];
            let shown = self.print_value(v, self.mode, convert);
            if convert && shown.to_bits() != v.to_bits() {
                self.stack.as_mut_slice()[i] = shown;
            }
        }
    }

    /// Render one value in `format`, warn when the display loses
    /// accuracy, and return the value as it should now appear on the
    /// stack (unchanged unless `convert` is set).
    fn print_value(&mut self, v: f64, format: Mode, convert: bool) -> f64 {
        self.suppress_autoprint = true;

        // integer formats make no sense for non-finite values
        if format.is_floating() || !v.is_finite() {
            let text = if format == Mode::RawFloat {
                // once the user has seen this form, accept it as input
                self.raw_hex_input_ok = true;
                format::raw_hex_str(v)
            } else {
                format::float_str(v, self.float_format())
            };
            self.say(format!(" {}", text));
            return v;
        }

        let canon = self.width.canonical(v);
        let changed = canon != v;
        let ln = canon as i64;
        let mask = self.width.mask();
        let sep = self.separators;

        let text = match format {
            Mode::Hex => format!(" 0x{}", format::hex_str((ln & mask) as u64, sep)),
            Mode::Octal => format!(" 0{}", format::oct_str((ln & mask) as u64, sep)),
            Mode::Binary => {
                if self.mode.is_floating() {
                    // no masking in float mode
                    format!(" 0b{}", format::bin_str(ln as u64, MAX_BITS, u64::MAX, sep))
                } else {
                    format!(
                        " 0b{}",
                        format::bin_str((ln & mask) as u64, self.width.bits(), mask as u64, sep)
                    )
                }
            }
            Mode::Unsigned => format!(" {}", format::unsigned_str((ln & mask) as u64, sep)),
            Mode::Signed => {
                if self.mode.is_floating() {
                    format!(" {}", format::signed_str(ln, sep))
                } else {
                    // masked values don't look negative to the default
                    // integer formatting; rebuild the sign from the
                    // reduced-width sign bit
                    let body = mask & !self.width.sign_bit();
                    if ln & self.width.sign_bit() != 0 {
                        let t = self.width.sign_bit() - (ln & body);
                        format!(" -{}", format::signed_str(t, sep))
                    } else {
                        format!(" {}", format::signed_str(ln & body, sep))
                    }
                }
            }
            Mode::Float | Mode::RawFloat => unreachable!("handled above"),
        };
        self.say(text);

        if changed {
            if self.mode.is_floating() {
                self.warn("     # warning: display format loses accuracy");
            } else {
                let full = FloatFormat {
                    digits: self.policy.max_precision() as u32,
                    style: FloatStyle::Significant,
                    separators: false,
                    max_precision: self.policy.max_precision(),
                };
                self.warn(format!(
                    "     # warning: accuracy lost, was {}",
                    format::float_str(v, full)
                ));
            }
        }

        if convert && changed {
            canon
        } else {
            v
        }
    }

    // ------------------------------------------------------------------
    // mode commands

    pub(crate) fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.show_mode();
        self.print_stack(true);
    }

    pub(crate) fn show_mode(&mut self) {
        let detail = match self.mode {
            Mode::Float => {
                let what = match self.float_style {
                    FloatStyle::Significant => "of total precision",
                    FloatStyle::Fixed => "after the decimal",
                };
                format!(" Displaying {} digits {}.", self.float_digits, what)
            }
            Mode::RawFloat => " Displaying using floating hexadecimal.".to_string(),
            _ => format!(" Integer math with {} bits.", self.width.bits()),
        };
        self.pending_line(format!(" Mode is {}. {}", self.mode.name(), detail));
        self.suppress_autoprint = true;
    }

    fn pop_toggle(&mut self) -> Result<bool, EvalError> {
        let n = self.pop()?;
        if n != 0.0 && n != 1.0 {
            self.warn(" warning: toggle commands usually take 0 or 1 as their argument");
        }
        Ok(n != 0.0)
    }

    pub(crate) fn set_autoprint(&mut self) -> Result<(), EvalError> {
        let on = self.pop_toggle()?;
        self.autoprint = on;
        self.pending_line(format!(
            " Autoprinting is now {}",
            if on { "on" } else { "off" }
        ));
        Ok(())
    }

    pub(crate) fn set_separators(&mut self) -> Result<(), EvalError> {
        let on = self.pop_toggle()?;
        self.separators = on;
        self.pending_line(format!(
            " Numeric separators now {}",
            if on { "on" } else { "off" }
        ));
        Ok(())
    }

    pub(crate) fn set_rounding(&mut self) -> Result<(), EvalError> {
        let on = self.pop_toggle()?;
        self.policy.rounding = on;
        self.pending_line(format!(
            " Float snapping/rounding is now {}",
            if on { "on" } else { "off" }
        ));
        Ok(())
    }

    pub(crate) fn set_degrees(&mut self) -> Result<(), EvalError> {
        let on = self.pop_toggle()?;
        self.angle = if on {
            AngleUnit::Degrees
        } else {
            AngleUnit::Radians
        };
        self.pending_line(format!(
            " trig functions will now use {}",
            if on { "degrees" } else { "radians" }
        ));
        Ok(())
    }

    pub(crate) fn set_error_exit(&mut self) -> Result<(), EvalError> {
        let on = self.pop_toggle()?;
        self.exit_on_error = on;
        self.pending_line(format!(
            " errors and warnings will {} cause exit",
            if on { "now" } else { "not" }
        ));
        Ok(())
    }

    pub(crate) fn set_precision(&mut self) -> Result<(), EvalError> {
        let d = self.pop()?;
        let maxp = self.policy.max_precision() as u32;
        let mut digits = d.abs() as u32;
        let mut limited = "";
        if digits < 1 {
            digits = 1;
        } else if digits > maxp {
            digits = maxp;
            limited = "the maximum of ";
        }
        self.float_digits = digits;
        self.float_style = FloatStyle::Significant;
        self.pending_line(format!(
            " Will show {}{} significant digit{}.",
            limited,
            digits,
            if digits == 1 { "" } else { "s" }
        ));
        if self.mode != Mode::Float {
            self.pending_line(" Not in floating decimal mode, float precision recorded but ignored.");
        }
        Ok(())
    }

    pub(crate) fn set_decimals(&mut self) -> Result<(), EvalError> {
        let d = self.pop()?;
        let maxp = self.policy.max_precision() as u32;
        // zero is fine here: it means no digits after the decimal
        let digits = (d.abs() as u32).min(maxp);
        self.float_digits = digits;
        self.float_style = FloatStyle::Fixed;
        if digits == 0 {
            self.pending_line(" Will show no digits after the decimal.");
        } else {
            self.pending_line(format!(
                " Will show at most {} digit{} after the decimal.",
                digits,
                if digits == 1 { "" } else { "s" }
            ));
        }
        if self.mode != Mode::Float {
            self.pending_line(" Not in floating decimal mode, decimal length recorded but ignored.");
        }
        Ok(())
    }

    pub(crate) fn set_width_op(&mut self) -> Result<(), EvalError> {
        let n = self.pop()?;
        let requested = n as i64;
        let bits = if requested == 0 {
            MAX_BITS
        } else if requested > MAX_BITS as i64 {
            self.say(format!(" Width out of range, set to max ({})", MAX_BITS));
            MAX_BITS
        } else if requested < MIN_BITS as i64 {
            self.say(format!(" Width out of range, set to min ({})", MIN_BITS));
            MIN_BITS
        } else {
            requested as u32
        };

        self.width = Width::new(bits);
        self.pending_line(format!(
            " Integers are now {} bits wide.",
            self.width.bits()
        ));

        if self.mode.is_floating() {
            self.pending_line(" In floating mode, integer width is recorded but ignored.");
        } else {
            self.mask_stack();
        }
        Ok(())
    }

    /// Re-canonicalize every stack entry for the active width. Finite
    /// values are masked and sign-extended; non-finite values collapse
    /// to the representation minimum.
    fn mask_stack(&mut self) {
        let width = self.width;
        let mut coerced = 0usize;
        for v in self.stack.as_mut_slice() {
            if v.is_finite() {
                *v = width.canonical(*v);
            } else {
                *v = width.min() as f64;
                coerced += 1;
            }
        }
        if coerced > 0 {
            self.warn(format!(
                "     # warning: {} non-finite value{} coerced to the representation minimum",
                coerced,
                if coerced == 1 { "" } else { "s" }
            ));
        }
    }

    // ------------------------------------------------------------------
    // listings

    pub(crate) fn print_state(&mut self) {
        let mut lines: Vec<String> = Vec::new();
        lines.push(String::new());
        lines.push(format!(" Current mode is {}", self.mode.name()));
        lines.push(" In floating mode:".to_string());
        lines.push(format!(
            "  max precision is {} decimal digits",
            self.policy.max_precision()
        ));
        lines.push(format!(
            "  current display mode is \"{} {}\"",
            self.float_digits,
            match self.float_style {
                FloatStyle::Significant => "precision",
                FloatStyle::Fixed => "decimals",
            }
        ));
        lines.push(format!(
            "  snapping/rounding is {}",
            if self.policy.rounding { "on" } else { "off" }
        ));
        lines.push(" In integer modes:".to_string());
        lines.push(format!("  width is {} bits", self.width.bits()));
        lines.push(format!(
            "  mask:     0x{}",
            format::hex_str(self.width.mask() as u64, false)
        ));
        lines.push(format!(
            "  sign bit: 0x{}",
            format::hex_str(self.width.sign_bit() as u64, false)
        ));
        lines.push(format!(
            "  max:      0x{}",
            format::hex_str(self.width.max() as u64, false)
        ));
        lines.push(format!(
            "  min:      0x{}",
            format::hex_str((self.width.min() & self.width.mask()) as u64, false)
        ));
        lines.push(" Stack, top comes first:".to_string());
        if self.stack.is_empty() {
            lines.push(format!("{:>16}", "<empty>"));
        } else {
            for v in self.stack.as_slice().iter().rev() {
                lines.push(format!(
                    " {:>20}   {:>24}    {}",
                    *v as i64,
                    v,
                    format::raw_hex_str(*v)
                ));
            }
        }
        lines.push(format!(
            " stack count {}, stack mark {}",
            self.stack.len(),
            self.stack_mark
        ));
        lines.push(format!(
            " detected epsilon is {:e}",
            self.policy.epsilon()
        ));

        for line in lines {
            self.say(line);
        }
        self.suppress_autoprint = true;
    }

    pub(crate) fn print_help(&mut self) {
        self.say(" rpx -- an RPN scientific and programmer's calculator");
        self.say("  Entering a number pushes it on the stack.");
        self.say("  Operators replace either one or two stack values with their result.");
        self.say("  Always prefix hex (0x7f) or octal (0177) input, even in hex or octal mode.");
        self.say("  Infix expressions are entered using (...), as in: (sin(30)^2 + cos(30)^2)");
        self.say("  Variables are spelled with a leading underscore: (_a = 2 + 3)");
        self.say("  Below, 'x' refers to top-of-stack, 'y' refers to the next value beneath.");
        self.say("");

        // rows with an empty help share the next row's text
        let mut names: Vec<&str> = Vec::new();
        for op in catalog::CATALOG {
            names.push(op.name);
            if !op.help.is_empty() {
                let joined = names.join(", ");
                self.say(format!(" {:>21}     {}", joined, op.help));
                names.clear();
            }
        }
        self.suppress_autoprint = true;
    }

    pub(crate) fn print_precedence(&mut self) {
        self.say(" Precedence for operators in infix expressions, from");
        self.say("  top to bottom in order of descending precedence.");
        self.say(" All operators are left-associative, except for those");
        self.say("  in rows marked 'R', which associate right to left.");

        let mut rows: std::collections::BTreeMap<u8, Vec<&str>> = std::collections::BTreeMap::new();
        for op in catalog::CATALOG {
            if op.prec == 0 {
                continue;
            }
            let row = rows.entry(op.prec).or_default();
            if op.kind == OpKind::ChSign && !row.contains(&"+ -") {
                // the unary rewrites of + and - live in this row too
                row.push("+ -");
            }
            row.push(op.name);
        }

        let unary_prec = catalog::must("chs").prec;
        let pow_prec = catalog::must("^").prec;
        let mut i = 1;
        for (&prec, names) in rows.iter().rev() {
            let assoc = if prec <= unary_prec && prec >= pow_prec {
                'R'
            } else {
                ' '
            };
            self.say(format!(" {:<2}  {}     {}", i, assoc, names.join(" ")));
            i += 1;
        }
        self.suppress_autoprint = true;
    }

    // ------------------------------------------------------------------
    // leaving

    pub(crate) fn quit(&mut self) -> Result<(), EvalError> {
        if !self.suppress_autoprint && self.autoprint {
            self.print_top(self.mode);
        }
        let code = self.exit_code();
        self.exit_request = Some(code);
        Ok(())
    }

    /// Exit status from the stack, per the shell convention: 0 when the
    /// top of stack is logically true, 1 when it is zero, 2 when there
    /// is nothing on the stack at all.
    pub fn finish(&mut self) -> i32 {
        self.exit_code()
    }

    fn exit_code(&mut self) -> i32 {
        match self.stack.pop() {
            Ok(a) => {
                if a == 0.0 {
                    1
                } else {
                    0
                }
            }
            Err(_) => 2,
        }
    }
}
