//! Line tokenizer.
//!
//! A [`Cursor`] walks one line of input and produces exactly one token
//! per call, leaving its position just past the consumed text. The infix
//! compiler shares the same cursor, which is what lets a `(` expression
//! consume the rest of the line out from under the RPN loop.
//!
//! Sign binding differs by caller: in RPN position a leading `+`/`-`
//! binds to an immediately following digit (`1 2 -3` pushes three
//! numbers), while in infix position the compiler decides unary versus
//! binary from context, so the sign is left alone here.

use log::trace;

use crate::catalog;
use crate::token::{Radix, Token};

/// Two-character punctuation operators, matched by fixed-length
/// lookahead before single characters are tried.
const TWO_CHAR: &[&str] = &[">>", "<<", ">=", "<=", "==", "!=", "&&", "||", "**"];

/// Cursor over a single line of calculator input.
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Cursor { line, pos: 0 }
    }

    /// Advance past whitespace.
    pub fn skip_ws(&mut self) {
        let bytes = self.line.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// True when the line has no more tokens.
    pub fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.pos >= self.line.len()
    }

    /// The character immediately at the cursor, whitespace included.
    /// The infix compiler uses this to disambiguate unary `+`/`-`.
    pub fn peek_char(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    /// Discard the rest of the line.
    pub fn finish(&mut self) {
        self.pos = self.line.len();
    }

    /// Produce the next token, or `None` at end of line.
    pub fn next_token(&mut self, parsing_rpn: bool, raw_hex_ok: bool) -> Option<Token> {
        self.skip_ws();
        let bytes = self.line.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let c = bytes[self.pos];
        let mut sign = 1.0f64;
        let mut p = self.pos;

        if parsing_rpn && (c == b'+' || c == b'-') {
            // Bind the sign only when a digit or decimal point follows;
            // a bare +/- is the operator; anything else is noise like
            // "-x" and rejected.
            match bytes.get(self.pos + 1).copied() {
                Some(n) if n.is_ascii_digit() || n == b'.' => {
                    if c == b'-' {
                        sign = -1.0;
                    }
                    p += 1;
                }
                Some(n) if n.is_ascii_whitespace() => return self.punct_token(),
                None => return self.punct_token(),
                _ => return Some(Token::Unknown(self.take_word())),
            }
        }

        let b0 = bytes.get(p).copied().unwrap_or(0);
        let b1 = bytes.get(p + 1).copied().unwrap_or(0);

        let tok = if b0 == b'0' && (b1 == b'x' || b1 == b'X') {
            self.pos = p;
            self.hex_literal(sign, raw_hex_ok)
        } else if b0 == b'0' && (b1 == b'b' || b1 == b'B') {
            self.pos = p;
            self.binary_literal(sign)
        } else if b0 == b'0' && (b'0'..=b'7').contains(&b1) {
            self.pos = p;
            self.octal_literal(sign)
        } else if b0.is_ascii_digit() || b0 == b'.' {
            self.pos = p;
            self.decimal_literal(sign)
        } else if c == b'_' {
            self.variable_token()
        } else if c.is_ascii_alphabetic() {
            self.word_token()
        } else if c.is_ascii_punctuation() {
            return self.punct_token().inspect(|t| trace!("token {:?}", t));
        } else {
            Token::Unknown(self.take_word())
        };

        trace!("token {:?}", tok);
        Some(tok)
    }

    /// Consume a run of non-whitespace characters, for error reporting.
    fn take_word(&mut self) -> String {
        let rest = &self.line[self.pos..];
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    fn decimal_literal(&mut self, sign: f64) -> Token {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        let mut i = start;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        // exponent, only when digits actually follow it
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                i = j;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }

        match self.line[start..i].parse::<f64>() {
            Ok(v) => {
                self.pos = i;
                Token::Number {
                    value: sign * v,
                    radix: Radix::Decimal,
                }
            }
            Err(_) => Token::Unknown(self.take_word()),
        }
    }

    fn hex_literal(&mut self, sign: f64, raw_hex_ok: bool) -> Token {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        let mut i = start + 2;
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }

        if raw_hex_ok {
            // accept the floating hex form, e.g. 0xc.90fdaa22p-2
            let mut j = i;
            if j < bytes.len() && bytes[j] == b'.' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_hexdigit() {
                    j += 1;
                }
            }
            if j < bytes.len() && (bytes[j] == b'p' || bytes[j] == b'P') {
                let mut k = j + 1;
                if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
                    k += 1;
                }
                if k < bytes.len() && bytes[k].is_ascii_digit() {
                    k += 1;
                    while k < bytes.len() && bytes[k].is_ascii_digit() {
                        k += 1;
                    }
                    j = k;
                }
            }
            return match parse_hex_float(&self.line[start..j]) {
                Some(v) => {
                    self.pos = j;
                    Token::Number {
                        value: sign * v,
                        radix: Radix::Hex,
                    }
                }
                None => Token::Unknown(self.take_word()),
            };
        }

        if i == digits_start {
            return Token::Unknown(self.take_word());
        }
        match u64::from_str_radix(&self.line[digits_start..i], 16) {
            Ok(v) => {
                self.pos = i;
                Token::Number {
                    value: sign * v as f64,
                    radix: Radix::Hex,
                }
            }
            Err(_) => Token::Unknown(self.take_word()),
        }
    }

    fn binary_literal(&mut self, sign: f64) -> Token {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        let mut i = start + 2;
        while i < bytes.len() && (bytes[i] == b'0' || bytes[i] == b'1') {
            i += 1;
        }
        if i == start + 2 {
            return Token::Unknown(self.take_word());
        }
        match u64::from_str_radix(&self.line[start + 2..i], 2) {
            Ok(v) => {
                self.pos = i;
                Token::Number {
                    value: sign * v as f64,
                    radix: Radix::Binary,
                }
            }
            Err(_) => Token::Unknown(self.take_word()),
        }
    }

    fn octal_literal(&mut self, sign: f64) -> Token {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        let mut i = start;
        while i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
            i += 1;
        }
        match u64::from_str_radix(&self.line[start..i], 8) {
            Ok(v) => {
                self.pos = i;
                Token::Number {
                    value: sign * v as f64,
                    radix: Radix::Octal,
                }
            }
            Err(_) => Token::Unknown(self.take_word()),
        }
    }

    /// `_` followed by an alphanumeric names a variable.
    fn variable_token(&mut self) -> Token {
        let bytes = self.line.as_bytes();
        match bytes.get(self.pos + 1) {
            Some(b) if b.is_ascii_alphanumeric() => {}
            _ => return Token::Unknown(self.take_word()),
        }
        let start = self.pos;
        let mut i = start + 1;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        self.pos = i;
        Token::Variable {
            name: self.line[start..i].to_string(),
            write: false,
        }
    }

    /// Identifier-like text, resolved against the catalog by exact
    /// length-and-content match.
    fn word_token(&mut self) -> Token {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        let mut i = start;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        let word = &self.line[start..i];
        match catalog::lookup(word) {
            Some(op) => {
                self.pos = i;
                Token::Op(op)
            }
            None => Token::Unknown(self.take_word()),
        }
    }

    fn punct_token(&mut self) -> Option<Token> {
        let rest = &self.line[self.pos..];
        let len = if TWO_CHAR.iter().any(|op| rest.starts_with(op)) {
            2
        } else {
            1
        };
        match catalog::lookup(&rest[..len]) {
            Some(op) => {
                self.pos += len;
                Some(Token::Op(op))
            }
            None => Some(Token::Unknown(self.take_word())),
        }
    }
}

/// Parse a hexadecimal float like `0x1.8p+3` (also accepts plain hex
/// integers). Digits accumulate in a `u64` so the value stays exact up
/// to the full mantissa.
fn parse_hex_float(text: &str) -> Option<f64> {
    let rest = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    let bytes = rest.as_bytes();
    let mut i = 0;
    let mut acc: u64 = 0;
    let mut seen = false;
    let mut frac_digits = 0i32;

    while i < bytes.len() {
        if let Some(d) = (bytes[i] as char).to_digit(16) {
            acc = acc.saturating_mul(16).saturating_add(d as u64);
            seen = true;
            i += 1;
        } else {
            break;
        }
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() {
            if let Some(d) = (bytes[i] as char).to_digit(16) {
                acc = acc.saturating_mul(16).saturating_add(d as u64);
                frac_digits += 1;
                seen = true;
                i += 1;
            } else {
                break;
            }
        }
    }
    if !seen {
        return None;
    }

    let mut exp = 0i32;
    if i < bytes.len() && (bytes[i] == b'p' || bytes[i] == b'P') {
        i += 1;
        let mut exp_sign = 1i32;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            if bytes[i] == b'-' {
                exp_sign = -1;
            }
            i += 1;
        }
        let mut digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            exp = exp * 10 + (bytes[i] - b'0') as i32;
            digits += 1;
            i += 1;
        }
        if digits == 0 {
            return None;
        }
        exp *= exp_sign;
    }
    if i != bytes.len() {
        return None;
    }

    Some(acc as f64 * 2f64.powi(exp - 4 * frac_digits))
}
