//! Numeric literal scanning.

use tessera_core::NumberSpec;

/// A compiled number matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMatcher {
    hex: bool,
    octal: bool,
    binary: bool,
    float: bool,
    scientific: bool,
    separator: Option<char>,
    suffixes: Vec<String>,
}

impl NumberMatcher {
    /// Builds a number matcher. Suffixes are tried longest first.
    #[must_use]
    pub fn new(spec: &NumberSpec) -> Self {
        let mut suffixes: Vec<String> = spec
            .suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty())
            .cloned()
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            hex: spec.hex,
            octal: spec.octal,
            binary: spec.binary,
            float: spec.float,
            scientific: spec.scientific,
            separator: spec.separator,
            suffixes,
        }
    }

    /// Returns the byte length of the numeric literal at the start of `text`.
    #[must_use]
    pub fn match_len(&self, text: &str) -> usize {
        let body = match self.radix_literal(text) {
            Some(len) => len,
            None => self.decimal_literal(text),
        };
        if body == 0 {
            return 0;
        }
        let tail = text.get(body..).unwrap_or_default();
        body + self
            .suffixes
            .iter()
            .find(|suffix| tail.starts_with(suffix.as_str()))
            .map_or(0, String::len)
    }

    /// `Some` when a radix prefix is present and enabled; the literal is
    /// then prefix-only and `Some(0)` means no digits followed.
    fn radix_literal(&self, text: &str) -> Option<usize> {
        let mut chars = text.chars();
        if chars.next() != Some('0') {
            return None;
        }
        let digit: fn(char) -> bool = match chars.next()? {
            'x' | 'X' if self.hex => is_hex_digit,
            'o' | 'O' if self.octal => is_octal_digit,
            'b' | 'B' if self.binary => is_binary_digit,
            _ => return None,
        };
        let digits = self.digits(text.get(2..).unwrap_or_default(), digit);
        Some(if digits == 0 { 0 } else { 2 + digits })
    }

    fn decimal_literal(&self, text: &str) -> usize {
        let decimal: fn(char) -> bool = is_decimal_digit;
        let mut len = self.digits(text, decimal);
        let starts_fraction = |rest: &str| {
            let mut chars = rest.chars();
            chars.next() == Some('.') && chars.next().is_some_and(decimal)
        };
        if len == 0 && !(self.float && starts_fraction(text)) {
            return 0;
        }
        if self.float && starts_fraction(text.get(len..).unwrap_or_default()) {
            len += 1 + self.digits(text.get(len + 1..).unwrap_or_default(), decimal);
        }
        if self.scientific {
            let tail = text.get(len..).unwrap_or_default();
            if tail.starts_with(['e', 'E']) {
                let sign = usize::from(tail.get(1..).is_some_and(|t| t.starts_with(['+', '-'])));
                let exponent = self.digits(tail.get(1 + sign..).unwrap_or_default(), decimal);
                if exponent > 0 {
                    len += 1 + sign + exponent;
                }
            }
        }
        len
    }

    /// Length of a digit run. A separator counts only between two digits.
    fn digits(&self, text: &str, digit: fn(char) -> bool) -> usize {
        let mut len = 0;
        let mut chars = text.chars().peekable();
        let mut previous_digit = false;
        while let Some(ch) = chars.next() {
            if digit(ch) {
                previous_digit = true;
            } else if Some(ch) == self.separator
                && previous_digit
                && chars.peek().is_some_and(|next| digit(*next))
            {
                previous_digit = false;
            } else {
                break;
            }
            len += ch.len_utf8();
        }
        len
    }
}

const fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

const fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

const fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

const fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}
