//! Open/close delimited regions: strings, block comments, heredoc-like
//! fences.

use tessera_core::DelimitedSpec;

use crate::error::TesseraError;
use crate::reader::CharReader;

/// A compiled delimited-region matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimited {
    open: String,
    close: String,
    escape: Option<char>,
    multiline: bool,
    nested: bool,
}

impl Delimited {
    pub(super) fn compile(language: &str, spec: &DelimitedSpec) -> Result<Self, TesseraError> {
        if spec.open.is_empty() || spec.close.is_empty() {
            return Err(TesseraError::config(
                language,
                "delimited matcher needs non-empty open and close literals",
            ));
        }
        Ok(Self {
            open: spec.open.clone(),
            close: spec.close.clone(),
            escape: spec.escape,
            multiline: spec.multiline,
            nested: spec.nested,
        })
    }

    /// Scans from the open literal to its matching close. Unterminated
    /// regions, and raw line breaks in single-line regions, do not match.
    pub(super) fn match_len(&self, reader: &CharReader<'_>) -> usize {
        if !reader.starts_with(&self.open) {
            return 0;
        }
        let mut cursor = *reader;
        cursor.advance_bytes(self.open.len());
        let mut depth = 1_usize;
        while let Some(ch) = cursor.peek() {
            if self.escape == Some(ch) {
                cursor.advance_bytes(ch.len_utf8());
                // An escaped line break is a continuation, even in
                // single-line regions.
                if cursor.advance().is_none() {
                    return 0;
                }
                continue;
            }
            if cursor.starts_with(&self.close) {
                cursor.advance_bytes(self.close.len());
                depth -= 1;
                if depth == 0 {
                    return cursor.offset() - reader.offset();
                }
                continue;
            }
            if self.nested && cursor.starts_with(&self.open) {
                cursor.advance_bytes(self.open.len());
                depth += 1;
                continue;
            }
            if !self.multiline && matches!(ch, '\n' | '\r') {
                return 0;
            }
            cursor.advance_bytes(ch.len_utf8());
        }
        0
    }
}
