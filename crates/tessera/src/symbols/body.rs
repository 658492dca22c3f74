//! Declaration extent resolution.

use tessera_core::{BlockSpan, BodyStyle, EngineConfig, SymbolRule, Token, TokenCategory};

use crate::lexer::CompiledLexer;

const BRACES: &str = "braces";

pub(super) struct BodyResolver<'a> {
    tokens: &'a [Token],
    spans: &'a [BlockSpan],
    lexer: &'a CompiledLexer,
    line_starts: Vec<usize>,
    source: &'a str,
    tab_width: u32,
}

impl<'a> BodyResolver<'a> {
    pub(super) fn new(
        source: &'a str,
        tokens: &'a [Token],
        spans: &'a [BlockSpan],
        lexer: &'a CompiledLexer,
        config: &EngineConfig,
    ) -> Self {
        Self {
            tokens,
            spans,
            lexer,
            line_starts: line_starts(source),
            source,
            tab_width: lexer
                .tab_width()
                .unwrap_or_else(|| config.default_tab_width())
                .max(1),
        }
    }

    /// Returns the raw index of the token that ends the declaration whose
    /// pattern covered raw tokens `first..=last`.
    pub(super) fn end_of(&self, rule: &SymbolRule, first: usize, last: usize) -> usize {
        if !rule.has_body {
            return self.statement_end(last);
        }
        match rule.body_style.unwrap_or(BodyStyle::Braces) {
            BodyStyle::Braces => self
                .spans
                .iter()
                .filter(|span| span.name == BRACES && span.open_index >= last)
                .min_by_key(|span| span.open_index)
                .map_or_else(|| self.statement_end(last), |span| span.close_index),
            BodyStyle::Indentation => self.indented_end(first, last),
        }
    }

    /// Scans forward to a `;`, a line break, or an unbalanced closing
    /// bracket at bracket depth zero. A terminating `;` is included.
    fn statement_end(&self, last: usize) -> usize {
        let mut end = last;
        let mut depth = 0_usize;
        for (index, token) in self.tokens.iter().enumerate().skip(last + 1) {
            match token.value.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                ";" if depth == 0 => return index,
                _ if depth == 0 && is_line_break(token) => break,
                _ => {}
            }
            if !self.lexer.is_skipped(&token.token_type) {
                end = index;
            }
        }
        end
    }

    /// Extends over following lines indented deeper than the declaration's
    /// first line. Blank lines and lines holding only skipped tokens do not
    /// end the body.
    fn indented_end(&self, first: usize, last: usize) -> usize {
        let Some(start) = self.tokens.get(first) else {
            return last;
        };
        let base = self.indent_of(start.range.start.line);
        let mut current_line = self.tokens.get(last).map_or(0, |token| token.range.end.line);
        let mut end = last;
        for (index, token) in self.tokens.iter().enumerate().skip(last + 1) {
            if self.lexer.is_skipped(&token.token_type) {
                continue;
            }
            let line = token.range.start.line;
            if line > current_line {
                if self.indent_of(line) <= base {
                    break;
                }
                current_line = line;
            }
            current_line = current_line.max(token.range.end.line);
            end = index;
        }
        end
    }

    fn indent_of(&self, line: u32) -> u32 {
        let Some(&start) = usize::try_from(line)
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|idx| self.line_starts.get(idx))
        else {
            return 0;
        };
        let mut width: u32 = 0;
        for ch in self.source.get(start..).unwrap_or_default().chars() {
            match ch {
                ' ' => width += 1,
                '\t' => width = (width + 1).next_multiple_of(self.tab_width),
                _ => break,
            }
        }
        width
    }
}

fn is_line_break(token: &Token) -> bool {
    token.category == TokenCategory::Newline
        || (token.category == TokenCategory::Whitespace && token.value.contains(['\n', '\r']))
}

/// Byte offsets at which each line starts, using the reader's line-break
/// rules.
fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    let bytes = source.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => starts.push(idx + 1),
            b'\r' if bytes.get(idx + 1) != Some(&b'\n') => starts.push(idx + 1),
            _ => {}
        }
    }
    starts
}
