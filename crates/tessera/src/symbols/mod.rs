//! Declaration discovery over token streams.
//!
//! Symbol rules are small token patterns (`token`, `optional`, `anyOf`,
//! `skip`) matched against the tokens that survive the profile's
//! `skipTokens` filter. A match names a symbol; its extent is then found
//! from the raw token stream according to the rule's body style.
//!
//! Rules run in declaration order and each claims the tokens it matches,
//! so an earlier rule shadows a later one over the same tokens.

mod body;
mod pattern;

use tessera_core::{BlockSpan, EngineConfig, Range, Symbol, SymbolRule, Token};
use tracing::trace;

use self::body::BodyResolver;
use self::pattern::PatternMatcher;
use crate::lexer::CompiledLexer;

/// Finds declarations in one tokenised source.
#[derive(Debug, Clone, Copy)]
pub struct SymbolDetector<'a> {
    source: &'a str,
    tokens: &'a [Token],
    spans: &'a [BlockSpan],
    lexer: &'a CompiledLexer,
    config: &'a EngineConfig,
}

impl<'a> SymbolDetector<'a> {
    /// Creates a detector. `tokens` must come from `lexer` run over
    /// `source`, and `spans` from the block tracker over those tokens.
    #[must_use]
    pub const fn new(
        source: &'a str,
        tokens: &'a [Token],
        spans: &'a [BlockSpan],
        lexer: &'a CompiledLexer,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            source,
            tokens,
            spans,
            lexer,
            config,
        }
    }

    /// Runs `rules` and returns the symbols sorted by start line. Symbols
    /// starting on the same line keep rule order.
    #[must_use]
    pub fn detect(&self, rules: &[SymbolRule]) -> Vec<Symbol> {
        let significant: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !self.lexer.is_skipped(&token.token_type))
            .map(|(index, _)| index)
            .collect();
        let view: Vec<&Token> = significant
            .iter()
            .filter_map(|&index| self.tokens.get(index))
            .collect();
        let mut used = vec![false; view.len()];
        let body = BodyResolver::new(self.source, self.tokens, self.spans, self.lexer, self.config);
        let mut symbols = Vec::new();

        for rule in rules {
            for start in 0..view.len() {
                if used.get(start).copied().unwrap_or(true) {
                    continue;
                }
                let matcher = PatternMatcher::new(&view, &used, self.config.max_skip_lookahead());
                let Some(found) = matcher.match_at(&rule.pattern, start) else {
                    continue;
                };
                for flag in used.iter_mut().take(found.last + 1).skip(found.first) {
                    *flag = true;
                }
                let (Some(&first_raw), Some(&last_raw)) =
                    (significant.get(found.first), significant.get(found.last))
                else {
                    continue;
                };
                if let Some(symbol) = self.build(rule, &found, &significant, first_raw, last_raw, &body)
                {
                    trace!(
                        rule = %rule.name,
                        name = %symbol.name,
                        line = symbol.start_line,
                        "symbol matched"
                    );
                    symbols.push(symbol);
                }
            }
        }

        symbols.sort_by_key(|symbol| symbol.start_line);
        symbols
    }

    fn build(
        &self,
        rule: &SymbolRule,
        found: &pattern::PatternMatch<'_>,
        significant: &[usize],
        first_raw: usize,
        last_raw: usize,
        body: &BodyResolver<'_>,
    ) -> Option<Symbol> {
        let end_raw = body.end_of(rule, first_raw, last_raw);
        let first = self.tokens.get(first_raw)?;
        let end = self.tokens.get(end_raw)?;

        let named = found
            .captures
            .iter()
            .find(|(capture, _)| *capture == "name")
            .or_else(|| found.captures.first());
        let name_token = named.and_then(|(_, index)| {
            significant
                .get(*index)
                .and_then(|&raw| self.tokens.get(raw))
        });

        Some(Symbol {
            name: name_token.map_or_else(|| rule.name.clone(), |token| token.value.clone()),
            kind: rule.kind.clone(),
            start_line: first.range.start.line,
            end_line: end.range.end.line,
            name_range: name_token.map(|token| token.range),
            content_range: Range::new(first.range.start, end.range.end),
        })
    }
}

#[cfg(test)]
mod tests;
