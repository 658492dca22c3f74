//! Backtracking pattern matching over significant tokens.

use tessera_core::{PatternStep, Token, TokenStep};

/// A successful pattern match, in significant-token indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PatternMatch<'p> {
    pub(super) first: usize,
    pub(super) last: usize,
    /// Capture names and the token index each one bound, in pattern order.
    pub(super) captures: Vec<(&'p str, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct Binding<'p> {
    index: usize,
    capture: Option<&'p str>,
}

pub(super) struct PatternMatcher<'t> {
    tokens: &'t [&'t Token],
    used: &'t [bool],
    default_skip: usize,
}

impl<'t> PatternMatcher<'t> {
    pub(super) const fn new(tokens: &'t [&'t Token], used: &'t [bool], default_skip: usize) -> Self {
        Self {
            tokens,
            used,
            default_skip,
        }
    }

    /// Matches `steps` starting at token `start`. A match must bind at
    /// least one token.
    pub(super) fn match_at<'p>(&self, steps: &'p [PatternStep], start: usize) -> Option<PatternMatch<'p>> {
        let mut bound = Vec::new();
        if !self.steps(steps, start, &mut bound) {
            return None;
        }
        let first = bound.first()?.index;
        let last = bound.last()?.index;
        Some(PatternMatch {
            first,
            last,
            captures: bound
                .iter()
                .filter_map(|binding| binding.capture.map(|name| (name, binding.index)))
                .collect(),
        })
    }

    fn steps<'p>(&self, steps: &'p [PatternStep], pos: usize, bound: &mut Vec<Binding<'p>>) -> bool {
        let Some((step, rest)) = steps.split_first() else {
            return true;
        };
        match step {
            PatternStep::Token(token) => self.bind(token, pos, rest, bound),
            PatternStep::Optional(token) => {
                self.bind(token, pos, rest, bound) || self.steps(rest, pos, bound)
            }
            PatternStep::AnyOf(alternatives) => alternatives
                .iter()
                .find(|alternative| self.accepts(alternative, pos))
                .is_some_and(|alternative| self.bind(alternative, pos, rest, bound)),
            PatternStep::Skip(skip) => {
                if rest.is_empty() {
                    return true;
                }
                let max = skip.max.unwrap_or(self.default_skip);
                let limit = pos.saturating_add(max).min(self.tokens.len());
                (pos..limit).any(|next| self.steps(rest, next, bound))
            }
        }
    }

    fn bind<'p>(
        &self,
        step: &'p TokenStep,
        pos: usize,
        rest: &'p [PatternStep],
        bound: &mut Vec<Binding<'p>>,
    ) -> bool {
        if !self.accepts(step, pos) {
            return false;
        }
        bound.push(Binding {
            index: pos,
            capture: step.capture.as_deref(),
        });
        if self.steps(rest, pos + 1, bound) {
            return true;
        }
        bound.pop();
        false
    }

    fn accepts(&self, step: &TokenStep, pos: usize) -> bool {
        if self.used.get(pos).copied().unwrap_or(true) {
            return false;
        }
        self.tokens.get(pos).is_some_and(|token| {
            token.token_type == step.token_type
                && step.value.as_ref().is_none_or(|value| *value == token.value)
        })
    }
}
