//! Literal, keyword, and line matchers.

use crate::reader::CharReader;

/// Literal alternatives tried longest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSet {
    literals: Vec<String>,
}

impl LiteralSet {
    /// Builds a set, dropping empty literals. Equal-length literals keep
    /// their declaration order.
    pub fn new<'a>(literals: impl IntoIterator<Item = &'a str>) -> Self {
        let mut literals: Vec<String> = literals
            .into_iter()
            .filter(|literal| !literal.is_empty())
            .map(str::to_owned)
            .collect();
        literals.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { literals }
    }

    /// Returns the literals in match_len order.
    #[must_use]
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    pub(super) fn match_len(&self, reader: &CharReader<'_>) -> usize {
        self.literals
            .iter()
            .find(|literal| reader.starts_with(literal))
            .map_or(0, String::len)
    }
}

/// Keywords that must not touch a word character on either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    words: LiteralSet,
}

impl KeywordSet {
    /// Builds a keyword set.
    pub fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: LiteralSet::new(words),
        }
    }

    pub(super) fn match_len(&self, reader: &CharReader<'_>) -> usize {
        if reader.peek_behind().is_some_and(is_word_char) {
            return 0;
        }
        let rest = reader.rest();
        self.words
            .literals()
            .iter()
            .find(|word| {
                rest.strip_prefix(word.as_str())
                    .is_some_and(|after| !after.chars().next().is_some_and(is_word_char))
            })
            .map_or(0, String::len)
    }
}

/// Characters that extend an identifier for keyword-boundary purposes.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

pub(super) fn line_match_len(start: &str, reader: &CharReader<'_>) -> usize {
    let rest = reader.rest();
    if !rest.starts_with(start) {
        return 0;
    }
    rest.get(start.len()..)
        .and_then(|tail| tail.find(['\n', '\r']))
        .map_or(rest.len(), |idx| start.len() + idx)
}
