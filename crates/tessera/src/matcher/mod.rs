//! Compiled token matchers.
//!
//! A [`Matcher`] is the executable form of a [`MatcherSpec`]. Matchers are
//! pure: [`Matcher::match_len`] inspects the text at the reader's position and
//! reports how many bytes would be consumed, leaving the caller's reader
//! untouched. Zero means no match; a matcher never reports an empty match.

mod delimited;
mod literal;
mod number;

use std::collections::BTreeMap;

use regex::Regex;
use tessera_core::{CharClassSpec, MatcherSpec};

pub use self::delimited::Delimited;
pub use self::literal::{KeywordSet, LiteralSet};
pub use self::number::NumberMatcher;
use crate::charclass::CharClass;
use crate::error::TesseraError;
use crate::reader::CharReader;

/// An executable matcher.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Literal alternatives, longest first.
    Literal(LiteralSet),
    /// Words with boundaries on both sides.
    Keywords(KeywordSet),
    /// Open/close region.
    Delimited(Delimited),
    /// A start marker running to the end of the line.
    Line(String),
    /// One `first` character then a greedy run of `rest`.
    CharSequence {
        /// Class of the leading character.
        first: CharClass,
        /// Class of the trailing characters.
        rest: Option<CharClass>,
    },
    /// A numeric literal.
    Number(NumberMatcher),
    /// Parts matched back to back.
    Sequence(Vec<Matcher>),
    /// An anchored regular expression.
    Pattern(Regex),
}

impl Matcher {
    /// Compiles a matcher descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] for unresolved char-class references,
    /// empty delimiters or line markers, and invalid regular expressions.
    pub fn compile(
        language: &str,
        spec: &MatcherSpec,
        classes: &BTreeMap<String, CharClassSpec>,
    ) -> Result<Self, TesseraError> {
        Ok(match spec {
            MatcherSpec::String { value } => Self::Literal(LiteralSet::new(value.iter())),
            MatcherSpec::Keywords { words } => {
                Self::Keywords(KeywordSet::new(words.iter().map(String::as_str)))
            }
            MatcherSpec::Delimited(delimited) => {
                Self::Delimited(Delimited::compile(language, delimited)?)
            }
            MatcherSpec::Line { start } => {
                if start.is_empty() {
                    return Err(TesseraError::config(
                        language,
                        "line matcher needs a non-empty start marker",
                    ));
                }
                Self::Line(start.clone())
            }
            MatcherSpec::CharSequence { first, rest } => Self::CharSequence {
                first: CharClass::compile(language, first, classes)?,
                rest: rest
                    .as_ref()
                    .map(|class| CharClass::compile(language, class, classes))
                    .transpose()?,
            },
            MatcherSpec::Number(number) => Self::Number(NumberMatcher::new(number)),
            MatcherSpec::Sequence { matchers } => Self::Sequence(
                matchers
                    .iter()
                    .map(|part| Self::compile(language, part, classes))
                    .collect::<Result<_, _>>()?,
            ),
            MatcherSpec::Pattern { regex } => {
                let anchored = format!("^(?:{regex})");
                Self::Pattern(Regex::new(&anchored).map_err(|err| {
                    TesseraError::config(language, format!("invalid pattern '{regex}': {err}"))
                })?)
            }
        })
    }

    /// Returns the number of bytes this matcher would consume at the reader's
    /// position, or `0` when it does not match.
    #[must_use]
    pub fn match_len(&self, reader: &CharReader<'_>) -> usize {
        match self {
            Self::Literal(set) => set.match_len(reader),
            Self::Keywords(set) => set.match_len(reader),
            Self::Delimited(delimited) => delimited.match_len(reader),
            Self::Line(start) => literal::line_match_len(start, reader),
            Self::CharSequence { first, rest } => char_sequence_len(first, rest.as_ref(), reader),
            Self::Number(number) => number.match_len(reader.rest()),
            Self::Sequence(parts) => sequence_len(parts, reader),
            Self::Pattern(regex) => regex.find(reader.rest()).map_or(0, |found| found.end()),
        }
    }
}

fn char_sequence_len(
    first: &CharClass,
    rest: Option<&CharClass>,
    reader: &CharReader<'_>,
) -> usize {
    let mut chars = reader.rest().char_indices();
    match chars.next() {
        Some((_, ch)) if first.contains(ch) => {}
        _ => return 0,
    }
    let Some(tail) = rest else {
        return reader.peek().map_or(0, char::len_utf8);
    };
    chars
        .find(|(_, ch)| !tail.contains(*ch))
        .map_or(reader.rest().len(), |(idx, _)| idx)
}

fn sequence_len(parts: &[Matcher], reader: &CharReader<'_>) -> usize {
    let mut cursor = *reader;
    for part in parts {
        let len = part.match_len(&cursor);
        if len == 0 {
            return 0;
        }
        cursor.advance_bytes(len);
    }
    cursor.offset() - reader.offset()
}
