//! Tokens and their presentation categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::span::Range;

/// The presentation category of a token.
///
/// The set is closed: renderers may rely on seeing only these values, and a
/// profile naming anything else fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Reserved words.
    Keyword,
    /// Names.
    Identifier,
    /// String literals and their fragments.
    String,
    /// Numeric literals.
    Number,
    /// Comments.
    Comment,
    /// Operators.
    Operator,
    /// Brackets, separators and other punctuation.
    Punctuation,
    /// Type names.
    Type,
    /// Decorators and attributes-as-annotations.
    Decorator,
    /// Markup tags.
    Tag,
    /// Markup attributes.
    Attribute,
    /// Preprocessor directives and similar meta syntax.
    Meta,
    /// Regular expression literals.
    Regexp,
    /// Escape sequences.
    Escape,
    /// Variables such as shell `$NAME`.
    Variable,
    /// Named constants such as `true` or `null`.
    Constant,
    /// Characters no rule matched.
    Error,
    /// Text without a more specific category.
    #[default]
    Plain,
    /// Horizontal whitespace.
    Whitespace,
    /// Line breaks.
    Newline,
}

impl TokenCategory {
    /// Returns every category in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Keyword,
            Self::Identifier,
            Self::String,
            Self::Number,
            Self::Comment,
            Self::Operator,
            Self::Punctuation,
            Self::Type,
            Self::Decorator,
            Self::Tag,
            Self::Attribute,
            Self::Meta,
            Self::Regexp,
            Self::Escape,
            Self::Variable,
            Self::Constant,
            Self::Error,
            Self::Plain,
            Self::Whitespace,
            Self::Newline,
        ]
    }

    /// Returns the lower-case name used in profiles and by renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Type => "type",
            Self::Decorator => "decorator",
            Self::Tag => "tag",
            Self::Attribute => "attribute",
            Self::Meta => "meta",
            Self::Regexp => "regexp",
            Self::Escape => "escape",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::Error => "error",
            Self::Plain => "plain",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str() == input)
            .ok_or_else(|| format!("unknown token category: '{input}'"))
    }
}

/// A lexical token.
///
/// Tokens tile the source: concatenating every token value in order
/// reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The profile-defined token type name (for example `"keyword"`).
    #[serde(rename = "type")]
    pub token_type: String,
    /// The exact source text of the token.
    pub value: String,
    /// The presentation category derived from the profile's token types.
    pub category: TokenCategory,
    /// Where the token sits in the source.
    pub range: Range,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(
        token_type: impl Into<String>,
        value: impl Into<String>,
        category: TokenCategory,
        range: Range,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            value: value.into(),
            category,
            range,
        }
    }

    /// Returns the byte length of the token text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` for an empty token. The engine never emits one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns `true` when the token text contains a line break.
    #[must_use]
    pub fn spans_lines(&self) -> bool {
        self.range.end.line > self.range.start.line
    }
}
