//! Declarative matcher and character-class descriptors.
//!
//! These are the serialisable forms profile authors write. The engine
//! compiles them into scan functions; nothing here executes.

use serde::{Deserialize, Serialize};

/// A built-in character predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredefinedClass {
    /// Any alphabetic character.
    Letter,
    /// Upper-case letters.
    Upper,
    /// Lower-case letters.
    Lower,
    /// ASCII digits.
    Digit,
    /// ASCII hexadecimal digits.
    HexDigit,
    /// Letters and ASCII digits.
    Alphanumeric,
    /// Space and tab only; line breaks are not whitespace here.
    Whitespace,
    /// `\n` and `\r`.
    Newline,
    /// Any character.
    Any,
}

/// A character-class descriptor.
///
/// # Example
///
/// ```
/// use tessera_core::CharClassSpec;
///
/// let spec: CharClassSpec = serde_json::from_str(
///     r#"{ "kind": "union", "classes": [
///         { "kind": "predefined", "name": "letter" },
///         { "kind": "chars", "chars": "_$" }
///     ] }"#,
/// )?;
/// assert!(matches!(spec, CharClassSpec::Union { .. }));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CharClassSpec {
    /// One of the built-in predicates.
    Predefined {
        /// Which predicate.
        name: PredefinedClass,
    },
    /// Explicit membership.
    Chars {
        /// The member characters.
        chars: String,
    },
    /// Inclusive code-point range.
    Range {
        /// Lowest member.
        from: char,
        /// Highest member.
        to: char,
    },
    /// Matches when any sub-class matches.
    Union {
        /// The alternatives.
        classes: Vec<CharClassSpec>,
    },
    /// Matches any character the inner class rejects. Never matches end of
    /// input.
    Negate {
        /// The class being negated.
        class: Box<CharClassSpec>,
    },
    /// A named class from the profile's `charClasses`.
    Ref {
        /// The referenced name.
        name: String,
    },
}

impl CharClassSpec {
    /// Shorthand for a predefined class.
    #[must_use]
    pub const fn predefined(name: PredefinedClass) -> Self {
        Self::Predefined { name }
    }

    /// Shorthand for an explicit set.
    #[must_use]
    pub fn chars(chars: impl Into<String>) -> Self {
        Self::Chars {
            chars: chars.into(),
        }
    }

    /// Shorthand for a named reference.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref { name: name.into() }
    }
}

/// One literal or a list of literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literals {
    /// A single literal.
    One(String),
    /// Several alternatives.
    Many(Vec<String>),
}

impl Literals {
    /// Iterates over the literals in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for Literals {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<&str>> for Literals {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

/// Open/close delimited region such as a string or block comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelimitedSpec {
    /// Opening literal.
    pub open: String,
    /// Closing literal.
    pub close: String,
    /// Escape character; it and the character after it are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape: Option<char>,
    /// Whether a raw line break may appear before the close.
    #[serde(default)]
    pub multiline: bool,
    /// Whether inner open literals nest.
    #[serde(default)]
    pub nested: bool,
}

/// Numeric literal grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberSpec {
    /// Accept `0x` hexadecimal literals.
    pub hex: bool,
    /// Accept `0o` octal literals.
    pub octal: bool,
    /// Accept `0b` binary literals.
    pub binary: bool,
    /// Accept fractions (`3.14`, `.5`).
    pub float: bool,
    /// Accept exponents (`5e10`).
    pub scientific: bool,
    /// Digit-group separator, such as `_`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,
    /// Trailing type or unit suffixes (`px`, `u32`, `n`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suffixes: Vec<String>,
}

/// A token matcher descriptor.
///
/// The `kind` tag selects the variant when reading JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatcherSpec {
    /// Literal text; with several candidates the longest wins.
    String {
        /// The literal or literals.
        value: Literals,
    },
    /// Literal words bounded by non-word characters on both sides.
    Keywords {
        /// The words.
        words: Vec<String>,
    },
    /// Open/close delimited region.
    Delimited(DelimitedSpec),
    /// From a start marker to the end of the line.
    Line {
        /// The start marker.
        start: String,
    },
    /// A leading class followed by a greedy run of another class.
    CharSequence {
        /// Class of the first character.
        first: CharClassSpec,
        /// Class of every following character.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rest: Option<CharClassSpec>,
    },
    /// A numeric literal.
    Number(NumberSpec),
    /// Sub-matchers that must match back to back.
    Sequence {
        /// The parts in order.
        matchers: Vec<MatcherSpec>,
    },
    /// A regular expression anchored at the current position.
    Pattern {
        /// The expression source.
        regex: String,
    },
}

impl MatcherSpec {
    /// Shorthand for a literal matcher.
    #[must_use]
    pub fn string(value: impl Into<Literals>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    /// Shorthand for a keyword matcher.
    #[must_use]
    pub fn keywords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keywords {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a line matcher.
    #[must_use]
    pub fn line(start: impl Into<String>) -> Self {
        Self::Line {
            start: start.into(),
        }
    }

    /// Shorthand for a regular-expression matcher.
    #[must_use]
    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::Pattern {
            regex: regex.into(),
        }
    }

    /// Returns the descriptor's kind name as written in profiles.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Keywords { .. } => "keywords",
            Self::Delimited(_) => "delimited",
            Self::Line { .. } => "line",
            Self::CharSequence { .. } => "charSequence",
            Self::Number(_) => "number",
            Self::Sequence { .. } => "sequence",
            Self::Pattern { .. } => "pattern",
        }
    }
}
