//! Structural analysis output: block spans, symbols and fold ranges.

use serde::{Deserialize, Serialize};

use crate::span::Range;

/// A balanced open/close pair found in a token stream.
///
/// Indices refer to the unfiltered token array the span was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSpan {
    /// The block rule name (for example `"braces"`).
    pub name: String,
    /// Index of the opening token.
    pub open_index: usize,
    /// Index of the closing token.
    pub close_index: usize,
    /// Number of blocks already open at the opening token; zero at top
    /// level.
    pub depth: usize,
}

/// A named structural declaration and the lines it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// The declared name.
    pub name: String,
    /// The rule-defined kind (for example `"function"`).
    pub kind: String,
    /// First line of the declaration (one-based).
    pub start_line: u32,
    /// Last line of the declaration including its body.
    pub end_line: u32,
    /// Range of the token that supplied the name, if one was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_range: Option<Range>,
    /// Range from the first matched token to the end of the body.
    pub content_range: Range,
}

/// A foldable line region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldRange {
    /// First line of the region.
    pub start_line: u32,
    /// Last line of the region.
    pub end_line: u32,
    /// The block name that produced the fold, or `"comment"`.
    pub kind: String,
}
