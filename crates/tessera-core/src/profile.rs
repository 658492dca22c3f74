//! Declarative language profiles.
//!
//! A [`LanguageProfile`] is everything the engine knows about a language:
//! the lexer rules, the structural rules used for block and symbol
//! discovery, and descriptive metadata. Profiles may extend a parent
//! profile by name; the engine merges the chain before compiling.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matcher::{CharClassSpec, MatcherSpec};
use crate::token::TokenCategory;

/// State entered when a lexer config names no initial state.
pub const DEFAULT_STATE: &str = "default";

const fn default_tab_width() -> u32 {
    4
}

const fn default_min_lines() -> u32 {
    2
}

/// One lexer rule: a matcher, the token type it emits, and an optional
/// state transition applied after emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    /// What the rule matches.
    #[serde(rename = "match")]
    pub matcher: MatcherSpec,
    /// Token type name for the emitted token.
    pub token: String,
    /// State to push after emitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<String>,
    /// Whether to pop the current state after emitting.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pop: bool,
    /// State that replaces the current one after emitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_to: Option<String>,
}

impl RuleSpec {
    /// Creates a rule without a state transition.
    #[must_use]
    pub fn new(matcher: MatcherSpec, token: impl Into<String>) -> Self {
        Self {
            matcher,
            token: token.into(),
            push: None,
            pop: false,
            switch_to: None,
        }
    }

    /// Pushes `state` after the rule fires.
    #[must_use]
    pub fn push(mut self, state: impl Into<String>) -> Self {
        self.push = Some(state.into());
        self
    }

    /// Pops the current state after the rule fires.
    #[must_use]
    pub const fn pop(mut self) -> Self {
        self.pop = true;
        self
    }

    /// Replaces the current state after the rule fires.
    #[must_use]
    pub fn switch_to(mut self, state: impl Into<String>) -> Self {
        self.switch_to = Some(state.into());
        self
    }
}

/// Indentation measurement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndentationConfig {
    /// Visual width of a tab when measuring indentation.
    #[serde(default = "default_tab_width")]
    pub tab_width: u32,
}

impl Default for IndentationConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
        }
    }
}

/// The lexical half of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexerConfig {
    /// Named character classes available to `ref` descriptors.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub char_classes: BTreeMap<String, CharClassSpec>,
    /// Token type name to presentation category.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub token_types: BTreeMap<String, TokenCategory>,
    /// Rule lists keyed by state name, tried in declaration order.
    #[serde(default)]
    pub states: BTreeMap<String, Vec<RuleSpec>>,
    /// The state the lexer starts in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<String>,
    /// Token types ignored by structural analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_tokens: Option<Vec<String>>,
    /// Indentation measurement settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indentation: Option<IndentationConfig>,
}

impl LexerConfig {
    /// Returns the initial state name, falling back to [`DEFAULT_STATE`].
    #[must_use]
    pub fn initial_state_name(&self) -> &str {
        self.initial_state.as_deref().unwrap_or(DEFAULT_STATE)
    }

    /// Returns the category for a token type, `plain` when undeclared.
    #[must_use]
    pub fn category_of(&self, token_type: &str) -> TokenCategory {
        self.token_types
            .get(token_type)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the skip-token type names, empty when undeclared.
    #[must_use]
    pub fn skip_token_types(&self) -> &[String] {
        self.skip_tokens.as_deref().unwrap_or_default()
    }
}

/// A bracket-like pair tracked by the block span tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRule {
    /// Block kind name, such as `"braces"`.
    pub name: String,
    /// Literal value of the opening token.
    pub open: String,
    /// Literal value of the closing token.
    pub close: String,
}

impl BlockRule {
    /// Creates a block rule.
    #[must_use]
    pub fn new(name: impl Into<String>, open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: open.into(),
            close: close.into(),
        }
    }
}

/// How a declaration's body extent is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyStyle {
    /// The next `braces` block span.
    Braces,
    /// Following lines indented deeper than the declaration.
    Indentation,
}

/// A single-token pattern step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStep {
    /// Required token type.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Required literal value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Name under which to capture the token text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<String>,
}

impl TokenStep {
    /// Matches any token of `token_type`.
    #[must_use]
    pub fn of(token_type: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            value: None,
            capture: None,
        }
    }

    /// Requires the literal `value`.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Captures the matched token under `name`.
    #[must_use]
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.capture = Some(name.into());
        self
    }
}

/// Bounded lookahead settings for a skip step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkipStep {
    /// Number of positions at which the next step is tried, starting with
    /// the current one; `max` tokens of lookahead skip at most `max - 1`.
    /// Uses the engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

/// One step of a symbol pattern.
///
/// Written in JSON as a single-key object: `{"token": {...}}`,
/// `{"optional": {...}}`, `{"anyOf": [...]}` or `{"skip": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternStep {
    /// Exactly one matching token.
    Token(TokenStep),
    /// One matching token, or nothing.
    Optional(TokenStep),
    /// The first alternative that matches one token.
    AnyOf(Vec<TokenStep>),
    /// Skip ahead until the next step matches.
    Skip(SkipStep),
}

/// A declaration pattern and how to find the declaration's extent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRule {
    /// Rule name, used as the symbol name when nothing is captured.
    pub name: String,
    /// Symbol kind reported for matches.
    pub kind: String,
    /// Steps matched against the filtered token stream.
    pub pattern: Vec<PatternStep>,
    /// Whether the declaration has a body.
    #[serde(default)]
    pub has_body: bool,
    /// How the body is located. Defaults to braces when `has_body` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_style: Option<BodyStyle>,
}

/// Folding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldingConfig {
    /// Block rule names whose spans fold.
    #[serde(default)]
    pub blocks: Vec<String>,
    /// Whether multi-line comment tokens fold.
    #[serde(default)]
    pub comments: bool,
    /// Minimum number of lines a region needs to fold.
    #[serde(default = "default_min_lines")]
    pub min_lines: u32,
}

impl Default for FoldingConfig {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            comments: false,
            min_lines: default_min_lines(),
        }
    }
}

/// The structural half of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Bracket pairs.
    #[serde(default)]
    pub blocks: Vec<BlockRule>,
    /// Declaration patterns, in priority order.
    #[serde(default)]
    pub symbols: Vec<SymbolRule>,
    /// Folding settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folding: Option<FoldingConfig>,
}

/// A language embedded in another, such as scripts inside markup.
///
/// Descriptive only; the engine does not switch profiles mid-stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedLanguage {
    /// Embedded language name.
    pub language: String,
    /// Text that opens the embedded region.
    pub open: String,
    /// Text that closes the embedded region.
    pub close: String,
}

/// A complete language description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    /// Registry key, conventionally lower case.
    pub name: String,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// File extensions, with or without the leading dot.
    #[serde(default)]
    pub file_extensions: Vec<String>,
    /// MIME types.
    #[serde(default)]
    pub mime_types: Vec<String>,
    /// Lexer rules. Shared so that the compiled-lexer cache can key on the
    /// identity of this allocation.
    #[serde(default)]
    pub lexer: Arc<LexerConfig>,
    /// Structural rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureConfig>,
    /// Descriptive grammar metadata; never executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<serde_json::Value>,
    /// Embedded language descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_languages: Option<Vec<EmbeddedLanguage>>,
    /// Name of the parent profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

impl LanguageProfile {
    /// Creates a profile with the given name and lexer.
    #[must_use]
    pub fn new(name: impl Into<String>, lexer: LexerConfig) -> Self {
        let registry_name = name.into();
        Self {
            display_name: registry_name.clone(),
            name: registry_name,
            lexer: Arc::new(lexer),
            ..Self::default()
        }
    }

    /// Returns the display name, falling back to the registry name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
