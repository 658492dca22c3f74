//! Core data model for the Tessera tokenizer engine.
//!
//! This crate holds the types shared between the engine and the consumers of
//! its output: source positions, tokens, block spans, symbols, and the
//! declarative language profiles that configure the engine. Everything here
//! is plain data with `serde` derives, so profiles can be authored as JSON
//! and token streams handed to renderers unchanged.
//!
//! # Core types
//!
//! - [`Position`] and [`Range`]: line/column/byte source locations
//! - [`Token`] and [`TokenCategory`]: the lexical output
//! - [`BlockSpan`], [`Symbol`], [`FoldRange`]: the structural output
//! - [`LanguageProfile`] and friends: declarative language configuration
//! - [`EngineConfig`]: engine-wide limits and defaults
//!
//! # Example
//!
//! ```
//! use tessera_core::{LanguageProfile, TokenCategory};
//!
//! let profile: LanguageProfile = serde_json::from_str(r#"{
//!     "name": "digits",
//!     "lexer": {
//!         "tokenTypes": { "number": "number" },
//!         "states": {
//!             "default": [
//!                 { "match": { "kind": "number" }, "token": "number" }
//!             ]
//!         }
//!     }
//! }"#)?;
//! assert_eq!(profile.lexer.category_of("number"), TokenCategory::Number);
//! # Ok::<(), serde_json::Error>(())
//! ```

mod config;
mod matcher;
mod profile;
mod span;
mod structure;
mod token;

pub use config::EngineConfig;
pub use matcher::{CharClassSpec, DelimitedSpec, Literals, MatcherSpec, NumberSpec, PredefinedClass};
pub use profile::{
    BlockRule, BodyStyle, DEFAULT_STATE, EmbeddedLanguage, FoldingConfig, IndentationConfig,
    LanguageProfile, LexerConfig, PatternStep, RuleSpec, SkipStep, StructureConfig, SymbolRule,
    TokenStep,
};
pub use span::{Position, Range};
pub use structure::{BlockSpan, FoldRange, Symbol};
pub use token::{Token, TokenCategory};

#[cfg(test)]
mod tests;
