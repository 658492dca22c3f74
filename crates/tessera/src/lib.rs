//! Data-driven tokenisation and structural analysis.
//!
//! Tessera turns declarative [`LanguageProfile`]s into lexers and runs them
//! over source text. One engine serves every language: profiles describe
//! character classes, matchers, and lexer states, plus optional structural
//! rules used to pair brackets, find declarations, and compute folding
//! ranges.
//!
//! The pipeline:
//!
//! - **Resolution** merges a profile with its `extends` chain
//!   ([`resolve_profile`])
//! - **Compilation** turns the lexer half into a [`CompiledLexer`], cached
//!   per profile by [`LexerCache`]
//! - **Scanning** produces a total, lossless [`Token`] stream
//! - **Structure** pairs brackets ([`track_blocks`]), finds declarations
//!   ([`SymbolDetector`]) and foldable regions ([`fold_ranges`])
//!
//! # Built-in languages
//!
//! [`Engine::with_builtins`] registers profiles for TypeScript, JavaScript,
//! Python, Go, Rust, Java, C#, C, C++, Ruby, PHP, Kotlin, Swift, CSS, SCSS,
//! HTML, XML, JSON, YAML, SQL, shell, Markdown, and TOML. User profiles registered
//! afterwards replace built-ins with the same name or extension.
//!
//! # Example
//!
//! ```
//! use tessera::{Engine, TokenCategory};
//!
//! let mut engine = Engine::with_builtins()?;
//! engine.register_json(r#"{
//!     "name": "ini",
//!     "fileExtensions": [".ini"],
//!     "lexer": {
//!         "tokenTypes": { "section": "tag", "comment": "comment" },
//!         "states": {
//!             "default": [
//!                 { "match": { "kind": "delimited", "open": "[", "close": "]" },
//!                   "token": "section" },
//!                 { "match": { "kind": "line", "start": ";" }, "token": "comment" }
//!             ]
//!         }
//!     }
//! }"#)?;
//!
//! let tokens = engine.tokenize("[core]", "ini")?;
//! assert_eq!(tokens.first().map(|t| t.category), Some(TokenCategory::Tag));
//! # Ok::<(), tessera::TesseraError>(())
//! ```

mod blocks;
mod builtin;
mod cache;
mod charclass;
mod engine;
mod error;
mod folding;
mod lexer;
mod matcher;
mod reader;
mod registry;
mod resolve;
mod state;
mod symbols;

pub use blocks::track_blocks;
pub use builtin::{builtin_names, builtin_profiles, parse_profile};
pub use cache::LexerCache;
pub use charclass::CharClass;
pub use engine::{Analysis, Engine};
pub use error::TesseraError;
pub use folding::{COMMENT_FOLD, fold_ranges};
pub use lexer::{CompiledLexer, ERROR_TOKEN};
pub use matcher::{Delimited, KeywordSet, LiteralSet, Matcher, NumberMatcher};
pub use reader::{CharReader, Snapshot};
pub use registry::{ProfileRegistry, normalize_extension};
pub use resolve::resolve_profile;
pub use state::{StateId, StateStack};
pub use symbols::SymbolDetector;
pub use tessera_core::{
    BlockRule, BlockSpan, BodyStyle, CharClassSpec, DelimitedSpec, EngineConfig, FoldRange,
    FoldingConfig, LanguageProfile, LexerConfig, MatcherSpec, NumberSpec, PatternStep, Position,
    PredefinedClass, Range, RuleSpec, StructureConfig, Symbol, SymbolRule, Token, TokenCategory,
    TokenStep,
};
