//! The analysis facade.

use std::path::Path;
use std::sync::Arc;

use tessera_core::{
    BlockSpan, EngineConfig, FoldRange, LanguageProfile, StructureConfig, Symbol, Token,
};

use crate::blocks::track_blocks;
use crate::cache::LexerCache;
use crate::error::TesseraError;
use crate::folding::fold_ranges;
use crate::lexer::CompiledLexer;
use crate::registry::ProfileRegistry;
use crate::symbols::SymbolDetector;

/// Tokens plus the structure found in them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    /// Every token, in source order.
    pub tokens: Vec<Token>,
    /// Matched bracket pairs, ordered by open index.
    pub spans: Vec<BlockSpan>,
    /// Declarations, sorted by start line.
    pub symbols: Vec<Symbol>,
}

/// Tokenises and analyses source text using registered language profiles.
///
/// Languages are named either by profile name or by file extension.
/// Compiled lexers are cached per profile, so repeated calls for the same
/// language only pay for scanning.
///
/// # Example
///
/// ```
/// use tessera::Engine;
///
/// let engine = Engine::with_builtins()?;
/// let tokens = engine.tokenize("const x = 1;", "ts")?;
/// assert_eq!(tokens.first().map(|t| t.token_type.as_str()), Some("keyword"));
///
/// let symbols = engine.extract_symbols("fn main() {\n}\n", "rust")?;
/// assert_eq!(symbols.first().map(|s| s.name.as_str()), Some("main"));
/// # Ok::<(), tessera::TesseraError>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    registry: ProfileRegistry,
    cache: LexerCache,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ProfileRegistry::new(), EngineConfig::default())
    }
}

impl Engine {
    /// Creates an engine over `registry`.
    #[must_use]
    pub fn new(registry: ProfileRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            cache: LexerCache::new(config.lexer_cache_capacity()),
            config,
        }
    }

    /// Creates an engine with the built-in profiles and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if a built-in profile is malformed.
    pub fn with_builtins() -> Result<Self, TesseraError> {
        Ok(Self::new(
            ProfileRegistry::with_builtins()?,
            EngineConfig::default(),
        ))
    }

    /// Creates an engine with no profiles and the given settings.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(ProfileRegistry::new(), config)
    }

    /// Returns the engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the profile registry.
    #[must_use]
    pub const fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Registers a profile, replacing any profile with the same name or
    /// extension.
    pub fn register_profile(&mut self, profile: impl Into<Arc<LanguageProfile>>) {
        self.registry.register(profile);
    }

    /// Parses and registers a JSON profile.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if the document is not a profile.
    pub fn register_json(&mut self, json: &str) -> Result<(), TesseraError> {
        self.registry.register_json(json)
    }

    /// Returns the resolved profile for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::UnknownLanguage`] for unregistered names and
    /// [`TesseraError::Config`] when inheritance fails.
    pub fn profile(&self, language: &str) -> Result<Arc<LanguageProfile>, TesseraError> {
        self.registry.resolve(language)
    }

    /// Returns the resolved profile for `path`'s extension.
    ///
    /// # Errors
    ///
    /// As for [`profile`](Self::profile).
    pub fn profile_for_path(&self, path: &Path) -> Result<Arc<LanguageProfile>, TesseraError> {
        self.registry.resolve_path(path)
    }

    /// Returns the compiled lexer for `language`, compiling on first use.
    ///
    /// # Errors
    ///
    /// As for [`profile`](Self::profile), plus [`TesseraError::Config`] when
    /// the lexer does not compile.
    pub fn compiled_lexer(&self, language: &str) -> Result<Arc<CompiledLexer>, TesseraError> {
        let profile = self.profile(language)?;
        self.lexer_for(&profile)
    }

    /// Splits `source` into tokens.
    ///
    /// # Errors
    ///
    /// As for [`compiled_lexer`](Self::compiled_lexer).
    pub fn tokenize(&self, source: &str, language: &str) -> Result<Vec<Token>, TesseraError> {
        Ok(self.compiled_lexer(language)?.tokenize(source))
    }

    /// Returns the bracket pairs in `source`.
    ///
    /// # Errors
    ///
    /// As for [`compiled_lexer`](Self::compiled_lexer).
    pub fn block_spans(&self, source: &str, language: &str) -> Result<Vec<BlockSpan>, TesseraError> {
        let profile = self.profile(language)?;
        let tokens = self.lexer_for(&profile)?.tokenize(source);
        Ok(structure_of(&profile).map_or_else(Vec::new, |structure| {
            track_blocks(&tokens, &structure.blocks)
        }))
    }

    /// Returns the declarations in `source`. Profiles without structural
    /// rules yield no symbols.
    ///
    /// # Errors
    ///
    /// As for [`compiled_lexer`](Self::compiled_lexer).
    pub fn extract_symbols(&self, source: &str, language: &str) -> Result<Vec<Symbol>, TesseraError> {
        Ok(self.analyze(source, language)?.symbols)
    }

    /// Returns the foldable regions in `source`.
    ///
    /// # Errors
    ///
    /// As for [`compiled_lexer`](Self::compiled_lexer).
    pub fn extract_folds(&self, source: &str, language: &str) -> Result<Vec<FoldRange>, TesseraError> {
        let profile = self.profile(language)?;
        let Some(folding) = structure_of(&profile).and_then(|s| s.folding.as_ref()) else {
            return Ok(Vec::new());
        };
        let analysis = self.analyze_with(&profile, source)?;
        Ok(fold_ranges(&analysis.tokens, &analysis.spans, folding))
    }

    /// Tokenises `source` and runs block and symbol analysis over it.
    ///
    /// # Errors
    ///
    /// As for [`compiled_lexer`](Self::compiled_lexer).
    pub fn analyze(&self, source: &str, language: &str) -> Result<Analysis, TesseraError> {
        let profile = self.profile(language)?;
        self.analyze_with(&profile, source)
    }

    fn analyze_with(
        &self,
        profile: &LanguageProfile,
        source: &str,
    ) -> Result<Analysis, TesseraError> {
        let lexer = self.lexer_for(profile)?;
        let tokens = lexer.tokenize(source);
        let Some(structure) = structure_of(profile) else {
            return Ok(Analysis {
                tokens,
                ..Analysis::default()
            });
        };
        let spans = track_blocks(&tokens, &structure.blocks);
        let symbols = SymbolDetector::new(source, &tokens, &spans, &lexer, &self.config)
            .detect(&structure.symbols);
        Ok(Analysis {
            tokens,
            spans,
            symbols,
        })
    }

    fn lexer_for(&self, profile: &LanguageProfile) -> Result<Arc<CompiledLexer>, TesseraError> {
        self.cache.get_or_compile(&profile.name, &profile.lexer)
    }
}

fn structure_of(profile: &LanguageProfile) -> Option<&StructureConfig> {
    profile.structure.as_ref()
}
