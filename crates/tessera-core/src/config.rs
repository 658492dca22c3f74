//! Engine configuration for cache sizing and analysis limits.

use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// # Defaults
///
/// - `lexer_cache_capacity`: 64 compiled lexers
/// - `max_skip_lookahead`: 50 tokens
/// - `default_tab_width`: 4 columns
///
/// # Example
///
/// ```
/// use tessera_core::EngineConfig;
///
/// let config = EngineConfig::default().with_max_skip_lookahead(20);
/// assert_eq!(config.max_skip_lookahead(), 20);
/// assert_eq!(config.lexer_cache_capacity(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Number of compiled lexers kept before least-recently-used eviction.
    lexer_cache_capacity: usize,
    /// Lookahead bound for skip steps that do not declare one.
    max_skip_lookahead: usize,
    /// Tab width for profiles without an indentation section.
    default_tab_width: u32,
}

impl EngineConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(
        lexer_cache_capacity: usize,
        max_skip_lookahead: usize,
        default_tab_width: u32,
    ) -> Self {
        Self {
            lexer_cache_capacity,
            max_skip_lookahead,
            default_tab_width,
        }
    }

    /// Returns the lexer cache capacity. Zero is treated as one.
    #[must_use]
    pub const fn lexer_cache_capacity(&self) -> usize {
        self.lexer_cache_capacity
    }

    /// Returns the default skip-step lookahead bound.
    #[must_use]
    pub const fn max_skip_lookahead(&self) -> usize {
        self.max_skip_lookahead
    }

    /// Returns the default tab width.
    #[must_use]
    pub const fn default_tab_width(&self) -> u32 {
        self.default_tab_width
    }

    /// Sets the lexer cache capacity.
    #[must_use]
    pub const fn with_lexer_cache_capacity(mut self, capacity: usize) -> Self {
        self.lexer_cache_capacity = capacity;
        self
    }

    /// Sets the default skip-step lookahead bound.
    #[must_use]
    pub const fn with_max_skip_lookahead(mut self, max: usize) -> Self {
        self.max_skip_lookahead = max;
        self
    }

    /// Sets the default tab width.
    #[must_use]
    pub const fn with_default_tab_width(mut self, width: u32) -> Self {
        self.default_tab_width = width;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexer_cache_capacity: 64,
            max_skip_lookahead: 50,
            default_tab_width: 4,
        }
    }
}
