//! Identity-keyed cache of compiled lexers.
//!
//! Lexers are keyed by the address of the profile's shared
//! [`LexerConfig`]. Each entry keeps its `Arc` alive, so the address cannot
//! be reused for a different config while the entry is cached. Two configs
//! with equal contents but separate allocations compile separately.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;
use tessera_core::LexerConfig;
use tracing::{debug, trace};

use crate::error::TesseraError;
use crate::lexer::CompiledLexer;

#[derive(Debug)]
struct CacheEntry {
    config: Arc<LexerConfig>,
    lexer: Arc<CompiledLexer>,
}

/// A bounded least-recently-used cache of compiled lexers.
#[derive(Debug)]
pub struct LexerCache {
    entries: Mutex<LruCache<usize, CacheEntry>>,
}

impl LexerCache {
    /// Creates a cache holding at most `capacity` lexers. A capacity of zero
    /// is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(bound)),
        }
    }

    /// Returns the lexer for `config`, compiling it on a miss.
    ///
    /// Compilation happens without holding the lock. If another caller
    /// publishes a lexer for the same config first, that lexer is returned
    /// and this one is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] when the config does not compile.
    /// Failures are not cached.
    pub fn get_or_compile(
        &self,
        language: &str,
        config: &Arc<LexerConfig>,
    ) -> Result<Arc<CompiledLexer>, TesseraError> {
        let key = Arc::as_ptr(config).addr();
        if let Some(lexer) = self.lookup(key, config) {
            trace!(language = %language, "lexer cache hit");
            return Ok(lexer);
        }

        debug!(language = %language, "lexer cache miss");
        let compiled = Arc::new(CompiledLexer::compile(language, config)?);

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries
            .get(&key)
            .filter(|entry| Arc::ptr_eq(&entry.config, config))
        {
            return Ok(Arc::clone(&existing.lexer));
        }
        entries.put(
            key,
            CacheEntry {
                config: Arc::clone(config),
                lexer: Arc::clone(&compiled),
            },
        );
        Ok(compiled)
    }

    /// Returns the number of cached lexers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached lexer.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn lookup(&self, key: usize, config: &Arc<LexerConfig>) -> Option<Arc<CompiledLexer>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&key)
            .filter(|entry| Arc::ptr_eq(&entry.config, config))
            .map(|entry| Arc::clone(&entry.lexer))
    }
}
