//! Language profile registry.
//!
//! The [`ProfileRegistry`] stores profiles keyed by name and by file
//! extension, and hands out resolved profiles (with `extends` chains
//! merged). Resolved profiles are memoised per registered `Arc`, so
//! repeated lookups return the same resolved `Arc` and the compiled-lexer
//! cache stays warm. A profile still reachable through an extension after
//! its name was taken over keeps its own entry. The memo is cleared
//! whenever a profile is registered.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tessera_core::LanguageProfile;
use tracing::{debug, trace};

use crate::builtin;
use crate::error::TesseraError;
use crate::resolve::resolve_profile;

/// Registry of language profiles.
///
/// # Example
///
/// ```
/// use tessera::ProfileRegistry;
///
/// let registry = ProfileRegistry::with_builtins()?;
/// let profile = registry.resolve(".ts")?;
/// assert_eq!(profile.name, "typescript");
/// assert!(profile.extends.is_none());
/// # Ok::<(), tessera::TesseraError>(())
/// ```
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    by_name: HashMap<String, Arc<LanguageProfile>>,
    by_extension: HashMap<String, Arc<LanguageProfile>>,
    resolved: RwLock<HashMap<usize, ResolvedEntry>>,
}

#[derive(Debug)]
struct ResolvedEntry {
    declared: Arc<LanguageProfile>,
    resolved: Arc<LanguageProfile>,
}

impl ProfileRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in profiles.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if a built-in profile fails to parse.
    pub fn with_builtins() -> Result<Self, TesseraError> {
        let mut registry = Self::new();
        for profile in builtin::builtin_profiles()? {
            registry.register(Arc::clone(profile));
        }
        Ok(registry)
    }

    /// Registers `profile` under its name and each of its file extensions.
    /// Later registrations replace earlier ones key by key.
    pub fn register(&mut self, entry: impl Into<Arc<LanguageProfile>>) {
        let profile: Arc<LanguageProfile> = entry.into();
        if self
            .by_name
            .insert(profile.name.clone(), Arc::clone(&profile))
            .is_some()
        {
            debug!(language = %profile.name, "replaced profile registration");
        }
        for extension in &profile.file_extensions {
            let key = normalize_extension(extension);
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = self.by_extension.insert(key.clone(), Arc::clone(&profile))
                && previous.name != profile.name
            {
                debug!(
                    extension = %key,
                    previous = %previous.name,
                    language = %profile.name,
                    "extension now maps to a different profile"
                );
            }
        }
        self.resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!(
            language = %profile.name,
            extensions = profile.file_extensions.len(),
            "registered profile"
        );
    }

    /// Parses a JSON profile document and registers it.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if the document is not a valid
    /// profile.
    pub fn register_json(&mut self, json: &str) -> Result<(), TesseraError> {
        let profile = builtin::parse_profile("<json>", json)?;
        self.register(profile);
        Ok(())
    }

    /// Looks up a profile as registered, before inheritance is applied.
    ///
    /// `key` may be a profile name (matched exactly, then lower-cased) or a
    /// file extension with or without its leading dot, in any case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<LanguageProfile>> {
        self.get_by_name(key)
            .or_else(|| self.by_extension.get(&normalize_extension(key)))
            .cloned()
    }

    /// Looks up a profile and resolves its inheritance chain.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::UnknownLanguage`] when nothing is registered
    /// under `key`, and [`TesseraError::Config`] when inheritance fails.
    pub fn resolve(&self, key: &str) -> Result<Arc<LanguageProfile>, TesseraError> {
        let profile = self
            .get(key)
            .ok_or_else(|| TesseraError::unknown_language(key))?;
        if profile.extends.is_none() {
            return Ok(profile);
        }
        let key = Arc::as_ptr(&profile).addr();
        if let Some(entry) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .filter(|entry| Arc::ptr_eq(&entry.declared, &profile))
        {
            trace!(language = %profile.name, "resolved profile reused");
            return Ok(Arc::clone(&entry.resolved));
        }

        let resolved = resolve_profile(&profile, |parent| self.get_by_name(parent).cloned())?;
        let mut memo = self.resolved.write().unwrap_or_else(PoisonError::into_inner);
        let entry = memo.entry(key).or_insert_with(|| ResolvedEntry {
            declared: Arc::clone(&profile),
            resolved,
        });
        Ok(Arc::clone(&entry.resolved))
    }

    /// Resolves the profile registered for `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::UnknownLanguage`] when the path has no
    /// extension or no profile claims it.
    pub fn resolve_path(&self, path: &Path) -> Result<Arc<LanguageProfile>, TesseraError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(normalize_extension)
            .filter(|ext| self.by_extension.contains_key(ext))
            .ok_or_else(|| TesseraError::unknown_language(path.display().to_string()))?;
        self.resolve(&extension)
    }

    /// Returns the registered profile names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns every registered file extension with its leading dot,
    /// sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .by_extension
            .keys()
            .map(|key| format!(".{key}"))
            .collect();
        extensions.sort_unstable();
        extensions
    }

    /// Returns the number of registered profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` when no profiles are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn get_by_name(&self, name: &str) -> Option<&Arc<LanguageProfile>> {
        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(&name.to_lowercase()))
    }
}

/// Normalises an extension for lookup: trims whitespace and leading dots,
/// then lower-cases.
#[must_use]
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
