//! Error types for profile loading and analysis.
//!
//! Only two things can go wrong: a profile is malformed (detected eagerly,
//! when it is parsed, resolved or compiled) or a caller names a language
//! nobody registered. Scanning itself never fails.

use thiserror::Error;

/// Errors raised by the engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TesseraError {
    /// A profile is malformed: an unresolved char-class reference or parent
    /// profile, a reference cycle, an unknown state, an invalid regular
    /// expression, or a document that does not deserialise.
    #[error("invalid profile '{language}': {message}")]
    Config {
        /// The profile being processed.
        language: String,
        /// Description of the problem.
        message: String,
    },

    /// No profile is registered under the given name or extension.
    #[error("unknown language: '{name}'")]
    UnknownLanguage {
        /// The name or extension that failed to resolve.
        name: String,
    },
}

impl TesseraError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            language: language.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown language error.
    #[must_use]
    pub fn unknown_language(name: impl Into<String>) -> Self {
        Self::UnknownLanguage { name: name.into() }
    }

    /// Returns `true` for configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` for unknown language errors.
    #[must_use]
    pub const fn is_unknown_language(&self) -> bool {
        matches!(self, Self::UnknownLanguage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_language() {
        let err = TesseraError::config("toy", "missing char class 'ident'");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "invalid profile 'toy': missing char class 'ident'"
        );
    }

    #[test]
    fn unknown_language_display() {
        let err = TesseraError::unknown_language("brainfudge");
        assert!(err.is_unknown_language());
        assert_eq!(err.to_string(), "unknown language: 'brainfudge'");
    }
}
