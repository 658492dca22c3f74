//! Built-in language profiles.
//!
//! The profiles live as JSON documents under `profiles/` and are embedded
//! at compile time. They are parsed once, on first use, and shared by every
//! registry created afterwards.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tessera_core::LanguageProfile;

use crate::error::TesseraError;

macro_rules! profile_source {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!("../../profiles/", $name, ".json")),
        )
    };
}

const SOURCES: &[(&str, &str)] = &[
    profile_source!("c"),
    profile_source!("cpp"),
    profile_source!("csharp"),
    profile_source!("css"),
    profile_source!("go"),
    profile_source!("html"),
    profile_source!("java"),
    profile_source!("javascript"),
    profile_source!("json"),
    profile_source!("kotlin"),
    profile_source!("markdown"),
    profile_source!("php"),
    profile_source!("python"),
    profile_source!("ruby"),
    profile_source!("rust"),
    profile_source!("scss"),
    profile_source!("shell"),
    profile_source!("sql"),
    profile_source!("swift"),
    profile_source!("toml"),
    profile_source!("typescript"),
    profile_source!("xml"),
    profile_source!("yaml"),
];

static BUILTINS: Lazy<Result<Vec<Arc<LanguageProfile>>, (String, String)>> = Lazy::new(|| {
    SOURCES
        .iter()
        .map(|(name, json)| {
            serde_json::from_str::<LanguageProfile>(json)
                .map(Arc::new)
                .map_err(|err| ((*name).to_owned(), err.to_string()))
        })
        .collect()
});

/// Returns the built-in profiles, parsing them on first call.
///
/// # Errors
///
/// Returns [`TesseraError::Config`] if an embedded document is malformed.
pub fn builtin_profiles() -> Result<&'static [Arc<LanguageProfile>], TesseraError> {
    match &*BUILTINS {
        Ok(profiles) => Ok(profiles),
        Err((name, message)) => Err(TesseraError::config(name.as_str(), message.as_str())),
    }
}

/// Returns the names of the built-in profiles.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(name, _)| *name)
}

/// Parses one JSON profile document, attributing errors to `origin`.
///
/// # Errors
///
/// Returns [`TesseraError::Config`] when the document does not describe a
/// profile.
pub fn parse_profile(origin: &str, json: &str) -> Result<LanguageProfile, TesseraError> {
    serde_json::from_str(json).map_err(|err| TesseraError::config(origin, err.to_string()))
}
