//! Profile inheritance.
//!
//! A profile naming a parent in `extends` is merged over the fully resolved
//! parent:
//!
//! - `charClasses` and `tokenTypes`: parent entries, overridden per key
//! - `states`: parent states, with any state the child declares replaced
//!   wholesale
//! - `initialState`, `skipTokens`, `indentation`: child value, else parent
//! - `structure.blocks`: child list if non-empty, else parent list
//! - `structure.symbols`: child rules first, then parent rules
//! - `structure.folding`, `grammar`, `embeddedLanguages`: child, else parent
//! - name, display name, extensions, MIME types: always the child's
//!
//! The result has `extends` cleared.

use std::sync::Arc;

use tessera_core::{LanguageProfile, LexerConfig, StructureConfig};

use crate::error::TesseraError;

/// Resolves `profile`'s inheritance chain using `lookup` to find parents
/// by name.
///
/// A profile without `extends` is returned as the same `Arc`.
///
/// # Errors
///
/// Returns [`TesseraError::Config`] when a parent cannot be found or the
/// chain loops back on itself.
pub fn resolve_profile<F>(
    profile: &Arc<LanguageProfile>,
    lookup: F,
) -> Result<Arc<LanguageProfile>, TesseraError>
where
    F: Fn(&str) -> Option<Arc<LanguageProfile>>,
{
    let mut chain = Vec::new();
    resolve_chain(profile, &lookup, &mut chain)
}

fn resolve_chain<F>(
    profile: &Arc<LanguageProfile>,
    lookup: &F,
    chain: &mut Vec<String>,
) -> Result<Arc<LanguageProfile>, TesseraError>
where
    F: Fn(&str) -> Option<Arc<LanguageProfile>>,
{
    let Some(parent_name) = profile.extends.as_deref() else {
        return Ok(Arc::clone(profile));
    };
    chain.push(profile.name.clone());
    if chain.iter().any(|seen| seen == parent_name) {
        let root = chain.first().map_or(profile.name.as_str(), String::as_str);
        return Err(TesseraError::config(
            root,
            format!("extends cycle: {} -> {parent_name}", chain.join(" -> ")),
        ));
    }
    let declared = lookup(parent_name).ok_or_else(|| {
        TesseraError::config(
            profile.name.as_str(),
            format!("unknown parent profile '{parent_name}'"),
        )
    })?;
    let parent = resolve_chain(&declared, lookup, chain)?;
    Ok(Arc::new(merge(profile, &parent)))
}

fn merge(child: &LanguageProfile, parent: &LanguageProfile) -> LanguageProfile {
    LanguageProfile {
        name: child.name.clone(),
        display_name: child.display_name.clone(),
        file_extensions: child.file_extensions.clone(),
        mime_types: child.mime_types.clone(),
        lexer: Arc::new(merge_lexer(&child.lexer, &parent.lexer)),
        structure: merge_structure(child.structure.as_ref(), parent.structure.as_ref()),
        grammar: child.grammar.clone().or_else(|| parent.grammar.clone()),
        embedded_languages: child
            .embedded_languages
            .clone()
            .or_else(|| parent.embedded_languages.clone()),
        extends: None,
    }
}

fn merge_lexer(child: &LexerConfig, parent: &LexerConfig) -> LexerConfig {
    let mut merged = parent.clone();
    merged.char_classes.extend(child.char_classes.clone());
    merged.token_types.extend(child.token_types.clone());
    merged.states.extend(child.states.clone());
    if child.initial_state.is_some() {
        merged.initial_state.clone_from(&child.initial_state);
    }
    if child.skip_tokens.is_some() {
        merged.skip_tokens.clone_from(&child.skip_tokens);
    }
    if child.indentation.is_some() {
        merged.indentation = child.indentation;
    }
    merged
}

fn merge_structure(
    child: Option<&StructureConfig>,
    parent: Option<&StructureConfig>,
) -> Option<StructureConfig> {
    let (own, inherited) = match (child, parent) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only.clone()),
        (Some(own), Some(inherited)) => (own, inherited),
    };
    let blocks = if own.blocks.is_empty() {
        inherited.blocks.clone()
    } else {
        own.blocks.clone()
    };
    Some(StructureConfig {
        blocks,
        symbols: own
            .symbols
            .iter()
            .chain(&inherited.symbols)
            .cloned()
            .collect(),
        folding: own.folding.clone().or_else(|| inherited.folding.clone()),
    })
}
