//! Tests for engine configuration.

use crate::EngineConfig;

#[test]
fn defaults_match_documented_values() {
    let config = EngineConfig::default();
    assert_eq!(config.lexer_cache_capacity(), 64);
    assert_eq!(config.max_skip_lookahead(), 50);
    assert_eq!(config.default_tab_width(), 4);
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config: EngineConfig =
        serde_json::from_str(r#"{ "maxSkipLookahead": 12 }"#).expect("parse config");
    assert_eq!(config.max_skip_lookahead(), 12);
    assert_eq!(config.lexer_cache_capacity(), 64);
}

#[test]
fn builders_override_values() {
    let config = EngineConfig::new(1, 2, 3)
        .with_lexer_cache_capacity(8)
        .with_default_tab_width(2);
    assert_eq!(config, EngineConfig::new(8, 2, 2));
}
