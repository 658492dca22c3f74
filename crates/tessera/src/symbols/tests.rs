//! Unit tests for symbol detection.

use rstest::{fixture, rstest};
use tessera_core::{EngineConfig, LanguageProfile, Position, Symbol, SymbolRule};

use super::SymbolDetector;
use crate::blocks::track_blocks;
use crate::lexer::CompiledLexer;

const CURLY_LEXER: &str = r##"{
    "tokenTypes": {
        "whitespace": "whitespace", "newline": "newline", "comment": "comment",
        "keyword": "keyword", "identifier": "identifier", "number": "number",
        "punctuation": "punctuation"
    },
    "states": {
        "default": [
            { "match": { "kind": "charSequence",
                         "first": { "kind": "predefined", "name": "whitespace" },
                         "rest": { "kind": "predefined", "name": "whitespace" } },
              "token": "whitespace" },
            { "match": { "kind": "pattern", "regex": "\\r\\n|\\n|\\r" }, "token": "newline" },
            { "match": { "kind": "line", "start": "//" }, "token": "comment" },
            { "match": { "kind": "line", "start": "#" }, "token": "comment" },
            { "match": { "kind": "keywords",
                         "words": ["fn", "let", "mut", "pub", "struct", "def", "pass"] },
              "token": "keyword" },
            { "match": { "kind": "charSequence",
                         "first": { "kind": "union", "classes": [
                             { "kind": "predefined", "name": "letter" },
                             { "kind": "chars", "chars": "_" } ] },
                         "rest": { "kind": "union", "classes": [
                             { "kind": "predefined", "name": "alphanumeric" },
                             { "kind": "chars", "chars": "_" } ] } },
              "token": "identifier" },
            { "match": { "kind": "number" }, "token": "number" },
            { "match": { "kind": "string",
                         "value": ["{", "}", "(", ")", "[", "]", ";", ":", "=", ","] },
              "token": "punctuation" }
        ]
    },
    "skipTokens": ["whitespace", "newline", "comment"]
}"##;

fn profile(symbols: &str) -> LanguageProfile {
    let json = format!(
        r#"{{
            "name": "curly",
            "lexer": {CURLY_LEXER},
            "structure": {{
                "blocks": [
                    {{ "name": "braces", "open": "{{", "close": "}}" }},
                    {{ "name": "parens", "open": "(", "close": ")" }}
                ],
                "symbols": {symbols}
            }}
        }}"#
    );
    serde_json::from_str(&json).expect("profile parses")
}

fn detect_with(profile: &LanguageProfile, source: &str, config: &EngineConfig) -> Vec<Symbol> {
    let lexer = CompiledLexer::compile(&profile.name, &profile.lexer).expect("lexer compiles");
    let tokens = lexer.tokenize(source);
    let structure = profile.structure.as_ref().expect("structure");
    let spans = track_blocks(&tokens, &structure.blocks);
    SymbolDetector::new(source, &tokens, &spans, &lexer, config).detect(&structure.symbols)
}

fn detect(profile: &LanguageProfile, source: &str) -> Vec<Symbol> {
    detect_with(profile, source, &EngineConfig::default())
}

fn summary(symbols: &[Symbol]) -> Vec<(&str, &str, u32, u32)> {
    symbols
        .iter()
        .map(|symbol| {
            (
                symbol.name.as_str(),
                symbol.kind.as_str(),
                symbol.start_line,
                symbol.end_line,
            )
        })
        .collect()
}

fn curly_profile() -> LanguageProfile {
    profile(
        r#"[
            { "name": "function", "kind": "function", "hasBody": true, "pattern": [
                { "token": { "type": "keyword", "value": "fn" } },
                { "token": { "type": "identifier", "capture": "name" } }
            ] },
            { "name": "struct", "kind": "class", "hasBody": true, "bodyStyle": "braces",
              "pattern": [
                { "optional": { "type": "keyword", "value": "pub" } },
                { "token": { "type": "keyword", "value": "struct" } },
                { "token": { "type": "identifier", "capture": "name" } }
            ] },
            { "name": "variable", "kind": "variable", "pattern": [
                { "token": { "type": "keyword", "value": "let" } },
                { "optional": { "type": "keyword", "value": "mut" } },
                { "token": { "type": "identifier", "capture": "name" } }
            ] }
        ]"#,
    )
}

#[fixture]
fn curly() -> LanguageProfile {
    curly_profile()
}

const CURLY_SOURCE: &str = "fn main() {
    let x = 1;
    let mut y = (2,
        3);
}
pub struct Point { x: i32 }
let z = 4 // trailing";

#[rstest]
fn declarations_are_found_and_sorted(curly: LanguageProfile) {
    let symbols = detect(&curly, CURLY_SOURCE);
    assert_eq!(
        summary(&symbols),
        [
            ("main", "function", 1, 5),
            ("x", "variable", 2, 2),
            ("y", "variable", 3, 4),
            ("Point", "class", 6, 6),
            ("z", "variable", 7, 7),
        ]
    );
}

#[rstest]
fn ranges_cover_declarations(curly: LanguageProfile) {
    let symbols = detect(&curly, CURLY_SOURCE);
    let main = symbols.first().expect("main");
    let name = main.name_range.expect("name range");
    assert_eq!((name.start.line, name.start.column), (1, 3));
    assert_eq!((name.end.line, name.end.column), (1, 7));
    assert_eq!(main.content_range.start, Position::start());
    assert_eq!(main.content_range.end.line, 5);

    let point = symbols.get(3).expect("Point");
    assert_eq!(point.content_range.start.column, 0);

    let z = symbols.get(4).expect("z");
    let source_tail = CURLY_SOURCE
        .get(z.content_range.start.offset..z.content_range.end.offset)
        .expect("valid range");
    assert_eq!(source_tail, "let z = 4");
}

#[test]
fn earlier_rules_claim_tokens_first() {
    let profile = profile(
        r#"[
            { "name": "function", "kind": "function", "pattern": [
                { "token": { "type": "keyword", "value": "fn" } },
                { "token": { "type": "identifier", "capture": "name" } }
            ] },
            { "name": "call", "kind": "call", "pattern": [
                { "token": { "type": "identifier", "capture": "name" } },
                { "token": { "type": "punctuation", "value": "(" } }
            ] }
        ]"#,
    );
    let symbols = detect(&profile, "fn main() {}\nrun()");
    assert_eq!(
        summary(&symbols),
        [("main", "function", 1, 1), ("run", "call", 2, 2)]
    );
}

#[rstest]
#[case(r#"[{ "token": { "type": "keyword", "value": "let" } },
           { "skip": {} },
           { "token": { "type": "punctuation", "value": "=" } }]"#, "binding")]
#[case(r#"[{ "token": { "type": "keyword", "value": "let" } },
           { "skip": {} },
           { "token": { "type": "identifier", "capture": "target" } },
           { "token": { "type": "punctuation", "value": "=" } }]"#, "y")]
fn names_fall_back_to_captures_then_rule(#[case] pattern: &str, #[case] expected: &str) {
    let rule: SymbolRule = serde_json::from_str(&format!(
        r#"{{ "name": "binding", "kind": "variable", "pattern": {pattern} }}"#
    ))
    .expect("rule parses");
    let mut profile = curly_profile();
    if let Some(structure) = profile.structure.as_mut() {
        structure.symbols = vec![rule];
    }
    let symbols = detect(&profile, "let mut y = 2;");
    assert_eq!(symbols.first().map(|s| s.name.as_str()), Some(expected));
}

#[test]
fn skip_uses_the_engine_lookahead_default() {
    let profile = profile(
        r#"[{ "name": "binding", "kind": "variable", "pattern": [
            { "token": { "type": "keyword", "value": "let" } },
            { "skip": {} },
            { "token": { "type": "punctuation", "value": "=" } }
        ] }]"#,
    );
    let source = "let mut y = 2;";
    assert_eq!(detect(&profile, source).len(), 1);
    let tight = EngineConfig::default().with_max_skip_lookahead(1);
    assert!(detect_with(&profile, source, &tight).is_empty());
}

#[test]
fn explicit_skip_bound_wins() {
    let profile = profile(
        r#"[{ "name": "binding", "kind": "variable", "pattern": [
            { "token": { "type": "keyword", "value": "let" } },
            { "skip": { "max": 2 } },
            { "token": { "type": "punctuation", "value": "=" } }
        ] }]"#,
    );
    assert_eq!(detect(&profile, "let y = 2;").len(), 1);
    assert!(detect(&profile, "let mut y = 2;").is_empty());
}

#[test]
fn skip_bound_counts_lookahead_positions() {
    let profile = profile(
        r#"[{ "name": "binding", "kind": "variable", "pattern": [
            { "token": { "type": "keyword", "value": "let" } },
            { "skip": { "max": 1 } },
            { "token": { "type": "punctuation", "value": "=" } }
        ] }]"#,
    );
    assert!(detect(&profile, "let a = 1").is_empty());
    assert_eq!(detect(&profile, "let = 1").len(), 1);
}

#[test]
fn patterns_must_bind_a_token() {
    let profile = profile(
        r#"[
            { "name": "nothing", "kind": "none", "pattern": [{ "skip": {} }] },
            { "name": "maybe", "kind": "none", "pattern": [
                { "optional": { "type": "keyword", "value": "pub" } }
            ] }
        ]"#,
    );
    let symbols = detect(&profile, "let x = 1;\npub");
    assert_eq!(summary(&symbols), [("maybe", "none", 2, 2)]);
}

#[test]
fn braces_fall_back_to_statement_end() {
    let profile = profile(
        r#"[{ "name": "function", "kind": "function", "hasBody": true, "pattern": [
            { "token": { "type": "keyword", "value": "fn" } },
            { "token": { "type": "identifier", "capture": "name" } }
        ] }]"#,
    );
    let symbols = detect(&profile, "fn decl(a,\n  b);\nx");
    assert_eq!(summary(&symbols), [("decl", "function", 1, 2)]);
}

#[test]
fn indentation_bodies_follow_deeper_lines() {
    let profile = profile(
        r#"[{ "name": "def", "kind": "function", "hasBody": true, "bodyStyle": "indentation",
             "pattern": [
                { "token": { "type": "keyword", "value": "def" } },
                { "token": { "type": "identifier", "capture": "name" } }
             ] }]"#,
    );
    let source = "def outer():\n    x = 1\n\n    def inner():\n        pass\n    # note\ny = 2\n";
    let symbols = detect(&profile, source);
    assert_eq!(
        summary(&symbols),
        [("outer", "function", 1, 5), ("inner", "function", 4, 5)]
    );
}

#[test]
fn tabs_expand_to_the_profile_width() {
    let mut profile = profile(
        r#"[{ "name": "def", "kind": "function", "hasBody": true, "bodyStyle": "indentation",
             "pattern": [
                { "token": { "type": "keyword", "value": "def" } },
                { "token": { "type": "identifier", "capture": "name" } }
             ] }]"#,
    );
    let source = "  def f():\n\tpass\n";
    assert_eq!(summary(&detect(&profile, source)), [("f", "function", 1, 2)]);

    let lexer = std::sync::Arc::make_mut(&mut profile.lexer);
    lexer.indentation = Some(tessera_core::IndentationConfig { tab_width: 1 });
    assert_eq!(summary(&detect(&profile, source)), [("f", "function", 1, 1)]);
}
