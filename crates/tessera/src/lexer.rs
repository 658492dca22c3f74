//! Compiled lexers.
//!
//! [`CompiledLexer::compile`] resolves a [`LexerConfig`] into matchers and
//! state ids once; [`CompiledLexer::tokenize`] then runs the state machine
//! over source text. Tokenisation is total: every character ends up in
//! exactly one token, and characters no rule accepts become one-character
//! `error` tokens.

use std::collections::{BTreeMap, HashSet};

use tessera_core::{LexerConfig, Range, RuleSpec, Token, TokenCategory};
use tracing::debug;

use crate::error::TesseraError;
use crate::matcher::Matcher;
use crate::reader::CharReader;
use crate::state::{StateId, StateStack};

/// Token type emitted for characters no rule accepts.
pub const ERROR_TOKEN: &str = "error";

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: Matcher,
    token_type: String,
    category: TokenCategory,
    pop: bool,
    switch_to: Option<StateId>,
    push: Option<StateId>,
}

impl CompiledRule {
    fn apply_transition(&self, stack: &mut StateStack) {
        if self.pop {
            stack.pop();
        }
        if let Some(state) = self.switch_to {
            stack.switch_to(state);
        }
        if let Some(state) = self.push {
            stack.push(state);
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledState {
    name: String,
    rules: Vec<CompiledRule>,
}

/// A lexer ready to tokenise source text.
#[derive(Debug, Clone)]
pub struct CompiledLexer {
    language: String,
    states: Vec<CompiledState>,
    initial: StateId,
    skip: HashSet<String>,
    tab_width: Option<u32>,
}

impl CompiledLexer {
    /// Compiles `config` for the profile named `language`.
    ///
    /// A config without any states compiles to a lexer whose only state has
    /// no rules, so every character becomes an error token.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] when a matcher fails to compile or a
    /// state name (initial, `push` or `switchTo`) is not declared.
    pub fn compile(language: &str, config: &LexerConfig) -> Result<Self, TesseraError> {
        let initial_name = config.initial_state_name();
        let mut ids: BTreeMap<&str, StateId> = config
            .states
            .keys()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), StateId(idx)))
            .collect();
        let mut states = Vec::with_capacity(config.states.len().max(1));
        if ids.is_empty() && config.initial_state.is_none() {
            ids.insert(initial_name, StateId(0));
            states.push(CompiledState {
                name: initial_name.to_owned(),
                rules: Vec::new(),
            });
        }
        let initial = lookup_state(language, &ids, initial_name, "initial state")?;

        for (name, rules) in &config.states {
            let compiled = rules
                .iter()
                .map(|rule| compile_rule(language, config, &ids, rule))
                .collect::<Result<_, _>>()?;
            states.push(CompiledState {
                name: name.clone(),
                rules: compiled,
            });
        }

        debug!(
            language = %language,
            states = states.len(),
            initial = %initial_name,
            "compiled lexer"
        );
        Ok(Self {
            language: language.to_owned(),
            states,
            initial,
            skip: config.skip_token_types().iter().cloned().collect(),
            tab_width: config.indentation.map(|indent| indent.tab_width),
        })
    }

    /// Returns the profile name this lexer was compiled for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the state names in id order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| state.name.as_str())
    }

    /// Returns the initial state.
    #[must_use]
    pub const fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Returns `true` if structural analysis ignores `token_type`.
    #[must_use]
    pub fn is_skipped(&self, token_type: &str) -> bool {
        self.skip.contains(token_type)
    }

    /// Returns the profile's tab width, if it declares one.
    #[must_use]
    pub const fn tab_width(&self) -> Option<u32> {
        self.tab_width
    }

    /// Splits `source` into tokens.
    ///
    /// The tokens' values concatenate back to `source`, and no token is
    /// empty.
    #[must_use]
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut reader = CharReader::new(source);
        let mut stack = StateStack::new(self.initial);
        let mut tokens = Vec::new();

        while let Some(ch) = reader.peek() {
            let start = reader.position();
            let rules = self
                .states
                .get(stack.current().index())
                .map_or(&[][..], |state| state.rules.as_slice());
            let hit = rules.iter().find_map(|rule| {
                let len = rule.matcher.match_len(&reader);
                (len > 0).then_some((rule, len))
            });

            match hit {
                Some((rule, len)) => {
                    reader.advance_bytes(len);
                    tokens.push(Token::new(
                        rule.token_type.as_str(),
                        reader.slice_from(start.offset),
                        rule.category,
                        Range::new(start, reader.position()),
                    ));
                    rule.apply_transition(&mut stack);
                }
                None => {
                    reader.advance_bytes(ch.len_utf8());
                    tokens.push(Token::new(
                        ERROR_TOKEN,
                        reader.slice_from(start.offset),
                        TokenCategory::Error,
                        Range::new(start, reader.position()),
                    ));
                }
            }
        }
        tokens
    }
}

fn compile_rule(
    language: &str,
    config: &LexerConfig,
    ids: &BTreeMap<&str, StateId>,
    rule: &RuleSpec,
) -> Result<CompiledRule, TesseraError> {
    Ok(CompiledRule {
        matcher: Matcher::compile(language, &rule.matcher, &config.char_classes)?,
        token_type: rule.token.clone(),
        category: config.category_of(&rule.token),
        pop: rule.pop,
        switch_to: rule
            .switch_to
            .as_deref()
            .map(|name| lookup_state(language, ids, name, "switchTo target"))
            .transpose()?,
        push: rule
            .push
            .as_deref()
            .map(|name| lookup_state(language, ids, name, "push target"))
            .transpose()?,
    })
}

fn lookup_state(
    language: &str,
    ids: &BTreeMap<&str, StateId>,
    name: &str,
    role: &str,
) -> Result<StateId, TesseraError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| TesseraError::config(language, format!("unknown {role} '{name}'")))
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tessera_core::{MatcherSpec, Position};

    use super::*;

    #[fixture]
    fn templated() -> LexerConfig {
        serde_json::from_str(
            r#"{
                "tokenTypes": {
                    "string": "string",
                    "interpolation": "punctuation",
                    "identifier": "identifier",
                    "whitespace": "whitespace"
                },
                "states": {
                    "default": [
                        { "match": { "kind": "string", "value": "`" }, "token": "string",
                          "push": "template" },
                        { "match": { "kind": "string", "value": "}" }, "token": "interpolation",
                          "pop": true },
                        { "match": { "kind": "charSequence",
                                     "first": { "kind": "predefined", "name": "letter" },
                                     "rest": { "kind": "predefined", "name": "letter" } },
                          "token": "identifier" },
                        { "match": { "kind": "charSequence",
                                     "first": { "kind": "predefined", "name": "whitespace" },
                                     "rest": { "kind": "predefined", "name": "whitespace" } },
                          "token": "whitespace" }
                    ],
                    "template": [
                        { "match": { "kind": "string", "value": "`" }, "token": "string",
                          "pop": true },
                        { "match": { "kind": "string", "value": "${" }, "token": "interpolation",
                          "push": "default" },
                        { "match": { "kind": "charSequence",
                                     "first": { "kind": "negate", "class":
                                         { "kind": "chars", "chars": "`$" } },
                                     "rest": { "kind": "negate", "class":
                                         { "kind": "chars", "chars": "`$" } } },
                          "token": "string" }
                    ]
                },
                "skipTokens": ["whitespace"]
            }"#,
        )
        .expect("config parses")
    }

    fn types(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens
            .iter()
            .map(|token| (token.token_type.as_str(), token.value.as_str()))
            .collect()
    }

    #[rstest]
    fn states_push_and_pop(templated: LexerConfig) {
        let lexer = CompiledLexer::compile("tpl", &templated).expect("compiles");
        let tokens = lexer.tokenize("`a ${b} c`");
        assert_eq!(
            types(&tokens),
            [
                ("string", "`"),
                ("string", "a "),
                ("interpolation", "${"),
                ("identifier", "b"),
                ("interpolation", "}"),
                ("string", " c"),
                ("string", "`"),
            ]
        );
        assert_eq!(tokens.first().map(|t| t.category), Some(TokenCategory::String));
    }

    #[rstest]
    fn skip_tokens_are_recorded(templated: LexerConfig) {
        let lexer = CompiledLexer::compile("tpl", &templated).expect("compiles");
        assert!(lexer.is_skipped("whitespace"));
        assert!(!lexer.is_skipped("identifier"));
        assert_eq!(lexer.state_names().collect::<Vec<_>>(), ["default", "template"]);
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut config = LexerConfig::default();
        config.states.insert(
            "default".to_owned(),
            vec![
                RuleSpec::new(MatcherSpec::keywords(["in"]), "keyword"),
                RuleSpec::new(MatcherSpec::pattern("[a-z]+"), "identifier"),
            ],
        );
        let lexer = CompiledLexer::compile("toy", &config).expect("compiles");
        let tokens = lexer.tokenize("in");
        assert_eq!(types(&tokens), [("keyword", "in")]);
        let tokens = lexer.tokenize("inner");
        assert_eq!(types(&tokens), [("identifier", "inner")]);
        assert_eq!(tokens.first().map(|t| t.category), Some(TokenCategory::Plain));
    }

    #[test]
    fn unmatched_characters_become_error_tokens() {
        let mut config = LexerConfig::default();
        config.states.insert(
            "default".to_owned(),
            vec![RuleSpec::new(MatcherSpec::pattern("[0-9]+"), "number")],
        );
        let lexer = CompiledLexer::compile("toy", &config).expect("compiles");
        let tokens = lexer.tokenize("1é2");
        assert_eq!(
            types(&tokens),
            [("number", "1"), ("error", "é"), ("number", "2")]
        );
        assert_eq!(tokens.get(1).map(|t| t.category), Some(TokenCategory::Error));
        assert_eq!(
            tokens.get(2).map(|t| t.range.start),
            Some(Position::new(1, 2, 3))
        );
    }

    #[test]
    fn empty_config_lexes_everything_as_errors() {
        let lexer = CompiledLexer::compile("empty", &LexerConfig::default()).expect("compiles");
        assert_eq!(lexer.tokenize("ab").len(), 2);
        assert!(lexer.tokenize("").is_empty());
    }

    #[test]
    fn positions_follow_line_breaks() {
        let mut config = LexerConfig::default();
        config.states.insert(
            "default".to_owned(),
            vec![
                RuleSpec::new(MatcherSpec::pattern("\r\n|\n|\r"), "newline"),
                RuleSpec::new(MatcherSpec::pattern("[a-z]+"), "word"),
            ],
        );
        let lexer = CompiledLexer::compile("toy", &config).expect("compiles");
        let tokens = lexer.tokenize("ab\r\ncd");
        let ranges: Vec<_> = tokens
            .iter()
            .map(|t| (t.range.start.line, t.range.start.column))
            .collect();
        assert_eq!(ranges, [(1, 0), (1, 2), (2, 0)]);
    }

    #[rstest]
    #[case(Some("missing"), None, None, "initial state 'missing'")]
    #[case(None, Some("nowhere"), None, "push target 'nowhere'")]
    #[case(None, None, Some("elsewhere"), "switchTo target 'elsewhere'")]
    fn unknown_states_are_config_errors(
        #[case] initial: Option<&str>,
        #[case] push: Option<&str>,
        #[case] switch_to: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut rule = RuleSpec::new(MatcherSpec::string("x"), "x");
        rule.push = push.map(str::to_owned);
        rule.switch_to = switch_to.map(str::to_owned);
        let mut config = LexerConfig {
            initial_state: initial.map(str::to_owned),
            ..LexerConfig::default()
        };
        config.states.insert("default".to_owned(), vec![rule]);
        let err = CompiledLexer::compile("toy", &config).expect_err("should fail");
        assert!(err.is_config());
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn transitions_apply_pop_then_switch_then_push() {
        let mut config = LexerConfig::default();
        config.states.insert(
            "default".to_owned(),
            vec![RuleSpec::new(MatcherSpec::string("a"), "a").push("one")],
        );
        config.states.insert(
            "one".to_owned(),
            vec![
                RuleSpec::new(MatcherSpec::string("b"), "b")
                    .pop()
                    .switch_to("two")
                    .push("one"),
            ],
        );
        config.states.insert(
            "two".to_owned(),
            vec![RuleSpec::new(MatcherSpec::string("c"), "c")],
        );
        let lexer = CompiledLexer::compile("toy", &config).expect("compiles");
        // a: [default, one]; b: pop -> [default], switch -> [two], push -> [two, one]
        let tokens = lexer.tokenize("abbc");
        assert_eq!(
            types(&tokens),
            [("a", "a"), ("b", "b"), ("b", "b"), ("error", "c")]
        );
    }
}
