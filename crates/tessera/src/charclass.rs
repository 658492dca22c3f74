//! Compiled character classes.
//!
//! [`CharClass::compile`] turns a [`CharClassSpec`] into a predicate tree
//! with every `ref` inlined, so membership tests never touch the profile's
//! class table again.

use std::collections::BTreeMap;

use tessera_core::{CharClassSpec, PredefinedClass};

use crate::error::TesseraError;

/// A compiled character predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClass {
    /// One of the built-in predicates.
    Predefined(PredefinedClass),
    /// Explicit members, sorted for binary search.
    Chars(Vec<char>),
    /// Inclusive range.
    Range(char, char),
    /// Any of the alternatives.
    Union(Vec<CharClass>),
    /// Anything the inner class rejects.
    Negate(Box<CharClass>),
}

impl CharClass {
    /// Compiles `spec`, resolving references against `named`.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if a reference names an undeclared
    /// class or if references form a cycle.
    pub fn compile(
        language: &str,
        spec: &CharClassSpec,
        named: &BTreeMap<String, CharClassSpec>,
    ) -> Result<Self, TesseraError> {
        let mut resolving = Vec::new();
        compile_inner(language, spec, named, &mut resolving)
    }

    /// Returns `true` if `ch` is a member. `None` (end of input) is never a
    /// member, not even of a negated class.
    #[must_use]
    pub fn test(&self, ch: Option<char>) -> bool {
        ch.is_some_and(|c| self.contains(c))
    }

    /// Returns `true` if `ch` is a member.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        match self {
            Self::Predefined(class) => predefined_contains(*class, ch),
            Self::Chars(members) => members.binary_search(&ch).is_ok(),
            Self::Range(from, to) => (*from..=*to).contains(&ch),
            Self::Union(classes) => classes.iter().any(|class| class.contains(ch)),
            Self::Negate(inner) => !inner.contains(ch),
        }
    }
}

fn compile_inner(
    language: &str,
    spec: &CharClassSpec,
    named: &BTreeMap<String, CharClassSpec>,
    resolving: &mut Vec<String>,
) -> Result<CharClass, TesseraError> {
    Ok(match spec {
        CharClassSpec::Predefined { name } => CharClass::Predefined(*name),
        CharClassSpec::Chars { chars } => {
            let mut members: Vec<char> = chars.chars().collect();
            members.sort_unstable();
            members.dedup();
            CharClass::Chars(members)
        }
        CharClassSpec::Range { from, to } => CharClass::Range(*from, *to),
        CharClassSpec::Union { classes } => CharClass::Union(
            classes
                .iter()
                .map(|class| compile_inner(language, class, named, resolving))
                .collect::<Result<_, _>>()?,
        ),
        CharClassSpec::Negate { class } => {
            CharClass::Negate(Box::new(compile_inner(language, class, named, resolving)?))
        }
        CharClassSpec::Ref { name } => {
            if resolving.iter().any(|seen| seen == name) {
                return Err(TesseraError::config(
                    language,
                    format!(
                        "char class reference cycle: {} -> {name}",
                        resolving.join(" -> ")
                    ),
                ));
            }
            let target = named.get(name).ok_or_else(|| {
                TesseraError::config(language, format!("unknown char class '{name}'"))
            })?;
            resolving.push(name.clone());
            let compiled = compile_inner(language, target, named, resolving);
            resolving.pop();
            compiled?
        }
    })
}

fn predefined_contains(class: PredefinedClass, ch: char) -> bool {
    match class {
        PredefinedClass::Letter => ch.is_alphabetic(),
        PredefinedClass::Upper => ch.is_uppercase(),
        PredefinedClass::Lower => ch.is_lowercase(),
        PredefinedClass::Digit => ch.is_ascii_digit(),
        PredefinedClass::HexDigit => ch.is_ascii_hexdigit(),
        PredefinedClass::Alphanumeric => ch.is_alphabetic() || ch.is_ascii_digit(),
        PredefinedClass::Whitespace => matches!(ch, ' ' | '\t'),
        PredefinedClass::Newline => matches!(ch, '\n' | '\r'),
        PredefinedClass::Any => true,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn compile(spec: &CharClassSpec, named: &BTreeMap<String, CharClassSpec>) -> CharClass {
        CharClass::compile("test", spec, named).expect("class compiles")
    }

    #[rstest]
    #[case(PredefinedClass::Letter, 'é', true)]
    #[case(PredefinedClass::Letter, '1', false)]
    #[case(PredefinedClass::Upper, 'Q', true)]
    #[case(PredefinedClass::Lower, 'Q', false)]
    #[case(PredefinedClass::Digit, '٣', false)]
    #[case(PredefinedClass::HexDigit, 'f', true)]
    #[case(PredefinedClass::Alphanumeric, '_', false)]
    #[case(PredefinedClass::Whitespace, '\t', true)]
    #[case(PredefinedClass::Whitespace, '\n', false)]
    #[case(PredefinedClass::Newline, '\r', true)]
    #[case(PredefinedClass::Any, '\u{0}', true)]
    fn predefined_membership(
        #[case] class: PredefinedClass,
        #[case] ch: char,
        #[case] expected: bool,
    ) {
        assert_eq!(CharClass::Predefined(class).contains(ch), expected);
    }

    #[test]
    fn negation_never_matches_end_of_input() {
        let class = compile(
            &CharClassSpec::Negate {
                class: Box::new(CharClassSpec::chars("\"")),
            },
            &BTreeMap::new(),
        );
        assert!(class.test(Some('a')));
        assert!(!class.test(Some('"')));
        assert!(!class.test(None));
    }

    #[test]
    fn refs_are_inlined() {
        let mut named = BTreeMap::new();
        named.insert("digit".to_owned(), CharClassSpec::Range { from: '0', to: '9' });
        named.insert(
            "word".to_owned(),
            CharClassSpec::Union {
                classes: vec![CharClassSpec::reference("digit"), CharClassSpec::chars("_")],
            },
        );
        let class = compile(&CharClassSpec::reference("word"), &named);
        assert_eq!(
            class,
            CharClass::Union(vec![CharClass::Range('0', '9'), CharClass::Chars(vec!['_'])])
        );
        assert!(class.contains('7'));
        assert!(!class.contains('a'));
    }

    #[test]
    fn missing_ref_is_a_config_error() {
        let err = CharClass::compile("toy", &CharClassSpec::reference("nope"), &BTreeMap::new())
            .expect_err("missing ref should fail");
        assert!(err.is_config());
        assert!(err.to_string().contains("unknown char class 'nope'"));
    }

    #[test]
    fn ref_cycles_are_config_errors() {
        let mut named = BTreeMap::new();
        named.insert("a".to_owned(), CharClassSpec::reference("b"));
        named.insert(
            "b".to_owned(),
            CharClassSpec::Negate {
                class: Box::new(CharClassSpec::reference("a")),
            },
        );
        let err = CharClass::compile("toy", &CharClassSpec::reference("a"), &named)
            .expect_err("cycle should fail");
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn chars_are_deduplicated() {
        let class = compile(&CharClassSpec::chars("cabba"), &BTreeMap::new());
        assert_eq!(class, CharClass::Chars(vec!['a', 'b', 'c']));
    }
}
