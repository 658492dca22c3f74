//! Foldable region discovery.

use tessera_core::{BlockSpan, FoldRange, FoldingConfig, Token, TokenCategory};

/// Fold kind reported for multi-line comments.
pub const COMMENT_FOLD: &str = "comment";

/// Collects foldable regions from block spans and comment tokens.
///
/// A block span folds when its name is listed in `config.blocks`; a comment
/// token folds when `config.comments` is set. Either way the region must
/// cover at least `config.min_lines` lines. The result is sorted by start
/// line (outer regions first) with duplicates removed.
#[must_use]
pub fn fold_ranges(tokens: &[Token], spans: &[BlockSpan], config: &FoldingConfig) -> Vec<FoldRange> {
    let min_lines = config.min_lines.max(1);
    let covers = |start: u32, end: u32| end.saturating_sub(start) + 1 >= min_lines;

    let blocks = spans
        .iter()
        .filter(|span| config.blocks.iter().any(|name| *name == span.name))
        .filter_map(|span| {
            let open = tokens.get(span.open_index)?;
            let close = tokens.get(span.close_index)?;
            Some(FoldRange {
                start_line: open.range.start.line,
                end_line: close.range.end.line,
                kind: span.name.clone(),
            })
        });
    let comments = tokens
        .iter()
        .filter(|token| config.comments && token.category == TokenCategory::Comment)
        .map(|token| FoldRange {
            start_line: token.range.start.line,
            end_line: token.range.end.line,
            kind: COMMENT_FOLD.to_owned(),
        });

    let mut folds: Vec<FoldRange> = blocks
        .chain(comments)
        .filter(|fold| covers(fold.start_line, fold.end_line))
        .collect();
    folds.sort_by(|a, b| {
        a.start_line
            .cmp(&b.start_line)
            .then_with(|| b.end_line.cmp(&a.end_line))
            .then_with(|| a.kind.cmp(&b.kind))
    });
    folds.dedup();
    folds
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tessera_core::{Position, Range};

    use super::*;

    fn token(value: &str, category: TokenCategory, start_line: u32, end_line: u32) -> Token {
        Token::new(
            "t",
            value,
            category,
            Range::new(Position::new(start_line, 0, 0), Position::new(end_line, 1, 0)),
        )
    }

    fn span(name: &str, open_index: usize, close_index: usize) -> BlockSpan {
        BlockSpan {
            name: name.to_owned(),
            open_index,
            close_index,
            depth: 1,
        }
    }

    fn config(blocks: &[&str], comments: bool, min_lines: u32) -> FoldingConfig {
        FoldingConfig {
            blocks: blocks.iter().map(|name| (*name).to_owned()).collect(),
            comments,
            min_lines,
        }
    }

    fn tokens() -> Vec<Token> {
        vec![
            token("/* a\nb */", TokenCategory::Comment, 1, 2),
            token("{", TokenCategory::Punctuation, 3, 3),
            token("(", TokenCategory::Punctuation, 4, 4),
            token(")", TokenCategory::Punctuation, 4, 4),
            token("}", TokenCategory::Punctuation, 9, 9),
            token("// c", TokenCategory::Comment, 10, 10),
        ]
    }

    fn lines(folds: &[FoldRange]) -> Vec<(u32, u32, &str)> {
        folds
            .iter()
            .map(|fold| (fold.start_line, fold.end_line, fold.kind.as_str()))
            .collect()
    }

    #[test]
    fn listed_blocks_and_comments_fold() {
        let spans = [span("parens", 2, 3), span("braces", 1, 4)];
        let folds = fold_ranges(&tokens(), &spans, &config(&["braces"], true, 2));
        assert_eq!(lines(&folds), [(1, 2, "comment"), (3, 9, "braces")]);
    }

    #[rstest]
    #[case(1, vec![(1, 2, "comment"), (3, 9, "braces"), (4, 4, "parens"), (10, 10, "comment")])]
    #[case(3, vec![(3, 9, "braces")])]
    fn min_lines_filters(#[case] min_lines: u32, #[case] expected: Vec<(u32, u32, &str)>) {
        let spans = [span("parens", 2, 3), span("braces", 1, 4)];
        let folds = fold_ranges(&tokens(), &spans, &config(&["braces", "parens"], true, min_lines));
        assert_eq!(lines(&folds), expected);
    }

    #[test]
    fn comments_fold_only_when_enabled() {
        let folds = fold_ranges(&tokens(), &[], &config(&[], false, 1));
        assert!(folds.is_empty());
    }
}
