//! Bracket-pair tracking over a token stream.

use tessera_core::{BlockRule, BlockSpan, Token};

struct OpenBlock<'r> {
    name: &'r str,
    open_index: usize,
    depth: usize,
}

/// Pairs open and close tokens into [`BlockSpan`]s.
///
/// Tokens are compared by literal value. A close token pops through the
/// nearest open entry of the same block name, dropping any unmatched opens
/// above it; a close with no open entry of its name is ignored, as are
/// opens still pending at the end. When several rules share delimiter text
/// the first declared rule wins. Spans come out ordered by open index, and
/// `depth` is the number of blocks already open at the open token, so a
/// top-level block has depth 0.
#[must_use]
pub fn track_blocks(tokens: &[Token], rules: &[BlockRule]) -> Vec<BlockSpan> {
    let mut stack: Vec<OpenBlock<'_>> = Vec::new();
    let mut spans = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let value = token.value.as_str();
        let closing = rules.iter().find(|rule| {
            rule.close == value && stack.iter().any(|open| open.name == rule.name)
        });
        if let Some(rule) = closing {
            while let Some(open) = stack.pop() {
                if open.name == rule.name {
                    spans.push(BlockSpan {
                        name: rule.name.clone(),
                        open_index: open.open_index,
                        close_index: index,
                        depth: open.depth,
                    });
                    break;
                }
            }
            continue;
        }
        if let Some(rule) = rules.iter().find(|rule| rule.open == value) {
            stack.push(OpenBlock {
                name: &rule.name,
                open_index: index,
                depth: stack.len(),
            });
        }
    }
    spans.sort_by_key(|span| span.open_index);
    spans
}
