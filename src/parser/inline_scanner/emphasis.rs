//! Emphasis resolution: delimiter run analysis and nearest-pair matching.
//!
//! Emphasis is handled in two stages. The collector records every `*` and `_`
//! run as a delimiter token with its open/close potential; everything between
//! delimiters is already a finished node by then. This module then resolves
//! the flat token list with a stack: an opener pushes a frame, a closer pops
//! back to the nearest compatible frame, and whatever never matches is
//! flattened back to literal text.

use super::InlineToken;
use crate::ast::Inline;

/// Determine if a delimiter run can open and/or close emphasis.
///
/// Left/right flanking follows the usual rules on the characters adjacent to
/// the run. Underscores additionally refuse to open or close inside a word,
/// so `snake_case_name` stays literal.
pub(crate) fn analyze_delimiter_run(
    text: &str,
    run_start: usize,
    run_char: char,
    run_count: usize,
) -> (bool, bool) {
    let run_end = run_start + run_count;

    let char_before = text[..run_start].chars().last();
    let char_after = text[run_end..].chars().next();

    let followed_by_whitespace = char_after.is_none_or(char::is_whitespace);
    let followed_by_punctuation = char_after.is_some_and(|c| c.is_ascii_punctuation());
    let preceded_by_whitespace = char_before.is_none_or(char::is_whitespace);
    let preceded_by_punctuation = char_before.is_some_and(|c| c.is_ascii_punctuation());

    let left_flanking = !followed_by_whitespace
        && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);

    let right_flanking = !preceded_by_whitespace
        && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

    if run_char == '_' {
        let preceded_by_alnum = char_before.is_some_and(char::is_alphanumeric);
        let followed_by_alnum = char_after.is_some_and(char::is_alphanumeric);
        (
            left_flanking && !preceded_by_alnum,
            right_flanking && !followed_by_alnum,
        )
    } else {
        (left_flanking, right_flanking)
    }
}

/// An open delimiter run waiting for its closer. Children collected after it
/// belong inside the emphasis if a closer arrives, and are flattened back
/// out (with the delimiters as literal text) if one never does.
struct Frame {
    ch: char,
    count: usize,
    children: Vec<Inline>,
}

impl Frame {
    /// Single delimiters make Emphasis, doubled or longer make Strong.
    /// Openers and closers only pair within the same class.
    fn strong(&self) -> bool {
        self.count >= 2
    }
}

/// Resolve a collected token list into final inline nodes.
pub(crate) fn resolve(tokens: Vec<InlineToken>) -> Vec<Inline> {
    // The bottom frame is the output; real delimiter frames stack above it.
    let mut stack = vec![Frame {
        ch: '\0',
        count: 0,
        children: Vec::new(),
    }];

    for token in tokens {
        match token {
            InlineToken::Node(node) => push_node(&mut stack, node),
            InlineToken::Text(text) => push_text(&mut stack, &text),
            InlineToken::Delimiter {
                ch,
                count,
                can_open,
                can_close,
            } => {
                let strong = count >= 2;
                let opener = can_close
                    .then(|| {
                        stack
                            .iter()
                            .skip(1)
                            .rposition(|f| f.ch == ch && f.strong() == strong)
                            .map(|i| i + 1)
                    })
                    .flatten();

                match opener {
                    Some(index) => close_emphasis(&mut stack, index, ch, count),
                    None if can_open => stack.push(Frame {
                        ch,
                        count,
                        children: Vec::new(),
                    }),
                    None => push_text(&mut stack, &ch.to_string().repeat(count)),
                }
            }
        }
    }

    // Anything still open never found a closer.
    while stack.len() > 1 {
        flatten_top(&mut stack);
    }

    match stack.pop() {
        Some(bottom) => bottom.children,
        None => Vec::new(),
    }
}

/// Pop frames down to `index` and wrap that frame's children in the emphasis
/// node the matched pair produces.
fn close_emphasis(stack: &mut Vec<Frame>, index: usize, ch: char, close_count: usize) {
    // Frames above the match are unmatched openers; fold them back first.
    while stack.len() > index + 1 {
        flatten_top(stack);
    }

    let frame = match stack.pop() {
        Some(frame) => frame,
        None => return,
    };

    let used = frame.count.min(close_count);
    log::trace!("matched {used} of {ch:?} delimiters (class strong={})", used >= 2);

    let node = match used {
        1 => Inline::Emphasis(frame.children),
        2 => Inline::Strong(frame.children),
        _ => Inline::Strong(vec![Inline::Emphasis(frame.children)]),
    };

    let leftover_open = frame.count - used;
    if leftover_open > 0 {
        push_text(stack, &ch.to_string().repeat(leftover_open));
    }
    push_node(stack, node);
    let leftover_close = close_count - used;
    if leftover_close > 0 {
        push_text(stack, &ch.to_string().repeat(leftover_close));
    }
}

/// Fold the top frame into its parent: delimiters become literal text and
/// the collected children follow unchanged.
fn flatten_top(stack: &mut Vec<Frame>) {
    let frame = match stack.pop() {
        Some(frame) => frame,
        None => return,
    };
    push_text(stack, &frame.ch.to_string().repeat(frame.count));
    for child in frame.children {
        push_node(stack, child);
    }
}

fn push_node(stack: &mut [Frame], node: Inline) {
    if let Inline::Text(text) = &node {
        push_text(stack, text);
        return;
    }
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

/// Append text, merging with a trailing Text node so the tree does not
/// accumulate fragment boundaries.
fn push_text(stack: &mut [Frame], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(top) = stack.last_mut() else {
        return;
    };
    if let Some(Inline::Text(existing)) = top.children.last_mut() {
        existing.push_str(text);
    } else {
        top.children.push(Inline::Text(text.to_string()));
    }
}
