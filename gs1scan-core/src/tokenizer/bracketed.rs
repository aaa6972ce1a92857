//! Bracketed `(tag)value` tokenizer
//!
//! Each AI is searched for independently across the whole input, so the
//! spans of two AIs are never checked for overlap. Matching follows
//! leftmost-first pattern semantics:
//!
//! - fixed length: `(tag)` followed by exactly `length` ASCII characters
//! - variable length: `(tag)` followed by one or more ASCII characters, as
//!   few as possible, up to the next `(` or end of input
//!
//! When an occurrence of `(tag)` cannot satisfy the pattern the search resumes
//! at the following occurrence.

use crate::format::constants::{GROUP_CLOSE, GROUP_OPEN};
use crate::format::AiDefinition;
use crate::validation::is_ascii_value;

use super::Element;

/// Find the value offset of the next `(tag)` group at or after `from`
fn find_group(bytes: &[u8], tag: &[u8], from: usize) -> Option<(usize, usize)> {
    let group_len = tag.len() + 2;
    let mut i = from;

    while i + group_len <= bytes.len() {
        if bytes[i] == GROUP_OPEN
            && &bytes[i + 1..i + 1 + tag.len()] == tag
            && bytes[i + 1 + tag.len()] == GROUP_CLOSE
        {
            return Some((i, i + group_len));
        }
        i += 1;
    }

    None
}

/// Length of a variable value starting at `start`, if the pattern matches there
fn variable_value_len(bytes: &[u8], start: usize) -> Option<usize> {
    // At least one character, and it must be ASCII
    if start >= bytes.len() || !bytes[start].is_ascii() {
        return None;
    }

    let mut end = start + 1;
    loop {
        if end == bytes.len() || bytes[end] == GROUP_OPEN {
            return Some(end - start);
        }
        if !bytes[end].is_ascii() {
            return None;
        }
        end += 1;
    }
}

/// Find the untrimmed value of `ai` in bracketed input
pub fn match_bracketed<'a>(input: &'a str, ai: &AiDefinition) -> Option<&'a str> {
    let bytes = input.as_bytes();
    let tag = ai.tag.as_bytes();
    let mut from = 0;

    while let Some((group_start, value_start)) = find_group(bytes, tag, from) {
        let value_len = match ai.length {
            Some(length) => {
                let end = value_start + length;
                (end <= bytes.len() && is_ascii_value(&bytes[value_start..end])).then_some(length)
            }
            None => variable_value_len(bytes, value_start),
        };

        if let Some(len) = value_len {
            // ASCII-only spans always end on a char boundary
            return Some(&input[value_start..value_start + len]);
        }

        from = group_start + 1;
    }

    None
}

/// Yields one element per AI in `order` that matches somewhere in the input
///
/// Values are trimmed of surrounding whitespace.
#[derive(Debug, Clone)]
pub struct BracketedTokens<'a, 'o> {
    input: &'a str,
    order: core::slice::Iter<'o, &'static AiDefinition>,
}

impl<'a, 'o> BracketedTokens<'a, 'o> {
    /// Create a matcher over `input` trying AIs in `order`
    pub fn new(input: &'a str, order: &'o [&'static AiDefinition]) -> Self {
        Self {
            input,
            order: order.iter(),
        }
    }
}

impl<'a, 'o> Iterator for BracketedTokens<'a, 'o> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for &ai in self.order.by_ref() {
            if let Some(value) = match_bracketed(self.input, ai) {
                return Some(Element {
                    ai,
                    value: value.trim(),
                });
            }
        }
        None
    }
}

impl core::iter::FusedIterator for BracketedTokens<'_, '_> {}
