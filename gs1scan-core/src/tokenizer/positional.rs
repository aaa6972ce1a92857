//! Positional (un-bracketed) tokenizer
//!
//! Field boundaries are re-derived from the registry alone: a variable-length
//! value ends where the remaining input begins with any recognized tag, or at
//! end of input. Characters that do not start a tag are skipped.

use crate::format::{match_tag, AiDefinition};

use super::Element;

/// Left-to-right scanner over positional GS1 text
///
/// Never fails. Truncated fixed-length values are clamped at end of input.
#[derive(Debug, Clone)]
pub struct PositionalTokens<'a, 'o> {
    input: &'a str,
    order: &'o [&'static AiDefinition],
    pos: usize,
}

impl<'a, 'o> PositionalTokens<'a, 'o> {
    /// Create a scanner over `input` trying tags in `order`
    pub fn new(input: &'a str, order: &'o [&'static AiDefinition]) -> Self {
        Self {
            input,
            order,
            pos: 0,
        }
    }

    /// Current byte offset into the input
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset after `count` characters starting at `start`, clamped to the input
    fn advance_chars(&self, start: usize, count: usize) -> usize {
        self.input[start..]
            .char_indices()
            .nth(count)
            .map_or(self.input.len(), |(offset, _)| start + offset)
    }

    /// Byte length of the character at `pos`
    fn char_len_at(&self, pos: usize) -> usize {
        self.input[pos..].chars().next().map_or(1, char::len_utf8)
    }

    /// End of a variable-length value starting at `start`
    fn variable_end(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = start;

        while end < bytes.len() {
            if match_tag(&bytes[end..], self.order).is_some() {
                break;
            }
            end += self.char_len_at(end);
        }

        end
    }
}

impl<'a, 'o> Iterator for PositionalTokens<'a, 'o> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() {
            let Some(&ai) = match_tag(&bytes[self.pos..], self.order) else {
                // Not a tag: skip one character
                self.pos += self.char_len_at(self.pos);
                continue;
            };

            let start = self.pos + ai.tag.len();
            let end = match ai.length {
                Some(length) => self.advance_chars(start, length),
                None => self.variable_end(start),
            };

            self.pos = end;
            return Some(Element {
                ai,
                value: &self.input[start..end],
            });
        }

        None
    }
}

impl core::iter::FusedIterator for PositionalTokens<'_, '_> {}
