//! AI tokenizers for the two GS1 text layouts
//!
//! Both tokenizers borrow the input and yield `(AI, value)` elements without
//! allocating. They consume a match order built by
//! [`build_match_order`](crate::format::build_match_order); the order is a
//! correctness requirement, not a performance hint.

pub mod bracketed;
pub mod positional;

pub use bracketed::{match_bracketed, BracketedTokens};
pub use positional::PositionalTokens;

use crate::format::AiDefinition;

/// One recognized AI occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    /// Definition of the matched AI
    pub ai: &'static AiDefinition,
    /// Raw value as it appears in the input
    pub value: &'a str,
}

/// Input layout, chosen by the presence of a `(` anywhere in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `(tag)value` groups
    Bracketed,
    /// Tags and values concatenated with no delimiters
    Positional,
}

impl Layout {
    /// Detect the layout of already-trimmed input
    pub fn detect(input: &str) -> Self {
        if input.as_bytes().contains(&crate::format::constants::GROUP_OPEN) {
            Layout::Bracketed
        } else {
            Layout::Positional
        }
    }
}

impl core::fmt::Display for Layout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Layout::Bracketed => write!(f, "bracketed"),
            Layout::Positional => write!(f, "positional"),
        }
    }
}

/// Tokenizer selected for one input
#[derive(Debug, Clone)]
pub enum Tokens<'a, 'o> {
    Bracketed(BracketedTokens<'a, 'o>),
    Positional(PositionalTokens<'a, 'o>),
}

impl<'a, 'o> Tokens<'a, 'o> {
    /// Pick the tokenizer for already-trimmed input
    pub fn new(input: &'a str, order: &'o [&'static AiDefinition]) -> Self {
        match Layout::detect(input) {
            Layout::Bracketed => Tokens::Bracketed(BracketedTokens::new(input, order)),
            Layout::Positional => Tokens::Positional(PositionalTokens::new(input, order)),
        }
    }

    /// Layout this tokenizer handles
    pub fn layout(&self) -> Layout {
        match self {
            Tokens::Bracketed(_) => Layout::Bracketed,
            Tokens::Positional(_) => Layout::Positional,
        }
    }
}

impl<'a, 'o> Iterator for Tokens<'a, 'o> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Tokens::Bracketed(tokens) => tokens.next(),
            Tokens::Positional(tokens) => tokens.next(),
        }
    }
}

impl core::iter::FusedIterator for Tokens<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_detection() {
        assert_eq!(Layout::detect("(01)00312345678906"), Layout::Bracketed);
        assert_eq!(Layout::detect("0100312345678906"), Layout::Positional);
        assert_eq!(Layout::detect("01003123(45678906"), Layout::Bracketed);
        assert_eq!(Layout::detect(""), Layout::Positional);
    }
}
