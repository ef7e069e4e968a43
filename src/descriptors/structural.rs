//! Structural descriptors: references, separators and optionality.

use super::{lexical, take_run, Descriptor, DescriptorRef, REFERENCE, SEPARATOR, WHITESPACE};
use crate::token::{Token, TokenRef};
use std::sync::Arc;

// ============================================================================
// REFERENCE
// ============================================================================

/// "The child named here." Cannot match raw text: the executor has to
/// recurse into the child to find out what it covers.
#[derive(Debug, Clone)]
pub struct Reference {
    name: String,
}

impl Descriptor for Reference {
    fn kind(&self) -> &str {
        REFERENCE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn match_text(&self, _text: &str) -> Option<Vec<TokenRef>> {
        None
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        let token = tokens.first()?;
        (token.is_reference() && token.value == self.name).then(|| vec![Arc::clone(token)])
    }

    fn build(&self, _value: Option<&str>) -> Vec<TokenRef> {
        vec![Token::reference(self.name.as_str())]
    }
}

pub fn reference(name: &str) -> DescriptorRef {
    Arc::new(Reference {
        name: name.to_string(),
    })
}

// ============================================================================
// SEPARATOR
// ============================================================================

/// Any amount of whitespace, including none. Builds a single space.
#[derive(Debug, Clone, Default)]
pub struct Separator;

impl Descriptor for Separator {
    fn kind(&self) -> &str {
        SEPARATOR
    }

    fn value(&self) -> Option<&str> {
        None
    }

    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>> {
        let space = lexical::ws("");
        let mut matched = Vec::new();
        let mut rest = text;
        while let Some(tokens) = space.match_text(rest) {
            let consumed: usize = tokens.iter().map(|t| t.value.len()).sum();
            rest = &rest[consumed..];
            matched.extend(tokens);
        }
        Some(matched)
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        Some(take_run(tokens, WHITESPACE))
    }

    fn build(&self, _value: Option<&str>) -> Vec<TokenRef> {
        lexical::ws("").build(None)
    }
}

pub fn separator() -> DescriptorRef {
    Arc::new(Separator)
}

// ============================================================================
// OPTIONAL
// ============================================================================

/// Wraps a descriptor so that a miss matches nothing instead of failing.
/// Keeps the inner kind, so an optional separator is still a separator.
#[derive(Debug, Clone)]
pub struct Optional {
    inner: DescriptorRef,
}

impl Descriptor for Optional {
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn value(&self) -> Option<&str> {
        self.inner.value()
    }

    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>> {
        Some(self.inner.match_text(text).unwrap_or_default())
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        Some(self.inner.match_tokens(tokens).unwrap_or_default())
    }

    fn build(&self, _value: Option<&str>) -> Vec<TokenRef> {
        Vec::new()
    }
}

pub fn optional(inner: DescriptorRef) -> DescriptorRef {
    Arc::new(Optional { inner })
}

/// Whitespace that is neither required nor synthesised.
pub fn optional_separator() -> DescriptorRef {
    optional(separator())
}
