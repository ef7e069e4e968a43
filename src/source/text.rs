//! Flat-text source. Positions are byte offsets into the original text, so
//! spans recorded by different forks can be compared directly.

use super::{Position, Representation, Source};
use crate::ast::{Node, Span};
use crate::descriptors::Descriptor;
use crate::errors::{MatchError, Result};
use crate::runtime::ResolvedChildren;
use crate::token::{TokenKey, TokenRef};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TextSource {
    text: Arc<str>,
    pos: usize,
    end: usize,
}

impl TextSource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, pos: 0, end }
    }

    /// A cursor over `span` of `text` only.
    ///
    /// Span bounds that fall inside a multi-byte character are moved back to
    /// the start of that character.
    pub fn scoped(text: impl Into<Arc<str>>, span: Span) -> Self {
        let text = text.into();
        let end = char_floor(&text, span.end);
        let pos = char_floor(&text, span.start.min(end));
        Self { text, pos, end }
    }

    pub fn remaining(&self) -> &str {
        &self.text[self.pos..self.end]
    }
}

/// Largest char boundary of `text` at or before `index`.
fn char_floor(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl Source for TextSource {
    fn representation(&self) -> Representation {
        Representation::Text
    }

    fn position(&self) -> Position {
        Position(self.pos)
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    fn match_descriptor(&self, descriptor: &dyn Descriptor) -> Option<Vec<TokenRef>> {
        if descriptor.is_reference() {
            // What the child covers is only known once it has been matched.
            return (!self.is_exhausted()).then(|| descriptor.build(None));
        }
        descriptor.match_text(self.remaining())
    }

    fn advance(&mut self, tokens: &[TokenRef], resolved: &ResolvedChildren) {
        for token in tokens {
            let next = if token.is_reference() {
                resolved
                    .get(&TokenKey::new(token))
                    .map_or(self.pos, |child| child.source.end.0.max(self.pos))
            } else {
                self.pos + token.value.len()
            };
            self.pos = next.min(self.end);
        }
    }

    fn fork(&self) -> Box<dyn Source> {
        Box::new(self.clone())
    }

    fn fork_child(&self, child: &Node) -> Box<dyn Source> {
        match child.range {
            Some(range) => Box::new(Self::scoped(Arc::clone(&self.text), range)),
            None => Box::new(self.clone()),
        }
    }

    fn fallback(&self) -> Result<Box<dyn Source>> {
        Err(MatchError::no_fallback(
            Representation::Text,
            "flat text has no alternate representation",
        ))
    }
}
