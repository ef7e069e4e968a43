//! Token-stream source over a CST previously attached to the AST.
//!
//! Every node carries its own token list, so forking onto a child simply
//! opens the child's list. When the attached CST no longer fits the tree
//! (the node was edited, or never had tokens), the source falls back to the
//! original text for that node's range, if it was given one.
//!
//! Positions count leaf tokens of the flattened tree rather than indices into
//! the current list, so spans of siblings and of nested nodes line up the
//! way byte offsets do in text mode.

use super::{Position, Representation, Source, TextSource};
use crate::ast::{Node, Span};
use crate::descriptors::Descriptor;
use crate::errors::{MatchError, Result};
use crate::runtime::{MatchNode, ResolvedChildren};
use crate::token::{TokenKey, TokenRef};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TokenSource {
    tokens: Arc<[TokenRef]>,
    index: usize,
    // Flattened position; `index` only addresses `tokens`.
    offset: usize,
    text: Option<Arc<str>>,
    range: Option<Span>,
}

impl TokenSource {
    pub fn new<I: IntoIterator<Item = TokenRef>>(tokens: I) -> Self {
        Self {
            tokens: tokens.into_iter().collect::<Vec<_>>().into(),
            index: 0,
            offset: 0,
            text: None,
            range: None,
        }
    }

    /// Reads the CST attached to `node`; an untokenised node reads as empty.
    pub fn for_node(node: &Node) -> Self {
        Self {
            tokens: node.tokens.clone().unwrap_or_else(|| Arc::from(Vec::new())),
            index: 0,
            offset: 0,
            text: None,
            range: node.range,
        }
    }

    /// Keeps the original text around so that `fallback` can re-read it.
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn remaining(&self) -> &[TokenRef] {
        &self.tokens[self.index..]
    }
}

impl Source for TokenSource {
    fn representation(&self) -> Representation {
        Representation::Tokens
    }

    fn position(&self) -> Position {
        Position(self.offset)
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn match_descriptor(&self, descriptor: &dyn Descriptor) -> Option<Vec<TokenRef>> {
        descriptor.match_tokens(self.remaining())
    }

    fn advance(&mut self, tokens: &[TokenRef], resolved: &ResolvedChildren) {
        self.index = (self.index + tokens.len()).min(self.tokens.len());
        self.offset += tokens.iter().map(|t| extent(t, resolved)).sum::<usize>();
    }

    fn fork(&self) -> Box<dyn Source> {
        Box::new(self.clone())
    }

    fn fork_child(&self, child: &Node) -> Box<dyn Source> {
        let mut source = Self::for_node(child);
        source.offset = self.offset;
        source.text = self.text.clone();
        Box::new(source)
    }

    fn fallback(&self) -> Result<Box<dyn Source>> {
        match (&self.text, self.range) {
            (Some(text), Some(range)) => Ok(Box::new(TextSource::scoped(Arc::clone(text), range))),
            (None, _) => Err(MatchError::no_fallback(
                Representation::Tokens,
                "original text is not available",
            )),
            (Some(_), None) => Err(MatchError::no_fallback(
                Representation::Tokens,
                "node has no source range",
            )),
        }
    }
}

/// How many flattened positions `token` covers. A reference covers its
/// child: the child's span when it was read from tokens, its leaf count when
/// it fell back to another representation.
fn extent(token: &TokenRef, resolved: &ResolvedChildren) -> usize {
    let child = match resolved.get(&TokenKey::new(token)) {
        Some(child) if token.is_reference() => child,
        _ => return 1,
    };
    match child.source.representation {
        Representation::Tokens => child.source.end.0.saturating_sub(child.source.start.0),
        _ => leaf_count(child, resolved),
    }
}

fn leaf_count(node: &MatchNode, resolved: &ResolvedChildren) -> usize {
    node.cst_tokens
        .iter()
        .map(|token| match resolved.get(&TokenKey::new(token)) {
            Some(child) if token.is_reference() => leaf_count(child, resolved),
            _ => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{id, pn, IDENTIFIER, PUNCTUATOR};
    use crate::token::Token;

    #[test]
    fn test_advance_counts_tokens() {
        let mut source = TokenSource::new(vec![
            Token::new(IDENTIFIER, "a"),
            Token::new(PUNCTUATOR, "+"),
        ]);
        let matched = source.match_descriptor(id("a").as_ref()).unwrap();
        source.advance(&matched, &ResolvedChildren::new());
        assert_eq!(source.position(), Position(1));
        assert!(source.match_descriptor(pn("+").as_ref()).is_some());
    }

    #[test]
    fn test_fork_child_reads_child_tokens() {
        let child = Node::new("Identifier").with_tokens(vec![Token::new(IDENTIFIER, "b")]);
        let parent = TokenSource::new(vec![Token::reference("right")]).with_text("b");
        let forked = parent.fork_child(&child);
        assert_eq!(forked.position(), Position(0));
        assert!(forked.match_descriptor(id("b").as_ref()).is_some());
    }

    #[test]
    fn test_reference_advances_by_child_extent() {
        use crate::source::SourceSpan;

        let reference = Token::reference("left");
        let mut resolved = ResolvedChildren::new();
        resolved.insert(
            TokenKey::new(&reference),
            Arc::new(MatchNode {
                node: Arc::new(Node::new("Call")),
                cst_tokens: vec![Token::new(IDENTIFIER, "f"), Token::new(PUNCTUATOR, "()")],
                source: SourceSpan {
                    representation: Representation::Tokens,
                    start: Position(0),
                    end: Position(3),
                },
            }),
        );
        let mut source = TokenSource::new(vec![Arc::clone(&reference), Token::new(PUNCTUATOR, "+")]);
        source.advance(&[reference], &resolved);
        assert_eq!(source.position(), Position(3));
        assert!(source.match_descriptor(pn("+").as_ref()).is_some());

        let child = source.fork_child(&Node::new("Identifier"));
        assert_eq!(child.position(), Position(3));
    }

    #[test]
    fn test_fallback_to_text_range() {
        let node = Node::new("Identifier").with_range(4, 5);
        let source = TokenSource::for_node(&node).with_text("a + b");
        let text = source.fallback().unwrap();
        assert_eq!(text.representation(), Representation::Text);
        assert_eq!(text.position(), Position(4));

        let orphan = TokenSource::for_node(&node);
        assert!(orphan.fallback().is_err());
    }
}
