//! Source with no input: every descriptor is satisfied by building its
//! default tokens. Used to produce a CST for freshly constructed nodes.

use super::{Position, Representation, Source};
use crate::ast::Node;
use crate::descriptors::Descriptor;
use crate::errors::{MatchError, Result};
use crate::runtime::ResolvedChildren;
use crate::token::TokenRef;

#[derive(Debug, Clone, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    pub fn new() -> Self {
        Self
    }
}

impl Source for SyntheticSource {
    fn representation(&self) -> Representation {
        Representation::Synthetic
    }

    fn position(&self) -> Position {
        Position(0)
    }

    fn is_exhausted(&self) -> bool {
        false
    }

    fn match_descriptor(&self, descriptor: &dyn Descriptor) -> Option<Vec<TokenRef>> {
        Some(descriptor.build(None))
    }

    fn advance(&mut self, _tokens: &[TokenRef], _resolved: &ResolvedChildren) {}

    fn fork(&self) -> Box<dyn Source> {
        Box::new(Self)
    }

    fn fork_child(&self, _child: &Node) -> Box<dyn Source> {
        Box::new(Self)
    }

    fn fallback(&self) -> Result<Box<dyn Source>> {
        Err(MatchError::no_fallback(
            Representation::Synthetic,
            "synthesised input cannot fail over",
        ))
    }
}
