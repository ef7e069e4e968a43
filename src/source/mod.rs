//! # Input sources
//!
//! A [`Source`] is the matcher's input cursor. It may read flat text, an
//! already-built CST, or nothing at all (synthesising tokens from
//! descriptors). Sources are forked rather than shared whenever a match
//! might be abandoned, and a source that cannot satisfy a mandatory match may
//! offer an alternate representation through [`Source::fallback`].
//!
//! ## Module Structure
//!
//! - **`text`**: flat source text, byte positions
//! - **`tokens`**: a CST previously attached to the AST, token positions
//! - **`synthetic`**: no input, every descriptor is built from scratch

use crate::ast::Node;
use crate::descriptors::Descriptor;
use crate::errors::Result;
use crate::runtime::ResolvedChildren;
use crate::token::TokenRef;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod synthetic;
pub mod text;
pub mod tokens;

pub use synthetic::SyntheticSource;
pub use text::TextSource;
pub use tokens::TokenSource;

/// Which kind of input a source reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    Text,
    Tokens,
    Synthetic,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Text => write!(f, "text"),
            Representation::Tokens => write!(f, "tokens"),
            Representation::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// Opaque cursor position. Its unit depends on the representation: bytes
/// for text, token indices for token streams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position(pub usize);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where in its input a match node was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub representation: Representation,
    pub start: Position,
    pub end: Position,
}

/// The input cursor the executor drives.
///
/// `match_descriptor` is a pure probe; only `advance` moves the cursor.
pub trait Source: fmt::Debug {
    fn representation(&self) -> Representation;

    fn position(&self) -> Position;

    fn is_exhausted(&self) -> bool;

    /// Probes `descriptor` at the current position without consuming input.
    fn match_descriptor(&self, descriptor: &dyn Descriptor) -> Option<Vec<TokenRef>>;

    /// Moves past `tokens`, which must be the result of the last successful
    /// probe. Reference tokens are skipped using the span recorded for them
    /// in `resolved`.
    fn advance(&mut self, tokens: &[TokenRef], resolved: &ResolvedChildren);

    /// An independent cursor at the same position.
    fn fork(&self) -> Box<dyn Source>;

    /// A cursor scoped to `child`'s own input.
    fn fork_child(&self, child: &Node) -> Box<dyn Source>;

    /// An alternate representation of the same input, if one exists.
    fn fallback(&self) -> Result<Box<dyn Source>>;
}
