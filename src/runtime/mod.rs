//! # Matching runtime
//!
//! The executor and the state it shares across one top-level match.
//!
//! - **`context`**: [`MatchingContext`], including the pending-separator mailbox
//! - **`exec`**: the recursive executor driving grammar coroutines

use crate::ast::NodeRef;
use crate::source::SourceSpan;
use crate::token::{TokenKey, TokenRef};
use serde::Serialize;
use std::sync::Arc;

pub mod context;
pub(crate) mod exec;

pub use context::{MatchingContext, PendingSeparator};

/// The tokens matched for one AST node and where they were found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchNode {
    pub node: NodeRef,
    pub cst_tokens: Vec<TokenRef>,
    pub source: SourceSpan,
}

/// Identity-keyed map from every matched reference token to the subtree
/// matched for it.
pub type ResolvedChildren = im::HashMap<TokenKey, Arc<MatchNode>>;
