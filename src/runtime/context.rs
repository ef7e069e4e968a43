//! State shared by every executor frame of one top-level match.

use super::{MatchNode, ResolvedChildren};
use crate::ast::NodeRef;
use crate::config::MatchConfig;
use crate::descriptors::DescriptorRef;
use crate::grammar::GrammarTable;
use crate::resolver::{RefResolver, Resolver, ResolverFactory};
use crate::token::{TokenKey, TokenRef};
use std::sync::Arc;

/// Separator tokens whose owner is not known yet.
#[derive(Debug, Clone)]
pub struct PendingSeparator {
    pub tokens: Vec<TokenRef>,
    pub descriptor: DescriptorRef,
}

/// Created once per top-level match and threaded through every recursive
/// executor call. Never shared between matches.
pub struct MatchingContext<'a> {
    grammars: &'a GrammarTable,
    config: &'a MatchConfig,
    resolver_factory: ResolverFactory,
    resolved: ResolvedChildren,
    // Single slot: set only when empty, cleared by the first claimant.
    pending: Option<PendingSeparator>,
}

impl<'a> MatchingContext<'a> {
    pub fn new(grammars: &'a GrammarTable, config: &'a MatchConfig) -> Self {
        Self {
            grammars,
            config,
            resolver_factory: RefResolver::boxed,
            resolved: ResolvedChildren::new(),
            pending: None,
        }
    }

    pub fn with_resolver(mut self, factory: ResolverFactory) -> Self {
        self.resolver_factory = factory;
        self
    }

    pub fn grammars(&self) -> &'a GrammarTable {
        self.grammars
    }

    pub fn config(&self) -> &'a MatchConfig {
        self.config
    }

    pub fn resolver_for(&self, node: &NodeRef) -> Box<dyn Resolver> {
        (self.resolver_factory)(node)
    }

    pub fn resolved(&self) -> &ResolvedChildren {
        &self.resolved
    }

    pub fn into_resolved(self) -> ResolvedChildren {
        self.resolved
    }

    /// Associates a reference token with the subtree matched for it.
    pub fn record(&mut self, reference: &TokenRef, tree: MatchNode) {
        self.resolved.insert(TokenKey::new(reference), Arc::new(tree));
    }

    /// Parks separator tokens until it is clear which node they belong to.
    pub fn defer_separator(&mut self, tokens: Vec<TokenRef>, descriptor: DescriptorRef) {
        debug_assert!(
            self.pending.is_none(),
            "pending separator overwritten before being claimed"
        );
        self.pending = Some(PendingSeparator { tokens, descriptor });
    }

    /// Claims the pending separator, leaving the slot empty.
    pub fn take_pending(&mut self) -> Option<PendingSeparator> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl std::fmt::Debug for MatchingContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingContext")
            .field("grammars", self.grammars)
            .field("config", self.config)
            .field("resolved", &self.resolved.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
