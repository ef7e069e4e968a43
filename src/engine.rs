//! Top-level entry point.
//!
//! [`Matcher`] bundles a grammar table with its configuration and runs one
//! complete match per call. Each call gets its own [`MatchingContext`], so a
//! single matcher can serve any number of independent matches, including
//! from several threads at once.

use crate::ast::NodeRef;
use crate::config::MatchConfig;
use crate::errors::Result;
use crate::grammar::GrammarTable;
use crate::path::TreePath;
use crate::resolver::{RefResolver, ResolverFactory};
use crate::runtime::{exec, MatchNode, MatchingContext, ResolvedChildren};
use crate::source::Source;
use crate::token::{TokenKey, TokenRef};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// MATCH RESULT
// ============================================================================

/// A finished match: the root node plus every subtree, keyed by the
/// reference token that stands for it.
#[derive(Debug, Clone)]
pub struct MatchTree {
    pub root: MatchNode,
    pub resolved: ResolvedChildren,
}

impl MatchTree {
    /// The subtree matched for `reference`, if it is one of ours.
    pub fn child(&self, reference: &TokenRef) -> Option<&Arc<MatchNode>> {
        self.resolved.get(&TokenKey::new(reference))
    }

    /// Leaf tokens of the whole tree in source order, with every reference
    /// token replaced by its subtree.
    pub fn flatten(&self) -> Vec<TokenRef> {
        self.flatten_node(&self.root)
    }

    pub fn flatten_node(&self, node: &MatchNode) -> Vec<TokenRef> {
        let mut out = Vec::new();
        self.collect_leaves(node, &mut out);
        out
    }

    fn collect_leaves(&self, node: &MatchNode, out: &mut Vec<TokenRef>) {
        for token in &node.cst_tokens {
            match self.child(token) {
                Some(child) if token.is_reference() => self.collect_leaves(child, out),
                _ => out.push(Arc::clone(token)),
            }
        }
    }

    /// The source text the tree was matched from, rebuilt from its tokens.
    pub fn text(&self) -> String {
        self.flatten().iter().map(|t| t.value.as_str()).collect()
    }

    /// Nodes reachable from the root through reference tokens, the root
    /// included. Subtrees left in `resolved` by abandoned attempts are not
    /// counted.
    pub fn node_count(&self) -> usize {
        self.count_nodes(&self.root)
    }

    fn count_nodes(&self, node: &MatchNode) -> usize {
        1 + node
            .cst_tokens
            .iter()
            .filter(|token| token.is_reference())
            .filter_map(|token| self.child(token))
            .map(|child| self.count_nodes(child))
            .sum::<usize>()
    }
}

// ============================================================================
// MATCHER
// ============================================================================

#[derive(Clone)]
pub struct Matcher {
    grammars: GrammarTable,
    config: MatchConfig,
    resolver: ResolverFactory,
}

impl Matcher {
    pub fn new(grammars: GrammarTable) -> Self {
        Self {
            grammars,
            config: MatchConfig::default(),
            resolver: RefResolver::boxed,
        }
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverFactory) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn grammars(&self) -> &GrammarTable {
        &self.grammars
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Matches `root` against `source`.
    ///
    /// A separator still pending when the root finishes belongs to the root,
    /// so it is appended to the root's tokens rather than dropped.
    pub fn run<S>(&self, root: impl Into<NodeRef>, source: S) -> Result<MatchTree>
    where
        S: Source + 'static,
    {
        self.run_boxed(root, Box::new(source))
    }

    pub fn run_boxed(&self, root: impl Into<NodeRef>, source: Box<dyn Source>) -> Result<MatchTree> {
        let mut ctx =
            MatchingContext::new(&self.grammars, &self.config).with_resolver(self.resolver);
        let path = TreePath::root(root);

        let mut root = exec::match_node(&path, source, &mut ctx)?;
        if let Some(pending) = ctx.take_pending() {
            debug!(tokens = pending.tokens.len(), "flushing trailing separator into root");
            root.cst_tokens.extend(pending.tokens);
        }

        Ok(MatchTree {
            root,
            resolved: ctx.into_resolved(),
        })
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("grammars", &self.grammars)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Matches `root` against `source` with the default configuration.
pub fn match_tree<S>(root: impl Into<NodeRef>, source: S, grammars: &GrammarTable) -> Result<MatchTree>
where
    S: Source + 'static,
{
    Matcher::new(grammars.clone()).run(root, source)
}
