//! The match executor.
//!
//! Drives one grammar coroutine against one source position and builds the
//! [`MatchNode`] for that node, recursing into children wherever the grammar
//! names one by reference. Tokens flow from the source into `cst_tokens`;
//! child subtrees flow into the context's resolved-children map.
//!
//! Separator tokens are not appended when matched. They wait in the
//! context's pending slot and are claimed by whichever descriptor is
//! processed next, possibly in an ancestor once the current node is done, so
//! that whitespace between two nodes lands in the node that contains both.

use super::{MatchNode, MatchingContext};
use crate::ast::NodeRef;
use crate::descriptors::{describe, DescriptorRef};
use crate::errors::{MatchError, Result};
use crate::grammar::{Command, CommandKind, Resume};
use crate::path::TreePath;
use crate::resolver::Resolver;
use crate::source::{Source, SourceSpan};
use crate::token::TokenRef;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Outcome of one run of a grammar against one source.
enum Attempt {
    Matched(MatchNode),
    /// A `Take` missed; the node has to be retried on a fallback source.
    TakeFailed { descriptor: String },
}

/// Outcome of one descriptor sequence.
enum Sequence {
    Matched(Vec<TokenRef>),
    Failed { descriptor: String },
}

impl Sequence {
    fn into_resume(self) -> Resume {
        match self {
            Sequence::Matched(tokens) => Resume::Matched(tokens),
            Sequence::Failed { .. } => Resume::Mismatched,
        }
    }
}

/// Matches the node at the head of `path`, restarting on a fallback source
/// whenever a `Take` cannot be satisfied.
#[instrument(
    level = "debug",
    skip_all,
    fields(node_type = %path.node().node_type, depth = path.depth())
)]
pub(crate) fn match_node(
    path: &TreePath,
    mut source: Box<dyn Source>,
    ctx: &mut MatchingContext<'_>,
) -> Result<MatchNode> {
    let node_type = &path.node().node_type;
    let limit = ctx.config().max_depth;
    if path.depth() > limit {
        return Err(MatchError::DepthLimitExceeded {
            limit,
            node_type: node_type.clone(),
        });
    }

    let mut fallbacks = 0;
    loop {
        let descriptor = match attempt(path, source.as_mut(), ctx)? {
            Attempt::Matched(matched) => return Ok(matched),
            Attempt::TakeFailed { descriptor } => descriptor,
        };

        let representation = source.representation();
        let position = source.position();
        let next = if fallbacks >= ctx.config().max_fallbacks {
            Err(MatchError::no_fallback(
                representation,
                format!("fallback limit of {} reached", ctx.config().max_fallbacks),
            ))
        } else {
            source.fallback()
        };

        match next {
            Ok(fallback) => {
                debug!(
                    %descriptor,
                    from = %representation,
                    to = %fallback.representation(),
                    "take failed, restarting on fallback source"
                );
                fallbacks += 1;
                source = fallback;
            }
            Err(cause) => {
                warn!(%descriptor, %representation, %position, "parsing failed");
                return Err(MatchError::ParsingFailure {
                    node_type: node_type.clone(),
                    descriptor,
                    representation,
                    position,
                    cause: Some(Box::new(cause)),
                });
            }
        }
    }
}

/// Runs the node's grammar to completion against `source`.
fn attempt(
    path: &TreePath,
    source: &mut dyn Source,
    ctx: &mut MatchingContext<'_>,
) -> Result<Attempt> {
    let node = path.node();
    let start = source.position();
    let mut cst_tokens = Vec::new();
    let mut grammar = ctx.grammars().dispatch(path, ctx.resolved())?;
    let mut resolver = ctx.resolver_for(node);

    while let Some(command) = grammar.peek().cloned() {
        trace!(command = %command.kind(), position = %source.position(), "step");
        let (kind, descriptors) = match command {
            Command::Emit(tokens) => {
                cst_tokens.extend(tokens);
                grammar.advance(Resume::Continue, ctx.resolved());
                continue;
            }
            Command::Match(descriptors) => (CommandKind::Match, descriptors),
            Command::Take(descriptors) => (CommandKind::Take, descriptors),
        };

        let mut forked = resolver.fork();
        let outcome = match_sequence(path, &descriptors, source, forked.as_mut(), ctx)?;
        if matches!(outcome, Sequence::Matched(_)) {
            resolver = forked;
        }

        match (kind, outcome) {
            (CommandKind::Take, Sequence::Matched(tokens)) => {
                cst_tokens.extend(tokens);
                grammar.advance(Resume::Continue, ctx.resolved());
            }
            (CommandKind::Take, Sequence::Failed { descriptor }) => {
                return Ok(Attempt::TakeFailed { descriptor });
            }
            (_, outcome) => grammar.advance(outcome.into_resume(), ctx.resolved()),
        }
    }

    Ok(Attempt::Matched(MatchNode {
        node: NodeRef::clone(node),
        cst_tokens,
        source: SourceSpan {
            representation: source.representation(),
            start,
            end: source.position(),
        },
    }))
}

/// Matches `descriptors` left to right at the source's current position.
///
/// The source advances after each descriptor that matches and is not
/// rewound if a later one misses; only the resolver fork is discarded.
fn match_sequence(
    path: &TreePath,
    descriptors: &[DescriptorRef],
    source: &mut dyn Source,
    resolver: &mut dyn Resolver,
    ctx: &mut MatchingContext<'_>,
) -> Result<Sequence> {
    let mut matched = Vec::new();

    for descriptor in descriptors {
        if let Some(pending) = ctx.take_pending() {
            matched.extend(pending.tokens);
        }

        let Some(tokens) = source.match_descriptor(descriptor.as_ref()) else {
            return Ok(Sequence::Failed {
                descriptor: describe(descriptor.as_ref()),
            });
        };

        if descriptor.is_reference() {
            let Some(reference) = tokens.first().cloned() else {
                return Ok(Sequence::Failed {
                    descriptor: describe(descriptor.as_ref()),
                });
            };
            let tree = match_child(path, &reference, source, resolver, ctx)?;
            // Any separator the child left pending now waits for our next
            // descriptor, or for an ancestor.
            ctx.record(&reference, tree);
            matched.push(reference);
            source.advance(&tokens, ctx.resolved());
        } else if descriptor.is_separator() {
            source.advance(&tokens, ctx.resolved());
            ctx.defer_separator(tokens, Arc::clone(descriptor));
        } else {
            source.advance(&tokens, ctx.resolved());
            matched.extend(tokens);
        }
    }

    Ok(Sequence::Matched(matched))
}

/// Resolves `reference` to a child of the current node and matches it on a
/// source scoped to that child.
fn match_child(
    path: &TreePath,
    reference: &TokenRef,
    source: &dyn Source,
    resolver: &mut dyn Resolver,
    ctx: &mut MatchingContext<'_>,
) -> Result<MatchNode> {
    let node = path.node();
    let unresolved = || MatchError::UnresolvedReference {
        node_type: node.node_type.clone(),
        name: reference.value.clone(),
    };
    let child_path = resolver.resolve(reference).ok_or_else(unresolved)?;
    let child = node.get(&child_path).ok_or_else(unresolved)?;
    trace!(child = %child_path, child_type = %child.node_type, "descending");

    let child_source = source.fork_child(&child);
    match_node(&path.child(child, child_path), child_source, ctx)
}
