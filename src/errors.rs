//! cstmatch error handling
//!
//! A single `thiserror` enum covers every failure of a match. Each variant
//! also implements `miette::Diagnostic` so callers can render a report with a
//! code, help text and the full cause chain.
//!
//! Only `ParsingFailure` has a retry path (the fallback protocol in the
//! executor). Everything else is fatal the moment it is raised. A local
//! mismatch inside a `Match` command is never an error at all: the executor
//! hands `None` back to the grammar instead.

use crate::source::{Position, Representation};
use miette::Diagnostic;
use thiserror::Error;

/// Canonical result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Unified error type for all matcher failure modes.
#[derive(Debug, Error, Diagnostic)]
pub enum MatchError {
    #[error("unknown node of type `{node_type}`")]
    #[diagnostic(
        code(cstmatch::unknown_node_type),
        help("register a grammar for `{node_type}` in the grammar table")
    )]
    UnknownNodeType { node_type: String },

    #[error("unknown command kind `{kind}`")]
    #[diagnostic(
        code(cstmatch::unknown_command_kind),
        help("grammars may only yield `emit`, `match` or `take` commands")
    )]
    UnknownCommandKind { kind: String },

    #[error("reference `{name}` does not resolve to a child of `{node_type}`")]
    #[diagnostic(code(cstmatch::unresolved_reference))]
    UnresolvedReference { node_type: String, name: String },

    #[error("parsing failed: `{node_type}` expected {descriptor} at {representation} position {position}")]
    #[diagnostic(code(cstmatch::parsing_failure))]
    ParsingFailure {
        node_type: String,
        descriptor: String,
        representation: Representation,
        position: Position,
        #[source]
        cause: Option<Box<MatchError>>,
    },

    #[error("no fallback from {representation} source: {reason}")]
    #[diagnostic(code(cstmatch::no_fallback))]
    NoFallback {
        representation: Representation,
        reason: String,
    },

    #[error("match depth limit of {limit} exceeded at `{node_type}`")]
    #[diagnostic(
        code(cstmatch::depth_limit),
        help("raise `max_depth` in the match configuration")
    )]
    DepthLimitExceeded { limit: usize, node_type: String },

    #[error("invalid match configuration: {message}")]
    #[diagnostic(code(cstmatch::invalid_config))]
    InvalidConfig { message: String },
}

impl MatchError {
    pub(crate) fn no_fallback(representation: Representation, reason: impl Into<String>) -> Self {
        Self::NoFallback {
            representation,
            reason: reason.into(),
        }
    }

    /// True for the one error kind that may be retried through a fallback.
    pub fn is_parsing_failure(&self) -> bool {
        matches!(self, Self::ParsingFailure { .. })
    }

    /// Walks `ParsingFailure` causes down to the innermost error.
    pub fn root_cause(&self) -> &MatchError {
        let mut current = self;
        while let Self::ParsingFailure {
            cause: Some(cause), ..
        } = current
        {
            current = cause;
        }
        current
    }
}
