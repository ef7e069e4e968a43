//! # cstmatch
//!
//! Matches an abstract syntax tree against a stream of input (raw text, an
//! existing concrete syntax tree, or nothing at all) and records, for every
//! node, exactly which tokens belong to it and where they were found. The
//! result can be flattened back into the original text byte for byte.
//!
//! Matching is driven by per-node-type grammar procedures that yield
//! [`grammar::Command`]s one at a time; see [`engine::Matcher`].

pub use crate::engine::{match_tree, MatchTree, Matcher};
pub use crate::errors::{MatchError, Result};

pub mod ast;
pub mod config;
pub mod descriptors;
pub mod engine;
pub mod errors;
pub mod grammar;
pub mod path;
pub mod resolver;
pub mod runtime;
pub mod source;
pub mod token;

/// Everything needed to write grammars and run matches.
pub mod prelude {
    pub use crate::ast::{ChildPath, Field, Node, NodeRef, PathSegment, Span};
    pub use crate::config::MatchConfig;
    pub use crate::descriptors::{
        id, kw, optional, optional_separator, pn, reference, separator, string, ws, Descriptor,
        DescriptorRef,
    };
    pub use crate::engine::{match_tree, MatchTree, Matcher};
    pub use crate::errors::{MatchError, Result};
    pub use crate::grammar::{
        Command, CommandKind, FnGrammar, Grammar, GrammarTable, Resume, Script,
    };
    pub use crate::path::TreePath;
    pub use crate::resolver::{RefResolver, Resolver};
    pub use crate::runtime::{MatchNode, ResolvedChildren};
    pub use crate::source::{
        Position, Representation, Source, SourceSpan, SyntheticSource, TextSource, TokenSource,
    };
    pub use crate::token::{Token, TokenKey, TokenRef};
}
