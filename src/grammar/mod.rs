//! # Grammars
//!
//! A grammar procedure describes how one node type is spelled. It is a
//! resumable state machine: each call to [`Grammar::step`] runs it to its next
//! [`Command`], and the executor answers with a [`Resume`] value before asking
//! for the one after. Procedures are registered per node type in a
//! [`GrammarTable`].
//!
//! ## Module Structure
//!
//! - **`coroutine`**: the peekable wrapper the executor drives
//! - **`adapters`**: closure-backed and scripted grammars

use crate::descriptors::DescriptorRef;
use crate::errors::{MatchError, Result};
use crate::path::TreePath;
use crate::runtime::ResolvedChildren;
use crate::token::TokenRef;
use im::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub mod adapters;
pub mod coroutine;

pub use adapters::{FnGrammar, Script};
pub use coroutine::Coroutine;

// ============================================================================
// COMMANDS
// ============================================================================

/// One instruction yielded by a grammar.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append ready-made tokens; consumes no input.
    Emit(Vec<TokenRef>),
    /// Try the descriptors in order and report the outcome back to the
    /// grammar. A miss is an ordinary answer, not an error.
    Match(Vec<DescriptorRef>),
    /// The descriptors must match; a miss triggers recovery.
    Take(Vec<DescriptorRef>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Emit,
    Match,
    Take,
}

impl Command {
    pub fn emit(tokens: Vec<TokenRef>) -> Self {
        Self::Emit(tokens)
    }

    pub fn matching(descriptors: Vec<DescriptorRef>) -> Self {
        Self::Match(descriptors)
    }

    pub fn take(descriptors: Vec<DescriptorRef>) -> Self {
        Self::Take(descriptors)
    }

    /// Builds a command from a kind given by name, for grammars described as
    /// data (see [`Script::from_names`]). `emit` synthesises the descriptors'
    /// default tokens.
    pub fn from_kind(kind: &str, descriptors: Vec<DescriptorRef>) -> Result<Self> {
        Ok(match kind.parse::<CommandKind>()? {
            CommandKind::Emit => Self::Emit(descriptors.iter().flat_map(|d| d.build(None)).collect()),
            CommandKind::Match => Self::Match(descriptors),
            CommandKind::Take => Self::Take(descriptors),
        })
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Emit(_) => CommandKind::Emit,
            Self::Match(_) => CommandKind::Match,
            Self::Take(_) => CommandKind::Take,
        }
    }
}

impl CommandKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Emit => "emit",
            Self::Match => "match",
            Self::Take => "take",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = MatchError;

    fn from_str(kind: &str) -> Result<Self> {
        match kind {
            "emit" => Ok(Self::Emit),
            "match" => Ok(Self::Match),
            "take" => Ok(Self::Take),
            other => Err(MatchError::UnknownCommandKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// The value sent back into a grammar when it is resumed.
#[derive(Debug, Clone, PartialEq)]
pub enum Resume {
    /// No value: first step, or after `Emit` and a successful `Take`.
    Continue,
    /// A `Match` succeeded with these tokens.
    Matched(Vec<TokenRef>),
    /// A `Match` failed.
    Mismatched,
}

impl Resume {
    pub fn matched(&self) -> Option<&[TokenRef]> {
        match self {
            Self::Matched(tokens) => Some(tokens),
            _ => None,
        }
    }
}

// ============================================================================
// GRAMMAR PROCEDURES
// ============================================================================

/// A grammar procedure as an explicit state machine.
///
/// `children` is the live map from reference tokens to the subtrees matched
/// for them so far.
pub trait Grammar {
    /// Runs to the next command, or returns `None` when finished.
    fn step(&mut self, resume: Resume, children: &ResolvedChildren) -> Option<Command>;
}

/// Creates the grammar procedure for the node at the head of a path.
pub type GrammarFactory = Arc<dyn Fn(&TreePath) -> Box<dyn Grammar> + Send + Sync>;

/// Registry mapping node types to grammar procedures.
#[derive(Default, Clone)]
pub struct GrammarTable {
    grammars: HashMap<String, GrammarFactory>,
}

impl GrammarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, node_type: &str, factory: F)
    where
        F: Fn(&TreePath) -> Box<dyn Grammar> + Send + Sync + 'static,
    {
        self.grammars.insert(node_type.to_string(), Arc::new(factory));
    }

    /// Chaining form of [`GrammarTable::register`].
    pub fn with<F>(mut self, node_type: &str, factory: F) -> Self
    where
        F: Fn(&TreePath) -> Box<dyn Grammar> + Send + Sync + 'static,
    {
        self.register(node_type, factory);
        self
    }

    pub fn get(&self, node_type: &str) -> Option<&GrammarFactory> {
        self.grammars.get(node_type)
    }

    pub fn has(&self, node_type: &str) -> bool {
        self.grammars.contains_key(node_type)
    }

    pub fn remove(&mut self, node_type: &str) -> Option<GrammarFactory> {
        self.grammars.remove(node_type)
    }

    pub fn list(&self) -> Vec<String> {
        self.grammars.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// Looks up the grammar for the path's node and starts it.
    pub fn dispatch(&self, path: &TreePath, children: &ResolvedChildren) -> Result<Coroutine> {
        let node_type = &path.node().node_type;
        let factory = self.get(node_type).ok_or_else(|| MatchError::UnknownNodeType {
            node_type: node_type.clone(),
        })?;
        Ok(Coroutine::start(factory(path), children))
    }
}

impl fmt::Debug for GrammarTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.list();
        names.sort();
        f.debug_struct("GrammarTable").field("grammars", &names).finish()
    }
}
