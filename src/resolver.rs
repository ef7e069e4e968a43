//! Reference resolution.
//!
//! A grammar names children by reference (`reference("arguments")`) without
//! saying which one. The resolver turns each matched reference token into a
//! concrete [`ChildPath`], keeping whatever sequencing state it needs to tell
//! the first `arguments` from the second.
//!
//! The executor forks a resolver before every descriptor sequence and keeps
//! the fork only if the whole sequence matched.

use crate::ast::{ChildPath, Field, NodeRef};
use crate::token::Token;
use im::HashMap;
use std::fmt;

pub trait Resolver: fmt::Debug {
    /// An independent copy; resolving on it leaves `self` untouched.
    fn fork(&self) -> Box<dyn Resolver>;

    /// Maps a reference token to the path of the child it stands for.
    fn resolve(&mut self, reference: &Token) -> Option<ChildPath>;
}

/// Builds the resolver used for one node.
pub type ResolverFactory = fn(&NodeRef) -> Box<dyn Resolver>;

/// Resolves a reference name to the field of the same name. List fields are
/// consumed in order: the k-th resolution of `name` yields `name.k`.
#[derive(Debug, Clone)]
pub struct RefResolver {
    node: NodeRef,
    counters: HashMap<String, usize>,
}

impl RefResolver {
    pub fn new(node: &NodeRef) -> Self {
        Self {
            node: NodeRef::clone(node),
            counters: HashMap::new(),
        }
    }

    pub fn boxed(node: &NodeRef) -> Box<dyn Resolver> {
        Box::new(Self::new(node))
    }
}

impl Resolver for RefResolver {
    fn fork(&self) -> Box<dyn Resolver> {
        Box::new(self.clone())
    }

    fn resolve(&mut self, reference: &Token) -> Option<ChildPath> {
        let name = reference.value.as_str();
        match self.node.field(name)? {
            Field::Node(_) => Some(ChildPath::field(name)),
            Field::List(items) => {
                let index = self.counters.get(name).copied().unwrap_or(0);
                if index >= items.len() {
                    return None;
                }
                self.counters.insert(name.to_string(), index + 1);
                Some(ChildPath::field(name).index(index))
            }
            Field::Value(_) => None,
        }
    }
}
