//! An immutable ancestry chain: the node being matched plus every node above it.
//!
//! Each recursion step of the executor builds one new link on top of its
//! parent's. Links are shared, so a path is cheap to clone and can never form
//! a cycle: a parent is always created before its child.

use crate::ast::{ChildPath, NodeRef};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TreePath(Arc<Link>);

#[derive(Debug)]
struct Link {
    node: NodeRef,
    parent: Option<TreePath>,
    path: ChildPath,
    depth: usize,
}

impl TreePath {
    pub fn root(node: impl Into<NodeRef>) -> Self {
        Self(Arc::new(Link {
            node: node.into(),
            parent: None,
            path: ChildPath::default(),
            depth: 0,
        }))
    }

    /// Extends the chain with `node`, found at `path` below the current node.
    pub fn child(&self, node: NodeRef, path: ChildPath) -> Self {
        Self(Arc::new(Link {
            node,
            parent: Some(self.clone()),
            path,
            depth: self.0.depth + 1,
        }))
    }

    pub fn node(&self) -> &NodeRef {
        &self.0.node
    }

    pub fn parent(&self) -> Option<&TreePath> {
        self.0.parent.as_ref()
    }

    /// Path from the parent to this node; empty at the root.
    pub fn path(&self) -> &ChildPath {
        &self.0.path
    }

    /// Number of links above this one.
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// This path and every parent, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TreePath> {
        std::iter::successors(Some(self), |path| path.parent())
    }
}
