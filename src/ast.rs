//! AST module for cstmatch
//!
//! The abstract syntax tree is the "pattern" the matcher walks. Nodes are
//! shared behind `Arc` and keep their fields in persistent `im` collections,
//! so handing a node (or a sub-tree) to a grammar or a source never copies it.

// ============================================================================
// IMPORTS
// ============================================================================

use crate::token::TokenRef;
use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A byte range in the original source text.
///
/// # Examples
///
/// ```rust
/// use cstmatch::ast::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared AST node handle.
pub type NodeRef = Arc<Node>;

/// An AST node: a type tag plus named fields.
///
/// `range` is the node's span in the text it was parsed from, when known.
/// `tokens` is a previously matched CST for this node, when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub fields: OrdMap<String, Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Arc<[TokenRef]>>,
}

/// The value held by a node field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Node(NodeRef),
    List(Vector<NodeRef>),
    Value(serde_json::Value),
}

/// One step of a structural path from a node to one of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Structural path from a node to a child, e.g. `arguments.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChildPath(pub Vec<PathSegment>);

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            fields: OrdMap::new(),
            range: None,
            tokens: None,
        }
    }

    pub fn with_node(mut self, name: &str, child: impl Into<NodeRef>) -> Self {
        self.fields.insert(name.to_string(), Field::Node(child.into()));
        self
    }

    pub fn with_list<I>(mut self, name: &str, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeRef>,
    {
        let items = children.into_iter().map(Into::into).collect();
        self.fields.insert(name.to_string(), Field::List(items));
        self
    }

    pub fn with_value(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.to_string(), Field::Value(value.into()));
        self
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.range = Some(Span::new(start, end));
        self
    }

    /// Attaches an existing CST to this node.
    pub fn with_tokens<I: IntoIterator<Item = TokenRef>>(mut self, tokens: I) -> Self {
        self.tokens = Some(tokens.into_iter().collect::<Vec<_>>().into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the single child stored under `name`.
    pub fn child(&self, name: &str) -> Option<&NodeRef> {
        match self.fields.get(name)? {
            Field::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the child list stored under `name`.
    pub fn list(&self, name: &str) -> Option<&Vector<NodeRef>> {
        match self.fields.get(name)? {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the field under `name` as a string, if it is a string value.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Field::Value(value) => value.as_str(),
            _ => None,
        }
    }

    /// Follows `path` from this node and returns the node it ends on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cstmatch::ast::{ChildPath, Node};
    /// let call = Node::new("CallExpression")
    ///     .with_list("arguments", [Node::new("A"), Node::new("B")]);
    /// let second = call.get(&ChildPath::field("arguments").index(1)).unwrap();
    /// assert_eq!(second.node_type, "B");
    /// ```
    pub fn get(&self, path: &ChildPath) -> Option<NodeRef> {
        enum Step<'a> {
            Root(&'a Node),
            Child(&'a NodeRef),
            Field(&'a Field),
        }

        let mut at = Step::Root(self);
        for segment in &path.0 {
            at = match (at, segment) {
                (Step::Root(node), PathSegment::Field(name)) => Step::Field(node.fields.get(name)?),
                (Step::Child(node), PathSegment::Field(name))
                | (Step::Field(Field::Node(node)), PathSegment::Field(name)) => {
                    Step::Field(node.fields.get(name)?)
                }
                (Step::Field(Field::List(items)), PathSegment::Index(i)) => {
                    Step::Child(items.get(*i)?)
                }
                _ => return None,
            };
        }

        match at {
            Step::Child(node) | Step::Field(Field::Node(node)) => Some(Arc::clone(node)),
            _ => None,
        }
    }
}

impl ChildPath {
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl fmt::Display for ChildPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}
