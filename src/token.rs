//! CST tokens and identity keys.
//!
//! Tokens are shared behind `Arc` so that the same token can sit in a node's
//! `cst_tokens`, in an attached CST and as a key of the resolved-children map.
//! Equality on [`Token`] is by value; [`TokenKey`] compares by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Kind tag carried by reference tokens.
pub const REFERENCE: &str = "Reference";

/// A single concrete-syntax token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: String,
    pub value: String,
}

/// Shared token handle. Cloning keeps the identity.
pub type TokenRef = Arc<Token>;

impl Token {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> TokenRef {
        Arc::new(Self {
            kind: kind.into(),
            value: value.into(),
        })
    }

    /// Builds a reference token standing for the child named `name`.
    pub fn reference(name: impl Into<String>) -> TokenRef {
        Self::new(REFERENCE, name)
    }

    pub fn is_reference(&self) -> bool {
        self.kind == REFERENCE
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}

/// Identity key for a token: two keys are equal only if they wrap the very
/// same allocation, regardless of the token's contents.
#[derive(Debug, Clone)]
pub struct TokenKey(TokenRef);

impl TokenKey {
    pub fn new(token: &TokenRef) -> Self {
        Self(Arc::clone(token))
    }

    pub fn token(&self) -> &TokenRef {
        &self.0
    }
}

impl PartialEq for TokenKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TokenKey {}

impl Hash for TokenKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state)
    }
}

impl From<&TokenRef> for TokenKey {
    fn from(token: &TokenRef) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equal_tokens_have_distinct_keys() {
        let a = Token::reference("left");
        let b = Token::reference("left");
        assert_eq!(a, b);
        assert_ne!(TokenKey::new(&a), TokenKey::new(&b));
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Token::new("Identifier", "x");
        let copy = Arc::clone(&a);
        let mut keys = HashSet::new();
        keys.insert(TokenKey::new(&a));
        assert!(keys.contains(&TokenKey::new(&copy)));
    }
}
