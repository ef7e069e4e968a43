//! # Descriptors
//!
//! A descriptor is a terminal grammar element. It knows how to recognise
//! itself in raw text, in an existing token stream, and how to synthesise
//! its tokens when there is no input at all.
//!
//! Two kinds are structural and get special treatment from the executor:
//! `Reference` (recurse into a child node) and `Separator` (whitespace whose
//! owner is decided later). Everything else is matched directly.
//!
//! ## Module Structure
//!
//! - **`lexical`**: whitespace, punctuators, keywords, identifiers, strings
//! - **`structural`**: references, separators and the optional wrapper

use crate::token::TokenRef;
use std::fmt;
use std::sync::Arc;

pub mod lexical;
pub mod structural;

pub use lexical::{id, kw, pn, string, ws};
pub use structural::{optional, optional_separator, reference, separator};

pub const REFERENCE: &str = crate::token::REFERENCE;
pub const SEPARATOR: &str = "Separator";
pub const WHITESPACE: &str = "Whitespace";
pub const PUNCTUATOR: &str = "Punctuator";
pub const KEYWORD: &str = "Keyword";
pub const IDENTIFIER: &str = "Identifier";
pub const STRING: &str = "String";
pub const TEXT: &str = "Text";

/// Terminal matcher consumed polymorphically by sources and the executor.
///
/// Both match operations return `None` on failure and never consume input;
/// the caller decides whether to advance.
pub trait Descriptor: fmt::Debug + Send + Sync {
    fn kind(&self) -> &str;

    fn value(&self) -> Option<&str>;

    /// Matches against the remaining raw text.
    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>>;

    /// Matches against the remaining tokens.
    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>>;

    /// Synthesises tokens, optionally overriding the default value.
    fn build(&self, value: Option<&str>) -> Vec<TokenRef>;

    fn is_reference(&self) -> bool {
        self.kind() == REFERENCE
    }

    fn is_separator(&self) -> bool {
        self.kind() == SEPARATOR
    }
}

pub type DescriptorRef = Arc<dyn Descriptor>;

/// Short human-readable form used in diagnostics, e.g. `Punctuator("+")`.
pub fn describe(descriptor: &dyn Descriptor) -> String {
    match descriptor.value() {
        Some(value) => format!("{}({:?})", descriptor.kind(), value),
        None => descriptor.kind().to_string(),
    }
}

/// Takes the longest prefix of `tokens` whose kind is `kind`.
pub(crate) fn take_run(tokens: &[TokenRef], kind: &str) -> Vec<TokenRef> {
    tokens
        .iter()
        .take_while(|token| token.kind == kind)
        .cloned()
        .collect()
}
