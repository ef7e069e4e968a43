//! Lexical descriptors: the leaves that match concrete characters.

use super::{
    take_run, Descriptor, DescriptorRef, IDENTIFIER, KEYWORD, PUNCTUATOR, STRING, TEXT, WHITESPACE,
};
use crate::token::{Token, TokenRef};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").expect("valid regex"));

// Keywords and identifiers only match when the word ends here.
static WORD_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:[(){}\s/\\&#@!`+^%?<>,.;:'"|~-]|$)"#).expect("valid regex")
});

fn word_at(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| WORD_BREAK.is_match(rest))
}

// ============================================================================
// WHITESPACE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Whitespace {
    default: String,
}

impl Descriptor for Whitespace {
    fn kind(&self) -> &str {
        WHITESPACE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.default)
    }

    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>> {
        let run = WHITESPACE_RUN.find(text)?;
        Some(self.build(Some(run.as_str())))
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        let run = take_run(tokens, WHITESPACE);
        (!run.is_empty()).then_some(run)
    }

    fn build(&self, value: Option<&str>) -> Vec<TokenRef> {
        vec![Token::new(WHITESPACE, value.unwrap_or(&self.default))]
    }
}

/// Whitespace; builds `value` (a single space if empty) when synthesised.
pub fn ws(value: &str) -> DescriptorRef {
    let default = if value.is_empty() { " " } else { value };
    Arc::new(Whitespace {
        default: default.to_string(),
    })
}

// ============================================================================
// FIXED-TEXT TOKENS
// ============================================================================

/// Punctuator, keyword or identifier: a token whose text is known up front.
#[derive(Debug, Clone)]
pub struct Literal {
    kind: &'static str,
    value: String,
    word: bool,
}

impl Descriptor for Literal {
    fn kind(&self) -> &str {
        self.kind
    }

    fn value(&self) -> Option<&str> {
        Some(&self.value)
    }

    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>> {
        let matched = if self.word {
            word_at(text, &self.value)
        } else {
            text.starts_with(self.value.as_str())
        };
        matched.then(|| self.build(None))
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        let token = tokens.first()?;
        (token.kind == self.kind && token.value == self.value).then(|| vec![Arc::clone(token)])
    }

    fn build(&self, value: Option<&str>) -> Vec<TokenRef> {
        vec![Token::new(self.kind, value.unwrap_or(&self.value))]
    }
}

pub fn pn(value: &str) -> DescriptorRef {
    Arc::new(Literal {
        kind: PUNCTUATOR,
        value: value.to_string(),
        word: false,
    })
}

pub fn kw(value: &str) -> DescriptorRef {
    Arc::new(Literal {
        kind: KEYWORD,
        value: value.to_string(),
        word: true,
    })
}

pub fn id(value: &str) -> DescriptorRef {
    Arc::new(Literal {
        kind: IDENTIFIER,
        value: value.to_string(),
        word: true,
    })
}

// ============================================================================
// STRING LITERALS
// ============================================================================

/// A quoted string whose unquoted body is `value`. Matches either quote style.
///
/// Escapes are not interpreted; the body must appear verbatim.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    value: String,
}

impl StringLiteral {
    fn quoted(&self, quote: char) -> Vec<TokenRef> {
        let quote = quote.to_string();
        vec![
            Token::new(PUNCTUATOR, quote.as_str()),
            Token::new(TEXT, self.value.as_str()),
            Token::new(PUNCTUATOR, quote.as_str()),
        ]
    }
}

impl Descriptor for StringLiteral {
    fn kind(&self) -> &str {
        STRING
    }

    fn value(&self) -> Option<&str> {
        Some(&self.value)
    }

    fn match_text(&self, text: &str) -> Option<Vec<TokenRef>> {
        ['\'', '"'].into_iter().find_map(|quote| {
            let body = text.strip_prefix(quote)?.strip_prefix(self.value.as_str())?;
            body.starts_with(quote).then(|| self.quoted(quote))
        })
    }

    fn match_tokens(&self, tokens: &[TokenRef]) -> Option<Vec<TokenRef>> {
        let open = tokens.first()?;
        if open.kind != PUNCTUATOR || !(open.value == "'" || open.value == "\"") {
            return None;
        }
        let body = take_run(&tokens[1..], TEXT);
        if body.is_empty() && !self.value.is_empty() {
            return None;
        }
        let close = tokens.get(1 + body.len())?;
        if close.kind != PUNCTUATOR || close.value != open.value {
            return None;
        }
        let mut matched = Vec::with_capacity(body.len() + 2);
        matched.push(Arc::clone(open));
        matched.extend(body);
        matched.push(Arc::clone(close));
        Some(matched)
    }

    /// `value` is the raw literal as written; its first character picks the
    /// quote style. Single quotes are the default.
    fn build(&self, value: Option<&str>) -> Vec<TokenRef> {
        match value {
            Some(raw) if raw.starts_with('"') => self.quoted('"'),
            _ => self.quoted('\''),
        }
    }
}

pub fn string(value: &str) -> DescriptorRef {
    Arc::new(StringLiteral {
        value: value.to_string(),
    })
}
