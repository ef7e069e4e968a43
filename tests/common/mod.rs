//! # Shared grammars and fixtures
//!
//! A handful of JavaScript-flavoured grammars that the integration tests
//! match against. Each grammar reads only what it needs from its node.

#![allow(dead_code)]

use cstmatch::prelude::*;

// ============================================================================
// GRAMMARS
// ============================================================================

/// `Identifier`: the node's `name`, verbatim.
pub fn identifier_grammar(path: &TreePath) -> Box<dyn Grammar> {
    let name = path.node().str_value("name").unwrap_or_default().to_string();
    Box::new(Script::new(vec![Command::take(vec![id(&name)])]))
}

/// `BinaryExpression`: `left + right`, spaces optional.
pub fn binary_grammar(path: &TreePath) -> Box<dyn Grammar> {
    let operator = path.node().str_value("operator").unwrap_or("+").to_string();
    Box::new(Script::new(vec![Command::take(vec![
        reference("left"),
        optional_separator(),
        pn(&operator),
        optional_separator(),
        reference("right"),
    ])]))
}

/// `ReturnStatement` without an argument.
pub fn return_grammar(_: &TreePath) -> Box<dyn Grammar> {
    Box::new(Script::new(vec![Command::take(vec![
        optional_separator(),
        kw("return"),
    ])]))
}

/// `ParenthesizedExpression`: `( expression )`.
pub fn paren_grammar(_: &TreePath) -> Box<dyn Grammar> {
    Box::new(Script::new(vec![Command::take(vec![
        pn("("),
        reference("expression"),
        pn(")"),
    ])]))
}

/// `SequenceExpression`: `a, b, c`. Branches on the list length.
pub fn sequence_grammar(path: &TreePath) -> Box<dyn Grammar> {
    let count = path.node().list("expressions").map_or(0, |items| items.len());
    let mut taken = 0;
    let mut between = false;
    Box::new(FnGrammar::new(move |_: Resume, _: &ResolvedChildren| {
        if taken == count {
            return None;
        }
        if between {
            between = false;
            return Some(Command::take(vec![
                optional_separator(),
                pn(","),
                optional_separator(),
            ]));
        }
        taken += 1;
        between = taken < count;
        Some(Command::take(vec![reference("expressions")]))
    }))
}

/// `ExpressionStatement`: the expression, optionally followed by `;`.
pub fn statement_grammar(_: &TreePath) -> Box<dyn Grammar> {
    let mut step = 0;
    Box::new(FnGrammar::new(move |resume: Resume, _: &ResolvedChildren| {
        step += 1;
        match step {
            1 => Some(Command::take(vec![reference("expression")])),
            2 => Some(Command::matching(vec![optional_separator(), pn(";")])),
            3 => resume.matched().map(|tokens| Command::emit(tokens.to_vec())),
            _ => None,
        }
    }))
}

pub fn grammars() -> GrammarTable {
    GrammarTable::new()
        .with("Identifier", identifier_grammar)
        .with("BinaryExpression", binary_grammar)
        .with("ReturnStatement", return_grammar)
        .with("ParenthesizedExpression", paren_grammar)
        .with("SequenceExpression", sequence_grammar)
        .with("ExpressionStatement", statement_grammar)
}

// ============================================================================
// NODES
// ============================================================================

pub fn ident(name: &str) -> Node {
    Node::new("Identifier").with_value("name", name)
}

pub fn binary(left: Node, right: Node) -> Node {
    Node::new("BinaryExpression")
        .with_node("left", left)
        .with_value("operator", "+")
        .with_node("right", right)
}

pub fn paren(expression: Node) -> Node {
    Node::new("ParenthesizedExpression").with_node("expression", expression)
}

pub fn sequence<I: IntoIterator<Item = Node>>(expressions: I) -> Node {
    Node::new("SequenceExpression").with_list("expressions", expressions)
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn values(tokens: &[TokenRef]) -> Vec<&str> {
    tokens.iter().map(|t| t.value.as_str()).collect()
}

pub fn kinds(tokens: &[TokenRef]) -> Vec<&str> {
    tokens.iter().map(|t| t.kind.as_str()).collect()
}

pub fn match_text(root: Node, text: &str) -> Result<MatchTree> {
    match_tree(root, TextSource::new(text), &grammars())
}
