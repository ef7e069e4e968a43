//! End-to-end matching of small trees against flat text.

mod common;

use common::*;
use cstmatch::prelude::*;
use std::sync::Arc;

#[test]
fn test_binary_expression_tokens_and_children() {
    let tree = match_text(binary(ident("a"), ident("b")), "a + b").unwrap();
    let root = &tree.root;

    assert_eq!(
        kinds(&root.cst_tokens),
        vec!["Reference", "Whitespace", "Punctuator", "Whitespace", "Reference"]
    );
    assert_eq!(values(&root.cst_tokens), vec!["left", " ", "+", " ", "right"]);
    assert_eq!(root.source.representation, Representation::Text);
    assert_eq!((root.source.start, root.source.end), (Position(0), Position(5)));

    assert_eq!(tree.resolved.len(), 2);
    let left = tree.child(&root.cst_tokens[0]).unwrap();
    let right = tree.child(&root.cst_tokens[4]).unwrap();
    assert_eq!(values(&left.cst_tokens), vec!["a"]);
    assert_eq!(kinds(&left.cst_tokens), vec!["Identifier"]);
    assert_eq!(values(&right.cst_tokens), vec!["b"]);
    assert_eq!((left.source.start, left.source.end), (Position(0), Position(1)));
    assert_eq!((right.source.start, right.source.end), (Position(4), Position(5)));
    assert_eq!(tree.text(), "a + b");
}

#[test]
fn test_children_are_keyed_by_token_identity() {
    let tree = match_text(binary(ident("a"), ident("b")), "a+b").unwrap();
    let lookalike = Token::reference("left");
    assert!(tree.child(&lookalike).is_none());
    assert!(tree.child(&tree.root.cst_tokens[0]).is_some());
    assert_eq!(values(&tree.root.cst_tokens), vec!["left", "+", "right"]);
}

#[test]
fn test_missing_operand_is_a_parsing_failure() {
    let err = match_text(binary(ident("a"), ident("b")), "a +").unwrap_err();
    match &err {
        MatchError::ParsingFailure {
            node_type,
            descriptor,
            representation,
            position,
            ..
        } => {
            assert_eq!(node_type, "BinaryExpression");
            assert_eq!(descriptor, "Reference(\"right\")");
            assert_eq!(*representation, Representation::Text);
            assert_eq!(*position, Position(3));
        }
        other => panic!("expected a parsing failure, got {other:?}"),
    }
    assert!(matches!(err.root_cause(), MatchError::NoFallback { .. }));
}

#[test]
fn test_optional_separator_may_be_absent() {
    let tree = match_text(Node::new("ReturnStatement"), "return").unwrap();
    assert_eq!(values(&tree.root.cst_tokens), vec!["return"]);
    assert_eq!(kinds(&tree.root.cst_tokens), vec!["Keyword"]);
    assert_eq!(tree.root.source.end, Position(6));
}

#[test]
fn test_optional_separator_may_be_present() {
    let tree = match_text(Node::new("ReturnStatement"), "  return").unwrap();
    assert_eq!(values(&tree.root.cst_tokens), vec!["  ", "return"]);
    assert_eq!(tree.text(), "  return");
}

#[test]
fn test_three_levels_of_nesting() {
    let root = paren(paren(paren(ident("x"))));
    let tree = match_text(root, "(((x)))").unwrap();

    assert_eq!(tree.resolved.len(), 3);
    assert_eq!(tree.node_count(), 4);

    // Walk down through the references and check each span sits inside its parent's.
    let mut outer = tree.root.clone();
    let mut depth = 0;
    loop {
        let Some(reference) = outer.cst_tokens.iter().find(|t| t.is_reference()).cloned() else {
            break;
        };
        let inner = tree.child(&reference).unwrap();
        assert!(inner.source.start > outer.source.start);
        assert!(inner.source.end < outer.source.end);
        outer = MatchNode::clone(inner);
        depth += 1;
    }
    assert_eq!(depth, 3);
    assert_eq!(values(&outer.cst_tokens), vec!["x"]);
    assert_eq!((outer.source.start, outer.source.end), (Position(3), Position(4)));
    assert_eq!(tree.text(), "(((x)))");
}

#[test]
fn test_list_children_resolve_in_order() {
    let tree = match_text(sequence([ident("a"), ident("b"), ident("c")]), "a, b ,c").unwrap();

    let references: Vec<&TokenRef> = tree.root.cst_tokens.iter().filter(|t| t.is_reference()).collect();
    assert_eq!(references.len(), 3);
    let names: Vec<String> = references
        .iter()
        .map(|r| tree.child(r).unwrap().node.str_value("name").unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(tree.text(), "a, b ,c");
}

#[test]
fn test_match_result_is_fed_back_to_the_grammar() {
    let with_semicolon = Node::new("ExpressionStatement").with_node("expression", ident("x"));
    let tree = match_text(with_semicolon.clone(), "x ;").unwrap();
    assert_eq!(values(&tree.root.cst_tokens), vec!["expression", " ", ";"]);

    let tree = match_text(with_semicolon, "x").unwrap();
    assert_eq!(values(&tree.root.cst_tokens), vec!["expression"]);
    assert_eq!(tree.root.source.end, Position(1));
}

#[test]
fn test_separator_between_nodes_belongs_to_the_parent() {
    let tree = match_text(binary(ident("a"), ident("b")), "a  +\tb").unwrap();
    for child in tree.resolved.values() {
        assert!(child.cst_tokens.iter().all(|t| t.kind != "Whitespace"));
    }
    assert_eq!(values(&tree.root.cst_tokens), vec!["left", "  ", "+", "\t", "right"]);
}

#[test]
fn test_flatten_replaces_references() {
    let tree = match_text(binary(paren(ident("a")), ident("b")), "(a) + b").unwrap();
    let flat = tree.flatten();
    assert_eq!(values(&flat), vec!["(", "a", ")", " ", "+", " ", "b"]);
    assert!(flat.iter().all(|t| !t.is_reference()));
}

#[test]
fn test_matcher_is_reusable() {
    let matcher = Matcher::new(grammars());
    let node = Arc::new(binary(ident("a"), ident("b")));
    let first = matcher.run(Arc::clone(&node), TextSource::new("a+b")).unwrap();
    let second = matcher.run(node, TextSource::new("a + b")).unwrap();
    assert_eq!(first.text(), "a+b");
    assert_eq!(second.text(), "a + b");
    assert_eq!(first.resolved.len(), 2);
    assert_eq!(second.resolved.len(), 2);
}

#[test]
fn test_independent_matches_run_in_parallel() {
    let matcher = Arc::new(Matcher::new(grammars()));
    let handles: Vec<_> = ["a+b", "a + b", "a  +  b"]
        .into_iter()
        .map(|text| {
            let matcher = Arc::clone(&matcher);
            std::thread::spawn(move || {
                matcher
                    .run(binary(ident("a"), ident("b")), TextSource::new(text))
                    .map(|tree| tree.text())
                    .unwrap()
            })
        })
        .collect();
    let texts: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(texts, vec!["a+b", "a + b", "a  +  b"]);
}
