//! Peekable two-way wrapper around a grammar procedure.
//!
//! The executor has to see which kind of command was yielded before it knows
//! what to send back, so the wrapper holds the most recent command until it
//! is explicitly resumed.

use super::{Command, Grammar, Resume};
use crate::runtime::ResolvedChildren;

pub struct Coroutine {
    grammar: Box<dyn Grammar>,
    current: Option<Command>,
}

impl Coroutine {
    /// Runs `grammar` to its first command.
    pub fn start(mut grammar: Box<dyn Grammar>, children: &ResolvedChildren) -> Self {
        let current = grammar.step(Resume::Continue, children);
        Self { grammar, current }
    }

    /// The pending command, without consuming it. `None` once done.
    pub fn peek(&self) -> Option<&Command> {
        self.current.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Sends `resume` in and moves on to the next command. Does nothing once
    /// the procedure has finished.
    pub fn advance(&mut self, resume: Resume, children: &ResolvedChildren) {
        if self.current.is_some() {
            self.current = self.grammar.step(resume, children);
        }
    }
}

impl std::fmt::Debug for Coroutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coroutine")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{kw, pn};
    use crate::grammar::{CommandKind, FnGrammar, Script};

    #[test]
    fn test_peek_does_not_consume() {
        let children = ResolvedChildren::new();
        let mut co = Coroutine::start(
            Box::new(Script::new(vec![Command::take(vec![kw("return")]), Command::take(vec![pn(";")])])),
            &children,
        );
        assert_eq!(co.peek().map(Command::kind), Some(CommandKind::Take));
        assert_eq!(co.peek().map(Command::kind), Some(CommandKind::Take));
        co.advance(Resume::Continue, &children);
        assert!(!co.is_done());
        co.advance(Resume::Continue, &children);
        assert!(co.is_done());
        co.advance(Resume::Continue, &children);
        assert!(co.peek().is_none());
    }

    #[test]
    fn test_resume_value_reaches_grammar() {
        let children = ResolvedChildren::new();
        let mut seen = Vec::new();
        let grammar = FnGrammar::new(move |resume: Resume, _: &ResolvedChildren| {
            seen.push(resume.clone());
            match seen.len() {
                1 => Some(Command::matching(vec![kw("async")])),
                2 if resume == Resume::Mismatched => Some(Command::take(vec![kw("function")])),
                _ => None,
            }
        });
        let mut co = Coroutine::start(Box::new(grammar), &children);
        assert_eq!(co.peek().map(Command::kind), Some(CommandKind::Match));
        co.advance(Resume::Mismatched, &children);
        assert_eq!(co.peek().map(Command::kind), Some(CommandKind::Take));
        co.advance(Resume::Continue, &children);
        assert!(co.is_done());
    }
}
