//! Ready-made [`Grammar`] implementations.

use super::{Command, Grammar, Resume};
use crate::descriptors::DescriptorRef;
use crate::errors::Result;
use crate::runtime::ResolvedChildren;
use std::collections::VecDeque;

/// A grammar backed by a step closure.
pub struct FnGrammar<F> {
    step: F,
}

impl<F> FnGrammar<F>
where
    F: FnMut(Resume, &ResolvedChildren) -> Option<Command>,
{
    pub fn new(step: F) -> Self {
        Self { step }
    }
}

impl<F> Grammar for FnGrammar<F>
where
    F: FnMut(Resume, &ResolvedChildren) -> Option<Command>,
{
    fn step(&mut self, resume: Resume, children: &ResolvedChildren) -> Option<Command> {
        (self.step)(resume, children)
    }
}

/// A fixed list of commands, yielded in order. Replies are ignored, so a
/// script never branches.
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: VecDeque<Command>,
}

impl Script {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    /// Builds a script from commands named as data (`"emit"`, `"match"`,
    /// `"take"`), e.g. a grammar loaded from a description file. Fails with
    /// `UnknownCommandKind` on the first name it does not recognise.
    pub fn from_names<I, S>(commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<DescriptorRef>)>,
        S: AsRef<str>,
    {
        commands
            .into_iter()
            .map(|(kind, descriptors)| Command::from_kind(kind.as_ref(), descriptors))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }
}

impl Grammar for Script {
    fn step(&mut self, _resume: Resume, _children: &ResolvedChildren) -> Option<Command> {
        self.commands.pop_front()
    }
}
