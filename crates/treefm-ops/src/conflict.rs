//! Overwrite policy for file name conflicts during a transfer.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How an existing target file is handled.
///
/// `IgnoreAll` and `OverwriteAll` stick for the rest of the transfer once
/// chosen; `IgnoreFile` and `OverwriteFile` apply to one file only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Ask the resolver for every conflict.
    #[default]
    Ask,
    /// Keep the existing target file this time.
    IgnoreFile,
    /// Keep every existing target file from now on.
    IgnoreAll,
    /// Replace the existing target file this time.
    OverwriteFile,
    /// Replace every existing target file from now on.
    OverwriteAll,
}

impl OverwritePolicy {
    /// Whether this answer becomes the engine-wide state.
    pub fn is_sticky(self) -> bool {
        matches!(self, Self::IgnoreAll | Self::OverwriteAll)
    }

    /// Whether the existing target gets replaced.
    pub fn overwrites(self) -> bool {
        matches!(self, Self::OverwriteFile | Self::OverwriteAll)
    }
}

/// Decides what to do with a target file that already exists.
///
/// Called only while the transfer's policy is not sticky. Returning
/// [`OverwritePolicy::Ask`] is treated as [`OverwritePolicy::IgnoreFile`].
pub trait ConflictResolver {
    /// Resolve the conflict at `target`.
    fn resolve(&mut self, target: &Path) -> OverwritePolicy;
}

impl<F> ConflictResolver for F
where
    F: FnMut(&Path) -> OverwritePolicy,
{
    fn resolve(&mut self, target: &Path) -> OverwritePolicy {
        self(target)
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedResolver(pub OverwritePolicy);

impl ConflictResolver for FixedResolver {
    fn resolve(&mut self, _target: &Path) -> OverwritePolicy {
        self.0
    }
}

/// Replays a queue of answers and records every prompt.
///
/// Once the queue runs dry every further conflict is ignored.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    answers: VecDeque<OverwritePolicy>,
    prompts: Vec<PathBuf>,
}

impl ScriptedResolver {
    /// Create a resolver answering with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = OverwritePolicy>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Targets the resolver was asked about, in order.
    pub fn prompts(&self) -> &[PathBuf] {
        &self.prompts
    }
}

impl ConflictResolver for ScriptedResolver {
    fn resolve(&mut self, target: &Path) -> OverwritePolicy {
        self.prompts.push(target.to_path_buf());
        self.answers.pop_front().unwrap_or(OverwritePolicy::IgnoreFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_answers() {
        assert!(OverwritePolicy::IgnoreAll.is_sticky());
        assert!(OverwritePolicy::OverwriteAll.is_sticky());
        assert!(!OverwritePolicy::IgnoreFile.is_sticky());
        assert!(!OverwritePolicy::OverwriteFile.is_sticky());
        assert!(!OverwritePolicy::Ask.is_sticky());
    }

    #[test]
    fn test_overwrites() {
        assert!(OverwritePolicy::OverwriteFile.overwrites());
        assert!(OverwritePolicy::OverwriteAll.overwrites());
        assert!(!OverwritePolicy::IgnoreAll.overwrites());
        assert!(!OverwritePolicy::Ask.overwrites());
    }

    #[test]
    fn test_scripted_resolver_falls_back_to_ignore() {
        let mut resolver = ScriptedResolver::new([OverwritePolicy::OverwriteFile]);
        assert_eq!(
            resolver.resolve(Path::new("/a")),
            OverwritePolicy::OverwriteFile
        );
        assert_eq!(resolver.resolve(Path::new("/b")), OverwritePolicy::IgnoreFile);
        assert_eq!(resolver.prompts().len(), 2);
    }

    #[test]
    fn test_closure_resolver() {
        let mut resolver = |_: &Path| OverwritePolicy::OverwriteAll;
        assert_eq!(
            ConflictResolver::resolve(&mut resolver, Path::new("/x")),
            OverwritePolicy::OverwriteAll
        );
    }
}
