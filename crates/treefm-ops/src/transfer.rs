//! Recursive copy and move.
//!
//! A move is a copy followed by deletion of each source item that was
//! copied, then of each source directory once its children are handled.
//! Directories are mirrored depth-first, subdirectories before files, with
//! no depth limit.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use treefm_core::{same_path, FmError, FmResult};

use crate::conflict::{ConflictResolver, OverwritePolicy};
use crate::summary::{TransferKind, TransferSummary};

/// Copy `source` (file or directory) to `target`.
///
/// See [`copy_or_move`].
pub fn copy(
    source: &Path,
    target: &Path,
    resolver: &mut dyn ConflictResolver,
) -> FmResult<TransferSummary> {
    copy_or_move(source, target, false, resolver)
}

/// Move `source` (file or directory) to `target`.
///
/// See [`copy_or_move`].
pub fn move_to(
    source: &Path,
    target: &Path,
    resolver: &mut dyn ConflictResolver,
) -> FmResult<TransferSummary> {
    copy_or_move(source, target, true, resolver)
}

/// Resolve a possibly relative `target` against the parent of `source`.
///
/// `copy("/data/a", "b")` therefore produces the sibling `/data/b`.
pub fn resolve_target(source: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match source.parent() {
        Some(parent) => parent.join(target),
        None => target.to_path_buf(),
    }
}

/// Copy or move `source` to `target`, consulting `resolver` on conflicts.
///
/// A directory source is mirrored into `target`, which is created when
/// missing and reused when present. A file source is copied to `target`,
/// or into it when `target` is an existing directory.
///
/// # Errors
///
/// - [`FmError::SelfOperation`] when the target is the source itself or,
///   for directories, lies inside it, once `.`, `..` and symlinks are
///   resolved. Nothing is touched.
/// - [`FmError::NotFound`] when the source does not exist.
/// - [`FmError::Io`] when the target directory cannot be created, or when
///   the single file of a file transfer cannot be copied.
///
/// Any other per-item failure is logged and reflected in the summary.
pub fn copy_or_move(
    source: &Path,
    target: &Path,
    remove_source: bool,
    resolver: &mut dyn ConflictResolver,
) -> FmResult<TransferSummary> {
    let source = std::path::absolute(source).map_err(|e| FmError::io(source, e))?;
    let target = real_path(&resolve_target(&source, target));
    let source = real_source(&source);

    if same_path(&source, &target) {
        return Err(FmError::SelfOperation { path: source });
    }

    let metadata = fs::metadata(&source).map_err(|e| FmError::io(&source, e))?;
    let kind = if remove_source {
        TransferKind::Move
    } else {
        TransferKind::Copy
    };
    let mut transfer = Transfer::new(kind, resolver);

    if metadata.is_dir() {
        if target.ancestors().any(|a| same_path(a, &source)) {
            return Err(FmError::SelfOperation { path: source });
        }
        transfer.establish_root(&target)?;
        transfer.mirror_dir(&source, &target);
    } else {
        let dest = match source.file_name() {
            Some(name) if target.is_dir() => target.join(name),
            _ => target,
        };
        if same_path(&source, &dest) {
            return Err(FmError::SelfOperation { path: source });
        }
        transfer.transfer_single(&source, &dest)?;
    }

    let summary = transfer.summary;
    tracing::info!(
        target: "transfer",
        kind = %summary.kind,
        dirs = summary.processed_dirs,
        dirs_total = summary.total_dirs,
        files = summary.processed_files,
        files_total = summary.total_files,
        "{} of {} finished",
        summary.kind,
        source.display()
    );
    Ok(summary)
}

/// Mutable state shared across one recursive transfer.
struct Transfer<'r> {
    remove_source: bool,
    policy: OverwritePolicy,
    resolver: &'r mut dyn ConflictResolver,
    summary: TransferSummary,
}

impl<'r> Transfer<'r> {
    fn new(kind: TransferKind, resolver: &'r mut dyn ConflictResolver) -> Self {
        Self {
            remove_source: kind == TransferKind::Move,
            policy: OverwritePolicy::Ask,
            resolver,
            summary: TransferSummary::new(kind),
        }
    }

    /// Create the top-level target directory; failure aborts the transfer.
    fn establish_root(&mut self, target: &Path) -> FmResult<()> {
        if target.is_dir() {
            tracing::info!(target: "transfer", "Directory '{}' - already exists", target.display());
            return Ok(());
        }
        fs::create_dir_all(target).map_err(|e| FmError::io(target, e))?;
        tracing::info!(target: "transfer", "Directory '{}' - created", target.display());
        Ok(())
    }

    /// Mirror the contents of `src` into the existing directory `tgt`.
    fn mirror_dir(&mut self, src: &Path, tgt: &Path) {
        self.summary.total_dirs += 1;

        let (dirs, files) = list_children(src);

        for (name, sub_src) in dirs {
            let sub_tgt = tgt.join(&name);
            if ensure_dir(&sub_tgt) {
                self.mirror_dir(&sub_src, &sub_tgt);
            } else {
                self.summary.total_dirs += 1;
            }
        }

        for (name, file) in files {
            self.summary.total_files += 1;
            let dest = tgt.join(&name);
            match self.place_file(&file, &dest) {
                Ok(true) => self.finish_file(&file),
                Ok(false) => {}
                Err(e) => tracing::warn!(
                    target: "transfer",
                    "File '{}' - copy failed: {e}",
                    file.display()
                ),
            }
        }

        if !self.remove_source {
            self.summary.processed_dirs += 1;
            return;
        }

        // Skipped files keep the directory non-empty; removal then fails and is only logged.
        match fs::remove_dir(src) {
            Ok(()) => {
                tracing::info!(target: "transfer", "Directory '{}' - deleted", src.display());
                self.summary.processed_dirs += 1;
            }
            Err(e) => tracing::warn!(
                target: "transfer",
                "Directory '{}' - delete failed: {e}",
                src.display()
            ),
        }
    }

    /// Transfer a lone file; a failed copy fails the whole operation.
    fn transfer_single(&mut self, src: &Path, dest: &Path) -> FmResult<()> {
        self.summary.total_files += 1;
        if self.place_file(src, dest).map_err(|e| FmError::io(src, e))? {
            self.finish_file(src);
        }
        Ok(())
    }

    /// Copy `src` to `dest` under the overwrite policy.
    ///
    /// Returns `Ok(false)` when an existing `dest` is kept.
    fn place_file(&mut self, src: &Path, dest: &Path) -> io::Result<bool> {
        let exists = dest.exists();
        if exists && is_same_file(src, dest)? {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ));
        }
        if exists && !self.decide(dest).overwrites() {
            tracing::info!(target: "transfer", "File '{}' - ignored", dest.display());
            return Ok(false);
        }

        fs::copy(src, dest)?;
        if exists {
            tracing::info!(target: "transfer", "File '{}' - overwritten", dest.display());
        } else {
            tracing::info!(target: "transfer", "File '{}' - created", dest.display());
        }
        Ok(true)
    }

    /// Count a copied file and, for a move, remove its source.
    fn finish_file(&mut self, src: &Path) {
        self.summary.processed_files += 1;
        if !self.remove_source {
            return;
        }
        match fs::remove_file(src) {
            Ok(()) => tracing::info!(target: "transfer", "File '{}' - deleted", src.display()),
            Err(e) => tracing::warn!(
                target: "transfer",
                "File '{}' - delete failed: {e}",
                src.display()
            ),
        }
    }

    /// Apply a sticky policy, or ask the resolver and remember sticky answers.
    fn decide(&mut self, dest: &Path) -> OverwritePolicy {
        if self.policy.is_sticky() {
            return self.policy;
        }

        let answer = match self.resolver.resolve(dest) {
            OverwritePolicy::Ask => OverwritePolicy::IgnoreFile,
            answer => answer,
        };
        if answer.is_sticky() {
            self.policy = answer;
        }
        answer
    }
}

/// `path` with `.` and `..` resolved and symlinks followed.
///
/// The longest existing prefix is canonicalized; the rest, which does not
/// exist yet, is folded lexically on top of it.
fn real_path(path: &Path) -> PathBuf {
    let parts: Vec<Component> = path.components().collect();
    for split in (1..=parts.len()).rev() {
        let head: PathBuf = parts[..split].iter().collect();
        if let Ok(real) = fs::canonicalize(&head) {
            return fold(real, &parts[split..]);
        }
    }
    fold(PathBuf::new(), &parts)
}

/// Like [`real_path`], but a symlink source stays the link itself.
fn real_source(source: &Path) -> PathBuf {
    match (source.parent(), source.file_name()) {
        (Some(parent), Some(name)) => real_path(parent).join(name),
        _ => real_path(source),
    }
}

fn fold(mut base: PathBuf, parts: &[Component]) -> PathBuf {
    for part in parts {
        match part {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other),
        }
    }
    base
}

/// Check whether two existing paths name the same file (hard links included).
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

/// Create `dir` unless it is already a directory.
fn ensure_dir(dir: &Path) -> bool {
    if dir.is_dir() {
        tracing::info!(target: "transfer", "Directory '{}' - already exists", dir.display());
        return true;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => {
            tracing::info!(target: "transfer", "Directory '{}' - created", dir.display());
            true
        }
        Err(e) => {
            tracing::warn!(
                target: "transfer",
                "Directory '{}' - create failed: {e}",
                dir.display()
            );
            false
        }
    }
}

type Child = (std::ffi::OsString, PathBuf);

/// Immediate subdirectories and other entries of `dir`, in enumeration order.
fn list_children(dir: &Path) -> (Vec<Child>, Vec<Child>) {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(target: "transfer", "Directory '{}' - read failed: {e}", dir.display());
            return (dirs, files);
        }
    };

    for item in read_dir {
        match item {
            Ok(item) => {
                let path = item.path();
                // Linked directories are not descended into, so link cycles cannot recurse.
                if item.file_type().is_ok_and(|t| t.is_dir()) {
                    dirs.push((item.file_name(), path));
                } else {
                    files.push((item.file_name(), path));
                }
            }
            Err(e) => {
                tracing::warn!(target: "transfer", "Directory '{}' - read failed: {e}", dir.display());
                break;
            }
        }
    }

    (dirs, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_relative_to_source_parent() {
        assert_eq!(
            resolve_target(Path::new("/data/photos"), Path::new("backup")),
            PathBuf::from("/data/backup")
        );
        assert_eq!(
            resolve_target(Path::new("/data/photos"), Path::new("/mnt/usb")),
            PathBuf::from("/mnt/usb")
        );
    }

    #[test]
    fn test_real_path_folds_dot_segments() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(base.join("a")).unwrap();

        assert_eq!(real_path(&base.join("a/../a/./b")), base.join("a/b"));
        assert_eq!(real_path(&base.join("missing/../a")), base.join("a"));
        assert_eq!(real_path(&base.join("a/new/..")), base.join("a"));
    }

    #[test]
    fn test_decide_remembers_sticky_answer() {
        let mut calls = 0;
        let mut resolver = |_: &Path| {
            calls += 1;
            OverwritePolicy::OverwriteAll
        };
        let mut transfer = Transfer::new(TransferKind::Copy, &mut resolver);
        assert_eq!(transfer.decide(Path::new("/a")), OverwritePolicy::OverwriteAll);
        assert_eq!(transfer.decide(Path::new("/b")), OverwritePolicy::OverwriteAll);
        drop(transfer);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_decide_treats_ask_as_ignore() {
        let mut resolver = |_: &Path| OverwritePolicy::Ask;
        let mut transfer = Transfer::new(TransferKind::Copy, &mut resolver);
        assert_eq!(transfer.decide(Path::new("/a")), OverwritePolicy::IgnoreFile);
        assert_eq!(transfer.policy, OverwritePolicy::Ask);
    }
}
