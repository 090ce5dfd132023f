//! Bounded pre-order directory scanner.

use std::fs;
use std::path::{Path, PathBuf};

use treefm_core::{Entry, EntryKind, FmError, FmResult, PositionTag};

use crate::volumes::VolumeSource;

/// Deepest nesting level emitted below the listing root.
pub const MAX_SCAN_DEPTH: usize = 2;

/// Build a fresh snapshot for `root`.
///
/// `None` lists the ready volumes. A root that is missing or is not a
/// directory fails with [`FmError::NotFound`]; faults below the root only
/// shorten the listing.
pub fn scan_root(root: Option<&Path>, volumes: &dyn VolumeSource) -> FmResult<Vec<Entry>> {
    let mut entries = Vec::new();

    match root {
        None => scan_volumes(&mut entries, volumes),
        Some(dir) => {
            let metadata = fs::metadata(dir).map_err(|e| FmError::io(dir, e))?;
            if !metadata.is_dir() {
                return Err(FmError::NotFound {
                    path: dir.to_path_buf(),
                });
            }
            scan_dir(&mut entries, 0, dir);
        }
    }

    Ok(entries)
}

fn scan_volumes(entries: &mut Vec<Entry>, volumes: &dyn VolumeSource) {
    let ready: Vec<PathBuf> = volumes
        .volumes()
        .into_iter()
        .filter(|mount| match fs::read_dir(mount) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(target: "scan", "skipping volume {}: {e}", mount.display());
                false
            }
        })
        .collect();

    let len = ready.len();
    for (index, mount) in ready.into_iter().enumerate() {
        let name = mount.to_string_lossy().to_string();
        entries.push(Entry::new(
            EntryKind::Drive,
            name,
            mount,
            0,
            PositionTag::for_position(index, len),
        ));
    }
}

/// Append the subtree of `dir`, children at `depth`.
fn scan_dir(entries: &mut Vec<Entry>, depth: usize, dir: &Path) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }

    let children = read_children(dir);
    let len = children.dirs.len() + children.files.len();

    for (index, (name, path)) in children.dirs.into_iter().enumerate() {
        let tag = PositionTag::for_position(index, len);
        entries.push(Entry::new(EntryKind::Directory, name, path.clone(), depth, tag));
        scan_dir(entries, depth + 1, &path);
    }

    let offset = len - children.files.len();
    for (index, (name, path)) in children.files.into_iter().enumerate() {
        let tag = PositionTag::for_position(offset + index, len);
        entries.push(Entry::new(EntryKind::File, name, path, depth, tag));
    }
}

#[derive(Default)]
struct Children {
    dirs: Vec<(String, PathBuf)>,
    files: Vec<(String, PathBuf)>,
}

/// Immediate children of `dir`, split by kind and sorted by name.
fn read_children(dir: &Path) -> Children {
    let mut children = Children::default();

    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::debug!(target: "scan", "cannot enumerate {}: {e}", dir.display());
            return children;
        }
    };

    for item in read_dir {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::debug!(target: "scan", "enumeration of {} stopped: {e}", dir.display());
                break;
            }
        };

        let path = item.path();
        let name = item.file_name().to_string_lossy().to_string();
        if path.is_dir() {
            children.dirs.push((name, path));
        } else {
            children.files.push((name, path));
        }
    }

    children.dirs.sort_by(|a, b| a.0.cmp(&b.0));
    children.files.sort_by(|a, b| a.0.cmp(&b.0));
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volumes::FixedVolumes;

    #[test]
    fn test_scan_missing_root_is_not_found() {
        let err = scan_root(
            Some(Path::new("/definitely/not/here/treefm")),
            &FixedVolumes::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FmError::NotFound { .. }));
    }

    #[test]
    fn test_scan_file_root_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = scan_root(Some(&file), &FixedVolumes::default()).unwrap_err();
        assert!(matches!(err, FmError::NotFound { .. }));
    }

    #[test]
    fn test_volumes_skip_unready_mounts() {
        let a = tempfile::TempDir::new().unwrap();
        let b = tempfile::TempDir::new().unwrap();
        let volumes = FixedVolumes(vec![
            a.path().to_path_buf(),
            PathBuf::from("/definitely/not/mounted/treefm"),
            b.path().to_path_buf(),
        ]);

        let entries = scan_root(None, &volumes).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.kind == EntryKind::Drive && e.depth == 0));
        assert_eq!(entries[0].tag, PositionTag::First);
        assert_eq!(entries[1].tag, PositionTag::Last);
    }

    #[test]
    fn test_single_volume_is_only() {
        let a = tempfile::TempDir::new().unwrap();
        let entries = scan_root(None, &FixedVolumes(vec![a.path().to_path_buf()])).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag, PositionTag::Only);
    }
}
