use std::fs;
use std::path::Path;

use tempfile::TempDir;
use treefm_core::FmError;
use treefm_ops::{
    copy, create_directory, delete, move_to, rename, FixedResolver, OverwritePolicy,
    ScriptedResolver, TransferKind,
};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_copy_directory_onto_itself_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    write(&src.join("a.txt"), "original");

    let mut resolver = ScriptedResolver::default();
    let err = copy(&src, &src, &mut resolver).unwrap_err();

    assert!(matches!(err, FmError::SelfOperation { .. }));
    assert_eq!(read(&src.join("a.txt")), "original");
    assert!(resolver.prompts().is_empty());
}

#[test]
fn test_copy_file_onto_itself_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    write(&file, "original");

    let err = copy(&file, &file, &mut FixedResolver(OverwritePolicy::OverwriteAll)).unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));

    // Copying into its own directory resolves to the same path.
    let err = copy(&file, dir.path(), &mut FixedResolver(OverwritePolicy::OverwriteAll))
        .unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));
    assert_eq!(read(&file), "original");
}

#[test]
fn test_copy_directory_into_own_subtree_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    write(&src.join("a.txt"), "x");

    let err = copy(&src, &src.join("nested"), &mut ScriptedResolver::default()).unwrap_err();

    assert!(matches!(err, FmError::SelfOperation { .. }));
    assert!(!src.join("nested").exists());
}

#[test]
fn test_copy_file_onto_itself_through_parent_segments_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a/f.txt");
    write(&file, "original");

    // Relative to the source's parent: a/../a/f.txt
    let mut resolver = FixedResolver(OverwritePolicy::OverwriteFile);
    let err = copy(&file, Path::new("../a/f.txt"), &mut resolver).unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));

    let err = move_to(&file, &dir.path().join("a/./../a"), &mut resolver).unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));

    assert_eq!(read(&file), "original");
}

#[test]
fn test_copy_directory_into_own_subtree_through_parent_segments_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("d");
    write(&src.join("x.txt"), "x");
    let parent_name = dir.path().file_name().unwrap().to_str().unwrap();

    let target = format!("../{parent_name}/d/sub");
    let mut resolver = FixedResolver(OverwritePolicy::IgnoreAll);
    let err = copy(&src, Path::new(&target), &mut resolver).unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));
    assert!(!src.join("sub").exists());

    let err = copy(&src, &dir.path().join("other/../d"), &mut resolver).unwrap_err();
    assert!(matches!(err, FmError::SelfOperation { .. }));
}

#[cfg(unix)]
#[test]
fn test_copy_onto_hard_link_keeps_content() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    let link = dir.path().join("b.txt");
    write(&file, "original");
    fs::hard_link(&file, &link).unwrap();

    let mut resolver = FixedResolver(OverwritePolicy::OverwriteFile);
    let err = copy(&file, &link, &mut resolver).unwrap_err();
    assert!(matches!(err, FmError::Io { .. }));
    assert_eq!(read(&file), "original");
}

#[cfg(unix)]
#[test]
fn test_copy_does_not_follow_directory_link_cycles() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    write(&src.join("a.txt"), "a");
    std::os::unix::fs::symlink(&src, src.join("loop")).unwrap();

    let summary = copy(&src, &dir.path().join("dst"), &mut ScriptedResolver::default()).unwrap();

    assert_eq!(read(&dir.path().join("dst/a.txt")), "a");
    assert_eq!((summary.processed_dirs, summary.total_dirs), (1, 1));
    assert_eq!(summary.total_files, 2);
}

#[test]
fn test_missing_source_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = copy(
        &dir.path().join("missing"),
        &dir.path().join("dst"),
        &mut ScriptedResolver::default(),
    )
    .unwrap_err();

    assert!(matches!(err, FmError::NotFound { .. }));
    assert!(!dir.path().join("dst").exists());
}

#[test]
fn test_move_directory_to_new_target() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    write(&src.join("x.txt"), "payload");

    let summary = move_to(&src, &dst, &mut ScriptedResolver::default()).unwrap();

    assert_eq!(summary.kind, TransferKind::Move);
    assert_eq!((summary.processed_files, summary.total_files), (1, 1));
    assert_eq!((summary.processed_dirs, summary.total_dirs), (1, 1));
    assert!(summary.is_complete());
    assert!(!src.exists());
    assert_eq!(read(&dst.join("x.txt")), "payload");
}

#[test]
fn test_copy_nested_tree_without_depth_limit() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    write(&src.join("a/b/c/d/e/deep.txt"), "deep");
    write(&src.join("a/a.txt"), "a");
    write(&src.join("top.txt"), "top");

    let summary = copy(&src, &dst, &mut ScriptedResolver::default()).unwrap();

    assert_eq!(read(&dst.join("a/b/c/d/e/deep.txt")), "deep");
    assert_eq!(read(&dst.join("a/a.txt")), "a");
    assert_eq!(read(&dst.join("top.txt")), "top");
    assert_eq!((summary.processed_dirs, summary.total_dirs), (6, 6));
    assert_eq!((summary.processed_files, summary.total_files), (3, 3));
    assert!(src.join("a/b/c/d/e/deep.txt").exists());
}

#[test]
fn test_ignore_all_keeps_existing_files() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    write(&src.join("a.txt"), "new");
    write(&dst.join("a.txt"), "old");

    let mut resolver = ScriptedResolver::new([OverwritePolicy::IgnoreAll]);
    let summary = copy(&src, &dst, &mut resolver).unwrap();

    assert_eq!((summary.processed_files, summary.total_files), (0, 1));
    assert_eq!(read(&dst.join("a.txt")), "old");
    assert_eq!(resolver.prompts().len(), 1);
}

#[test]
fn test_overwrite_all_prompts_once() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    for name in ["a.txt", "b.txt", "sub/c.txt"] {
        write(&src.join(name), "new");
        write(&dst.join(name), "old");
    }

    let mut resolver = ScriptedResolver::new([OverwritePolicy::OverwriteAll]);
    let summary = copy(&src, &dst, &mut resolver).unwrap();

    assert_eq!(resolver.prompts().len(), 1);
    assert_eq!((summary.processed_files, summary.total_files), (3, 3));
    for name in ["a.txt", "b.txt", "sub/c.txt"] {
        assert_eq!(read(&dst.join(name)), "new");
    }
}

#[test]
fn test_overwrite_file_applies_to_one_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    for name in ["a.txt", "b.txt"] {
        write(&src.join(name), "new");
        write(&dst.join(name), "old");
    }

    let mut resolver = ScriptedResolver::new([
        OverwritePolicy::OverwriteFile,
        OverwritePolicy::IgnoreFile,
    ]);
    let summary = copy(&src, &dst, &mut resolver).unwrap();

    assert_eq!(resolver.prompts().len(), 2);
    assert_eq!((summary.processed_files, summary.total_files), (1, 2));
    let contents: Vec<String> = ["a.txt", "b.txt"]
        .iter()
        .map(|n| read(&dst.join(n)))
        .collect();
    assert_eq!(contents.iter().filter(|c| *c == "new").count(), 1);
    assert_eq!(contents.iter().filter(|c| *c == "old").count(), 1);
}

#[test]
fn test_move_with_skipped_file_keeps_source_directory() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    write(&src.join("kept.txt"), "new");
    write(&src.join("moved.txt"), "moved");
    write(&dst.join("kept.txt"), "old");

    let mut resolver = ScriptedResolver::new([OverwritePolicy::IgnoreAll]);
    let summary = move_to(&src, &dst, &mut resolver).unwrap();

    assert_eq!((summary.processed_files, summary.total_files), (1, 2));
    assert_eq!((summary.processed_dirs, summary.total_dirs), (0, 1));
    assert!(src.join("kept.txt").exists());
    assert!(!src.join("moved.txt").exists());
    assert_eq!(read(&dst.join("kept.txt")), "old");
    assert_eq!(read(&dst.join("moved.txt")), "moved");
}

#[test]
fn test_copy_file_into_directory_target() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    let target = dir.path().join("dst");
    write(&file, "payload");
    fs::create_dir(&target).unwrap();

    let summary = copy(&file, &target, &mut ScriptedResolver::default()).unwrap();

    assert_eq!((summary.processed_files, summary.total_files), (1, 1));
    assert_eq!(summary.total_dirs, 0);
    assert_eq!(read(&target.join("a.txt")), "payload");
    assert!(file.exists());
}

#[test]
fn test_move_file_with_relative_target() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    write(&file, "payload");

    let summary = move_to(&file, Path::new("b.txt"), &mut ScriptedResolver::default()).unwrap();

    assert!(summary.is_complete());
    assert!(!file.exists());
    assert_eq!(read(&dir.path().join("b.txt")), "payload");
}

#[test]
fn test_single_file_conflict_uses_resolver() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    let target = dir.path().join("b.txt");
    write(&file, "new");
    write(&target, "old");

    let mut resolver = ScriptedResolver::new([OverwritePolicy::IgnoreFile]);
    let summary = copy(&file, &target, &mut resolver).unwrap();
    assert_eq!((summary.processed_files, summary.total_files), (0, 1));
    assert_eq!(read(&target), "old");

    let summary = copy(&file, &target, &mut FixedResolver(OverwritePolicy::OverwriteFile)).unwrap();
    assert_eq!(summary.processed_files, 1);
    assert_eq!(read(&target), "new");
}

#[test]
fn test_summary_message() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    write(&src.join("a.txt"), "x");

    let summary = copy(&src, &dir.path().join("dst"), &mut ScriptedResolver::default()).unwrap();
    assert_eq!(
        summary.to_string(),
        "Copy complete.\n  processed directories: 1 from 1\n        processed files: 1 from 1"
    );
}

#[test]
fn test_create_rename_delete() {
    let dir = TempDir::new().unwrap();
    let created = dir.path().join("one/two");

    create_directory(&created).unwrap();
    assert!(created.is_dir());
    assert!(create_directory(&created).is_ok());

    write(&created.join("f.txt"), "x");
    rename(&created, "three").unwrap();
    let renamed = dir.path().join("one/three");
    assert!(renamed.join("f.txt").exists());
    assert!(!created.exists());

    delete(&dir.path().join("one")).unwrap();
    assert!(!dir.path().join("one").exists());
}

#[test]
fn test_rename_refuses_existing_target() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("a.txt"), "a");
    write(&dir.path().join("b.txt"), "b");

    let err = rename(&dir.path().join("a.txt"), "b.txt").unwrap_err();
    assert!(matches!(err, FmError::Validation { .. }));
    assert_eq!(read(&dir.path().join("b.txt")), "b");

    let err = rename(&dir.path().join("a.txt"), "bad/name").unwrap_err();
    assert!(matches!(err, FmError::Validation { .. }));
}

#[test]
fn test_rename_case_only() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("note.txt"), "n");

    rename(&dir.path().join("note.txt"), "Note.txt").unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["Note.txt"]);
}

#[test]
fn test_delete_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = delete(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, FmError::NotFound { .. }));
}
