//! Rename operation.

use std::fs;
use std::path::Path;

use treefm_core::{same_path, FmError, FmResult};

/// Rename `source` to `new_name` inside its own directory.
///
/// Renaming onto an existing, different entry is refused. A rename that
/// only changes letter case is allowed.
pub fn rename(source: &Path, new_name: &str) -> FmResult<String> {
    validate_filename(new_name)?;

    let source = std::path::absolute(source).map_err(|e| FmError::io(source, e))?;
    if fs::symlink_metadata(&source).is_err() {
        return Err(FmError::NotFound { path: source });
    }

    let parent = source.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(new_name);

    if occupied_by_other(&source, &new_path) {
        return Err(FmError::validation(format!("'{new_name}' already exists")));
    }

    fs::rename(&source, &new_path).map_err(|e| FmError::io(&source, e))?;
    tracing::info!(
        target: "ops",
        "'{}' renamed to '{}'",
        source.display(),
        new_path.display()
    );
    Ok(format!("Renamed to '{}'", new_path.display()))
}

/// Whether `new_path` names an existing entry other than `source`.
fn occupied_by_other(source: &Path, new_path: &Path) -> bool {
    if new_path == source || !new_path.exists() {
        return false;
    }
    if !same_path(source, new_path) {
        return true;
    }

    // Only the letter case differs. A case-folding file system lists just
    // the source; otherwise a second, exactly named entry shows up.
    match new_path.parent().map(fs::read_dir) {
        Some(Ok(items)) => items
            .filter_map(Result::ok)
            .any(|item| item.path() == new_path),
        _ => true,
    }
}

/// Validate a filename for cross-platform compatibility.
pub fn validate_filename(name: &str) -> FmResult<()> {
    if name.is_empty() {
        return Err(FmError::validation("Name cannot be empty"));
    }

    if name.len() > 255 {
        return Err(FmError::validation("Name is too long (max 255 characters)"));
    }

    for c in ['/', '\0'] {
        if name.contains(c) {
            return Err(FmError::validation(format!("Name cannot contain '{c}'")));
        }
    }

    #[cfg(target_os = "windows")]
    {
        for c in ['\\', ':', '*', '?', '"', '<', '>', '|'] {
            if name.contains(c) {
                return Err(FmError::validation(format!("Name cannot contain '{c}'")));
            }
        }

        let reserved = [
            "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
            "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
        ];
        let upper = name.to_uppercase();
        let base = upper.split('.').next().unwrap_or("");
        if reserved.contains(&base) {
            return Err(FmError::validation("Reserved filename"));
        }
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(FmError::validation("Name cannot start or end with spaces"));
    }

    if name == "." || name == ".." {
        return Err(FmError::validation("'.' and '..' are reserved names"));
    }

    if name.ends_with('.') {
        return Err(FmError::validation("Name cannot end with a dot"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_valid() {
        assert!(validate_filename("report.txt").is_ok());
        assert!(validate_filename("photos-2024").is_ok());
        assert!(validate_filename(".config").is_ok());
        assert!(validate_filename("old drafts").is_ok());
    }

    #[test]
    fn test_validate_filename_invalid() {
        assert!(validate_filename("").is_err());
        assert!(validate_filename("a/b").is_err());
        assert!(validate_filename(".").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("trailing ").is_err());
        assert!(validate_filename(" leading").is_err());
        assert!(validate_filename("dot.").is_err());
        assert!(validate_filename(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_reserved_dot_names_report_reserved() {
        let err = validate_filename("..").unwrap_err();
        assert_eq!(err.to_string(), "'.' and '..' are reserved names");
    }
}
