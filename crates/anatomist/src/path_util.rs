//! Path normalization utilities for cross-platform file handling.

use std::path::Path;

use crate::AnatomistError;

/// Normalizes a file path to a canonical UTF-8 string with forward slashes.
///
/// # Process
/// 1. Canonicalizes the path using `dunce::canonicalize` (removes `\\?\` prefix on Windows)
/// 2. Converts to UTF-8 string
/// 3. Replaces backslashes with forward slashes for consistent representation
///
/// # Errors
/// - Returns `AnatomistError::IoError` if canonicalization fails (file not found, permissions, etc.)
/// - Returns `AnatomistError::ParseFailure` if the path contains non-UTF-8 characters
pub fn normalize_path(path: &Path) -> Result<String, AnatomistError> {
    let canonical = dunce::canonicalize(path)?;
    let s = canonical.to_str().ok_or_else(|| {
        AnatomistError::ParseFailure(format!("Non-UTF-8 path: {}", canonical.display()))
    })?;
    Ok(s.replace('\\', "/"))
}

/// Renders `path` relative to `root` with forward slashes, for diagnostics.
///
/// Falls back to the full path when `path` is not under `root`.
///
/// # Example
/// ```
/// use std::path::Path;
/// use anatomist::path_util::display_relative;
///
/// let shown = display_relative(Path::new("/repo/src/Widgets/Button.cs"), Path::new("/repo"));
/// assert_eq!(shown, "src/Widgets/Button.cs");
/// ```
pub fn display_relative(path: &Path, root: &Path) -> String {
    let shown = path
        .strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_cargo_manifest() {
        let cargo_manifest = std::env::var("CARGO_MANIFEST_DIR")
            .map(|dir| Path::new(&dir).join("Cargo.toml"))
            .unwrap();

        let normalized = normalize_path(&cargo_manifest).unwrap();
        assert!(normalized.contains('/'));
        assert!(normalized.ends_with("Cargo.toml"));
        assert!(!normalized.contains('\\'));
    }

    #[test]
    fn test_normalize_nonexistent_path() {
        let result = normalize_path(Path::new("/this/does/not/exist/nowhere.h"));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_relative_outside_root() {
        let shown = display_relative(Path::new("/other/Foo.h"), Path::new("/repo/include"));
        assert_eq!(shown, "/other/Foo.h");
    }
}
