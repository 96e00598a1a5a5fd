//! Tree scan: run a [`Dialect`] over every matching file below a root.
//!
//! Files are visited in file-name order so reports are stable between runs.
//! Each file is memory-mapped and checked for the dialect's marker with a single
//! Aho-Corasick pass; only files that contain it are split into lines.

use aho_corasick::AhoCorasick;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::dialect::Dialect;
use crate::path_util::{display_relative, normalize_path};
use crate::{AnatomistError, Origin, Signature};

/// Collects every declaration found under `root`.
///
/// # Errors
/// Fails on the first unreadable file or unparseable declaration. Nothing is skipped.
pub fn collect(root: &Path, dialect: &dyn Dialect) -> Result<Vec<Signature>, AnatomistError> {
    let root = PathBuf::from(normalize_path(root)?);
    let finder = marker_finder(dialect)?;
    let mut signatures = Vec::new();
    let mut files = 0usize;

    for entry in WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_scan_excluded(e.path()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), dialect.extensions()) {
            continue;
        }
        files += 1;
        signatures.extend(scan_file(entry.path(), &root, dialect, &finder)?);
    }

    tracing::info!(
        side = ?dialect.side(),
        root = %root.display(),
        files,
        declarations = signatures.len(),
        "declarations collected"
    );
    Ok(signatures)
}

fn scan_file(
    path: &Path,
    root: &Path,
    dialect: &dyn Dialect,
    finder: &AhoCorasick,
) -> Result<Vec<Signature>, AnatomistError> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    // SAFETY: mmap is read-only; the file handle outlives the mmap.
    let mmap = unsafe { Mmap::map(&file)? };
    if !finder.is_match(&*mmap) {
        return Ok(Vec::new());
    }

    let file_path = display_relative(path, root);
    let source = String::from_utf8_lossy(&mmap);
    let found = parse_lines(&source, &file_path, dialect, finder)?;
    tracing::debug!(file = %file_path, declarations = found.len(), "scanned");
    Ok(found)
}

fn parse_lines(
    source: &str,
    file_path: &str,
    dialect: &dyn Dialect,
    finder: &AhoCorasick,
) -> Result<Vec<Signature>, AnatomistError> {
    let mut found = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if !finder.is_match(line) {
            continue;
        }
        let Some(text) = dialect.extract(line) else {
            continue;
        };
        let origin = Origin {
            file_path: file_path.to_string(),
            line: index as u32 + 1,
        };
        found.push(dialect.parse(text, origin)?);
    }
    Ok(found)
}

fn marker_finder(dialect: &dyn Dialect) -> Result<AhoCorasick, AnatomistError> {
    AhoCorasick::new([dialect.marker()])
        .map_err(|e| AnatomistError::ParseFailure(format!("AhoCorasick build failed: {}", e)))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.contains(&ext))
        .unwrap_or(false)
}

/// Returns `true` for version-control and build-output directories.
fn is_scan_excluded(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| matches!(name, ".git" | ".vs" | "bin" | "obj" | "target"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManagedDialect, NativeDialect, Side};
    use std::fs;

    fn parse_source(
        source: &str,
        file_path: &str,
        dialect: &dyn Dialect,
    ) -> Result<Vec<Signature>, AnatomistError> {
        let finder = marker_finder(dialect)?;
        parse_lines(source, file_path, dialect, &finder)
    }

    #[test]
    fn test_collect_managed_tree() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("Widgets")).unwrap();
        fs::write(
            tmp.path().join("Widgets/Button.cs"),
            "namespace TGUI\n{\n    public class Button\n    {\n        [DllImport(Global.CTGUI)]\n        static extern private IntPtr tguiButton_create();\n\n        [DllImport(Global.CTGUI)]\n        static extern private void tguiButton_setText(IntPtr cPointer, IntPtr text);\n    }\n}\n",
        )
        .unwrap();
        fs::write(tmp.path().join("README.md"), "static extern nonsense").unwrap();

        let dialect = ManagedDialect::new("tgui").unwrap();
        let found = collect(tmp.path(), &dialect).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "tguiButton_create");
        assert_eq!(found[0].origin.file_path, "Widgets/Button.cs");
        assert_eq!(found[0].origin.line, 6);
        assert_eq!(found[1].params, vec!["IntPtr", "IntPtr"]);
        assert!(found.iter().all(|s| s.side == Side::Managed));
    }

    #[test]
    fn test_collect_native_skips_macro_definition() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("CTGUI")).unwrap();
        fs::write(
            tmp.path().join("CTGUI/Config.h"),
            "#ifndef CTGUI_CONFIG_H\n#define CTGUI_API CTGUI_API_EXPORT\n#endif\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("CTGUI/Slider.h"),
            "#include <CTGUI/Config.h>\n\nCTGUI_API tguiWidget* tguiSlider_create(void);\nCTGUI_API void tguiSlider_setValue(tguiWidget* widget, float value);\n",
        )
        .unwrap();

        let dialect = NativeDialect::new("CTGUI_API", "tgui").unwrap();
        let found = collect(tmp.path(), &dialect).unwrap();

        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["tguiSlider_create", "tguiSlider_setValue"]);
        assert_eq!(found[1].origin.to_string(), "CTGUI/Slider.h:4");
    }

    #[test]
    fn test_collect_ignores_other_extensions_and_build_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("obj")).unwrap();
        fs::write(
            tmp.path().join("obj/Generated.cs"),
            "static extern private void tguiGenerated(int x);",
        )
        .unwrap();
        fs::write(
            tmp.path().join("Notes.txt"),
            "static extern private void tguiNotes(int x);",
        )
        .unwrap();
        fs::write(tmp.path().join("Empty.cs"), "").unwrap();

        let dialect = ManagedDialect::new("tgui").unwrap();
        assert!(collect(tmp.path(), &dialect).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_aborts_scan() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("Broken.cs"),
            "static extern private void tguiOk(int x);\nstatic extern private void Broken(\n",
        )
        .unwrap();

        let dialect = ManagedDialect::new("tgui").unwrap();
        let err = collect(tmp.path(), &dialect).unwrap_err();
        match err {
            AnatomistError::MalformedDeclaration { location, .. } => {
                assert_eq!(location.file_path, "Broken.cs");
                assert_eq!(location.line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_root_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dialect = ManagedDialect::new("tgui").unwrap();
        assert!(collect(&tmp.path().join("absent"), &dialect).is_err());
    }

    #[test]
    fn test_parse_source_crlf() {
        let dialect = NativeDialect::new("CTGUI_API", "tgui").unwrap();
        let found = parse_source(
            "CTGUI_API sfBool tguiWidget_isVisible(const tguiWidget* widget);\r\n",
            "Widget.h",
            &dialect,
        )
        .unwrap();
        assert_eq!(found[0].return_type, "sfBool");
        assert_eq!(found[0].params, vec!["const tguiWidget*"]);
    }

    #[test]
    fn test_commented_lines_skipped() {
        let dialect = NativeDialect::new("CTGUI_API", "tgui").unwrap();
        let found = parse_source(
            "// CTGUI_API void tguiOld(int a);
CTGUI_API void tguiNew(int a); // was tguiOld(int a);
",
            "Widget.h",
            &dialect,
        )
        .unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["tguiNew"]);
        assert_eq!(found[0].origin.line, 2);
    }
}
