//! Run configuration, resolved once at startup.
//!
//! Precedence per path: explicit flag (or its env var) > `--ctgui-dir` developer
//! checkout > layout below `--root`.

use anatomist::ExportTool;
use anyhow::bail;
use common::wisdom::Equivalence;
use std::path::{Path, PathBuf};

/// Library file produced by the CTGUI build on this platform.
pub fn library_file_name() -> &'static str {
    if cfg!(windows) {
        "ctgui-0.8.dll"
    } else {
        "libctgui.so"
    }
}

/// Raw settings as given on the command line / environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: PathBuf,
    pub library: Option<PathBuf>,
    pub include: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub ctgui_dir: Option<PathBuf>,
    pub prefix: String,
    pub export_macro: String,
    pub library_name: String,
    pub equate: Vec<String>,
}

/// Everything one run needs, passed explicitly through the pipeline.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub native_library: PathBuf,
    pub header_dir: PathBuf,
    pub managed_root: PathBuf,
    pub export_tool: ExportTool,
    pub symbol_prefix: String,
    pub export_macro: String,
    /// Name used in report headers, e.g. `CTGUI`.
    pub library_name: String,
    pub equivalences: Vec<Equivalence>,
}

impl ToolConfig {
    /// Resolves paths and parses `--equate` pairs. Touches no files.
    pub fn resolve(overrides: Overrides) -> anyhow::Result<Self> {
        let root = overrides.root;
        let ctgui_dir = overrides.ctgui_dir.as_deref();

        let native_library = overrides.library.unwrap_or_else(|| match ctgui_dir {
            Some(dir) => dir
                .join("build")
                .join("src")
                .join("CTGUI")
                .join(library_file_name()),
            None => root.join("extlibs").join("lib").join(library_file_name()),
        });
        let header_dir = overrides.include.unwrap_or_else(|| match ctgui_dir {
            Some(dir) => dir.join("include"),
            None => default_include(&root),
        });
        let managed_root = overrides.source.unwrap_or_else(|| root.join("src"));

        if overrides.prefix.trim().is_empty() {
            bail!("symbol prefix must not be empty");
        }
        if overrides.export_macro.trim().is_empty() {
            bail!("export macro must not be empty");
        }

        let mut equivalences = Vec::with_capacity(overrides.equate.len());
        for spec in &overrides.equate {
            match Equivalence::parse(spec) {
                Some(eq) => equivalences.push(eq),
                None => bail!("invalid --equate `{}`: expected MANAGED=NATIVE", spec),
            }
        }

        Ok(Self {
            native_library,
            header_dir,
            managed_root,
            export_tool: ExportTool::for_host(),
            symbol_prefix: overrides.prefix,
            export_macro: overrides.export_macro,
            library_name: overrides.library_name,
            equivalences,
        })
    }
}

fn default_include(root: &Path) -> PathBuf {
    root.join("extlibs").join("CTGUI").join("include")
}
