//! Export listing: which symbols does the compiled library actually provide?
//!
//! Runs the platform's symbol dumper against the library and keeps every token that
//! starts with the library prefix. On Unix only `nm` lines of type `T` (defined text
//! symbols) count; `dumpbin /exports` output lists exports only, so every line counts.
//!
//! The dumper's stdout is read straight from the pipe. Any failure (missing tool,
//! missing library, non-zero exit) is an error: a partial symbol set would turn into
//! bogus "undefined" reports.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use common::registry::ExportTable;
use regex::Regex;

use crate::AnatomistError;

/// Output format of the export listing program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// `nm`: `<address> <type> <name>` per line.
    Nm,
    /// `dumpbin /exports`: free-form table, one export per line.
    Dumpbin,
}

/// How to invoke the export listing program. The library path is appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTool {
    pub program: String,
    pub args: Vec<String>,
    pub format: ListingFormat,
}

impl ExportTool {
    pub fn nm() -> Self {
        Self {
            program: "nm".into(),
            args: Vec::new(),
            format: ListingFormat::Nm,
        }
    }

    pub fn dumpbin() -> Self {
        Self {
            program: "dumpbin".into(),
            args: vec!["/exports".into()],
            format: ListingFormat::Dumpbin,
        }
    }

    /// `dumpbin` on Windows, `nm` everywhere else.
    pub fn for_host() -> Self {
        if cfg!(windows) {
            Self::dumpbin()
        } else {
            Self::nm()
        }
    }

    /// The command line as it would be typed, for logs.
    pub fn command_line(&self, library: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(library.display().to_string());
        parts.join(" ")
    }
}

/// Lists the symbols starting with `prefix` exported by `library`.
///
/// # Errors
/// - [`AnatomistError::LibraryMissing`] if `library` is not a file
/// - [`AnatomistError::ExportToolMissing`] if the program cannot be found
/// - [`AnatomistError::ExportToolFailed`] if it exits unsuccessfully
pub fn list_exports(
    tool: &ExportTool,
    library: &Path,
    prefix: &str,
) -> Result<ExportTable, AnatomistError> {
    if !library.is_file() {
        return Err(AnatomistError::LibraryMissing(library.to_path_buf()));
    }

    tracing::debug!(command = %tool.command_line(library), "listing exports");
    let output = match Command::new(&tool.program)
        .args(&tool.args)
        .arg(library)
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AnatomistError::ExportToolMissing(tool.program.clone()))
        }
        Err(e) => return Err(e.into()),
    };

    if !output.status.success() {
        return Err(AnatomistError::ExportToolFailed {
            program: tool.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let listing = String::from_utf8_lossy(&output.stdout);
    let table = parse_listing(&listing, tool.format, prefix)?;
    tracing::info!(symbols = table.len(), library = %library.display(), "export table read");
    Ok(table)
}

/// Extracts prefixed symbol names from raw listing text.
///
/// A name must start a whitespace-separated token, optionally behind the Mach-O
/// leading `_`. The prefix inside a C++ mangled name (`_ZN4tgui...`) does not count.
///
/// # Example
/// ```
/// # use anatomist::exports::{parse_listing, ListingFormat};
/// let listing = "0000000000012a40 T tguiButton_create\n                 U tguiMissing\n";
/// let table = parse_listing(listing, ListingFormat::Nm, "tgui").unwrap();
/// assert!(table.contains("tguiButton_create"));
/// assert!(!table.contains("tguiMissing"));
/// ```
pub fn parse_listing(
    listing: &str,
    format: ListingFormat,
    prefix: &str,
) -> Result<ExportTable, AnatomistError> {
    let symbol = Regex::new(&format!(r"(?:^|\s)_?({}\S*)", regex::escape(prefix)))?;
    let mut table = ExportTable::new();
    for line in listing.lines() {
        if format == ListingFormat::Nm && !is_text_symbol(line) {
            continue;
        }
        for caps in symbol.captures_iter(line) {
            table.insert(&caps[1]);
        }
    }
    Ok(table)
}

/// `nm` line of the form `<address> T <name>`.
fn is_text_symbol(line: &str) -> bool {
    let mut columns = line.split_whitespace();
    matches!(
        (columns.next(), columns.next(), columns.next()),
        (Some(_), Some("T"), Some(_))
    )
}
