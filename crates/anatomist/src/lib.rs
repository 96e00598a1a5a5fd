//! # The Anatomist: Declaration Extraction
//!
//! **Role**: Reads the three artifacts of a native binding and turns them into facts
//! the oracle can compare.
//!
//! **Sources**:
//! - [`exports`]: symbol names from the compiled library's export table (`nm` / `dumpbin`).
//! - [`dialect::managed`]: `static extern` imports in the C# binding.
//! - [`dialect::native`]: `CTGUI_API` prototypes in the C headers.
//!
//! **Design**:
//! - Line-oriented regex heuristics tuned to the CTGUI header style and the TGUI.Net
//!   import style. No C or C# grammar.
//! - A line that carries a declaration marker but does not parse is an error, never
//!   skipped: a missed declaration silently weakens the check.

pub mod dialect;
pub mod exports;
pub mod params;
pub mod path_util;
pub mod scan;

pub use common::{Origin, Side, Signature};
pub use dialect::{managed::ManagedDialect, native::NativeDialect, Dialect};
pub use exports::{list_exports, ExportTool, ListingFormat};

use std::path::PathBuf;

/// Errors produced by the Anatomist crate.
#[derive(Debug, thiserror::Error)]
pub enum AnatomistError {
    /// A line carrying a declaration marker does not match the declaration grammar.
    #[error("{location}: malformed declaration `{text}`")]
    MalformedDeclaration { location: Origin, text: String },

    /// A non-`void` parameter has no trailing name to strip.
    #[error("{location}: parameter `{param}` of `{function}` has no name")]
    UnnamedParameter {
        location: Origin,
        function: String,
        param: String,
    },

    /// A function-pointer parameter never closed its own parameter list.
    #[error("{location}: unterminated function-pointer parameter `{param}` in `{function}`")]
    UnbalancedParameter {
        location: Origin,
        function: String,
        param: String,
    },

    /// The export listing program could not be spawned.
    #[error("Export listing tool `{0}` not found")]
    ExportToolMissing(String),

    /// The export listing program ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    ExportToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The compiled library does not exist.
    #[error("Native library not found: {}", .0.display())]
    LibraryMissing(PathBuf),

    /// I/O error (file read, process spawn).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Directory traversal failed.
    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    /// A declaration pattern built from the configured prefix or macro is invalid.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Non-UTF-8 path or similar unrepresentable input.
    #[error("Parse failure: {0}")]
    ParseFailure(String),
}
