//! Declaration dialects: one per side of the binding.
//!
//! A dialect knows which files to read, how to spot a declaration on a line, and how
//! to turn that declaration into a [`Signature`]. [`crate::scan::collect`] drives a
//! dialect over a directory tree.

pub mod managed;
pub mod native;

use crate::{AnatomistError, Origin, Side, Signature};

/// A source language whose function declarations can be extracted line by line.
///
/// # Implementation Notes
/// - `marker` is searched with Aho-Corasick; files without it are never split into lines
/// - `extract` sees one line and returns the declaration text, or `None` if the line
///   carries the marker but is not a declaration (e.g. the macro's own `#define`, or a
///   declaration that only appears inside a `//` comment)
/// - `parse` must fail on anything it cannot read; it is only called on text `extract`
///   accepted
pub trait Dialect {
    /// Which side of the binding this dialect reads.
    fn side(&self) -> Side;

    /// File extensions (without the dot) this dialect reads.
    fn extensions(&self) -> &[&str];

    /// Literal text present on every declaration line.
    fn marker(&self) -> &str;

    /// Returns the declaration text carried by `line`, if any.
    fn extract<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Parses one declaration.
    ///
    /// # Errors
    /// [`AnatomistError::MalformedDeclaration`] if `text` does not match the dialect's
    /// grammar; parameter errors from [`crate::params`].
    fn parse(&self, text: &str, origin: Origin) -> Result<Signature, AnatomistError>;
}

pub(crate) fn malformed(text: &str, origin: Origin) -> AnatomistError {
    AnatomistError::MalformedDeclaration {
        location: origin,
        text: text.to_string(),
    }
}

/// `line` without its trailing `//` comment.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    line.find("//").map_or(line, |start| &line[..start])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment() {
        assert_eq!(
            strip_line_comment("CTGUI_API void tguiFoo(int a); // was tguiBar(float b);"),
            "CTGUI_API void tguiFoo(int a); "
        );
        assert_eq!(strip_line_comment("// CTGUI_API void tguiOld(void);"), "");
        assert_eq!(strip_line_comment("int x;"), "int x;");
    }
}
