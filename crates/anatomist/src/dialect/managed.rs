//! C# `static extern` imports.
//!
//! Reads lines such as
//! `static extern private void tguiWidget_setSize(IntPtr cPointer, Vector2f size);`
//! from `.cs` files. Visibility keywords between `extern` and the return type are
//! dropped, and delegate parameters lose their `[MarshalAs(UnmanagedType.FunctionPtr)]`
//! attribute.

use regex::Regex;

use super::{malformed, strip_line_comment, Dialect};
use crate::params::{squash_whitespace, strip_param_name, VOID};
use crate::{AnatomistError, Origin, Side, Signature};

const MARKER: &str = "static extern";
const EXTENSIONS: &[&str] = &["cs"];
const FUNCTION_PTR_ATTRIBUTE: &str = "[MarshalAs(UnmanagedType.FunctionPtr)]";

/// Parser for `static extern` declarations in C# binding sources.
pub struct ManagedDialect {
    declaration: Regex,
}

impl ManagedDialect {
    /// Builds the dialect for functions whose names start with `prefix`.
    ///
    /// # Errors
    /// [`AnatomistError::Pattern`] if the resulting expression does not compile.
    pub fn new(prefix: &str) -> Result<Self, AnatomistError> {
        let declaration = Regex::new(&format!(
            r"^static extern (?:(?:public|protected|private|internal) )*(.+?) ({}\w*)\s*\(([^;]*)\);",
            regex::escape(prefix)
        ))?;
        Ok(Self { declaration })
    }
}

impl Dialect for ManagedDialect {
    fn side(&self) -> Side {
        Side::Managed
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn marker(&self) -> &str {
        MARKER
    }

    fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = strip_line_comment(line);
        line.find(MARKER).map(|start| line[start..].trim_end())
    }

    fn parse(&self, text: &str, origin: Origin) -> Result<Signature, AnatomistError> {
        let caps = self
            .declaration
            .captures(text)
            .ok_or_else(|| malformed(text, origin.clone()))?;
        let return_type = squash_whitespace(&caps[1]);
        let name = caps[2].to_string();
        let raw_params = caps[3].trim();

        let mut params = Vec::new();
        if raw_params.is_empty() {
            params.push(VOID.to_string());
        } else {
            for raw in raw_params.split(',') {
                let param = squash_whitespace(raw);
                if param.is_empty() {
                    return Err(malformed(text, origin));
                }
                let param = match param.strip_prefix(FUNCTION_PTR_ATTRIBUTE) {
                    Some(rest) => rest.trim_start().to_string(),
                    None => param,
                };
                params.push(strip_param_name(&param, &name, &origin)?);
            }
        }

        Ok(Signature {
            return_type,
            name,
            params,
            side: Side::Managed,
            origin,
        })
    }
}
