//! Parameter-list helpers shared by both dialects.

use crate::{AnatomistError, Origin};

/// Type recorded for an empty parameter list, so `f()` and `f(void)` compare equal.
pub const VOID: &str = "void";

/// Collapses every whitespace run to a single space and trims the ends.
///
/// # Example
/// ```
/// # use anatomist::params::squash_whitespace;
/// assert_eq!(squash_whitespace("  const   char*  "), "const char*");
/// ```
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` if `param` starts a function-pointer type, e.g. `void (*function)(float`.
pub fn is_function_pointer(param: &str) -> bool {
    param.contains("(*")
}

/// Returns `true` if every `(` in `text` has been closed.
pub fn parens_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}

/// Strips the trailing parameter name, keeping only the type.
///
/// Pointer stars glued to the name (`int *x`) move back onto the type (`int*`).
/// `void` is returned unchanged. A parameter with no separable name is an error.
pub fn strip_param_name(
    param: &str,
    function: &str,
    location: &Origin,
) -> Result<String, AnatomistError> {
    if param == VOID {
        return Ok(param.to_string());
    }
    let unnamed = || AnatomistError::UnnamedParameter {
        location: location.clone(),
        function: function.to_string(),
        param: param.to_string(),
    };
    let (ty, name) = param.rsplit_once(' ').ok_or_else(unnamed)?;
    let ty = ty.trim_end();
    if ty.is_empty() {
        return Err(unnamed());
    }
    let stars = name.chars().take_while(|&c| c == '*').count();
    Ok(format!("{}{}", ty, "*".repeat(stars)))
}
