pub mod registry;
pub mod wisdom;

use serde::Serialize;
use std::fmt;

/// Which side of the binding a declaration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// `static extern` import in the C# binding source.
    Managed = 0,
    /// `CTGUI_API` prototype in the public C headers.
    Native = 1,
}

/// Where a declaration was found. Diagnostics only; never part of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    /// Normalized file path (UTF-8, forward slashes).
    pub file_path: String,
    /// 1-indexed line of the declaration.
    pub line: u32,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

/// A parsed function signature: return type, name and positional parameter types.
///
/// Parameter names are already stripped. A function without parameters carries a
/// single synthetic `"void"` parameter, so `f()` and `f(void)` compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: String,
    pub name: String,
    pub params: Vec<String>,
    pub side: Side,
    pub origin: Origin,
}

impl Signature {
    /// Renders the signature the way it reads in source, e.g. `int tguiFoo(int)`.
    pub fn prototype(&self) -> String {
        format!(
            "{} {}({})",
            self.return_type,
            self.name,
            self.params.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_signature(params: &[&str]) -> Signature {
        Signature {
            return_type: "int".into(),
            name: "tguiFoo".into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            side: Side::Native,
            origin: Origin {
                file_path: "include/CTGUI/Foo.h".into(),
                line: 12,
            },
        }
    }

    #[test]
    fn test_prototype_single_param() {
        assert_eq!(make_signature(&["int"]).prototype(), "int tguiFoo(int)");
    }

    #[test]
    fn test_prototype_function_pointer_param() {
        let sig = make_signature(&["tguiWidget*", "void (*function)(float, float)"]);
        assert_eq!(
            sig.prototype(),
            "int tguiFoo(tguiWidget*, void (*function)(float, float))"
        );
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(make_signature(&["void"]).origin.to_string(), "include/CTGUI/Foo.h:12");
    }

    #[test]
    fn test_side_enum_size() {
        assert_eq!(std::mem::size_of::<Side>(), 1);
    }
}
