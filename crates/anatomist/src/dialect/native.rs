//! C header prototypes marked with the export macro.
//!
//! Reads lines such as
//! `CTGUI_API void tguiWidget_setSize(tguiWidget* widget, sfVector2f size);`
//! from `.h` files.
//!
//! Function-pointer parameters (`void (*function)(float, float)`) carry commas of
//! their own. Segments are merged back into one parameter until the pointer's
//! parameter list closes, and the full pointer type is kept as written: the header
//! style names the pointer `function` inside the type, so there is no trailing name
//! to strip.
//!
//! The function name is the first prefixed identifier followed by `(`, so a function
//! pointer's own return type (`tguiAlignment (*function)(void)`) never takes its place.
//! `//` comments are cut off before the closing `;` is located.

use regex::Regex;

use super::{malformed, strip_line_comment, Dialect};
use crate::params::{
    is_function_pointer, parens_balanced, squash_whitespace, strip_param_name, VOID,
};
use crate::{AnatomistError, Origin, Side, Signature};

const EXTENSIONS: &[&str] = &["h"];

/// Parser for export-macro prototypes in C headers.
pub struct NativeDialect {
    export_macro: String,
    declaration: Regex,
}

impl NativeDialect {
    /// Builds the dialect for `export_macro` prototypes of functions starting with `prefix`.
    ///
    /// # Errors
    /// [`AnatomistError::Pattern`] if the resulting expression does not compile.
    pub fn new(export_macro: &str, prefix: &str) -> Result<Self, AnatomistError> {
        let declaration = Regex::new(&format!(
            r"^{}\s+(.+?) ({}\w*)\s*\(([^;]*)\);",
            regex::escape(export_macro),
            regex::escape(prefix)
        ))?;
        Ok(Self {
            export_macro: export_macro.to_string(),
            declaration,
        })
    }
}

impl Dialect for NativeDialect {
    fn side(&self) -> Side {
        Side::Native
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn marker(&self) -> &str {
        &self.export_macro
    }

    fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = strip_line_comment(line);
        let rest = &line[line.find(self.export_macro.as_str())?..];
        rest.rfind(';').map(|end| &rest[..=end])
    }

    fn parse(&self, text: &str, origin: Origin) -> Result<Signature, AnatomistError> {
        let caps = self
            .declaration
            .captures(text)
            .ok_or_else(|| malformed(text, origin.clone()))?;
        let return_type = squash_whitespace(&caps[1]);
        let name = caps[2].to_string();
        let raw_params = caps[3].trim();

        let params = if raw_params.is_empty() {
            vec![VOID.to_string()]
        } else {
            split_params(raw_params, text, &name, &origin)?
        };

        Ok(Signature {
            return_type,
            name,
            params,
            side: Side::Native,
            origin,
        })
    }
}

/// Splits a C parameter list on commas, re-joining function-pointer segments.
fn split_params(
    raw_params: &str,
    text: &str,
    function: &str,
    origin: &Origin,
) -> Result<Vec<String>, AnatomistError> {
    let mut params = Vec::new();
    let mut open_pointer: Option<String> = None;

    for raw in raw_params.split(',') {
        let segment = squash_whitespace(raw);

        if let Some(mut pointer) = open_pointer.take() {
            pointer.push_str(", ");
            pointer.push_str(&segment);
            if parens_balanced(&pointer) {
                params.push(pointer);
            } else {
                open_pointer = Some(pointer);
            }
            continue;
        }

        if segment.is_empty() {
            return Err(malformed(text, origin.clone()));
        }

        if is_function_pointer(&segment) {
            if parens_balanced(&segment) {
                params.push(segment);
            } else {
                open_pointer = Some(segment);
            }
            continue;
        }

        params.push(strip_param_name(&segment, function, origin)?);
    }

    match open_pointer {
        Some(param) => Err(AnatomistError::UnbalancedParameter {
            location: origin.clone(),
            function: function.to_string(),
            param,
        }),
        None => Ok(params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialect() -> NativeDialect {
        NativeDialect::new("CTGUI_API", "tgui").unwrap()
    }

    fn origin() -> Origin {
        Origin {
            file_path: "include/CTGUI/Widgets/Slider.h".into(),
            line: 3,
        }
    }

    fn parse(line: &str) -> Result<Signature, AnatomistError> {
        let d = dialect();
        let text = d.extract(line).expect("line should carry a declaration");
        d.parse(text, origin())
    }

    #[test]
    fn test_parse_simple_prototype() {
        let sig = parse("CTGUI_API int tguiFoo(int value);").unwrap();
        assert_eq!(sig.return_type, "int");
        assert_eq!(sig.name, "tguiFoo");
        assert_eq!(sig.params, vec!["int"]);
        assert_eq!(sig.side, Side::Native);
    }

    #[test]
    fn test_explicit_void_and_empty_lists() {
        assert_eq!(
            parse("CTGUI_API tguiWidget* tguiSlider_create(void);")
                .unwrap()
                .params,
            vec!["void"]
        );
        assert_eq!(
            parse("CTGUI_API tguiWidget* tguiSlider_create();")
                .unwrap()
                .params,
            vec!["void"]
        );
    }

    #[test]
    fn test_const_return_type() {
        let sig = parse("CTGUI_API const sfUint32* tguiButton_getText(const tguiWidget* widget);")
            .unwrap();
        assert_eq!(sig.return_type, "const sfUint32*");
        assert_eq!(sig.params, vec!["const tguiWidget*"]);
    }

    #[test]
    fn test_function_pointer_with_comma_is_one_param() {
        let sig = parse(
            "CTGUI_API unsigned int tguiWidget_connectRange(tguiWidget* widget, const char* signalName, void (*function)(float, float), const sfUint32** error);",
        )
        .unwrap();
        assert_eq!(
            sig.params,
            vec![
                "tguiWidget*",
                "const char*",
                "void (*function)(float, float)",
                "const sfUint32**",
            ]
        );
    }

    #[test]
    fn test_function_pointer_with_three_params() {
        let sig = parse(
            "CTGUI_API void tguiFoo_connect(void (*function)(float, sfVector2f, sfBool));",
        )
        .unwrap();
        assert_eq!(sig.params, vec!["void (*function)(float, sfVector2f, sfBool)"]);
    }

    #[test]
    fn test_function_pointer_without_comma() {
        let sig = parse(
            "CTGUI_API void tguiCustomWidget_setUpdateFunction(tguiWidget* widget, void (*function)(sfTime));",
        )
        .unwrap();
        assert_eq!(sig.params, vec!["tguiWidget*", "void (*function)(sfTime)"]);
    }

    #[test]
    fn test_trailing_comment_does_not_replace_declaration() {
        let sig = parse("CTGUI_API void tguiFoo(int a); // replaces tguiBar(float b);").unwrap();
        assert_eq!(sig.return_type, "void");
        assert_eq!(sig.name, "tguiFoo");
        assert_eq!(sig.params, vec!["int"]);
    }

    #[test]
    fn test_commented_out_prototype_is_not_a_declaration() {
        assert!(dialect()
            .extract("// CTGUI_API void tguiOld(int a);")
            .is_none());
    }

    #[test]
    fn test_function_pointer_returning_prefixed_type() {
        let sig = parse("CTGUI_API void tguiFoo(int a, tguiAlignment (*function)(void));").unwrap();
        assert_eq!(sig.return_type, "void");
        assert_eq!(sig.name, "tguiFoo");
        assert_eq!(sig.params, vec!["int", "tguiAlignment (*function)(void)"]);
    }

    #[test]
    fn test_prefixed_return_type() {
        let sig = parse("CTGUI_API const tguiWidget* tguiWidget_getParent(const tguiWidget* widget);")
            .unwrap();
        assert_eq!(sig.return_type, "const tguiWidget*");
        assert_eq!(sig.name, "tguiWidget_getParent");
    }

    #[test]
    fn test_macro_definition_line_is_not_a_declaration() {
        assert!(dialect().extract("#define CTGUI_API CTGUI_API_EXPORT").is_none());
        assert!(dialect()
            .extract("    #define CTGUI_API __declspec(dllexport)")
            .is_none());
    }

    #[test]
    fn test_unterminated_function_pointer() {
        assert!(matches!(
            parse("CTGUI_API void tguiFoo(void (*function)(float, float);"),
            Err(AnatomistError::UnbalancedParameter { .. })
        ));
    }

    #[test]
    fn test_malformed_prototype() {
        assert!(matches!(
            parse("CTGUI_API sfBool;"),
            Err(AnatomistError::MalformedDeclaration { .. })
        ));
    }

    #[test]
    fn test_empty_parameter_segment_is_malformed() {
        assert!(matches!(
            parse("CTGUI_API void tguiFoo(int a, );"),
            Err(AnatomistError::MalformedDeclaration { .. })
        ));
    }

    #[test]
    fn test_custom_macro_and_prefix() {
        let d = NativeDialect::new("MYLIB_API", "ml").unwrap();
        let text = d.extract("MYLIB_API float mlScale(float factor);").unwrap();
        let sig = d.parse(text, origin()).unwrap();
        assert_eq!(sig.name, "mlScale");
        assert_eq!(d.marker(), "MYLIB_API");
    }
}
