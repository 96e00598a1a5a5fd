//! Type wisdom: which C# spellings bind to which C spellings.
//!
//! The table is hand-maintained and directional: the left column is the type as
//! written in a `static extern` import, the right column the type as written in the
//! CTGUI header. Besides the table, two generic rules apply: identical spellings are
//! compatible, and a leading `const ` on the native side may be dropped.


/// Builtin `(managed, native)` equivalences for TGUI.Net against CTGUI.
pub static BUILTIN_EQUIVALENCES: &[(&str, &str)] = &[
    // Primitives and SFML value types
    ("bool", "sfBool"),
    ("uint", "unsigned int"),
    ("uint", "size_t"),
    ("Color", "sfColor"),
    ("Time", "sfTime"),
    ("Event", "sfEvent"),
    ("Vector2f", "sfVector2f"),
    ("PrimitiveType", "sfPrimitiveType"),
    ("Text.Styles", "sfUint32"),
    // Opaque SFML handles
    ("IntPtr", "sfTexture*"),
    ("IntPtr", "sfRenderWindow*"),
    ("IntPtr", "sfFont*"),
    ("IntPtr", "sfShape*"),
    ("IntPtr", "sfSprite*"),
    ("IntPtr", "sfView*"),
    ("IntPtr", "sfText*"),
    ("IntPtr", "sfVertexArray*"),
    // Enums
    ("ShowAnimationType", "tguiShowAnimationType"),
    ("HorizontalAlignment", "tguiHorizontalAlignment"),
    ("Alignment", "tguiAlignment"),
    ("VerticalAlignment", "tguiVerticalAlignment"),
    ("Direction", "tguiFillDirection"),
    ("Direction", "tguiExpandDirection"),
    ("ScrollbarPolicy", "tguiScrollbarPolicy"),
    ("TitleButton", "unsigned int"),
    // Opaque CTGUI handles
    ("IntPtr", "tguiRenderer*"),
    ("IntPtr", "tguiRendererData*"),
    ("IntPtr", "tguiWidget*"),
    ("IntPtr", "tguiOutline*"),
    ("IntPtr", "tguiLayout*"),
    ("IntPtr", "tguiTheme*"),
    ("IntPtr", "tguiGui*"),
    ("IntPtr", "tguiLayout2d*"),
    ("IntPtr", "tguiCustomWidgetForBindings*"),
    // Strings and arrays
    ("IntPtr", "const char*"),
    ("IntPtr", "const sfUint32*"),
    ("IntPtr*", "const char**"),
    ("IntPtr*", "const sfUint32**"),
    ("IntPtr*", "tguiWidget**"),
    ("Vertex*", "const sfVertex*"),
    ("IntPtr[]", "const sfUint32**"),
    // Out / ref parameters
    ("out uint", "size_t*"),
    ("out IntPtr", "const sfUint32**"),
    ("out IntPtr", "const char**"),
    ("out IntPtr", "tguiWidget**"),
    ("ref RenderStatesMarshalData", "const sfRenderStates*"),
    // Signal callbacks
    ("CallbackAction", "void (*function)()"),
    ("CallbackActionVector2f", "void (*function)(sfVector2f)"),
    ("CallbackActionString", "void (*function)(const sfUint32*)"),
    ("CallbackActionInt", "void (*function)(sfBool)"),
    ("CallbackActionInt", "void (*function)(int)"),
    ("CallbackActionFloat", "void (*function)(float)"),
    ("CallbackActionUInt", "void (*function)(unsigned int)"),
    ("CallbackActionRange", "void (*function)(float, float)"),
    (
        "CallbackActionItemSelected",
        "void (*function)(const sfUint32*, const sfUint32*)",
    ),
    (
        "CallbackActionAnimation",
        "void (*function)(tguiShowAnimationType, sfBool)",
    ),
    // Custom widget callbacks
    ("CallbackCustomWidgetVector2f", "void (*function)(sfVector2f)"),
    ("CallbackCustomWidgetBool", "void (*function)(sfBool)"),
    ("CallbackCustomWidgetVoid", "void (*function)(void)"),
    ("CallbackCustomWidgetGetVector2f", "sfVector2f (*function)(void)"),
    ("CallbackCustomWidgetGetBool", "sfBool (*function)(void)"),
    ("CallbackCustomWidgetUpdate", "void (*function)(sfTime)"),
    ("CallbackCustomWidgetMouseOnWidget", "sfBool (*function)(sfVector2f)"),
    ("CallbackCustomWidgetKeyPressed", "void (*function)(sfKeyEvent)"),
    ("CallbackCustomWidgetTextEntered", "void (*function)(sfUint32)"),
    (
        "CallbackCustomWidgetMouseWheelScrolled",
        "sfBool (*function)(float, sfVector2f)",
    ),
    ("CallbackCustomWidgetRenderer", "sfBool (*function)(const char*)"),
    ("CallbackCustomWidgetDraw", "void (*function)(sfRenderStates)"),
];

const CONST_QUALIFIER: &str = "const ";

/// A single extra equivalence supplied at runtime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Equivalence {
    pub managed: String,
    pub native: String,
}

impl Equivalence {
    /// Parses `MANAGED=NATIVE`. Both sides are trimmed and must be non-empty.
    ///
    /// # Examples
    /// ```
    /// # use common::wisdom::Equivalence;
    /// let eq = Equivalence::parse("IntPtr = tguiCanvas*").unwrap();
    /// assert_eq!(eq.managed, "IntPtr");
    /// assert_eq!(eq.native, "tguiCanvas*");
    /// assert!(Equivalence::parse("IntPtr").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let (managed, native) = spec.split_once('=')?;
        let (managed, native) = (managed.trim(), native.trim());
        if managed.is_empty() || native.is_empty() {
            return None;
        }
        Some(Self {
            managed: managed.to_string(),
            native: native.to_string(),
        })
    }
}

/// The type-equivalence oracle: builtin table plus optional runtime extras.
#[derive(Debug, Clone, Default)]
pub struct TypeWisdom {
    extra: Vec<Equivalence>,
}

impl TypeWisdom {
    /// Only the builtin table.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Builtin table extended with `extra` pairs.
    pub fn with_extra(extra: Vec<Equivalence>) -> Self {
        Self { extra }
    }

    /// Returns `true` if a C# `managed` type may bind to the C `native` type.
    ///
    /// # Examples
    /// ```
    /// # use common::wisdom::TypeWisdom;
    /// let wisdom = TypeWisdom::builtin();
    /// assert!(wisdom.is_compatible("float", "float"));
    /// assert!(wisdom.is_compatible("IntPtr", "const tguiWidget*"));
    /// assert!(!wisdom.is_compatible("int", "float"));
    /// ```
    pub fn is_compatible(&self, managed: &str, native: &str) -> bool {
        if managed == native || self.is_listed(managed, native) {
            return true;
        }
        match native.strip_prefix(CONST_QUALIFIER) {
            Some(rest) if !rest.is_empty() => self.is_compatible(managed, rest),
            _ => false,
        }
    }

    fn is_listed(&self, managed: &str, native: &str) -> bool {
        BUILTIN_EQUIVALENCES
            .iter()
            .any(|&(m, n)| m == managed && n == native)
            || self
                .extra
                .iter()
                .any(|eq| eq.managed == managed && eq.native == native)
    }
}

/// [`TypeWisdom::is_compatible`] against the builtin table only.
pub fn is_compatible(managed: &str, native: &str) -> bool {
    TypeWisdom::builtin().is_compatible(managed, native)
}
