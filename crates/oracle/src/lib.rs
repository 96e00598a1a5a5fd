//! # The Oracle: Binding Attestation
//!
//! Compares the three views of the native API and returns a [`Verdict`]:
//!
//! 1. **Undefined**: declared in a header, missing from the export table.
//! 2. **Unexported**: imported by the managed binding, missing from the export table.
//! 3. **Incompatible**: imported and exported, but the import's signature does not
//!    bind to the header prototype of the same name.
//!
//! Violations are data, not errors: the whole tree is checked in one run. The only
//! error is an ambiguous header (two prototypes with one name), because it leaves
//! the comparison without a reference.

use common::registry::ExportTable;
use common::wisdom::TypeWisdom;
use common::{Origin, Signature};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Errors from attestation.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("`{name}` is declared twice: {first} and {second}")]
    DuplicateDeclaration {
        name: String,
        first: Origin,
        second: Origin,
    },
}

/// The first reason a managed import does not bind to its native prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    ReturnType { managed: String, native: String },
    ParamCount { managed: usize, native: usize },
    Param {
        index: usize,
        managed: String,
        native: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ReturnType { managed, native } => {
                write!(f, "return type `{managed}` does not bind to `{native}`")
            }
            Mismatch::ParamCount { managed, native } => {
                write!(f, "{managed} parameter(s) imported, {native} declared")
            }
            Mismatch::Param {
                index,
                managed,
                native,
            } => write!(
                f,
                "parameter {} `{managed}` does not bind to `{native}`",
                index + 1
            ),
        }
    }
}

/// One incompatible import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incompatibility {
    pub name: String,
    pub mismatch: Mismatch,
    pub managed: Origin,
    pub native: Origin,
}

/// Result of one attestation run. Each name appears at most once per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub undefined: Vec<String>,
    pub unexported: Vec<String>,
    pub incompatible: Vec<Incompatibility>,
}

impl Verdict {
    /// `true` if no category holds a violation.
    pub fn is_clean(&self) -> bool {
        self.undefined.is_empty() && self.unexported.is_empty() && self.incompatible.is_empty()
    }

    /// Number of names reported across all categories.
    pub fn violation_count(&self) -> usize {
        self.undefined.len() + self.unexported.len() + self.incompatible.len()
    }
}

/// Cross-checks declarations against each other and against the export table.
pub struct SignatureOracle {
    wisdom: TypeWisdom,
}

impl SignatureOracle {
    pub fn new(wisdom: TypeWisdom) -> Self {
        Self { wisdom }
    }

    /// Runs all three checks.
    ///
    /// # Algorithm
    /// 1. Index native prototypes by name, failing on duplicates.
    /// 2. Every native name missing from `exports` is **undefined**.
    /// 3. Every managed name missing from `exports` is **unexported**; it is never
    ///    compared against a prototype.
    /// 4. Every remaining managed import with a prototype is compared: return type,
    ///    then parameter count, then each parameter. The first mismatch is recorded.
    ///
    /// An exported import without any prototype is not a violation; it is logged.
    ///
    /// # Errors
    /// [`OracleError::DuplicateDeclaration`] if two native prototypes share a name.
    pub fn attest(
        &self,
        exports: &ExportTable,
        managed: &[Signature],
        native: &[Signature],
    ) -> Result<Verdict, OracleError> {
        let prototypes = index_by_name(native)?;
        let mut verdict = Verdict::default();

        for decl in native {
            if !exports.contains(&decl.name) {
                verdict.undefined.push(decl.name.clone());
            }
        }

        let mut unexported_seen: HashSet<&str> = HashSet::new();
        let mut incompatible_seen: HashSet<&str> = HashSet::new();

        for import in managed {
            let name = import.name.as_str();
            if !exports.contains(name) {
                if unexported_seen.insert(name) {
                    verdict.unexported.push(name.to_string());
                }
                continue;
            }

            let Some(prototype) = prototypes.get(name) else {
                tracing::warn!(
                    function = name,
                    import = %import.prototype(),
                    location = %import.origin,
                    "imported function is exported but has no header declaration"
                );
                continue;
            };

            if incompatible_seen.contains(name) {
                continue;
            }
            if let Some(mismatch) = self.compare(import, prototype) {
                tracing::debug!(
                    import = %import.prototype(),
                    declaration = %prototype.prototype(),
                    %mismatch,
                    "incompatible binding"
                );
                incompatible_seen.insert(name);
                verdict.incompatible.push(Incompatibility {
                    name: name.to_string(),
                    mismatch,
                    managed: import.origin.clone(),
                    native: prototype.origin.clone(),
                });
            }
        }

        tracing::info!(
            undefined = verdict.undefined.len(),
            unexported = verdict.unexported.len(),
            incompatible = verdict.incompatible.len(),
            violations = verdict.violation_count(),
            "attestation complete"
        );
        Ok(verdict)
    }

    /// Returns the first reason `managed` does not bind to `native`, if any.
    pub fn compare(&self, managed: &Signature, native: &Signature) -> Option<Mismatch> {
        if !self
            .wisdom
            .is_compatible(&managed.return_type, &native.return_type)
        {
            return Some(Mismatch::ReturnType {
                managed: managed.return_type.clone(),
                native: native.return_type.clone(),
            });
        }

        if managed.params.len() != native.params.len() {
            return Some(Mismatch::ParamCount {
                managed: managed.params.len(),
                native: native.params.len(),
            });
        }

        managed
            .params
            .iter()
            .zip(&native.params)
            .enumerate()
            .find(|(_, (m, n))| !self.wisdom.is_compatible(m, n))
            .map(|(index, (m, n))| Mismatch::Param {
                index,
                managed: m.clone(),
                native: n.clone(),
            })
    }
}

impl Default for SignatureOracle {
    fn default() -> Self {
        Self::new(TypeWisdom::builtin())
    }
}

fn index_by_name(native: &[Signature]) -> Result<HashMap<&str, &Signature>, OracleError> {
    let mut index: HashMap<&str, &Signature> = HashMap::with_capacity(native.len());
    for decl in native {
        if let Some(first) = index.insert(decl.name.as_str(), decl) {
            return Err(OracleError::DuplicateDeclaration {
                name: decl.name.clone(),
                first: first.origin.clone(),
                second: decl.origin.clone(),
            });
        }
    }
    Ok(index)
}
