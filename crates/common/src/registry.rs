//! # Export Registry: the compiled library's symbol set
//!
//! Holds the names found in the native library's export table. Built once per run by
//! `anatomist::exports` and consulted by the oracle for every declaration.

use std::collections::BTreeSet;

/// Set of exported symbol names. Ordered so that debug output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    symbols: BTreeSet<String>,
}

impl ExportTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.symbols.insert(name.into())
    }

    /// Returns `true` if `name` is exported.
    ///
    /// # Examples
    /// ```
    /// # use common::registry::ExportTable;
    /// let table: ExportTable = ["tguiButton_create"].into_iter().collect();
    /// assert!(table.contains("tguiButton_create"));
    /// assert!(!table.contains("tguiButton_copy"));
    /// ```
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExportTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = ExportTable::new();
        for name in iter {
            table.insert(name);
        }
        table
    }
}
