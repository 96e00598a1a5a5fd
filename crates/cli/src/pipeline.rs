//! The check pipeline: exports -> managed imports -> native prototypes -> verdict.

use anatomist::{list_exports, scan, ManagedDialect, NativeDialect};
use anyhow::Context;
use common::registry::ExportTable;
use common::wisdom::TypeWisdom;
use oracle::{SignatureOracle, Verdict};

use crate::config::ToolConfig;

/// Runs the full pipeline against the configured library, headers and sources.
pub fn run(config: &ToolConfig) -> anyhow::Result<Verdict> {
    let exports = list_exports(
        &config.export_tool,
        &config.native_library,
        &config.symbol_prefix,
    )
    .with_context(|| {
        format!(
            "failed to list exports of {}",
            config.native_library.display()
        )
    })?;
    check(config, &exports)
}

/// Stages 2-4 against an already-built export table.
pub fn check(config: &ToolConfig, exports: &ExportTable) -> anyhow::Result<Verdict> {
    let managed_dialect = ManagedDialect::new(&config.symbol_prefix)?;
    let native_dialect = NativeDialect::new(&config.export_macro, &config.symbol_prefix)?;

    let managed = scan::collect(&config.managed_root, &managed_dialect).with_context(|| {
        format!(
            "failed to read imports under {}",
            config.managed_root.display()
        )
    })?;
    let native = scan::collect(&config.header_dir, &native_dialect).with_context(|| {
        format!(
            "failed to read declarations under {}",
            config.header_dir.display()
        )
    })?;

    let oracle = SignatureOracle::new(TypeWisdom::with_extra(config.equivalences.clone()));
    let verdict = oracle.attest(exports, &managed, &native)?;
    Ok(verdict)
}
