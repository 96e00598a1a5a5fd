//! Verdict rendering for stdout.

use oracle::Verdict;
use std::fmt::Write;

/// Text report: one block per non-empty category, `- name` per line.
///
/// Empty when the verdict is clean. `verbose` adds the mismatch reason and both
/// declaration sites under each incompatible name.
pub fn render_text(verdict: &Verdict, library_name: &str, verbose: bool) -> String {
    let mut out = String::new();

    if !verdict.undefined.is_empty() {
        let _ = writeln!(
            out,
            "ERROR: Encountered undefined functions in {}!",
            library_name
        );
        for name in &verdict.undefined {
            let _ = writeln!(out, "- {}", name);
        }
    }

    if !verdict.unexported.is_empty() {
        let _ = writeln!(
            out,
            "ERROR: Not all imported functions are exported by {}!",
            library_name
        );
        for name in &verdict.unexported {
            let _ = writeln!(out, "- {}", name);
        }
    }

    if !verdict.incompatible.is_empty() {
        let _ = writeln!(out, "ERROR: Incompatible function signatures detected!");
        for item in &verdict.incompatible {
            let _ = writeln!(out, "- {}", item.name);
            if verbose {
                let _ = writeln!(out, "    {}", item.mismatch);
                let _ = writeln!(out, "    imported at {}", item.managed);
                let _ = writeln!(out, "    declared at {}", item.native);
            }
        }
    }

    out
}

/// JSON report of the whole verdict.
pub fn render_json(verdict: &Verdict) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(verdict)?)
}
