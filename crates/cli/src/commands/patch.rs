use std::{fmt::Write, path::Path};

use anyhow::{Context, Result, bail};
use nerdpatch_core::{Driver, PatchConfig, PatchOutcome, PatchReport, SystemRunner, io::glob_fonts};

/// Patch one font file and print a summary.
pub fn patch(config: &PatchConfig, font: &Path) -> Result<()> {
    let outcome = Driver::new(&SystemRunner, config)
        .patch_font(font)
        .with_context(|| format!("Failed to patch {}", font.display()))?;

    let report = match outcome {
        PatchOutcome::Patched(report) => report,
        PatchOutcome::Unsupported { .. } => return Ok(()),
    };

    print!("{}", summary(&report));
    if !report.all_succeeded() {
        bail!("Some faces failed to patch");
    }
    Ok(())
}

/// Faces patched in this run, then whatever fonts the output directory holds.
fn summary(report: &PatchReport) -> String {
    let mut out = String::from("\nPatch Summary\n");
    let _ = writeln!(out, "  Patched: {}", report.patched);
    if !report.all_succeeded() {
        let _ = writeln!(out, "  Failed:  {}", report.failures.len());
        for failure in &report.failures {
            let _ = writeln!(out, "    - face {}: {}", failure.index, failure.error);
        }
    }

    let fonts = glob_fonts(&report.output_dir);
    if !fonts.is_empty() {
        let _ = writeln!(out, "  Output:  {}/", report.output_dir.display());
        for path in fonts {
            let name = path.file_name().unwrap_or(path.as_os_str());
            let _ = writeln!(out, "    {}", name.to_string_lossy());
        }
    }
    out
}
