use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use nerdpatch_core::{AssetFetcher, FetchConfig, config::GLYPHS_REMOTE_PATH};

/// Fetch the font-patcher script and the glyph sources.
pub fn download(config: FetchConfig, patcher_script: &Path, glyph_dir: &Path) -> Result<()> {
    let fetcher = AssetFetcher::new(config).context("Failed to set up HTTP client")?;

    fetcher
        .fetch_patcher_script(patcher_script)
        .with_context(|| format!("Failed to download {}", patcher_script.display()))?;

    let summary = fetcher
        .fetch_glyphs(glyph_dir, GLYPHS_REMOTE_PATH)
        .with_context(|| format!("Failed to download glyphs into {}", glyph_dir.display()))?;

    debug!("Skipped {} remote entries", summary.skipped);
    println!("Glyphs ready in {}/ ({} files)", glyph_dir.display(), summary.downloaded);
    Ok(())
}
