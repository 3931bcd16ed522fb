//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use nerdpatch_core::{
    FailurePolicy, FetchConfig, FontKind, PatchConfig, ToolConfig,
    config::{
        COMPLETE_PATCH_FLAGS, FONT_PATCHER_PATH, FONTFORGE_PROGRAM, FONTS_DIR, GLYPHS_DIR,
        TTX_PROGRAM,
    },
};

use crate::commands::{download, patch};

#[derive(Parser)]
#[command(name = "nerdpatch", version)]
#[command(about = "Patch a .ttc or .ttf font file with Nerd Fonts glyphs")]
pub struct Cli {
    /// Path to a .ttc or .ttf file
    pub font: PathBuf,

    /// Skip downloading the font-patcher script and the glyphs
    #[arg(long)]
    pub skip_downloads: bool,

    /// Where glyph sources are downloaded to and read from
    #[arg(long, default_value = GLYPHS_DIR)]
    pub glyph_dir: PathBuf,

    /// Root of the patched output; fonts land in OUTPUT_DIR/<font name>/
    #[arg(long, default_value = FONTS_DIR)]
    pub output_dir: PathBuf,

    /// Location of the font-patcher script
    #[arg(long, default_value = FONT_PATCHER_PATH)]
    pub patcher_script: PathBuf,

    /// fontTools ttx executable
    #[arg(long, default_value = TTX_PROGRAM)]
    pub ttx: PathBuf,

    /// FontForge executable
    #[arg(long, default_value = FONTFORGE_PROGRAM)]
    pub fontforge: PathBuf,

    /// Stop at the first face that fails to compile or patch
    #[arg(long)]
    pub fail_fast: bool,

    /// GitHub token for the contents API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl Cli {
    pub fn patch_config(&self) -> PatchConfig {
        PatchConfig {
            tools: ToolConfig { ttx: self.ttx.clone(), fontforge: self.fontforge.clone() },
            patcher_script: self.patcher_script.clone(),
            glyph_dir: self.glyph_dir.clone(),
            output_root: self.output_dir.clone(),
            patch_flags: COMPLETE_PATCH_FLAGS.iter().map(|flag| flag.to_string()).collect(),
            failure_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default().with_token(self.github_token.clone())
    }

    pub fn run(self) -> Result<()> {
        if let Err(extension) = FontKind::detect(&self.font) {
            println!("File extension '{extension}' not supported");
            return Ok(());
        }

        let config = self.patch_config();
        if !self.skip_downloads {
            download(self.fetch_config(), &config.patcher_script, &config.glyph_dir)?;
        }
        patch(&config, &self.font)
    }
}
