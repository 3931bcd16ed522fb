//! Running the Nerd Fonts font-patcher under FontForge.

use std::{ffi::OsString, path::Path};

use crate::{config::PatchConfig, error::Result, tool::ToolRunner};

/// Drives `fontforge -script font-patcher` through a [`ToolRunner`].
pub struct FontPatcher<'a, R: ToolRunner> {
    runner: &'a R,
    config: &'a PatchConfig,
}

impl<'a, R: ToolRunner> FontPatcher<'a, R> {
    pub fn new(runner: &'a R, config: &'a PatchConfig) -> Self {
        Self { runner, config }
    }

    /// Patch `font`, writing the result into `output_dir`.
    pub fn patch_face(&self, font: &Path, output_dir: &Path) -> Result<()> {
        let fontforge = &self.config.tools.fontforge;
        self.runner.run(fontforge, &self.args(font, output_dir))?.check(fontforge)
    }

    fn args(&self, font: &Path, output_dir: &Path) -> Vec<OsString> {
        // font-patcher expects the glyph directory with a trailing separator.
        let mut glyph_dir = self.config.glyph_dir.clone().into_os_string();
        if !glyph_dir.to_string_lossy().ends_with('/') {
            glyph_dir.push("/");
        }

        let mut args: Vec<OsString> =
            vec!["-script".into(), self.config.patcher_script.clone().into(), font.into()];
        args.extend(self.config.patch_flags.iter().map(OsString::from));
        args.extend([
            "--glyphdir".into(),
            glyph_dir,
            "--outputdir".into(),
            output_dir.into(),
        ]);
        args
    }
}
