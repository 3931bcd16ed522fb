//! Patch pipeline: fetch assets, convert faces, run font-patcher.

mod convert;
mod download;
mod patch;

use std::path::{Path, PathBuf};

use log::warn;
use tempfile::{Builder, TempDir};

pub use convert::{FaceProbe, FontConverter};
pub use download::{AssetFetcher, EntryKind, FetchSummary, HttpSource, RemoteEntry, RemoteSource};
pub use patch::FontPatcher;

use crate::{
    config::{FailurePolicy, PatchConfig},
    error::{Error, Result},
    io::ensure_dir,
    tool::ToolRunner,
};

/// How an input font is processed, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// `.ttc`: each face is extracted through TTX before patching.
    Collection,
    /// `.ttf`: patched as is.
    Single,
}

impl FontKind {
    /// Classify `path`, returning the offending extension if unsupported.
    pub fn detect(path: &Path) -> std::result::Result<Self, String> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ttc") => Ok(Self::Collection),
            Some("ttf") => Ok(Self::Single),
            Some(ext) => Err(format!(".{ext}")),
            None => Err(String::new()),
        }
    }
}

/// A face that could not be patched.
#[derive(Debug)]
pub struct FaceFailure {
    pub index: usize,
    pub error: Error,
}

/// Faces handled during one run.
#[derive(Debug, Default)]
pub struct PatchReport {
    pub output_dir: PathBuf,
    pub patched: usize,
    pub failures: Vec<FaceFailure>,
}

impl PatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of [`Driver::patch_font`].
#[derive(Debug)]
pub enum PatchOutcome {
    Patched(PatchReport),
    /// Nothing was done; the input is neither `.ttf` nor `.ttc`.
    Unsupported { extension: String },
}

/// Runs one font through convert and patch.
pub struct Driver<'a, R: ToolRunner> {
    runner: &'a R,
    config: &'a PatchConfig,
    temp_root: Option<PathBuf>,
}

impl<'a, R: ToolRunner> Driver<'a, R> {
    pub fn new(runner: &'a R, config: &'a PatchConfig) -> Self {
        Self { runner, config, temp_root: None }
    }

    /// Create the scratch directory under `root` instead of the system default.
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Check that font-patcher and the glyph directory are in place.
    pub fn preflight(&self) -> Result<()> {
        let script = &self.config.patcher_script;
        if !script.is_file() {
            return Err(Error::MissingAsset { what: "font-patcher script", path: script.clone() });
        }
        let glyphs = &self.config.glyph_dir;
        if !glyphs.is_dir() {
            return Err(Error::MissingAsset { what: "glyph directory", path: glyphs.clone() });
        }
        Ok(())
    }

    /// Patch every face of `font` into `<output_root>/<font stem>/`.
    pub fn patch_font(&self, font: &Path) -> Result<PatchOutcome> {
        let kind = match FontKind::detect(font) {
            Ok(kind) => kind,
            Err(extension) => {
                println!("File extension '{extension}' not supported");
                return Ok(PatchOutcome::Unsupported { extension });
            }
        };
        self.preflight()?;

        let stem = font.file_stem().unwrap_or_default();
        let output_dir = self.config.output_root.join(stem);
        ensure_dir(&output_dir)?;

        let temp = self.temp_dir()?;
        let mut report = PatchReport { output_dir, ..Default::default() };

        match kind {
            FontKind::Single => {
                println!("Patching {}", font.display());
                let patcher = FontPatcher::new(self.runner, self.config);
                let result = patcher.patch_face(font, &report.output_dir);
                self.record(&mut report, 0, result)?;
            }
            FontKind::Collection => self.patch_collection(font, temp.path(), &mut report)?,
        }

        let temp_path = temp.path().to_path_buf();
        temp.close().map_err(|e| Error::io(temp_path, e))?;

        println!("Done!");
        Ok(PatchOutcome::Patched(report))
    }

    fn patch_collection(&self, font: &Path, temp: &Path, report: &mut PatchReport) -> Result<()> {
        let converter = FontConverter::new(self.runner, &self.config.tools.ttx);
        let patcher = FontPatcher::new(self.runner, self.config);

        for index in 0.. {
            let ttx = temp.join(format!("{index}.ttx"));
            match converter.probe_face(font, index, &ttx)? {
                FaceProbe::NotFound => break,
                FaceProbe::Failed(output) => {
                    // Without a clean answer from ttx the next index is unknowable.
                    let error = output.into_error(converter.program());
                    return self.record(report, index, Err(error));
                }
                FaceProbe::Found => {}
            }

            println!("[{index}] Compiling .ttf");
            let ttf = temp.join(format!("{index}.ttf"));
            let result = converter.compile_face(&ttx, &ttf).and_then(|()| {
                println!("[{index}] Patching .ttf");
                patcher.patch_face(&ttf, &report.output_dir)
            });
            self.record(report, index, result)?;
        }
        Ok(())
    }

    fn record(&self, report: &mut PatchReport, index: usize, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => report.patched += 1,
            Err(error) if self.config.failure_policy == FailurePolicy::Abort => return Err(error),
            Err(error) => {
                warn!("Face {index} failed: {error}");
                report.failures.push(FaceFailure { index, error });
            }
        }
        Ok(())
    }

    fn temp_dir(&self) -> Result<TempDir> {
        let mut builder = Builder::new();
        builder.prefix("nerdpatch-");
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root).map_err(|e| Error::io(root, e)),
            None => builder.tempdir().map_err(|e| Error::io(std::env::temp_dir(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(FontKind::detect(Path::new("Menlo.ttc")), Ok(FontKind::Collection));
        assert_eq!(FontKind::detect(Path::new("fonts/Hack-Regular.ttf")), Ok(FontKind::Single));
        assert_eq!(FontKind::detect(Path::new("Font.woff")), Err(".woff".to_string()));
        assert_eq!(FontKind::detect(Path::new("Font")), Err(String::new()));
    }
}
