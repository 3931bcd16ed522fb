//! Configuration for Nerd Fonts patching.

use std::path::PathBuf;

/// GitHub contents API for the Nerd Fonts repository.
pub const CONTENTS_API_URL: &str = "https://api.github.com/repos/ryanoasis/nerd-fonts/contents";

/// Remote directory holding the glyph sources.
pub const GLYPHS_REMOTE_PATH: &str = "src/glyphs";

/// Accept header sent to the contents API.
pub const CONTENTS_ACCEPT: &str = "application/vnd.github.v3.raw";

/// The contents API rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("nerdpatch/", env!("CARGO_PKG_VERSION"));

/// font-patcher script download URL.
pub const FONT_PATCHER_URL: &str =
    "https://raw.githubusercontent.com/ryanoasis/nerd-fonts/master/font-patcher";

/// Local path of the font-patcher script.
pub const FONT_PATCHER_PATH: &str = "./font-patcher";

/// fontTools table compiler.
pub const TTX_PROGRAM: &str = "ttx";

/// FontForge, which runs font-patcher.
pub const FONTFORGE_PROGRAM: &str = "fontforge";

/// Local glyph directory.
pub const GLYPHS_DIR: &str = "glyphs";

/// Root of the patched font output.
pub const FONTS_DIR: &str = "fonts";

/// Glyph file extensions worth downloading.
pub const GLYPH_EXTENSIONS: &[&str] = &["ttf", "otf", "sfd"];

/// Flags asking font-patcher for every glyph set.
pub const COMPLETE_PATCH_FLAGS: &[&str] = &["--complete"];

/// Settings for the asset fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_url: String,
    pub accept: String,
    pub user_agent: String,
    /// Bearer token for the contents API, raises the anonymous rate limit.
    pub token: Option<String>,
    pub extensions: Vec<String>,
    pub patcher_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: CONTENTS_API_URL.to_string(),
            accept: CONTENTS_ACCEPT.to_string(),
            user_agent: USER_AGENT.to_string(),
            token: None,
            extensions: GLYPH_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            patcher_url: FONT_PATCHER_URL.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Whether a remote file name carries one of the accepted extensions.
    pub fn accepts(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self.extensions.iter().any(|e| e == ext),
            _ => false,
        }
    }
}

/// External programs invoked during patching.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub ttx: PathBuf,
    pub fontforge: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { ttx: PathBuf::from(TTX_PROGRAM), fontforge: PathBuf::from(FONTFORGE_PROGRAM) }
    }
}

/// What to do when compiling or patching one face fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next face.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

/// Paths and policy for a patch run.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    pub tools: ToolConfig,
    pub patcher_script: PathBuf,
    pub glyph_dir: PathBuf,
    pub output_root: PathBuf,
    pub patch_flags: Vec<String>,
    pub failure_policy: FailurePolicy,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            tools: ToolConfig::default(),
            patcher_script: PathBuf::from(FONT_PATCHER_PATH),
            glyph_dir: PathBuf::from(GLYPHS_DIR),
            output_root: PathBuf::from(FONTS_DIR),
            patch_flags: COMPLETE_PATCH_FLAGS.iter().map(|flag| flag.to_string()).collect(),
            failure_policy: FailurePolicy::default(),
        }
    }
}
