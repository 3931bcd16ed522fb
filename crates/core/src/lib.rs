//! nerdpatch core - fetch Nerd Fonts assets and drive the patching tools.

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod tool;

pub use config::{FailurePolicy, FetchConfig, PatchConfig, ToolConfig};
pub use error::{Error, Result};
pub use pipeline::{
    AssetFetcher, Driver, FaceFailure, FaceProbe, FetchSummary, FontConverter, FontKind,
    FontPatcher, PatchOutcome, PatchReport, RemoteEntry, RemoteSource,
};
pub use tool::{SystemRunner, ToolOutput, ToolRunner};
