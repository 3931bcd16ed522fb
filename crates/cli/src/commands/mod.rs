//! CLI command implementations.

mod download;
mod patch;

pub use download::download;
pub use patch::patch;
