//! Converting fonts to and from TTX with fontTools' `ttx`.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{
    error::Result,
    tool::{ToolOutput, ToolRunner},
};

/// What `ttx` prints when asked for a face past the end of a collection.
const FACE_OUT_OF_RANGE: &str = "specify a font number between";

/// Outcome of asking `ttx` to decompile one face of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceProbe {
    /// The face exists and was decompiled.
    Found,
    /// The collection has no face at this index.
    NotFound,
    /// `ttx` failed for some other reason.
    Failed(ToolOutput),
}

/// Drives `ttx` through a [`ToolRunner`].
pub struct FontConverter<'a, R: ToolRunner> {
    runner: &'a R,
    ttx: PathBuf,
}

impl<'a, R: ToolRunner> FontConverter<'a, R> {
    pub fn new(runner: &'a R, ttx: impl Into<PathBuf>) -> Self {
        Self { runner, ttx: ttx.into() }
    }

    pub fn program(&self) -> &Path {
        &self.ttx
    }

    /// Decompile face `index` of `collection` to TTX at `output`.
    ///
    /// A plain font file is a collection with only face 0.
    pub fn decompile_face(
        &self,
        collection: &Path,
        index: usize,
        output: &Path,
    ) -> Result<ToolOutput> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            index.to_string().into(),
            "-o".into(),
            output.into(),
            collection.into(),
        ];
        self.runner.run(&self.ttx, &args)
    }

    /// Decompile face `index`, telling a missing face apart from a tool failure.
    pub fn probe_face(&self, collection: &Path, index: usize, output: &Path) -> Result<FaceProbe> {
        let output = self.decompile_face(collection, index, output)?;
        Ok(if output.success {
            FaceProbe::Found
        } else if output.stderr.contains(FACE_OUT_OF_RANGE) {
            FaceProbe::NotFound
        } else {
            FaceProbe::Failed(output)
        })
    }

    /// Compile a TTX file back into a binary font at `output`.
    pub fn compile_face(&self, intermediate: &Path, output: &Path) -> Result<()> {
        let args: Vec<OsString> = vec!["-o".into(), output.into(), intermediate.into()];
        self.runner.run(&self.ttx, &args)?.check(&self.ttx)
    }
}
