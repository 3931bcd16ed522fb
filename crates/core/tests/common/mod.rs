//! Test doubles for the remote repository and the external tools.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    ffi::OsString,
    path::Path,
};

use nerdpatch_core::{Error, RemoteEntry, RemoteSource, Result, ToolOutput, ToolRunner};

/// In-memory contents API.
#[derive(Default)]
pub struct FakeRemote {
    listings: HashMap<String, Vec<RemoteEntry>>,
    files: HashMap<String, Vec<u8>>,
    pub fetched: RefCell<Vec<String>>,
}

impl FakeRemote {
    pub fn with_dir(mut self, path: &str, entries: Vec<RemoteEntry>) -> Self {
        self.listings.insert(path.to_string(), entries);
        self
    }

    pub fn with_file(mut self, url: &str, body: &[u8]) -> Self {
        self.files.insert(url.to_string(), body.to_vec());
        self
    }
}

impl RemoteSource for FakeRemote {
    fn list(&self, remote_path: &str) -> Result<Vec<RemoteEntry>> {
        self.listings
            .get(remote_path)
            .cloned()
            .ok_or_else(|| Error::HttpStatus { url: remote_path.to_string(), status: 404 })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.borrow_mut().push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| Error::HttpStatus { url: url.to_string(), status: 404 })
    }
}

/// Pretends to be `ttx` and `fontforge`, recording every call.
#[derive(Default)]
pub struct RecordingRunner {
    /// Number of faces in the collection handed to `ttx -y`.
    pub faces: usize,
    /// Face indices whose decompile fails with an unexpected error.
    pub broken_faces: HashSet<usize>,
    /// Intermediate `.ttx` files that fail to compile.
    pub failing_compiles: HashSet<String>,
    pub fail_patch: bool,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn with_faces(faces: usize) -> Self {
        Self { faces, ..Default::default() }
    }

    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.calls.borrow().iter().filter(|call| call[0] == program).cloned().collect()
    }

    pub fn decompiles(&self) -> Vec<Vec<String>> {
        self.calls_to("ttx").into_iter().filter(|call| call[1] == "-y").collect()
    }

    pub fn compiles(&self) -> Vec<Vec<String>> {
        self.calls_to("ttx").into_iter().filter(|call| call[1] == "-o").collect()
    }

    pub fn patches(&self) -> Vec<Vec<String>> {
        self.calls_to("fontforge")
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput> {
        let mut call = vec![program.display().to_string()];
        call.extend(args.iter().map(|arg| arg.to_string_lossy().into_owned()));
        self.calls.borrow_mut().push(call.clone());

        let output = match (call[0].as_str(), call[1].as_str()) {
            ("ttx", "-y") => {
                let index: usize = call[2].parse().expect("face index");
                if self.broken_faces.contains(&index) {
                    ToolOutput::failure(1, "ERROR: Unhandled exception has occurred")
                } else if index < self.faces {
                    ToolOutput::success()
                } else {
                    let last = self.faces.saturating_sub(1);
                    ToolOutput::failure(
                        1,
                        format!("ERROR: specify a font number between 0 and {last} (inclusive)"),
                    )
                }
            }
            ("ttx", "-o") => {
                let input = Path::new(&call[3]).file_name().unwrap().to_string_lossy().into_owned();
                if self.failing_compiles.contains(&input) {
                    ToolOutput::failure(1, "ERROR: compile failed")
                } else {
                    ToolOutput::success()
                }
            }
            ("fontforge", _) if self.fail_patch => ToolOutput::failure(1, "patch failed"),
            ("fontforge", _) => ToolOutput::success(),
            _ => panic!("unexpected tool call: {call:?}"),
        };
        Ok(output)
    }
}
