//! Fetching the font-patcher script and the glyph sources.

use std::path::{Component, Path};

use log::{debug, warn};
use reqwest::{
    blocking::{Client, RequestBuilder},
    header::ACCEPT,
};
use serde::Deserialize;

use crate::{
    config::FetchConfig,
    error::{Error, Result},
    io::{ensure_dir, write_executable, write_file},
};

/// Kind of a remote directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks and submodules; never followed.
    #[serde(other)]
    Other,
}

/// One item of a contents API directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    pub download_url: Option<String>,
}

impl RemoteEntry {
    pub fn file(path: &str, download_url: &str) -> Self {
        Self::new(path, EntryKind::File, Some(download_url.to_string()))
    }

    pub fn dir(path: &str) -> Self {
        Self::new(path, EntryKind::Dir, None)
    }

    fn new(path: &str, kind: EntryKind, download_url: Option<String>) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self { name, kind, path: path.to_string(), download_url }
    }
}

/// Read-only access to a remote repository.
pub trait RemoteSource {
    /// List the entries of a remote directory.
    fn list(&self, remote_path: &str) -> Result<Vec<RemoteEntry>>;

    /// Download the body behind a URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`RemoteSource`] backed by the GitHub contents API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    api_url: String,
    accept: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| Error::Http { url: config.api_url.clone(), source })?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            accept: config.accept.clone(),
            token: config.token.clone(),
        })
    }

    fn send(request: RequestBuilder, url: &str) -> Result<Vec<u8>> {
        let response =
            request.send().map_err(|source| Error::Http { url: url.to_string(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }
        let bytes = response.bytes().map_err(|source| Error::Http { url: url.to_string(), source })?;
        Ok(bytes.to_vec())
    }
}

impl RemoteSource for HttpSource {
    fn list(&self, remote_path: &str) -> Result<Vec<RemoteEntry>> {
        let url = format!("{}/{}", self.api_url, remote_path.trim_start_matches('/'));
        debug!("Listing {url}");

        let mut request = self.client.get(&url).header(ACCEPT, &self.accept);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let body = Self::send(request, &url)?;
        serde_json::from_slice(&body).map_err(|source| Error::Listing { url, source })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Self::send(self.client.get(url), url)
    }
}

/// Counts from a glyph download.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

/// Downloads the patcher script and mirrors the glyph tree.
pub struct AssetFetcher<S = HttpSource> {
    source: S,
    config: FetchConfig,
}

impl AssetFetcher<HttpSource> {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let source = HttpSource::new(&config)?;
        Ok(Self { source, config })
    }
}

impl<S: RemoteSource> AssetFetcher<S> {
    pub fn with_source(config: FetchConfig, source: S) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Download the font-patcher script to `dest`, replacing any existing copy.
    pub fn fetch_patcher_script(&self, dest: &Path) -> Result<()> {
        let name = dest.file_name().unwrap_or(dest.as_os_str());
        println!("Downloading script: {}", name.to_string_lossy());

        let bytes = self.source.fetch(&self.config.patcher_url)?;
        write_executable(dest, &bytes)
    }

    /// Mirror the remote directory `remote_path` into `local_path`, keeping
    /// only files with an accepted extension.
    pub fn fetch_glyphs(&self, local_path: &Path, remote_path: &str) -> Result<FetchSummary> {
        let mut summary = FetchSummary::default();
        self.fetch_dir(local_path, remote_path, &mut summary)?;
        Ok(summary)
    }

    fn fetch_dir(&self, local: &Path, remote: &str, summary: &mut FetchSummary) -> Result<()> {
        ensure_dir(local)?;

        for entry in self.source.list(remote)? {
            if !is_plain_name(&entry.name) {
                warn!("Skipping remote entry with unusable name: {:?}", entry.path);
                summary.skipped += 1;
                continue;
            }
            let target = local.join(&entry.name);

            match entry.kind {
                EntryKind::Dir => self.fetch_dir(&target, &entry.path, summary)?,
                EntryKind::File if self.config.accepts(&entry.name) => {
                    let url = entry
                        .download_url
                        .as_deref()
                        .ok_or_else(|| Error::MissingDownloadUrl(entry.path.clone()))?;
                    println!("Downloading glyphs: {}", entry.name);
                    let bytes = self.source.fetch(url)?;
                    write_file(&target, &bytes)?;
                    summary.downloaded += 1;
                }
                EntryKind::File | EntryKind::Other => {
                    debug!("Skipping {}", entry.path);
                    summary.skipped += 1;
                }
            }
        }
        Ok(())
    }
}

/// A single normal path component, so joined paths stay under the local root.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
