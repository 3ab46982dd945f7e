// ABOUTME: Asset loading for the reveal-deck exporters
// ABOUTME: Reads local files or fetches remote URLs for images and media

use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Where an asset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    Remote(Url),
    Local(PathBuf),
}

/// An image or media file referenced by slide content.
#[derive(Debug, Clone)]
pub struct Asset {
    pub location: String,
    pub resolved: AssetLocation,
}

impl Asset {
    /// Classify a URL or path string. `http(s)` URLs are remote, `file://`
    /// URLs and anything else are treated as local paths.
    pub fn new(location: &str) -> Self {
        let resolved = match Url::parse(location) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                AssetLocation::Remote(url)
            }
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => AssetLocation::Local(path),
                Err(()) => AssetLocation::Local(PathBuf::from(url.path())),
            },
            _ => AssetLocation::Local(PathBuf::from(location)),
        };
        Self {
            location: location.to_string(),
            resolved,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.resolved, AssetLocation::Remote(_))
    }

    /// Lowercased file extension of the asset's path, if any.
    pub fn extension(&self) -> Option<String> {
        let path = match &self.resolved {
            AssetLocation::Remote(url) => url.path().to_string(),
            AssetLocation::Local(path) => path.to_string_lossy().to_string(),
        };
        Path::new(&path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// Loads asset bytes. Remote fetches share one lazily built HTTP client.
/// There are no retries: the first failure is returned.
pub struct AssetFetcher {
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl AssetFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            client: None,
        }
    }

    /// Load the asset, returning a human-readable reason on failure.
    pub fn load(&mut self, asset: &Asset) -> std::result::Result<Vec<u8>, String> {
        match &asset.resolved {
            AssetLocation::Remote(url) => self.fetch_remote(url),
            AssetLocation::Local(path) => Self::read_local(path),
        }
    }

    fn client(&mut self) -> std::result::Result<&Client, String> {
        if self.client.is_none() {
            let mut builder = Client::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| format!("failed to build HTTP client: {}", e))?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| "HTTP client unavailable".to_string())
    }

    fn fetch_remote(&mut self, url: &Url) -> std::result::Result<Vec<u8>, String> {
        info!("Fetching remote asset: {}", url);
        let response = self
            .client()?
            .get(url.clone())
            .send()
            .map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {}", status));
        }
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }

    fn read_local(path: &Path) -> std::result::Result<Vec<u8>, String> {
        info!("Reading local asset: {:?}", path);
        fs::read(path).map_err(|e| e.to_string())
    }
}
