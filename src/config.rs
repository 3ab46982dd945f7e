// ABOUTME: Configuration module for the reveal-deck library
// ABOUTME: Provides export defaults and optional environment variable overrides

use crate::errors::Result;
use crate::html::HtmlOptions;
use crate::pptx::{AspectRatio, PptxConfig};
use log::warn;
use std::env;
use std::time::Duration;

pub const DEFAULT_REVEAL_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.5.0";
pub const DEFAULT_MERMAID_SRC: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@11.4.1/dist/mermaid.min.js";

/// Global configuration shared by both exporters
#[derive(Debug, Clone)]
pub struct Config {
    pub reveal_cdn: String,
    pub mermaid_src: String,
    /// Timeout for fetching remote assets; `None` keeps the HTTP client default.
    pub fetch_timeout_ms: Option<u64>,
    pub aspect_ratio: AspectRatio,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reveal_cdn: DEFAULT_REVEAL_CDN.to_string(),
            mermaid_src: DEFAULT_MERMAID_SRC.to_string(),
            fetch_timeout_ms: None,
            aspect_ratio: AspectRatio::default(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables. Every variable is
    /// optional; unparsable values are reported and replaced by the default.
    pub fn from_env() -> Self {
        let reveal_cdn = env::var("REVEAL_DECK_CDN")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_REVEAL_CDN.to_string());
        let mermaid_src = env::var("REVEAL_DECK_MERMAID_SRC")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_MERMAID_SRC.to_string());
        let fetch_timeout_ms = env::var("REVEAL_DECK_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|s| match s.parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring REVEAL_DECK_FETCH_TIMEOUT_MS={:?}: {}", s, e);
                    None
                }
            });
        let aspect_ratio = env::var("REVEAL_DECK_ASPECT_RATIO")
            .ok()
            .and_then(|s| match s.parse::<AspectRatio>() {
                Ok(ratio) => Some(ratio),
                Err(e) => {
                    warn!("Ignoring REVEAL_DECK_ASPECT_RATIO: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            reveal_cdn,
            mermaid_src,
            fetch_timeout_ms,
            aspect_ratio,
        }
    }

    /// Get HTML options with defaults from this config
    pub fn html_options(&self, auto_slide_ms: Option<u64>, pdf_export: bool) -> HtmlOptions {
        HtmlOptions {
            reveal_cdn: self.reveal_cdn.clone(),
            mermaid_src: self.mermaid_src.clone(),
            auto_slide_ms,
            pdf_export,
            ..HtmlOptions::default()
        }
    }

    /// Get a PPTX configuration with defaults from this config
    pub fn pptx_config(&self, aspect_ratio: Option<&str>) -> Result<PptxConfig> {
        let aspect_ratio = match aspect_ratio {
            Some(ratio) => ratio.parse()?,
            None => self.aspect_ratio,
        };
        let config = PptxConfig {
            aspect_ratio,
            fetch_timeout: self.fetch_timeout_ms.map(Duration::from_millis),
        };
        config.validate()?;
        Ok(config)
    }
}
