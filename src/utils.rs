// ABOUTME: Utility functions for the reveal-deck library
// ABOUTME: Markup escaping, color parsing and all-or-nothing file writes

use crate::errors::{DeckError, Result};
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Escape text for use in HTML or XML content and attribute values.
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Escape text for an XML part. Characters XML 1.0 cannot carry, such as
/// form feeds and other C0 controls, become spaces.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return escape_markup(text);
    }
    let cleaned: String = text
        .chars()
        .map(|c| if is_xml_char(c) { c } else { ' ' })
        .collect();
    Cow::Owned(escape_markup(&cleaned).into_owned())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Parse `#rgb` or `#rrggbb` into uppercase `RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<String> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(hex.to_ascii_uppercase()),
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        _ => None,
    }
}

/// Write `data` to `path` so that either the complete file exists afterwards
/// or nothing is left at `path`.
///
/// The data goes to a uniquely named sibling first and is renamed into place.
/// The parent directory must already exist.
pub fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let io_error = |source: std::io::Error| DeckError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| {
            io_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path has no file name",
            ))
        })?
        .to_string_lossy()
        .to_string();
    let temp_path: PathBuf =
        path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    debug!("Writing {} bytes to {:?} via {:?}", data.len(), path, temp_path);
    if let Err(e) = fs::write(&temp_path, data) {
        remove_quietly(&temp_path);
        return Err(io_error(e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        remove_quietly(&temp_path);
        return Err(io_error(e));
    }
    Ok(())
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to clean up temporary file {:?}: {}", path, e);
        }
    }
}
