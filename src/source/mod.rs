//! Loading and validating the two texts handed to the diff engine.
//!
//! The engine itself accepts any pair of strings. This module is the boundary
//! that turns command-line inputs into those strings and rejects what should
//! never reach the engine: missing or empty texts, non-text files, oversized
//! files and invalid UTF-8.

/// Boundary error taxonomy
pub mod errors;

pub use errors::InputError;

use anyhow::Result;
use content_inspector::{ContentType, inspect};
use memmap2::MmapOptions;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

use crate::config::InputConfig;

/// Where one side's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, written as `-` on the command line
    Stdin,
    /// A local text file
    Path(PathBuf),
}

impl InputSource {
    /// Interpret a command-line argument (`-` means stdin).
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Limits applied while loading
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Largest accepted input in bytes
    pub max_file_size: u64,
    /// Lowercase extensions accepted for files, without the dot
    pub allowed_extensions: Vec<String>,
    /// Files at least this large are memory-mapped
    pub mmap_threshold: u64,
}

impl LoadOptions {
    /// Options from the `[input]` section plus the mmap threshold.
    #[must_use]
    pub fn from_config(input: &InputConfig, mmap_threshold: u64) -> Self {
        Self {
            max_file_size: input.max_file_size,
            allowed_extensions: input
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            mmap_threshold,
        }
    }
}

/// The two validated texts of one comparison request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonInputs {
    /// Text extracted from the web page (document A)
    pub website: String,
    /// Text of the uploaded file (document B)
    pub file: String,
}

/// Load both sides of a comparison.
///
/// # Errors
///
/// Returns an [`InputError`] (inside `anyhow`) if both sides read stdin, if a
/// side cannot be loaded, or if either text is empty.
pub fn load_pair(
    website: &InputSource,
    file: &InputSource,
    options: &LoadOptions,
) -> Result<ComparisonInputs> {
    if *website == InputSource::Stdin && *file == InputSource::Stdin {
        return Err(InputError::InvalidInput(
            "only one side can be read from stdin".to_string(),
        )
        .into());
    }

    let website_text = load_text(website, options)?;
    let file_text = load_text(file, options)?;

    if website_text.trim().is_empty() || file_text.trim().is_empty() {
        return Err(InputError::InvalidInput(
            "Both texts are required for comparison".to_string(),
        )
        .into());
    }

    Ok(ComparisonInputs {
        website: website_text,
        file: file_text,
    })
}

/// Load one side's text.
///
/// # Errors
///
/// Returns an [`InputError`] if the file type is not allowed, the input is
/// too large, binary or not UTF-8, or cannot be read.
pub fn load_text(source: &InputSource, options: &LoadOptions) -> Result<String, InputError> {
    let span = span!(Level::DEBUG, "load_text", source = %source);
    let _guard = span.enter();

    match source {
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .take(options.max_file_size.saturating_add(1))
                .read_to_end(&mut bytes)
                .map_err(|e| InputError::Io(format!("<stdin>: {e}")))?;

            if bytes.len() as u64 > options.max_file_size {
                return Err(InputError::FileTooLarge {
                    path: "<stdin>".to_string(),
                    size: bytes.len() as u64,
                    limit: options.max_file_size,
                });
            }
            decode_text(&bytes, "<stdin>")
        }
        InputSource::Path(path) => load_file(path, options),
    }
}

/// Read and decode a text file after checking its extension and size.
fn load_file(path: &Path, options: &LoadOptions) -> Result<String, InputError> {
    let label = path.display().to_string();

    check_extension(path, &options.allowed_extensions)?;

    let metadata =
        std::fs::metadata(path).map_err(|e| InputError::Io(format!("{label}: {e}")))?;
    if !metadata.is_file() {
        return Err(InputError::InvalidInput(format!("{label} is not a file")));
    }

    let size = metadata.len();
    if size > options.max_file_size {
        return Err(InputError::FileTooLarge {
            path: label,
            size,
            limit: options.max_file_size,
        });
    }

    let file = File::open(path).map_err(|e| InputError::Io(format!("{label}: {e}")))?;

    if size > 0 && size >= options.mmap_threshold {
        debug!(size, "Memory-mapping input file");
        // SAFETY: the mapping is read-only and only borrowed while decoding.
        let mmap = unsafe { MmapOptions::new().map(&file) }
            .map_err(|e| InputError::Io(format!("{label}: {e}")))?;
        decode_text(&mmap, &label)
    } else {
        let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        let mut file = file;
        file.read_to_end(&mut bytes)
            .map_err(|e| InputError::Io(format!("{label}: {e}")))?;
        decode_text(&bytes, &label)
    }
}

/// Reject files whose extension is not in the allow list.
///
/// An empty allow list accepts every file.
fn check_extension(path: &Path, allowed: &[String]) -> Result<(), InputError> {
    if allowed.is_empty() {
        return Ok(());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match extension {
        Some(ext) if allowed.iter().any(|a| *a == ext) => Ok(()),
        _ => Err(InputError::UnsupportedFileType(format!(
            "{} (expected .{})",
            path.display(),
            allowed.join(", .")
        ))),
    }
}

/// Decode raw bytes as UTF-8 text, rejecting binary content.
///
/// A UTF-8 byte order mark is stripped.
///
/// # Errors
///
/// Returns [`InputError::UnsupportedFileType`] for binary or UTF-16/32
/// content and [`InputError::InvalidEncoding`] for invalid UTF-8.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String, InputError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let content_type = inspect(bytes);
    debug!(?content_type, bytes = bytes.len(), "Content inspected");

    let body = match content_type {
        ContentType::UTF_8 => bytes,
        ContentType::UTF_8_BOM => &bytes[3..],
        _ => {
            return Err(InputError::UnsupportedFileType(format!(
                "{label} does not contain UTF-8 text"
            )));
        }
    };

    let text = simdutf8::basic::from_utf8(body)
        .map_err(|_| InputError::InvalidEncoding(format!("{label} is not valid UTF-8")))?;

    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options() -> LoadOptions {
        LoadOptions {
            max_file_size: 1024,
            allowed_extensions: vec!["txt".to_string()],
            mmap_threshold: 1_048_576,
        }
    }

    #[test]
    fn test_from_arg() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("page.txt"),
            InputSource::Path(PathBuf::from("page.txt"))
        );
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(b"hello\nworld", "t").ok().as_deref(), Some("hello\nworld"));
        assert_eq!(decode_text(b"", "t").ok().as_deref(), Some(""));
        assert_eq!(
            decode_text(b"\xEF\xBB\xBFbom", "t").ok().as_deref(),
            Some("bom")
        );
    }

    #[test]
    fn test_decode_binary_rejected() {
        let err = decode_text(&[0xFF, 0x00, 0xAA, 0xBB], "blob").unwrap_err();
        assert_eq!(err.error_type(), "unsupported_file_type");
    }

    #[test]
    fn test_decode_invalid_utf8_rejected() {
        let err = decode_text(&[b'a', 0xC3, 0x28, b'b'], "bad").unwrap_err();
        assert_eq!(err.error_type(), "invalid_encoding");
    }

    #[test]
    fn test_load_file_checks_extension() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>hi</p>")?;

        let err = load_text(&InputSource::Path(path), &options()).unwrap_err();
        assert_eq!(err.error_type(), "unsupported_file_type");
        Ok(())
    }

    #[test]
    fn test_load_file_extension_case_insensitive() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("NOTES.TXT");
        std::fs::write(&path, "content")?;

        let text = load_text(&InputSource::Path(path), &options())?;
        assert_eq!(text, "content");
        Ok(())
    }

    #[test]
    fn test_load_file_too_large() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "x".repeat(2048))?;

        let err = load_text(&InputSource::Path(path), &options()).unwrap_err();
        assert_eq!(err.error_type(), "file_too_large");
        Ok(())
    }

    #[test]
    fn test_load_file_mmap_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mapped.txt");
        std::fs::write(&path, "mapped line\nsecond")?;

        let mut opts = options();
        opts.mmap_threshold = 1;
        let text = load_text(&InputSource::Path(path), &opts)?;
        assert_eq!(text, "mapped line\nsecond");
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_text(
            &InputSource::Path(PathBuf::from("/nonexistent/pagediff/input.txt")),
            &options(),
        )
        .unwrap_err();
        assert_eq!(err.error_type(), "io");
    }

    #[test]
    fn test_load_pair_rejects_empty_side() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let website = dir.path().join("website.txt");
        let file = dir.path().join("file.txt");
        std::fs::write(&website, "content")?;
        std::fs::write(&file, "")?;

        let err = load_pair(
            &InputSource::Path(website),
            &InputSource::Path(file),
            &options(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Both texts are required"));
        Ok(())
    }

    #[test]
    fn test_load_pair_rejects_double_stdin() {
        let err = load_pair(&InputSource::Stdin, &InputSource::Stdin, &options()).unwrap_err();
        let input_err = err.downcast_ref::<InputError>();
        assert!(matches!(input_err, Some(InputError::InvalidInput(_))));
    }
}
