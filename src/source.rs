use std::fmt;
use std::path::PathBuf;

use reqwest::Url;

/// Where the image comes from. The original string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    raw: String,
}

/// How a source string is resolved by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// `http://` or `https://` URL.
    Remote(String),
    /// Inline `data:` URI.
    Inline(String),
    /// Local path, from `file://` or a bare path.
    File(PathBuf),
    /// A `file://` URL that names no local path.
    InvalidFileUrl(String),
}

impl ImageSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> SourceKind {
        let trimmed = self.raw.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceKind::Remote(trimmed.to_string())
        } else if lower.starts_with("data:") {
            SourceKind::Inline(trimmed.to_string())
        } else if lower.starts_with("file://") {
            match Url::parse(trimmed).ok().and_then(|url| url.to_file_path().ok()) {
                Some(path) => SourceKind::File(path),
                None => SourceKind::InvalidFileUrl(trimmed.to_string()),
            }
        } else {
            SourceKind::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            // Data URIs can be megabytes long; only show the header.
            SourceKind::Inline(uri) => {
                let header = uri.split(',').next().unwrap_or("data:");
                write!(f, "{header},...")
            }
            _ => f.write_str(&self.raw),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ImageSource {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::new(path.to_string_lossy().into_owned())
    }
}

impl From<&std::path::Path> for ImageSource {
    fn from(path: &std::path::Path) -> Self {
        Self::new(path.to_string_lossy().into_owned())
    }
}
