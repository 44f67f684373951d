//! Error types for palette extraction.
//!
//! Callers that only care whether a palette could be produced match on
//! [`PaletteError`]. The stage that actually failed stays reachable through
//! [`std::error::Error::source`] or [`PaletteError::stage`].

use thiserror::Error;

/// Top-level error returned by [`crate::PaletteExtractor`].
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Rejected before any image I/O was attempted.
    #[error("invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Something in the load → rasterize → sample → quantize pipeline failed.
    #[error("could not create palette")]
    Generation(#[source] PipelineError),
}

impl PaletteError {
    pub(crate) fn invalid(name: &'static str, value: usize, reason: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value,
            reason,
        }
    }

    /// Pipeline stage that produced the failure, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PaletteError::InvalidArgument { .. } => None,
            PaletteError::Generation(e) => Some(e.stage()),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PaletteError::InvalidArgument { .. })
    }
}

/// Stages of a single extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Rasterize,
    Quantize,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Rasterize => "rasterize",
            Stage::Quantize => "quantize",
        };
        f.write_str(name)
    }
}

/// Stage-tagged cause carried inside [`PaletteError::Generation`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("image load failed: {0}")]
    Load(#[from] LoadError),

    #[error("rasterization failed: {0}")]
    Rasterize(#[from] RasterizeError),

    #[error("quantization failed: {0}")]
    Quantize(#[from] QuantizeError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Load(_) => Stage::Load,
            PipelineError::Rasterize(_) => Stage::Rasterize,
            PipelineError::Quantize(_) => Stage::Quantize,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(not(target_arch = "wasm32"))]
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("file URL does not name a local path: {0}")]
    InvalidFileUrl(String),

    #[error("malformed data URI: {0}")]
    InvalidDataUri(String),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image load timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("drawing surface would be empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("drawing surface too large: {width}x{height} (max {max} pixels)")]
    SurfaceTooLarge { width: u32, height: u32, max: u64 },
}

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("no pixels left to quantize")]
    EmptyInput,

    #[error("cannot quantize to {requested} colors (max {max})")]
    TooManyColors { requested: usize, max: usize },

    #[error("quantizer produced an empty palette")]
    EmptyPalette,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_generation_keeps_cause() {
        let err = PaletteError::Generation(PipelineError::from(QuantizeError::EmptyInput));

        assert_eq!(err.to_string(), "could not create palette");
        assert_eq!(err.stage(), Some(Stage::Quantize));

        let cause = err.source().expect("generation error has a source");
        assert_eq!(cause.to_string(), "quantization failed: no pixels left to quantize");
    }

    #[test]
    fn test_invalid_argument_has_no_stage() {
        let err = PaletteError::invalid("palette_size", 1, "must be greater than 1");
        assert!(err.is_invalid_argument());
        assert_eq!(err.stage(), None);
        assert_eq!(
            err.to_string(),
            "invalid argument: palette_size = 1 (must be greater than 1)"
        );
    }
}
