use std::time::Duration;

use crate::error::PaletteError;

pub const DEFAULT_PALETTE_SIZE: usize = 6;
pub const DEFAULT_QUALITY: usize = 20;
/// Palette size used when only the dominant color is requested.
pub const DEFAULT_DOMINANT_PALETTE_SIZE: usize = 3;
/// Largest drawing surface accepted, matching common browser canvas caps.
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// Settings shared by every extraction call of a [`crate::PaletteExtractor`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Number of colors requested when the caller passes none.
    pub palette_size: usize,
    /// Sampling stride: every `quality`-th pixel is visited.
    pub quality: usize,
    pub dominant_palette_size: usize,
    pub max_surface_pixels: u64,
    /// `None` waits for the image load indefinitely.
    pub load_timeout: Option<Duration>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            quality: DEFAULT_QUALITY,
            dominant_palette_size: DEFAULT_DOMINANT_PALETTE_SIZE,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
            load_timeout: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub fn with_quality(mut self, quality: usize) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_dominant_palette_size(mut self, size: usize) -> Self {
        self.dominant_palette_size = size;
        self
    }

    pub fn with_max_surface_pixels(mut self, max: u64) -> Self {
        self.max_surface_pixels = max;
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Check the defaults held by this config.
    pub fn validate(&self) -> Result<(), PaletteError> {
        validate_palette_size(self.palette_size)?;
        validate_palette_size(self.dominant_palette_size)?;
        validate_quality(self.quality)
    }
}

pub(crate) fn validate_palette_size(palette_size: usize) -> Result<(), PaletteError> {
    if palette_size <= 1 {
        return Err(PaletteError::invalid(
            "palette_size",
            palette_size,
            "palette size must be greater than 1",
        ));
    }
    Ok(())
}

pub(crate) fn validate_quality(quality: usize) -> Result<(), PaletteError> {
    if quality == 0 {
        return Err(PaletteError::invalid(
            "quality",
            quality,
            "sampling stride must be at least 1",
        ));
    }
    Ok(())
}
