//! The palette extractor: one image source, any number of extraction calls.
//!
//! Each call runs the whole pipeline from scratch:
//!
//! 1. validate arguments (no I/O happens when they are rejected),
//! 2. load and decode the image (the only `.await`),
//! 3. rasterize it at its natural size,
//! 4. sample every `quality`-th pixel, dropping transparent and near-white ones,
//! 5. hand the samples to the [`Quantizer`].
//!
//! Failures after step 1 are logged and returned as
//! [`PaletteError::Generation`], with the stage-specific cause as its source.

use image::DynamicImage;
use palette::Srgb;

use crate::colors::Palette;
use crate::config::{ExtractorConfig, validate_palette_size, validate_quality};
use crate::error::{LoadError, PaletteError, PipelineError, QuantizeError};
use crate::loader::{ImageLoader, SourceLoader};
use crate::pipeline::palette_from_image;
use crate::quantize::{KMeansQuantizer, Quantizer};
use crate::source::ImageSource;

pub struct PaletteExtractor<L = SourceLoader, Q = KMeansQuantizer> {
    source: ImageSource,
    config: ExtractorConfig,
    loader: L,
    quantizer: Q,
}

impl PaletteExtractor {
    pub fn new(source: impl Into<ImageSource>) -> Self {
        Self::with_config(source, ExtractorConfig::default())
    }

    /// Extractor whose calls default to `palette_size` colors.
    pub fn with_palette_size(source: impl Into<ImageSource>, palette_size: usize) -> Self {
        Self::with_config(
            source,
            ExtractorConfig::default().with_palette_size(palette_size),
        )
    }

    pub fn with_config(source: impl Into<ImageSource>, config: ExtractorConfig) -> Self {
        Self::with_parts(source, config, SourceLoader::new(), KMeansQuantizer::new())
    }
}

impl<L, Q> PaletteExtractor<L, Q>
where
    L: ImageLoader,
    Q: Quantizer,
{
    pub fn with_parts(
        source: impl Into<ImageSource>,
        config: ExtractorConfig,
        loader: L,
        quantizer: Q,
    ) -> Self {
        Self {
            source: source.into(),
            config,
            loader,
            quantizer,
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract up to `palette_size` colors, most dominant first.
    ///
    /// `None` arguments fall back to the extractor's config (6 colors, stride
    /// 20 by default). `palette_size` must be greater than 1 and `quality`
    /// at least 1.
    pub async fn get_palette(
        &self,
        palette_size: Option<usize>,
        quality: Option<usize>,
    ) -> Result<Palette, PaletteError> {
        let palette_size = palette_size.unwrap_or(self.config.palette_size);
        let quality = quality.unwrap_or(self.config.quality);
        validate_palette_size(palette_size)?;
        validate_quality(quality)?;

        tracing::debug!(source = %self.source, palette_size, quality, "extracting palette");

        match self.run(palette_size, quality).await {
            Ok(palette) => {
                tracing::debug!(source = %self.source, colors = palette.len(), "palette ready");
                Ok(palette)
            }
            Err(err) => Err(self.generation_failed(err)),
        }
    }

    /// The first color of a small palette (`dominant_palette_size`, 3 by
    /// default) extracted with the same `quality`.
    pub async fn get_color(&self, quality: Option<usize>) -> Result<Srgb<u8>, PaletteError> {
        let palette = self
            .get_palette(Some(self.config.dominant_palette_size), quality)
            .await?;

        match palette.dominant() {
            Some(color) => Ok(color),
            None => Err(self.generation_failed(QuantizeError::EmptyPalette.into())),
        }
    }

    async fn run(&self, palette_size: usize, quality: usize) -> Result<Palette, PipelineError> {
        let img = self.load().await?;
        palette_from_image(
            &img,
            palette_size,
            quality,
            self.config.max_surface_pixels,
            &self.quantizer,
        )
    }

    async fn load(&self) -> Result<DynamicImage, LoadError> {
        let load = self.loader.load(&self.source);
        match self.config.load_timeout {
            Some(limit) => tokio::time::timeout(limit, load)
                .await
                .map_err(|_| LoadError::TimedOut(limit))?,
            None => load.await,
        }
    }

    fn generation_failed(&self, err: PipelineError) -> PaletteError {
        tracing::error!(
            source = %self.source,
            stage = %err.stage(),
            error = %err,
            "could not create palette"
        );
        PaletteError::Generation(err)
    }
}
