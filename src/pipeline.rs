use image::DynamicImage;

use crate::colors::Palette;
use crate::error::{PipelineError, QuantizeError};
use crate::quantize::Quantizer;
use crate::raster::rasterize;
use crate::sampling::sample_pixels;

/// Synchronous half of an extraction: rasterize, sample, quantize.
///
/// Arguments are assumed validated. The returned palette is never empty and
/// never longer than `palette_size`.
pub fn palette_from_image<Q>(
    img: &DynamicImage,
    palette_size: usize,
    quality: usize,
    max_surface_pixels: u64,
    quantizer: &Q,
) -> Result<Palette, PipelineError>
where
    Q: Quantizer + ?Sized,
{
    let raster = rasterize(img, max_surface_pixels)?;
    let pixels = sample_pixels(raster.data(), raster.pixel_count(), quality);
    tracing::debug!(
        sampled = pixels.len(),
        pixel_count = raster.pixel_count(),
        quality,
        "sampled pixels"
    );

    let mut colors = quantizer.quantize(&pixels, palette_size)?.palette();
    if colors.is_empty() {
        return Err(QuantizeError::EmptyPalette.into());
    }
    colors.truncate(palette_size);

    Ok(Palette::new(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RasterizeError, Stage};
    use crate::quantize::{ColorMap, KMeansQuantizer, Swatch};
    use crate::sampling::Pixel;
    use image::{Rgba, RgbaImage};
    use palette::Srgb;

    /// Echoes every sampled pixel back as its own swatch.
    struct EchoQuantizer;

    impl Quantizer for EchoQuantizer {
        fn quantize(&self, pixels: &[Pixel], _: usize) -> Result<ColorMap, QuantizeError> {
            Ok(ColorMap::from_swatches(pixels.iter().map(|&[r, g, b, _]| {
                Swatch {
                    color: Srgb::new(r, g, b),
                    population: 1,
                }
            })))
        }
    }

    #[test]
    fn test_truncates_oversized_quantizer_output() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 1, |x, _| {
            Rgba([x as u8 * 40, 0, 0, 255])
        }));
        let palette = palette_from_image(&img, 2, 1, u64::MAX, &EchoQuantizer).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_fully_transparent_image_fails_in_quantize() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 0])));
        let err = palette_from_image(&img, 3, 1, u64::MAX, &KMeansQuantizer::new()).unwrap_err();
        assert_eq!(err.stage(), Stage::Quantize);
        assert!(matches!(err, PipelineError::Quantize(QuantizeError::EmptyInput)));
    }

    #[test]
    fn test_empty_image_fails_in_rasterize() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let err = palette_from_image(&img, 3, 1, u64::MAX, &KMeansQuantizer::new()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Rasterize(RasterizeError::EmptySurface { .. })
        ));
    }
}
