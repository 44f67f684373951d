//! Extract a representative color palette from an image.
//!
//! ```rust,no_run
//! use colorpirate::PaletteExtractor;
//!
//! # async fn run() -> Result<(), colorpirate::PaletteError> {
//! let extractor = PaletteExtractor::new("https://example.com/image.jpg");
//! let palette = extractor.get_palette(Some(6), Some(20)).await?;
//! let dominant = extractor.get_color(None).await?;
//! println!("{:?} / {:?}", palette.to_hex(), dominant);
//! # Ok(())
//! # }
//! ```
//!
//! In the browser the host fetches the bytes and calls the `wasm-bindgen`
//! exports below, which run the same rasterize → sample → quantize steps.

use js_sys::Array;
use wasm_bindgen::prelude::*;

pub mod colors;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod quantize;
pub mod raster;
pub mod sampling;

#[cfg(not(target_arch = "wasm32"))]
pub mod extractor;
#[cfg(not(target_arch = "wasm32"))]
pub mod loader;
#[cfg(not(target_arch = "wasm32"))]
pub mod source;

pub use colors::Palette;
pub use config::ExtractorConfig;
pub use error::{
    LoadError, PaletteError, PipelineError, QuantizeError, RasterizeError, Stage,
};
pub use quantize::{ColorMap, KMeansQuantizer, Quantizer, Swatch};
pub use sampling::Pixel;

#[cfg(not(target_arch = "wasm32"))]
pub use extractor::PaletteExtractor;
#[cfg(not(target_arch = "wasm32"))]
pub use loader::{ImageLoader, SourceLoader};
#[cfg(not(target_arch = "wasm32"))]
pub use source::{ImageSource, SourceKind};

/// Decode `input` and extract up to `palette_size` colors, validating the
/// arguments first. Shared by the `wasm-bindgen` exports.
pub fn palette_from_bytes(
    input: &[u8],
    palette_size: usize,
    quality: usize,
) -> Result<Palette, PaletteError> {
    config::validate_palette_size(palette_size)?;
    config::validate_quality(quality)?;

    let img = image::load_from_memory(input)
        .map_err(|e| PaletteError::Generation(LoadError::from(e).into()))?;

    pipeline::palette_from_image(
        &img,
        palette_size,
        quality,
        config::DEFAULT_MAX_SURFACE_PIXELS,
        &KMeansQuantizer::new(),
    )
    .map_err(|err| {
        tracing::error!(stage = %err.stage(), error = %err, "could not create palette");
        PaletteError::Generation(err)
    })
}

/// Palette of an encoded image as `RRGGBB` strings, dominant color first.
#[wasm_bindgen(js_name = getPalette)]
pub fn get_palette(input: Vec<u8>, palette_size: usize, quality: usize) -> Result<Array, JsValue> {
    let palette = palette_from_bytes(&input, palette_size, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let palette_js = Array::new();
    for hex in palette.to_hex() {
        palette_js.push(&JsValue::from_str(&hex));
    }
    Ok(palette_js)
}

/// Dominant color of an encoded image as an `RRGGBB` string.
#[wasm_bindgen(js_name = getColor)]
pub fn get_color(input: Vec<u8>, quality: usize) -> Result<String, JsValue> {
    let palette = palette_from_bytes(&input, config::DEFAULT_DOMINANT_PALETTE_SIZE, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    palette
        .dominant()
        .map(colors::to_hex)
        .ok_or_else(|| JsValue::from_str("Could not create palette"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn encoded(img: RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_palette_from_bytes() {
        let png = encoded(RgbaImage::from_fn(8, 8, |x, _| {
            if x < 6 {
                Rgba([30, 60, 90, 255])
            } else {
                Rgba([200, 100, 0, 255])
            }
        }));

        let palette = palette_from_bytes(&png, 4, 1).unwrap();
        assert_eq!(palette.to_hex(), vec!["1E3C5A", "C86400"]);
    }

    #[test]
    fn test_palette_from_bytes_validates_before_decoding() {
        let err = palette_from_bytes(b"garbage", 1, 10).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = palette_from_bytes(b"garbage", 2, 10).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Load));
    }
}
