use image::DynamicImage;

use crate::error::RasterizeError;

/// An RGBA8 drawing surface: row-major, top-left origin, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Draw `img` at its natural size and read the pixels back.
pub fn rasterize(img: &DynamicImage, max_pixels: u64) -> Result<Raster, RasterizeError> {
    let (width, height) = (img.width(), img.height());

    if width == 0 || height == 0 {
        return Err(RasterizeError::EmptySurface { width, height });
    }
    if u64::from(width) * u64::from(height) > max_pixels {
        return Err(RasterizeError::SurfaceTooLarge {
            width,
            height,
            max: max_pixels,
        });
    }

    let data = img.to_rgba8().into_raw();
    tracing::debug!(width, height, "rasterized image");

    Ok(Raster {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, RgbaImage};

    #[test]
    fn test_rasterize_adds_opaque_alpha() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])));
        let raster = rasterize(&img, u64::MAX).unwrap();

        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.pixel_count(), 6);
        assert_eq!(raster.data().len(), 24);
        assert_eq!(&raster.data()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_rasterize_rejects_empty_surface() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 5));
        assert!(matches!(
            rasterize(&img, u64::MAX),
            Err(RasterizeError::EmptySurface { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_rasterize_rejects_oversized_surface() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(10, 10));
        assert!(matches!(
            rasterize(&img, 99),
            Err(RasterizeError::SurfaceTooLarge { max: 99, .. })
        ));
        assert!(rasterize(&img, 100).is_ok());
    }
}
