//! Stride sampling of a raster's pixels.
//!
//! Every `quality`-th pixel is visited, walking forward from index 0, so the
//! visited set is exactly `0, q, 2q, ...` below the pixel count. Visited
//! pixels are kept when they are mostly opaque and not near-white.

/// RGBA pixel as read from the raster.
pub type Pixel = [u8; 4];

/// Pixels with alpha below this are treated as transparent background.
pub const MIN_OPAQUE_ALPHA: u8 = 125;
/// Pixels with every color channel above this are treated as white background.
pub const NEAR_WHITE: u8 = 250;

/// Indices visited for a buffer of `pixel_count` pixels. A stride of 0 is
/// treated as 1.
pub fn sample_indices(pixel_count: usize, quality: usize) -> impl Iterator<Item = usize> {
    (0..pixel_count).step_by(quality.max(1))
}

/// Collect the pixels worth quantizing, preserving encounter order.
///
/// `data` holds RGBA bytes; `pixel_count` is taken from the surface size and
/// may describe more pixels than `data` actually holds. A pixel whose alpha
/// byte is missing counts as opaque, a pixel missing a color byte is skipped.
pub fn sample_pixels(data: &[u8], pixel_count: usize, quality: usize) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity(pixel_count / quality.max(1) + 1);

    for i in sample_indices(pixel_count, quality) {
        let start = i * 4;
        let end = (start + 4).min(data.len());
        let Some(chunk) = data.get(start..end) else {
            continue;
        };
        if chunk.len() < 3 {
            continue;
        }

        let alpha = chunk.get(3).copied().unwrap_or(u8::MAX);
        let pixel = [chunk[0], chunk[1], chunk[2], alpha];

        if is_candidate(pixel) {
            pixels.push(pixel);
        }
    }

    pixels
}

/// Mostly opaque and not near-white.
pub fn is_candidate([r, g, b, a]: Pixel) -> bool {
    a >= MIN_OPAQUE_ALPHA && !(r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filters_transparent_and_white() {
        let data = [
            0, 0, 0, 0, // transparent
            255, 255, 255, 255, // white
            10, 20, 30, 255,
        ];
        assert_eq!(sample_pixels(&data, 3, 1), vec![[10, 20, 30, 255]]);
    }

    #[test]
    fn test_alpha_threshold_is_inclusive() {
        let data = [1, 1, 1, 124, 2, 2, 2, 125];
        assert_eq!(sample_pixels(&data, 2, 1), vec![[2, 2, 2, 125]]);
    }

    #[test]
    fn test_white_needs_all_channels_above_threshold() {
        let data = [251, 251, 250, 255, 251, 251, 251, 255, 250, 255, 255, 255];
        assert_eq!(
            sample_pixels(&data, 3, 1),
            vec![[251, 251, 250, 255], [250, 255, 255, 255]]
        );
    }

    #[test]
    fn test_stride_visits_every_tenth_pixel() {
        let visited: Vec<usize> = sample_indices(100, 10).collect();
        assert_eq!(visited, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);

        // Encode the index into the red channel to see which pixels survive.
        let data: Vec<u8> = (0..100u8).flat_map(|i| [i, 0, 0, 255]).collect();
        let reds: Vec<u8> = sample_pixels(&data, 100, 10).iter().map(|p| p[0]).collect();
        assert_eq!(reds, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[test]
    fn test_stride_larger_than_buffer() {
        let data = [5, 6, 7, 255, 8, 9, 10, 255];
        assert_eq!(sample_pixels(&data, 2, 50), vec![[5, 6, 7, 255]]);
        assert!(sample_pixels(&[], 0, 50).is_empty());
    }

    #[test]
    fn test_short_buffer() {
        // Second pixel lost its alpha byte, third pixel is missing entirely.
        let data = [1, 2, 3, 255, 4, 5, 6];
        assert_eq!(
            sample_pixels(&data, 3, 1),
            vec![[1, 2, 3, 255], [4, 5, 6, 255]]
        );
    }

    #[test]
    fn test_zero_stride_behaves_like_one() {
        assert_eq!(sample_indices(3, 0).count(), 3);
    }
}
