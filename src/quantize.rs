//! Color quantization: reduce sampled pixels to a few representative colors.

use std::collections::HashMap;

use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};

use crate::error::QuantizeError;
use crate::sampling::Pixel;

/// Cluster indices are stored as `u8`.
pub const MAX_COLORS: usize = 256;

/// A representative color and the number of sampled pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub color: Srgb<u8>,
    pub population: usize,
}

/// Quantizer output, ranked by population (largest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    swatches: Vec<Swatch>,
}

impl ColorMap {
    /// Build a map from unordered swatches. Swatches with the same color are
    /// merged and empty ones dropped; equal populations keep their order.
    pub fn from_swatches(swatches: impl IntoIterator<Item = Swatch>) -> Self {
        let mut merged: Vec<Swatch> = Vec::new();
        let mut slots: HashMap<[u8; 3], usize> = HashMap::new();

        for swatch in swatches {
            if swatch.population == 0 {
                continue;
            }
            let key = [swatch.color.red, swatch.color.green, swatch.color.blue];
            match slots.get(&key) {
                Some(&slot) => merged[slot].population += swatch.population,
                None => {
                    slots.insert(key, merged.len());
                    merged.push(swatch);
                }
            }
        }

        merged.sort_by(|a, b| b.population.cmp(&a.population));
        Self { swatches: merged }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Representative colors, most dominant first.
    pub fn palette(&self) -> Vec<Srgb<u8>> {
        self.swatches.iter().map(|s| s.color).collect()
    }
}

/// Reduces a pixel buffer to at most `max_colors` representative colors.
pub trait Quantizer: Send + Sync {
    fn quantize(&self, pixels: &[Pixel], max_colors: usize) -> Result<ColorMap, QuantizeError>;
}

/// k-means clustering in CIE Lab, seeded for repeatable output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansQuantizer {
    pub max_iterations: usize,
    pub convergence: f32,
    pub seed: u64,
}

impl Default for KMeansQuantizer {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            convergence: 1e-4,
            seed: 0,
        }
    }
}

impl KMeansQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Quantizer for KMeansQuantizer {
    fn quantize(&self, pixels: &[Pixel], max_colors: usize) -> Result<ColorMap, QuantizeError> {
        if pixels.is_empty() {
            return Err(QuantizeError::EmptyInput);
        }
        if max_colors > MAX_COLORS {
            return Err(QuantizeError::TooManyColors {
                requested: max_colors,
                max: MAX_COLORS,
            });
        }

        // Few enough distinct colors: the exact histogram is the answer.
        let exact = ColorMap::from_swatches(pixels.iter().map(|&[r, g, b, _]| Swatch {
            color: Srgb::new(r, g, b),
            population: 1,
        }));
        if exact.swatches().len() <= max_colors {
            return Ok(exact);
        }

        let lab_pixels: Vec<Lab> = pixels
            .iter()
            .map(|&[r, g, b, _]| {
                let srgb = Srgb::<u8>::new(r, g, b);
                srgb.into_linear().into_color()
            })
            .collect();

        let kmeans = get_kmeans(
            max_colors,
            self.max_iterations,
            self.convergence,
            false,
            &lab_pixels,
            self.seed,
        );

        let mut populations = vec![0usize; kmeans.centroids.len()];
        for &idx in &kmeans.indices {
            if let Some(count) = populations.get_mut(idx as usize) {
                *count += 1;
            }
        }

        let swatches = kmeans
            .centroids
            .iter()
            .zip(populations)
            .map(|(&lab, population)| {
                let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
                Swatch {
                    color: rgb_f32.into_format::<u8>(),
                    population,
                }
            });

        let map = ColorMap::from_swatches(swatches);
        tracing::debug!(
            requested = max_colors,
            produced = map.swatches().len(),
            score = kmeans.score,
            "k-means finished"
        );
        Ok(map)
    }
}
