//! Sources of intensity samples.
//!
//! A trait-based abstraction over where samples come from, so decoded
//! image files and synthetic generators can be swapped freely.

use super::luma::luma_from_image;
use crate::analysis::Sample;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while acquiring a sample.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("image is {width}x{height}, exceeding the {max_pixels} pixel limit")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },
    #[error("invalid source configuration: {0}")]
    InvalidConfig(String),
}

/// Trait for sample sources.
pub trait SampleSource {
    /// Produces one intensity sample.
    fn acquire(&mut self) -> Result<Sample, SourceError>;

    /// Human-readable label used in reports and logs.
    fn describe(&self) -> String;
}

/// Reads a sample from an image file.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
    max_pixels: Option<u64>,
}

impl ImageFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_pixels: None,
        }
    }

    /// Rejects images with more than `max_pixels` pixels before decoding.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = Some(max_pixels);
        self
    }

    /// Returns the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode_error(&self, e: image::ImageError) -> SourceError {
        SourceError::Decode {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

impl SampleSource for ImageFileSource {
    fn acquire(&mut self) -> Result<Sample, SourceError> {
        if let Some(max_pixels) = self.max_pixels {
            let (width, height) =
                image::image_dimensions(&self.path).map_err(|e| self.decode_error(e))?;
            if u64::from(width) * u64::from(height) > max_pixels {
                return Err(SourceError::TooLarge {
                    width,
                    height,
                    max_pixels,
                });
            }
        }

        let decoded = image::open(&self.path).map_err(|e| self.decode_error(e))?;
        let sample = Sample::new(luma_from_image(&decoded));

        tracing::info!(
            path = %self.path.display(),
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Decoded image sample"
        );

        Ok(sample)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Deterministic pseudo-random sample generator for demos and tests.
///
/// Values cluster around `center` within `spread` levels, shaped by
/// summing four uniform draws. Successive acquisitions continue the
/// same seeded stream.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: ChaCha8Rng,
    seed: u64,
    size: usize,
    center: u8,
    spread: u8,
    drawn: u64,
}

impl SyntheticSource {
    pub fn new(seed: u64, size: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            size,
            center: 128,
            spread: 64,
            drawn: 0,
        }
    }

    /// Sets where values cluster and how far they may stray.
    pub fn with_shape(mut self, center: u8, spread: u8) -> Self {
        self.center = center;
        self.spread = spread;
        self
    }

    /// Number of samples produced so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    fn draw(&mut self) -> u8 {
        let width = 2 * i64::from(self.spread) + 1;
        let offset: i64 = (0..4)
            .map(|_| i64::from(self.rng.next_u32()) % width - i64::from(self.spread))
            .sum::<i64>()
            / 4;
        (i64::from(self.center) + offset).clamp(0, 255) as u8
    }
}

impl SampleSource for SyntheticSource {
    fn acquire(&mut self) -> Result<Sample, SourceError> {
        if self.size == 0 {
            return Err(SourceError::InvalidConfig(
                "synthetic sample size must be non-zero".into(),
            ));
        }

        let sample: Sample = (0..self.size).map(|_| self.draw()).collect();
        self.drawn += 1;

        tracing::debug!(
            seed = self.seed,
            size = self.size,
            center = self.center,
            "Generated synthetic sample"
        );

        Ok(sample)
    }

    fn describe(&self) -> String {
        format!(
            "synthetic(seed={}, center={}, spread={})",
            self.seed, self.center, self.spread
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_synthetic_deterministic() {
        let a = SyntheticSource::new(7, 500).acquire().unwrap();
        let b = SyntheticSource::new(7, 500).acquire().unwrap();
        let c = SyntheticSource::new(8, 500).acquire().unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 500);
    }

    #[test]
    fn test_synthetic_stays_in_shape() {
        let mut source = SyntheticSource::new(1, 2000).with_shape(40, 10);
        let sample = source.acquire().unwrap();

        assert!(sample.values().iter().all(|&v| (30..=50).contains(&v)));
        assert_eq!(source.drawn(), 1);
    }

    #[test]
    fn test_synthetic_zero_size_rejected() {
        let mut source = SyntheticSource::new(1, 0);
        assert!(matches!(
            source.acquire(),
            Err(SourceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_image_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("ks_source_{}.png", std::process::id()));
        GrayImage::from_fn(4, 4, |x, y| Luma([(x * 4 + y) as u8]))
            .save(&path)
            .unwrap();

        let mut source = ImageFileSource::new(&path);
        let sample = source.acquire().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(sample.len(), 16);
        assert_eq!(sample.values()[1], 4);
    }

    #[test]
    fn test_image_too_large() {
        let path = std::env::temp_dir().join(format!("ks_large_{}.png", std::process::id()));
        GrayImage::new(10, 10).save(&path).unwrap();

        let mut source = ImageFileSource::new(&path).with_max_pixels(99);
        let result = source.acquire();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(SourceError::TooLarge {
                width: 10,
                height: 10,
                max_pixels: 99
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut source = ImageFileSource::new("/nonexistent/ks/image.png");
        assert!(matches!(source.acquire(), Err(SourceError::Decode { .. })));
    }
}
