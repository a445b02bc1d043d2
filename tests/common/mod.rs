//! Shared fixtures: fake classifiers and in-memory images.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use prasat::{ImageClassifier, InputTensor, PrasatError, ProbabilityVector, Result};

/// Always returns the same probabilities.
pub struct FixedClassifier(pub Vec<f32>);

impl ImageClassifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn infer(&self, _tensor: &InputTensor) -> Result<ProbabilityVector> {
        Ok(ProbabilityVector::new(self.0.clone()))
    }
}

/// Puts all mass on the class picked by the mean red value of the input,
/// so differently coloured images land on different labels.
pub struct RednessClassifier {
    pub classes: usize,
}

impl ImageClassifier for RednessClassifier {
    fn name(&self) -> &str {
        "redness"
    }

    fn infer(&self, tensor: &InputTensor) -> Result<ProbabilityVector> {
        let reds: Vec<f32> = tensor.as_slice().iter().step_by(3).copied().collect();
        let mean = reds.iter().sum::<f32>() / reds.len() as f32;
        let index = ((mean * self.classes as f32) as usize).min(self.classes - 1);
        let mut probs = vec![0.0; self.classes];
        probs[index] = 1.0;
        Ok(ProbabilityVector::new(probs))
    }
}

/// Fails every call after construction.
pub struct BrokenClassifier;

impl ImageClassifier for BrokenClassifier {
    fn name(&self) -> &str {
        "broken"
    }

    fn infer(&self, _tensor: &InputTensor) -> Result<ProbabilityVector> {
        Err(PrasatError::Inference("runtime exploded".to_string()))
    }
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).expect("encode test image");
    buf.into_inner()
}

pub fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(&solid(width, height, color), ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(&solid(width, height, color), ImageFormat::Jpeg)
}
