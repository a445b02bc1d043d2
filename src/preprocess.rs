//! Image decoding and conversion to the classifier's input tensor.
//!
//! The default pipeline matches how the model was trained: fit the image to
//! 150×150 by center-cropping to a square and scaling (Lanczos3), convert
//! to RGB, scale channels from `[0, 255]` to `[0, 1]` and add a batch dimension.

use image::error::{ImageFormatHint, UnsupportedErrorKind};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, RgbImage};
use serde::Deserialize;

use crate::error::{PrasatError, Result};
use crate::types::InputTensor;

/// Default model input edge length in pixels.
pub const DEFAULT_INPUT_SIZE: u32 = 150;

/// How a non-square image is fitted to the square model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitPolicy {
    /// Cut the centered window with the target aspect ratio, then scale it.
    #[default]
    Crop,
    /// Scale to fit inside the target and pad the rest with black.
    Letterbox,
    /// Scale each axis independently, ignoring aspect ratio.
    Stretch,
}

/// Resampling filter used when scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Preprocessing configuration (`[preprocess]` in the config file).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreprocessConfig {
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default)]
    pub fit: FitPolicy,
    #[serde(default)]
    pub filter: ResizeFilter,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            fit: FitPolicy::default(),
            filter: ResizeFilter::default(),
        }
    }
}

fn default_size() -> u32 {
    DEFAULT_INPUT_SIZE
}

/// Turns uploaded image bytes into an [`InputTensor`].
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(PrasatError::Configuration(format!(
                "preprocess target must be non-empty, got {}x{}",
                config.width, config.height
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Shape of every tensor this preprocessor produces: `[1, h, w, 3]`.
    pub fn output_shape(&self) -> [usize; 4] {
        [1, self.config.height as usize, self.config.width as usize, 3]
    }

    /// Decode `bytes` and convert the image to a model input tensor.
    pub fn prepare(&self, bytes: &[u8]) -> Result<InputTensor> {
        let image = decode(bytes)?;
        self.prepare_image(&image)
    }

    /// Convert an already decoded image to a model input tensor.
    pub fn prepare_image(&self, image: &DynamicImage) -> Result<InputTensor> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PrasatError::Decode("image has no pixels".to_string()));
        }
        let rgb = self.fit(image);
        let data = rgb.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
        InputTensor::new(self.output_shape(), data)
    }

    /// Resize to exactly the configured target, converted to RGB8.
    pub fn fit(&self, image: &DynamicImage) -> RgbImage {
        let PreprocessConfig {
            width,
            height,
            fit,
            filter,
        } = self.config;
        let filter = FilterType::from(filter);

        match fit {
            FitPolicy::Crop => {
                // Crop before scaling so the intermediate never exceeds the source.
                let (x, y, w, h) = crop_window(image.width(), image.height(), width, height);
                image
                    .crop_imm(x, y, w, h)
                    .resize_exact(width, height, filter)
                    .to_rgb8()
            }
            FitPolicy::Stretch => image.resize_exact(width, height, filter).to_rgb8(),
            FitPolicy::Letterbox => {
                let scaled = image.resize(width, height, filter).to_rgb8();
                let mut canvas = RgbImage::new(width, height);
                let x = (width - scaled.width()) / 2;
                let y = (height - scaled.height()) / 2;
                imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));
                canvas
            }
        }
    }
}

/// Largest centered `(x, y, w, h)` window of a `src_w`×`src_h` image with
/// the aspect ratio of `dst_w`×`dst_h`. Never empty.
pub fn crop_window(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    let (sw, sh, dw, dh) = (
        u64::from(src_w),
        u64::from(src_h),
        u64::from(dst_w),
        u64::from(dst_h),
    );
    let (w, h) = if sw * dh > sh * dw {
        // Wider than the target: keep full height.
        (((sh * dw + dh / 2) / dh).clamp(1, sw), sh)
    } else {
        (sw, ((sw * dh + dw / 2) / dw).clamp(1, sh))
    };
    // w <= src_w and h <= src_h, so the narrowing is lossless.
    let (w, h) = (w as u32, h as u32);
    ((src_w - w) / 2, (src_h - h) / 2, w, h)
}

/// Decode image bytes of any supported raster format.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(PrasatError::Decode("empty input".to_string()));
    }
    image::load_from_memory(bytes).map_err(map_image_error)
}

/// Unrecognizable bytes are a decode failure; a recognized format we cannot
/// turn into pixels is an unsupported format.
fn map_image_error(err: ImageError) -> PrasatError {
    match &err {
        ImageError::Unsupported(unsupported) => match unsupported.kind() {
            UnsupportedErrorKind::Format(ImageFormatHint::Unknown) => {
                PrasatError::Decode(err.to_string())
            }
            _ => PrasatError::UnsupportedFormat(err.to_string()),
        },
        _ => PrasatError::Decode(err.to_string()),
    }
}
