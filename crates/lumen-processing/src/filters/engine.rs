//! Filter application on decoded images.

use super::{FilterError, FilterKind, FilterParams};
use image::{imageops, DynamicImage, Rgb, RgbImage};

/// Applies a named filter to a decoded image.
///
/// Every filter first normalizes the input to 3-channel RGB, so output
/// channel layout is consistent regardless of the uploaded mode.
pub struct FilterEngine;

impl FilterEngine {
    pub fn apply(
        img: &DynamicImage,
        kind: FilterKind,
        params: &FilterParams,
    ) -> Result<DynamicImage, FilterError> {
        let rgb = img.to_rgb8();

        let out = match (kind, params) {
            (FilterKind::Invert, FilterParams::NoParams) => Self::invert(rgb),
            (FilterKind::Grayscale, FilterParams::NoParams) => Self::grayscale(rgb),
            (FilterKind::Contrast, FilterParams::Contrast { factor }) => {
                Self::contrast(rgb, *factor)
            }
            (FilterKind::Blur, FilterParams::Blur { radius }) => Self::blur(rgb, *radius),
            (FilterKind::Sharpen, FilterParams::Sharpen { factor }) => {
                Self::sharpen(rgb, *factor)
            }
            _ => {
                return Err(FilterError::Failed {
                    filter: kind.name(),
                    message: format!("parameter variant {:?} does not match filter", params),
                })
            }
        };

        Ok(DynamicImage::ImageRgb8(out))
    }

    /// Per-channel negation: v -> 255 - v.
    fn invert(mut rgb: RgbImage) -> RgbImage {
        imageops::invert(&mut rgb);
        rgb
    }

    /// Luminance conversion, re-expanded to RGB for output consistency.
    fn grayscale(rgb: RgbImage) -> RgbImage {
        let luma = DynamicImage::ImageRgb8(rgb).to_luma8();
        DynamicImage::ImageLuma8(luma).to_rgb8()
    }

    /// Blend each channel against the image's mean luminance.
    ///
    /// factor 0.0 collapses to a flat gray image, 1.0 is the identity,
    /// above 1.0 exaggerates the distance from the mean.
    fn contrast(rgb: RgbImage, factor: f32) -> RgbImage {
        let luma = DynamicImage::ImageRgb8(rgb.clone()).to_luma8();
        let sum: u64 = luma.pixels().map(|p| p.0[0] as u64).sum();
        let count = (luma.width() as u64 * luma.height() as u64).max(1);
        let mean = (sum as f32 / count as f32).round();

        let (width, height) = rgb.dimensions();
        let mut out = RgbImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(rgb.pixels()) {
            *dst = Rgb([
                blend_channel(src.0[0], mean, factor),
                blend_channel(src.0[1], mean, factor),
                blend_channel(src.0[2], mean, factor),
            ]);
        }
        out
    }

    /// Gaussian blur with sigma equal to the radius. Radius 0 is a no-op.
    fn blur(rgb: RgbImage, radius: f32) -> RgbImage {
        if radius <= 0.0 {
            return rgb;
        }
        imageops::blur(&rgb, radius)
    }

    /// Unsharp-mask style sharpening: blend the original against a blurred
    /// copy. factor 1.0 is the identity, 0.0 yields the blurred copy.
    fn sharpen(rgb: RgbImage, factor: f32) -> RgbImage {
        let base = imageops::blur(&rgb, 1.0);

        let (width, height) = rgb.dimensions();
        let mut out = RgbImage::new(width, height);
        for ((dst, orig), soft) in out.pixels_mut().zip(rgb.pixels()).zip(base.pixels()) {
            *dst = Rgb([
                blend_channel(orig.0[0], soft.0[0] as f32, factor),
                blend_channel(orig.0[1], soft.0[1] as f32, factor),
                blend_channel(orig.0[2], soft.0[2] as f32, factor),
            ]);
        }
        out
    }
}

/// base + factor * (value - base), clamped to u8 range.
fn blend_channel(value: u8, base: f32, factor: f32) -> u8 {
    (base + factor * (value as f32 - base))
        .round()
        .clamp(0.0, 255.0) as u8
}
