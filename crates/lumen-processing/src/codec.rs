//! Decode uploaded bytes and encode processed images.
//!
//! Stored output is always JPEG or PNG regardless of the upload format:
//! jpg/jpeg uploads re-encode as JPEG (quality 95), everything else as PNG.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::io::Cursor;

/// Codec errors
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

/// A decoded upload plus its detected container format, when recognizable.
#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
}

/// Output encoding for persisted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Jpeg,
    Png,
}

impl OutputEncoding {
    /// jpg/jpeg extensions keep JPEG; every other upload is stored as PNG.
    pub fn for_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => OutputEncoding::Jpeg,
            _ => OutputEncoding::Png,
        }
    }

    /// Parse a requested format name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "JPEG" | "JPG" => Some(OutputEncoding::Jpeg),
            "PNG" => Some(OutputEncoding::Png),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputEncoding::Jpeg => "JPEG",
            OutputEncoding::Png => "PNG",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputEncoding::Jpeg => "image/jpeg",
            OutputEncoding::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputEncoding::Jpeg => "jpg",
            OutputEncoding::Png => "png",
        }
    }
}

/// Formats we expect to see in uploads. An unrecognized tag is logged and
/// decoding proceeds anyway rather than rejecting outright.
const EXPECTED_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Gif,
];

/// Read pixel dimensions from the container header without decoding.
///
/// Lets callers enforce dimension limits before paying for a full decode of
/// an oversized image.
pub fn image_dimensions(data: &[u8]) -> Result<(u32, u32), CodecError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Decode raw upload bytes with format sniffing.
pub fn decode_image(data: &[u8]) -> Result<DecodedImage, CodecError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let format = reader.format();
    match format {
        Some(f) if !EXPECTED_FORMATS.contains(&f) => {
            tracing::warn!(format = ?f, "Unusual image format, trying to process anyway");
        }
        None => {
            tracing::warn!("Unrecognized image format tag, trying to process anyway");
        }
        _ => {}
    }

    let image = reader
        .decode()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    Ok(DecodedImage { image, format })
}

/// Encode an image to the given output encoding.
///
/// The JPEG path composites any alpha channel over a white background
/// before encoding, since JPEG has no transparency.
pub fn encode_image(
    img: &DynamicImage,
    encoding: OutputEncoding,
    jpeg_quality: u8,
) -> Result<Vec<u8>, CodecError> {
    let mut buffer = Vec::new();
    match encoding {
        OutputEncoding::Jpeg => {
            let rgb = flatten_to_rgb(img);
            let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), jpeg_quality);
            rgb.write_with_encoder(encoder).map_err(|e| CodecError::Encode {
                format: "JPEG",
                message: e.to_string(),
            })?;
        }
        OutputEncoding::Png => {
            img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                .map_err(|e| CodecError::Encode {
                    format: "PNG",
                    message: e.to_string(),
                })?;
        }
    }
    Ok(buffer)
}

/// Composite alpha over white and drop to 3-channel RGB.
fn flatten_to_rgb(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = src.0[3] as u16;
        let over = |c: u8| -> u8 {
            ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        *dst = Rgb([over(src.0[0]), over(src.0[1]), over(src.0[2])]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn sample_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([200, 50, 50]),
        ));
        encode_image(&img, OutputEncoding::Png, 95).unwrap()
    }

    #[test]
    fn test_decode_detects_png_format() {
        let bytes = sample_png_bytes(10, 6);
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.format, Some(ImageFormat::Png));
        assert_eq!(decoded.image.dimensions(), (10, 6));
    }

    #[test]
    fn test_image_dimensions_reads_header_only() {
        let bytes = sample_png_bytes(33, 21);
        assert_eq!(image_dimensions(&bytes).unwrap(), (33, 21));
    }

    #[test]
    fn test_image_dimensions_garbage_fails() {
        let err = image_dimensions(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_encode_jpeg_roundtrip_preserves_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 15, Rgb([0, 128, 255])));
        let bytes = encode_image(&img, OutputEncoding::Jpeg, 95).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.format, Some(ImageFormat::Jpeg));
        assert_eq!(decoded.image.dimensions(), (20, 15));
    }

    #[test]
    fn test_jpeg_composites_alpha_over_white() {
        // Fully transparent pixel should come back white, not black.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            Rgba([255, 0, 0, 0]),
        ));
        let bytes = encode_image(&img, OutputEncoding::Jpeg, 95).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        let p = decoded.image.to_rgb8().get_pixel(4, 4).0;
        assert!(p.iter().all(|&c| c > 240), "expected near-white, got {:?}", p);
    }

    #[test]
    fn test_png_preserves_alpha_channel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([10, 20, 30, 77]),
        ));
        let bytes = encode_image(&img, OutputEncoding::Png, 95).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.image.to_rgba8().get_pixel(0, 0).0, [10, 20, 30, 77]);
    }

    #[test]
    fn test_output_encoding_for_extension() {
        assert_eq!(OutputEncoding::for_extension("jpg"), OutputEncoding::Jpeg);
        assert_eq!(OutputEncoding::for_extension("JPEG"), OutputEncoding::Jpeg);
        assert_eq!(OutputEncoding::for_extension("png"), OutputEncoding::Png);
        assert_eq!(OutputEncoding::for_extension("gif"), OutputEncoding::Png);
        assert_eq!(OutputEncoding::for_extension("webp"), OutputEncoding::Png);
    }

    #[test]
    fn test_output_encoding_from_name() {
        assert_eq!(OutputEncoding::from_name("jpeg"), Some(OutputEncoding::Jpeg));
        assert_eq!(OutputEncoding::from_name("PNG"), Some(OutputEncoding::Png));
        assert_eq!(OutputEncoding::from_name("avif"), None);
    }
}
