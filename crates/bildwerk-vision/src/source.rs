// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image source: validates and decodes an uploaded JPEG/PNG into the RGB
// buffer every operation reads from.

use std::io::Cursor;

use bildwerk_core::error::BildwerkError;
use bildwerk_core::{AppConfig, SourceFormat};
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use tracing::{debug, info, instrument, warn};

/// A decoded upload. Never mutated after construction; every operation reads
/// from this buffer.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// File name as picked by the user (display only).
    name: String,
    /// Container format detected from the bytes.
    format: SourceFormat,
    /// Decoded pixels, 8-bit RGB, upright. Alpha is discarded.
    pixels: RgbImage,
}

impl SourceImage {
    /// Validate and decode uploaded bytes.
    ///
    /// The format is sniffed from the content, not the file name. Only JPEG
    /// and PNG are accepted.
    #[instrument(skip_all, fields(data_len = data.len()))]
    pub fn decode(
        name: impl Into<String>,
        data: Vec<u8>,
        config: &AppConfig,
    ) -> Result<Self, BildwerkError> {
        let name = name.into();
        let size = data.len() as u64;
        if size > config.max_upload_bytes {
            warn!(size, limit = config.max_upload_bytes, "Upload rejected: too large");
            return Err(BildwerkError::UploadTooLarge {
                size,
                limit: config.max_upload_bytes,
            });
        }

        let format = match image::guess_format(&data) {
            Ok(ImageFormat::Jpeg) => SourceFormat::Jpeg,
            Ok(ImageFormat::Png) => SourceFormat::Png,
            Ok(other) => {
                warn!(format = ?other, "Upload rejected: unsupported format");
                return Err(BildwerkError::UnsupportedFormat(format!("{other:?}")));
            }
            Err(err) => {
                return Err(BildwerkError::Decode(format!(
                    "unrecognised image data in {name}: {err}"
                )));
            }
        };

        if let Some(ext) = std::path::Path::new(&name).extension().and_then(|e| e.to_str())
            && SourceFormat::from_extension(ext) != Some(format)
        {
            warn!(extension = ext, detected = ?format, "File extension does not match content");
        }

        let decode_err = |err: image::ImageError| {
            BildwerkError::Decode(format!("failed to decode {name}: {err}"))
        };
        let mut decoder = ImageReader::with_format(Cursor::new(&data), image_format(format))
            .into_decoder()
            .map_err(decode_err)?;
        // JPEG EXIF orientation is applied here so every view shows the same
        // upright buffer.
        let orientation = decoder.orientation().map_err(decode_err)?;
        let mut decoded = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
        decoded.apply_orientation(orientation);
        debug!(color = ?decoded.color(), ?orientation, "Upload decoded");

        let pixels = decoded.to_rgb8();
        info!(
            name = %name,
            width = pixels.width(),
            height = pixels.height(),
            "Source image loaded"
        );
        Ok(Self {
            name,
            format,
            pixels,
        })
    }

    /// Wrap an already-decoded RGB buffer (tests, benchmarks).
    pub fn from_rgb(name: impl Into<String>, pixels: RgbImage) -> Self {
        Self {
            name: name.into(),
            format: SourceFormat::Png,
            pixels,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Borrow the decoded pixels.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

fn image_format(format: SourceFormat) -> ImageFormat {
    match format {
        SourceFormat::Jpeg => ImageFormat::Jpeg,
        SourceFormat::Png => ImageFormat::Png,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn decodes_png_to_rgb() {
        let rgba = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128]));
        let bytes = png_bytes(DynamicImage::ImageRgba8(rgba));
        let source = SourceImage::decode("a.png", bytes.clone(), &AppConfig::default()).unwrap();

        assert_eq!(source.dimensions(), (4, 3));
        assert_eq!(source.format(), SourceFormat::Png);
        assert_eq!(source.pixels().get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(source.name(), "a.png");
    }

    #[test]
    fn decodes_jpeg() {
        let rgb = RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        let source = SourceImage::decode("a.jpg", bytes, &AppConfig::default()).unwrap();
        assert_eq!(source.format(), SourceFormat::Jpeg);
        assert_eq!(source.dimensions(), (8, 8));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = SourceImage::decode("x.png", b"not an image".to_vec(), &AppConfig::default())
            .unwrap_err();
        assert!(matches!(err, BildwerkError::Decode(_)));
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let mut bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(16, 16)));
        bytes.truncate(bytes.len() / 2);
        let err = SourceImage::decode("x.png", bytes, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, BildwerkError::Decode(_)));
    }

    #[test]
    fn other_formats_are_rejected() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Bmp)
            .unwrap();
        let err = SourceImage::decode("x.bmp", bytes, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, BildwerkError::UnsupportedFormat(_)));
    }

    #[test]
    fn oversized_uploads_are_rejected() {
        let config = AppConfig {
            max_upload_bytes: 16,
            ..AppConfig::default()
        };
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(8, 8)));
        let err = SourceImage::decode("x.png", bytes, &config).unwrap_err();
        assert!(matches!(err, BildwerkError::UploadTooLarge { limit: 16, .. }));
    }

    #[test]
    fn mismatched_extension_still_decodes_by_content() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(RgbImage::new(3, 2)));
        let source = SourceImage::decode("holiday.jpg", bytes, &AppConfig::default()).unwrap();
        assert_eq!(source.format(), SourceFormat::Png);
        assert_eq!(source.dimensions(), (3, 2));
    }

    #[test]
    fn jpeg_exif_orientation_is_applied() {
        // Big-endian TIFF header, one IFD entry: Orientation (0x0112) = 6,
        // i.e. rotate 90 degrees clockwise.
        let exif = vec![
            b'M', b'M', 0x00, 0x2a, 0x00, 0x00, 0x00, 0x08, // header, IFD at 8
            0x00, 0x01, // one entry
            0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let wide = RgbImage::from_pixel(4, 2, image::Rgb([90, 90, 90]));
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new(&mut bytes);
        encoder.set_exif_metadata(exif).unwrap();
        encoder
            .write_image(wide.as_raw(), 4, 2, ExtendedColorType::Rgb8)
            .unwrap();

        let source = SourceImage::decode("phone.jpg", bytes, &AppConfig::default()).unwrap();
        assert_eq!(source.dimensions(), (2, 4));
    }
}
