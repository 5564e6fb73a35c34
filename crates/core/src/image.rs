//! Header-only inspection of uploaded image bytes.
//!
//! Only the container header is decoded: enough to identify the format and
//! read the pixel dimensions. The reader lives inside [`probe`] and is
//! dropped before it returns, on the error paths as well.

use std::io::Cursor;

use image::ImageReader;

use crate::error::CoreError;

/// What the probe learned about an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageProbe {
    pub width: u32,
    pub height: u32,
    /// MIME type of the detected container format, e.g. `image/png`.
    pub mime_type: &'static str,
}

/// Identify the format of `bytes` and read its dimensions.
///
/// Fails with [`CoreError::Validation`] when the input is empty, the format
/// is not recognised, or the header cannot be parsed.
pub fn probe(bytes: &[u8]) -> Result<ImageProbe, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Validation(format!("Could not read image: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| CoreError::Validation("Unrecognised image format".into()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Could not read image dimensions: {e}")))?;

    Ok(ImageProbe {
        width,
        height,
        mime_type: format.to_mime_type(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut buf, format)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn reads_png_dimensions() {
        let probe = probe(&encode(7, 3, ImageFormat::Png)).unwrap();
        assert_eq!((probe.width, probe.height), (7, 3));
        assert_eq!(probe.mime_type, "image/png");
    }

    #[test]
    fn reads_jpeg_dimensions() {
        let probe = probe(&encode(16, 9, ImageFormat::Jpeg)).unwrap();
        assert_eq!((probe.width, probe.height), (16, 9));
        assert_eq!(probe.mime_type, "image/jpeg");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(probe(&[]), Err(CoreError::Validation(_))));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = probe(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("Unrecognised")));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let png = encode(4, 4, ImageFormat::Png);
        assert!(matches!(probe(&png[..12]), Err(CoreError::Validation(_))));
    }
}
