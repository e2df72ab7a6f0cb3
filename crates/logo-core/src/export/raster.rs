//! PNG/JPEG export of a captured frame

use ::image::codecs::jpeg::JpegEncoder;
use ::image::codecs::png::PngEncoder;
use ::image::{ExtendedColorType, ImageEncoder};

use super::{ExportError, ExportResolution, ExportedFile, export_filename};

/// JPEG quality used for exports (0-100)
pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg => "image/jpeg",
        }
    }
}

/// RGBA8 pixels read back from the rendering surface
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed rows, 4 bytes per pixel
    pub rgba: Vec<u8>,
}

impl CapturedFrame {
    /// True for zero-sized, truncated or never-drawn (all zero) captures
    pub fn is_empty(&self) -> bool {
        let expected = self.width as usize * self.height as usize * 4;
        expected == 0 || self.rgba.len() != expected || self.rgba.iter().all(|&b| b == 0)
    }

    /// RGB pixels with alpha composited onto black
    fn to_rgb_on_black(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as u16;
                [0, 1, 2].map(|i| ((px[i] as u16 * a + 127) / 255) as u8)
            })
            .collect()
    }
}

/// Anything that can hand out the pixels of the current frame
pub trait FrameSource {
    /// Render or copy the current frame at the given size.
    ///
    /// Returns `None` when there is nothing to capture (no surface yet,
    /// the surface was lost, or nothing has been drawn).
    fn capture_frame(&mut self, width: u32, height: u32) -> Option<CapturedFrame>;
}

/// A frame that was read back ahead of time. It is handed out once, and
/// only if it has the requested size.
impl FrameSource for Option<CapturedFrame> {
    fn capture_frame(&mut self, width: u32, height: u32) -> Option<CapturedFrame> {
        self.take()
            .filter(|frame| frame.width == width && frame.height == height)
    }
}

/// Encode a frame in the given format
pub fn encode_frame(frame: &CapturedFrame, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    if frame.is_empty() {
        return Err(ExportError::EmptyCapture);
    }

    let mut bytes = Vec::new();
    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut bytes).write_image(
            &frame.rgba,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        ),
        ImageFormat::Jpg => JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
            &frame.to_rgb_on_black(),
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        ),
    };
    result.map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(bytes)
}

/// Capture the current frame and encode it as `logo-<brand>.<ext>`
pub fn export_image(
    format: ImageFormat,
    source: &mut dyn FrameSource,
    brand_name: &str,
    resolution: ExportResolution,
) -> Result<ExportedFile, ExportError> {
    let (width, height) = resolution.dimensions();
    let frame = source
        .capture_frame(width, height)
        .ok_or(ExportError::EmptyCapture)?;

    let bytes = encode_frame(&frame, format)?;
    let filename = export_filename(brand_name, format.extension());
    tracing::info!(
        "Exported {} ({}x{}, {} bytes)",
        filename,
        frame.width,
        frame.height,
        bytes.len()
    );

    Ok(ExportedFile {
        filename,
        mime: format.mime(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SolidFrame {
        rgba: [u8; 4],
    }

    impl FrameSource for SolidFrame {
        fn capture_frame(&mut self, width: u32, height: u32) -> Option<CapturedFrame> {
            let pixels = (width * height) as usize;
            Some(CapturedFrame {
                width,
                height,
                rgba: self.rgba.repeat(pixels),
            })
        }
    }

    struct NothingDrawn;

    impl FrameSource for NothingDrawn {
        fn capture_frame(&mut self, _width: u32, _height: u32) -> Option<CapturedFrame> {
            None
        }
    }

    #[test]
    fn test_png_export() {
        let mut source = SolidFrame {
            rgba: [255, 215, 0, 255],
        };
        let file = export_image(ImageFormat::Png, &mut source, "Acme", ExportResolution::Hd1080)
            .unwrap();
        assert_eq!(file.filename, "logo-acme.png");
        assert_eq!(file.mime, "image/png");
        assert_eq!(&file.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_jpg_export() {
        let mut source = SolidFrame {
            rgba: [10, 20, 30, 128],
        };
        let file =
            export_image(ImageFormat::Jpg, &mut source, "Acme", ExportResolution::Hd1080).unwrap();
        assert_eq!(file.filename, "logo-acme.jpg");
        assert_eq!(&file.bytes[..2], &[0xff, 0xd8]);
    }

    #[test]
    fn test_missing_capture_is_empty_capture() {
        let result = export_image(
            ImageFormat::Png,
            &mut NothingDrawn,
            "Acme",
            ExportResolution::Hd1080,
        );
        assert_eq!(result, Err(ExportError::EmptyCapture));
    }

    #[test]
    fn test_blank_canvas_is_empty_capture() {
        let mut source = SolidFrame { rgba: [0, 0, 0, 0] };
        let result = export_image(ImageFormat::Png, &mut source, "Acme", ExportResolution::Hd1080);
        assert_eq!(result, Err(ExportError::EmptyCapture));
    }

    #[test]
    fn test_truncated_frame_is_empty() {
        let frame = CapturedFrame {
            width: 2,
            height: 2,
            rgba: vec![255; 12],
        };
        assert!(frame.is_empty());
        assert_eq!(encode_frame(&frame, ImageFormat::Png), Err(ExportError::EmptyCapture));
    }

    #[test]
    fn test_alpha_composited_on_black() {
        let frame = CapturedFrame {
            width: 1,
            height: 1,
            rgba: vec![255, 255, 255, 0],
        };
        assert_eq!(frame.to_rgb_on_black(), vec![0, 0, 0]);
    }

    #[test]
    fn test_prefetched_frame_is_used_once() {
        let mut source = Some(CapturedFrame {
            width: 2,
            height: 1,
            rgba: vec![10, 20, 30, 255, 10, 20, 30, 255],
        });
        let first = source.capture_frame(2, 1);
        assert!(first.is_some());
        assert!(source.capture_frame(2, 1).is_none());
    }

    #[test]
    fn test_prefetched_frame_of_other_size_is_rejected() {
        let mut source = Some(CapturedFrame {
            width: 2,
            height: 1,
            rgba: vec![255; 8],
        });
        let result = export_image(
            ImageFormat::Png,
            &mut source,
            "ACME",
            ExportResolution::Hd1080,
        );
        assert_eq!(result, Err(ExportError::EmptyCapture));
    }
}
