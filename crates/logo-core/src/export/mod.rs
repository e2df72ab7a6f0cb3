//! Export pipeline
//!
//! Turns a rendered frame, the brand text or a stream of recorded frames
//! into a downloadable file. Nothing here touches the GPU; frames come in
//! through [`FrameSource`] and video through [`VideoRecorder`].

mod raster;
mod svg;
mod video;

pub use self::raster::{CapturedFrame, FrameSource, ImageFormat, encode_frame, export_image};
pub use self::svg::{escape_xml, export_vector, render_svg};
pub use self::video::{RecordingSession, RecordingState, VideoRecorder, VideoSettings};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tier::{ProFeature, TierGate};

/// Export failures, all recoverable by retrying
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("the capture is empty, nothing has been drawn yet")]
    EmptyCapture,

    #[error("video recording is not available: {0}")]
    RecorderUnavailable(String),

    #[error("recording failed: {0}")]
    Recording(String),

    #[error("recording was cancelled")]
    Cancelled,

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("the brand name is empty")]
    EmptyBrandName,

    #[error("{} requires Pro", .0.name())]
    NotEntitled(ProFeature),

    #[error("encoding failed: {0}")]
    Encode(String),
}

/// A finished export ready to be saved or downloaded
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Output size of raster exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportResolution {
    #[default]
    Hd1080,
    Uhd4k,
}

impl ExportResolution {
    pub const ALL: [ExportResolution; 2] = [ExportResolution::Hd1080, ExportResolution::Uhd4k];

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ExportResolution::Hd1080 => (1920, 1080),
            ExportResolution::Uhd4k => (3840, 2160),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportResolution::Hd1080 => "1080p (1920×1080)",
            ExportResolution::Uhd4k => "4K (3840×2160)",
        }
    }

    /// Tier feature required to export at this size
    pub fn required_feature(&self) -> Option<ProFeature> {
        match self {
            ExportResolution::Hd1080 => None,
            ExportResolution::Uhd4k => Some(ProFeature::Export4k),
        }
    }
}

/// What the user asked to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRequest {
    Image {
        format: ImageFormat,
        resolution: ExportResolution,
    },
    Vector,
    Video,
}

impl ExportRequest {
    /// Tier feature the request needs, checked before any capture
    pub fn required_feature(&self) -> Option<ProFeature> {
        match self {
            ExportRequest::Image { resolution, .. } => resolution.required_feature(),
            ExportRequest::Vector => None,
            ExportRequest::Video => Some(ProFeature::VideoExport),
        }
    }

    /// Check the request against the current tier
    pub fn authorize(&self, gate: &TierGate) -> Result<(), ExportError> {
        match self.required_feature() {
            Some(feature) => require(gate, feature),
            None => Ok(()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportRequest::Image {
                format: ImageFormat::Png,
                ..
            } => "PNG",
            ExportRequest::Image {
                format: ImageFormat::Jpg,
                ..
            } => "JPG",
            ExportRequest::Vector => "SVG",
            ExportRequest::Video => "Video",
        }
    }
}

/// Fail with `NotEntitled` when the tier lacks `feature`
pub fn require(gate: &TierGate, feature: ProFeature) -> Result<(), ExportError> {
    if gate.is_entitled(feature) {
        Ok(())
    } else {
        Err(ExportError::NotEntitled(feature))
    }
}

/// `logo-<brand>.<ext>`, brand lowercased
pub fn export_filename(brand_name: &str, extension: &str) -> String {
    format!("logo-{}.{}", brand_name.to_lowercase(), extension)
}

/// `logo-<brand>-animation.webm`, brand lowercased
pub fn animation_filename(brand_name: &str) -> String {
    export_filename(&format!("{}-animation", brand_name), "webm")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    #[test]
    fn test_filename_is_lowercased() {
        assert_eq!(export_filename("Acme", "png"), "logo-acme.png");
        assert_eq!(export_filename("ACME", "jpg"), "logo-acme.jpg");
        assert_eq!(animation_filename("Acme"), "logo-acme-animation.webm");
    }

    #[test]
    fn test_4k_requires_pro() {
        let free = TierGate::default();
        let pro = TierGate::new(Tier::Pro);
        let feature = ExportResolution::Uhd4k.required_feature().unwrap();

        assert_eq!(require(&free, feature), Err(ExportError::NotEntitled(feature)));
        assert_eq!(require(&pro, feature), Ok(()));
        assert!(ExportResolution::Hd1080.required_feature().is_none());
    }

    #[test]
    fn test_request_gating() {
        let free = TierGate::default();
        let png_1080 = ExportRequest::Image {
            format: ImageFormat::Png,
            resolution: ExportResolution::Hd1080,
        };
        let jpg_4k = ExportRequest::Image {
            format: ImageFormat::Jpg,
            resolution: ExportResolution::Uhd4k,
        };

        assert_eq!(png_1080.authorize(&free), Ok(()));
        assert_eq!(ExportRequest::Vector.authorize(&free), Ok(()));
        assert_eq!(
            jpg_4k.authorize(&free),
            Err(ExportError::NotEntitled(ProFeature::Export4k))
        );
        assert_eq!(
            ExportRequest::Video.authorize(&free),
            Err(ExportError::NotEntitled(ProFeature::VideoExport))
        );
        assert_eq!(ExportRequest::Video.authorize(&TierGate::new(Tier::Pro)), Ok(()));
    }
}
