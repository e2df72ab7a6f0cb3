//! Drives exports across frames
//!
//! Image exports wait for a GPU readback, animation exports feed frames
//! to the platform recorder until the recording window closes. Outcomes
//! end up as notifications.

use std::time::Duration;

use logo_core::{
    ExportError, ExportRequest, ExportResolution, ExportedFile, ImageFormat, RecordingSession,
    VideoSettings, export_image, export_vector,
};
use logo_renderer::{PendingCapture, SceneDescription};

use crate::download::{self, Delivery};
use crate::recorder::{FrameSink, PlatformRecorder, platform_recorder};
use crate::state::{AppState, ExportActivity};
use crate::viewport::ViewportState;

struct PendingImage {
    format: ImageFormat,
    resolution: ExportResolution,
    brand_name: String,
    capture: PendingCapture,
}

struct ActiveRecording {
    session: RecordingSession<PlatformRecorder>,
    /// UI time the recording started at
    started_at: f64,
    /// At most one frame is read back at a time
    frame: Option<PendingCapture>,
}

#[derive(Default)]
pub struct ExportDriver {
    image: Option<PendingImage>,
    recording: Option<ActiveRecording>,
}

impl ExportDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.image.is_some() || self.recording.is_some()
    }

    /// Start an export requested from the UI
    pub fn request(
        &mut self,
        request: ExportRequest,
        state: &mut AppState,
        viewport: Option<&mut ViewportState>,
        now: f64,
    ) {
        if self.is_busy() {
            state
                .notifications
                .error("Another export is still running");
            return;
        }
        if let Err(e) = request.authorize(&state.tier) {
            state.notifications.error(format!("Export failed: {}", e));
            return;
        }

        let brand_name = state.store.state().brand_name.clone();
        tracing::info!("Starting {} export", request.label());

        match request {
            ExportRequest::Vector => finish(state, export_vector(&brand_name)),
            ExportRequest::Image { format, resolution } => {
                let Some(viewport) = viewport else {
                    state
                        .notifications
                        .error("Export failed: 3D rendering is unavailable");
                    return;
                };
                let scene = scene_of(state);
                let (width, height) = resolution.dimensions();
                match viewport.capture(&scene, width, height) {
                    Some(capture) => {
                        self.image = Some(PendingImage {
                            format,
                            resolution,
                            brand_name,
                            capture,
                        });
                        state.export_activity = ExportActivity::Capturing;
                    }
                    None => finish(state, Err(ExportError::EmptyCapture)),
                }
            }
            ExportRequest::Video => {
                let mut session = RecordingSession::new(platform_recorder(), VideoSettings::default());
                match session.start(&brand_name) {
                    Ok(()) => {
                        self.recording = Some(ActiveRecording {
                            session,
                            started_at: now,
                            frame: None,
                        });
                        state.export_activity = ExportActivity::Recording { progress: 0.0 };
                        state.notifications.info("Recording 5 second animation…");
                    }
                    Err(e) => finish(state, Err(e)),
                }
            }
        }
    }

    /// Abort a running recording; the outcome is reported on the next poll
    pub fn cancel(&mut self) {
        if let Some(recording) = &mut self.recording {
            recording.session.cancel();
        }
    }

    /// Advance running exports. Returns true while one is still running.
    pub fn poll(&mut self, state: &mut AppState, mut viewport: Option<&mut ViewportState>, now: f64) -> bool {
        self.poll_image(state, viewport.as_deref_mut());
        self.poll_recording(state, viewport, now);

        if !self.is_busy() {
            state.export_activity = ExportActivity::Idle;
        }
        self.is_busy()
    }

    fn poll_image(&mut self, state: &mut AppState, viewport: Option<&mut ViewportState>) {
        let Some(pending) = &self.image else {
            return;
        };
        let Some(viewport) = viewport.filter(|v| !v.context_state().is_lost()) else {
            self.image = None;
            finish(state, Err(ExportError::EmptyCapture));
            return;
        };

        let Some(frame) = pending.capture.poll(viewport.device()) else {
            return;
        };
        let Some(pending) = self.image.take() else {
            return;
        };

        let mut source = frame;
        let result = export_image(
            pending.format,
            &mut source,
            &pending.brand_name,
            pending.resolution,
        );
        finish(state, result);
    }

    fn poll_recording(&mut self, state: &mut AppState, viewport: Option<&mut ViewportState>, now: f64) {
        let Some(recording) = &mut self.recording else {
            return;
        };

        if let Some(viewport) = viewport {
            feed_frame(recording, state, viewport);
        }

        let elapsed = Duration::from_secs_f64((now - recording.started_at).max(0.0));
        recording.session.poll(elapsed);
        state.export_activity = ExportActivity::Recording {
            progress: recording.session.progress(),
        };

        if let Some(result) = recording.session.take_result() {
            self.recording = None;
            finish(state, result);
        }
    }
}

/// Hand the previous readback to the recorder and start the next one
fn feed_frame(recording: &mut ActiveRecording, state: &AppState, viewport: &mut ViewportState) {
    let recorder = recording.session.recorder();

    if let Some(capture) = &recording.frame {
        match capture.poll(viewport.device()) {
            None => return,
            Some(frame) => {
                if let Some(frame) = frame {
                    recorder.push_frame(&frame);
                }
                recording.frame = None;
            }
        }
    }

    if let Some((width, height)) = recorder.frame_size() {
        let scene = scene_of(state);
        recording.frame = viewport.capture(&scene, width, height);
    }
}

fn scene_of(state: &AppState) -> SceneDescription {
    SceneDescription::from_state(state.store.state(), state.store.material()).gated(&state.tier)
}

/// Deliver a finished export and report the outcome
fn finish(state: &mut AppState, result: Result<ExportedFile, ExportError>) {
    let file = match result {
        Ok(file) => file,
        Err(ExportError::Cancelled) => {
            state.notifications.info("Recording cancelled");
            return;
        }
        Err(e) => {
            state.notifications.error(format!("Export failed: {}", e));
            return;
        }
    };

    match download::deliver(&file) {
        Ok(Delivery::Saved) => {
            state
                .notifications
                .success(format!("Exported {}", file.filename));
        }
        Ok(Delivery::Dismissed) => {
            tracing::debug!("Save dialog for {} dismissed", file.filename);
        }
        Err(e) => {
            state.notifications.error(format!("Saving failed: {}", e));
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use logo_core::Tier;

    #[test]
    fn test_gated_export_is_rejected_before_capture() {
        let mut driver = ExportDriver::new();
        let mut state = AppState::new();

        driver.request(ExportRequest::Video, &mut state, None, 0.0);

        assert!(!driver.is_busy());
        assert_eq!(state.export_activity, ExportActivity::Idle);
        let notice = &state.notifications.notices()[0];
        assert!(notice.message.contains("requires Pro"));
    }

    #[test]
    fn test_native_video_reports_unavailable_recorder() {
        let mut driver = ExportDriver::new();
        let mut state = AppState::new();
        state.tier.set_tier(Tier::Pro);

        driver.request(ExportRequest::Video, &mut state, None, 0.0);

        assert!(!driver.is_busy());
        let notice = &state.notifications.notices()[0];
        assert!(notice.message.contains("not available"));
    }

    #[test]
    fn test_image_export_without_viewport_fails() {
        let mut driver = ExportDriver::new();
        let mut state = AppState::new();
        let request = ExportRequest::Image {
            format: ImageFormat::Png,
            resolution: ExportResolution::Hd1080,
        };

        driver.request(request, &mut state, None, 0.0);

        assert!(!driver.is_busy());
        assert!(!driver.poll(&mut state, None, 1.0));
        assert_eq!(state.notifications.notices().len(), 1);
    }
}
