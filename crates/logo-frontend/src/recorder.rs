//! Platform video recorders
//!
//! In the browser, rendered frames are painted onto a hidden 2D canvas
//! whose capture stream feeds a `MediaRecorder`. Native builds have no
//! encoder and report the recorder as unavailable.

use logo_core::CapturedFrame;
#[cfg(not(target_arch = "wasm32"))]
use logo_core::{ExportError, VideoRecorder, VideoSettings};

/// Size frames are captured at while recording
pub const RECORDING_SIZE: (u32, u32) = (1280, 720);

/// Receives rendered frames while a recording runs
pub trait FrameSink {
    /// Size of the frames the sink wants, `None` while it is not recording
    fn frame_size(&self) -> Option<(u32, u32)>;

    fn push_frame(&self, frame: &CapturedFrame);
}

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformRecorder = UnsupportedRecorder;

#[cfg(target_arch = "wasm32")]
pub type PlatformRecorder = web::WebRecorder;

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_recorder() -> PlatformRecorder {
    UnsupportedRecorder
}

#[cfg(target_arch = "wasm32")]
pub fn platform_recorder() -> PlatformRecorder {
    web::WebRecorder::new(RECORDING_SIZE.0, RECORDING_SIZE.1)
}

/// Recorder for platforms without a video encoder
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecorder;

#[cfg(not(target_arch = "wasm32"))]
impl VideoRecorder for UnsupportedRecorder {
    fn start(&mut self, _settings: &VideoSettings) -> Result<(), ExportError> {
        Err(ExportError::RecorderUnavailable(
            "animation export is only available in the browser".to_string(),
        ))
    }

    fn take_chunks(&mut self) -> Result<Vec<Vec<u8>>, ExportError> {
        Ok(Vec::new())
    }

    fn stop(&mut self) -> Result<(), ExportError> {
        Ok(())
    }

    fn is_finished(&self) -> bool {
        true
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameSink for UnsupportedRecorder {
    fn frame_size(&self) -> Option<(u32, u32)> {
        None
    }

    fn push_frame(&self, _frame: &CapturedFrame) {}
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::sync::Arc;

    use logo_core::{CapturedFrame, ExportError, VideoRecorder, VideoSettings};
    use parking_lot::Mutex;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{Clamped, JsCast};
    use web_sys::{
        BlobEvent, CanvasRenderingContext2d, Event, HtmlCanvasElement, ImageData, MediaRecorder,
        MediaRecorderOptions,
    };

    use super::FrameSink;

    /// Filled by the recorder's event handlers
    #[derive(Debug, Default)]
    struct Received {
        chunks: Vec<Vec<u8>>,
        /// Blobs still being read into memory
        pending_reads: usize,
        stopped: bool,
        error: Option<String>,
    }

    struct Active {
        context: CanvasRenderingContext2d,
        recorder: MediaRecorder,
        _canvas: HtmlCanvasElement,
        _on_data: Closure<dyn FnMut(BlobEvent)>,
        _on_stop: Closure<dyn FnMut(Event)>,
    }

    pub struct WebRecorder {
        width: u32,
        height: u32,
        received: Arc<Mutex<Received>>,
        active: Option<Active>,
    }

    impl WebRecorder {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                received: Arc::new(Mutex::new(Received::default())),
                active: None,
            }
        }

        fn open(&mut self, settings: &VideoSettings) -> Result<Active, String> {
            if !MediaRecorder::is_type_supported(settings.mime) {
                return Err(format!("{} is not supported by this browser", settings.mime));
            }

            let window = web_sys::window().ok_or("No window object")?;
            let document = window.document().ok_or("No document object")?;
            let canvas = document
                .create_element("canvas")
                .map_err(|e| format!("Failed to create canvas: {:?}", e))?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| "Failed to cast to canvas")?;
            canvas.set_width(self.width);
            canvas.set_height(self.height);

            let context = canvas
                .get_context("2d")
                .map_err(|e| format!("Failed to get 2D context: {:?}", e))?
                .ok_or("No 2D context")?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| "Failed to cast to 2D context")?;

            let stream = canvas
                .capture_stream_with_frame_request_rate(settings.fps as f64)
                .map_err(|e| format!("Canvas capture is not supported: {:?}", e))?;

            let options = MediaRecorderOptions::new();
            options.set_mime_type(settings.mime);
            options.set_video_bits_per_second(settings.bits_per_second);
            let recorder =
                MediaRecorder::new_with_media_stream_and_media_recorder_options(&stream, &options)
                    .map_err(|e| format!("Failed to create MediaRecorder: {:?}", e))?;

            *self.received.lock() = Received::default();

            let received = self.received.clone();
            let on_data = Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
                let Some(blob) = event.data() else {
                    return;
                };
                if blob.size() <= 0.0 {
                    return;
                }
                received.lock().pending_reads += 1;

                let received = received.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = wasm_bindgen_futures::JsFuture::from(blob.array_buffer()).await;
                    let mut received = received.lock();
                    received.pending_reads -= 1;
                    match result {
                        Ok(buffer) => received
                            .chunks
                            .push(js_sys::Uint8Array::new(&buffer).to_vec()),
                        Err(e) => received.error = Some(format!("{:?}", e)),
                    }
                });
            });
            recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

            let received = self.received.clone();
            let on_stop = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                received.lock().stopped = true;
            });
            recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

            recorder
                .start()
                .map_err(|e| format!("Failed to start MediaRecorder: {:?}", e))?;

            Ok(Active {
                context,
                recorder,
                _canvas: canvas,
                _on_data: on_data,
                _on_stop: on_stop,
            })
        }
    }

    impl VideoRecorder for WebRecorder {
        fn start(&mut self, settings: &VideoSettings) -> Result<(), ExportError> {
            let active = self.open(settings).map_err(ExportError::RecorderUnavailable)?;
            self.active = Some(active);
            Ok(())
        }

        fn take_chunks(&mut self) -> Result<Vec<Vec<u8>>, ExportError> {
            let mut received = self.received.lock();
            if let Some(error) = received.error.take() {
                return Err(ExportError::Recording(error));
            }
            Ok(std::mem::take(&mut received.chunks))
        }

        fn stop(&mut self) -> Result<(), ExportError> {
            let Some(active) = &self.active else {
                return Ok(());
            };
            active
                .recorder
                .stop()
                .map_err(|e| ExportError::Recording(format!("{:?}", e)))
        }

        fn is_finished(&self) -> bool {
            let received = self.received.lock();
            received.stopped && received.pending_reads == 0
        }
    }

    impl FrameSink for WebRecorder {
        fn frame_size(&self) -> Option<(u32, u32)> {
            self.active.as_ref().map(|_| (self.width, self.height))
        }

        fn push_frame(&self, frame: &CapturedFrame) {
            let Some(active) = &self.active else {
                return;
            };
            if frame.width != self.width || frame.height != self.height {
                return;
            }
            let image = match ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(frame.rgba.as_slice()),
                frame.width,
                frame.height,
            ) {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("Failed to wrap recorded frame: {:?}", e);
                    return;
                }
            };
            if let Err(e) = active.context.put_image_data(&image, 0.0, 0.0) {
                tracing::warn!("Failed to paint recorded frame: {:?}", e);
            }
        }
    }

    impl Drop for WebRecorder {
        fn drop(&mut self) {
            if let Some(active) = self.active.take() {
                active.recorder.set_ondataavailable(None);
                active.recorder.set_onstop(None);
                let _ = active.recorder.stop();
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use logo_core::{RecordingSession, RecordingState};

    #[test]
    fn test_native_recording_is_unavailable() {
        let mut session = RecordingSession::new(platform_recorder(), VideoSettings::default());
        let result = session.start("Nova");
        assert!(matches!(result, Err(ExportError::RecorderUnavailable(_))));
        assert!(matches!(session.state(), RecordingState::Failed(_)));
        assert_eq!(session.recorder().frame_size(), None);
    }
}
