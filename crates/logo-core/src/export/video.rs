//! Fixed-length animation recording
//!
//! A [`RecordingSession`] drives a platform [`VideoRecorder`] for a fixed
//! wall-clock window and assembles the encoded chunks into one WebM file.
//! The session never reads a clock itself; the caller passes the time
//! elapsed since [`RecordingSession::start`] on every poll.

use std::time::Duration;

use super::{ExportError, ExportedFile, animation_filename};

/// Encoder parameters handed to the recorder
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSettings {
    pub fps: u32,
    pub duration: Duration,
    pub bits_per_second: u32,
    pub mime: &'static str,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            fps: 30,
            duration: Duration::from_millis(5000),
            bits_per_second: 8_000_000,
            mime: "video/webm;codecs=vp9",
        }
    }
}

impl VideoSettings {
    /// MIME type of the finished file, without codec parameters
    pub fn container_mime(&self) -> &'static str {
        self.mime.split(';').next().unwrap_or(self.mime)
    }
}

/// A platform video encoder fed from the rendering surface
pub trait VideoRecorder {
    /// Open a capture stream and start encoding.
    ///
    /// Fails with [`ExportError::RecorderUnavailable`] when the platform
    /// cannot produce an encoded stream.
    fn start(&mut self, settings: &VideoSettings) -> Result<(), ExportError>;

    /// Chunks encoded since the last call
    fn take_chunks(&mut self) -> Result<Vec<Vec<u8>>, ExportError>;

    /// Ask the encoder to flush and stop
    fn stop(&mut self) -> Result<(), ExportError>;

    /// True once the encoder has delivered its last chunk after `stop`
    fn is_finished(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordingState {
    Idle,
    Recording,
    /// Window elapsed, waiting for the encoder to flush
    Finalizing,
    Finished(ExportedFile),
    Failed(ExportError),
}

impl RecordingState {
    pub fn is_busy(&self) -> bool {
        matches!(self, RecordingState::Recording | RecordingState::Finalizing)
    }
}

pub struct RecordingSession<R> {
    recorder: R,
    settings: VideoSettings,
    brand_name: String,
    state: RecordingState,
    chunks: Vec<Vec<u8>>,
    elapsed: Duration,
}

impl<R: VideoRecorder> RecordingSession<R> {
    pub fn new(recorder: R, settings: VideoSettings) -> Self {
        Self {
            recorder,
            settings,
            brand_name: String::new(),
            state: RecordingState::Idle,
            chunks: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Fraction of the recording window that has elapsed
    pub fn progress(&self) -> f32 {
        match self.state {
            RecordingState::Recording => {
                (self.elapsed.as_secs_f32() / self.settings.duration.as_secs_f32()).min(1.0)
            }
            RecordingState::Finalizing | RecordingState::Finished(_) => 1.0,
            _ => 0.0,
        }
    }

    /// Start recording an animation of `brand_name`
    pub fn start(&mut self, brand_name: &str) -> Result<(), ExportError> {
        if self.state.is_busy() {
            return Err(ExportError::AlreadyRecording);
        }

        self.chunks.clear();
        self.elapsed = Duration::ZERO;
        self.brand_name = brand_name.to_string();

        if let Err(e) = self.recorder.start(&self.settings) {
            tracing::warn!("Video recorder failed to start: {}", e);
            self.state = RecordingState::Failed(e.clone());
            return Err(e);
        }

        tracing::info!(
            "Recording {} ms at {} fps ({})",
            self.settings.duration.as_millis(),
            self.settings.fps,
            self.settings.mime
        );
        self.state = RecordingState::Recording;
        Ok(())
    }

    /// Advance the session; `elapsed` is the time since `start`
    pub fn poll(&mut self, elapsed: Duration) -> &RecordingState {
        if !self.state.is_busy() {
            return &self.state;
        }
        self.elapsed = elapsed;

        if let Err(e) = self.collect() {
            self.fail(e);
            return &self.state;
        }

        if self.state == RecordingState::Recording && elapsed >= self.settings.duration {
            if let Err(e) = self.recorder.stop() {
                self.fail(e);
                return &self.state;
            }
            self.state = RecordingState::Finalizing;
        }

        if self.state == RecordingState::Finalizing && self.recorder.is_finished() {
            match self.collect() {
                Ok(()) => self.finish(),
                Err(e) => self.fail(e),
            }
        }

        &self.state
    }

    /// Abort the session and discard everything recorded so far
    pub fn cancel(&mut self) {
        if !self.state.is_busy() {
            return;
        }
        if let Err(e) = self.recorder.stop() {
            tracing::debug!("Stopping cancelled recorder failed: {}", e);
        }
        self.chunks.clear();
        self.state = RecordingState::Failed(ExportError::Cancelled);
        tracing::info!("Recording cancelled");
    }

    /// Take the outcome of a finished or failed session, resetting it to idle
    pub fn take_result(&mut self) -> Option<Result<ExportedFile, ExportError>> {
        match std::mem::replace(&mut self.state, RecordingState::Idle) {
            RecordingState::Finished(file) => Some(Ok(file)),
            RecordingState::Failed(e) => Some(Err(e)),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn collect(&mut self) -> Result<(), ExportError> {
        let chunks = self.recorder.take_chunks()?;
        self.chunks
            .extend(chunks.into_iter().filter(|chunk| !chunk.is_empty()));
        Ok(())
    }

    fn finish(&mut self) {
        if self.chunks.is_empty() {
            self.fail(ExportError::Recording("the encoder produced no data".into()));
            return;
        }

        let bytes = std::mem::take(&mut self.chunks).concat();
        let filename = animation_filename(&self.brand_name);
        tracing::info!("Exported {} ({} bytes)", filename, bytes.len());
        self.state = RecordingState::Finished(ExportedFile {
            filename,
            mime: self.settings.container_mime(),
            bytes,
        });
    }

    fn fail(&mut self, error: ExportError) {
        tracing::error!("Recording failed: {}", error);
        self.chunks.clear();
        if let Err(e) = self.recorder.stop() {
            tracing::debug!("Stopping failed recorder failed: {}", e);
        }
        self.state = RecordingState::Failed(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScriptedRecorder {
        pending: Vec<Vec<u8>>,
        started: bool,
        stopped: bool,
        fail_start: bool,
        fail_take: bool,
    }

    impl VideoRecorder for ScriptedRecorder {
        fn start(&mut self, _settings: &VideoSettings) -> Result<(), ExportError> {
            if self.fail_start {
                return Err(ExportError::RecorderUnavailable("no encoder".into()));
            }
            self.started = true;
            Ok(())
        }

        fn take_chunks(&mut self) -> Result<Vec<Vec<u8>>, ExportError> {
            if self.fail_take {
                return Err(ExportError::Recording("stream ended".into()));
            }
            Ok(std::mem::take(&mut self.pending))
        }

        fn stop(&mut self) -> Result<(), ExportError> {
            self.stopped = true;
            Ok(())
        }

        fn is_finished(&self) -> bool {
            self.stopped
        }
    }

    fn session() -> RecordingSession<ScriptedRecorder> {
        RecordingSession::new(ScriptedRecorder::default(), VideoSettings::default())
    }

    #[test]
    fn test_default_settings() {
        let settings = VideoSettings::default();
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.duration, Duration::from_millis(5000));
        assert_eq!(settings.bits_per_second, 8_000_000);
        assert_eq!(settings.container_mime(), "video/webm");
    }

    #[test]
    fn test_records_for_the_full_window() {
        let mut session = session();
        session.start("Acme").unwrap();

        session.recorder.pending = vec![vec![1, 2], vec![]];
        assert_eq!(
            session.poll(Duration::from_millis(2500)),
            &RecordingState::Recording
        );
        assert!((session.progress() - 0.5).abs() < 1e-6);

        session.recorder.pending = vec![vec![3]];
        session.poll(Duration::from_millis(5000));

        let file = session.take_result().unwrap().unwrap();
        assert_eq!(file.filename, "logo-acme-animation.webm");
        assert_eq!(file.mime, "video/webm");
        assert_eq!(file.bytes, vec![1, 2, 3]);
        assert_eq!(session.state(), &RecordingState::Idle);
    }

    #[test]
    fn test_unavailable_recorder() {
        let mut session = RecordingSession::new(
            ScriptedRecorder {
                fail_start: true,
                ..Default::default()
            },
            VideoSettings::default(),
        );
        let result = session.start("Acme");
        assert!(matches!(result, Err(ExportError::RecorderUnavailable(_))));
        assert!(matches!(
            session.take_result(),
            Some(Err(ExportError::RecorderUnavailable(_)))
        ));
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut session = session();
        session.start("Acme").unwrap();
        assert_eq!(session.start("Acme"), Err(ExportError::AlreadyRecording));
    }

    #[test]
    fn test_cancel_discards_chunks() {
        let mut session = session();
        session.start("Acme").unwrap();
        session.recorder.pending = vec![vec![1; 64]];
        session.poll(Duration::from_millis(1000));

        session.cancel();
        assert!(session.chunks.is_empty());
        assert!(session.recorder().stopped);
        assert_eq!(session.take_result(), Some(Err(ExportError::Cancelled)));
    }

    #[test]
    fn test_failure_discards_chunks() {
        let mut session = session();
        session.start("Acme").unwrap();
        session.recorder.pending = vec![vec![1; 64]];
        session.poll(Duration::from_millis(1000));

        session.recorder.fail_take = true;
        let state = session.poll(Duration::from_millis(1500)).clone();
        assert!(matches!(state, RecordingState::Failed(ExportError::Recording(_))));
        assert!(session.chunks.is_empty());
    }

    #[test]
    fn test_no_data_is_a_failure() {
        let mut session = session();
        session.start("Acme").unwrap();
        session.poll(Duration::from_millis(5000));
        assert!(matches!(
            session.take_result(),
            Some(Err(ExportError::Recording(_)))
        ));
    }
}
