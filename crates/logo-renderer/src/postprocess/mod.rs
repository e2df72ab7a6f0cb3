//! Optional post-processing and the guard around it.
//!
//! The base scene is always drawn. Post-processing runs after it, and
//! the first time it cannot run (missing inputs, a failed load, an error
//! or a panic) [`PostProcessGuard`] turns it off for the rest of the
//! session and keeps the reason for display.

mod bloom;

pub use bloom::{BloomPass, PostStage, passthrough};

use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;

use crate::capability::panic_message;
use crate::constants::bloom as constants;
use crate::error_scope::{ErrorWatch, ScopeCheck};

/// Unreal-style bloom parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl BloomSettings {
    /// Settings for the editor's bloom intensity in [0, 1]
    pub fn from_intensity(intensity: f32) -> Self {
        Self {
            strength: intensity * constants::STRENGTH_SCALE,
            radius: constants::RADIUS,
            threshold: constants::THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("the bloom pipeline could not be created: {0}")]
    Pipeline(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PostProcessError {
    #[error("missing {0}")]
    MissingInput(&'static str),

    #[error("bloom failed to load: {0}")]
    Load(#[from] LoadError),

    #[error("post-processing panicked: {0}")]
    Panicked(String),

    #[error("the GPU rejected post-processing: {0}")]
    Gpu(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostProcessState {
    /// Not run yet
    #[default]
    Pending,
    Active,
    /// Off for the rest of the session
    Disabled { reason: String },
}

/// What post-processing needs in order to run
/// Record the scope of this frame's post work and report any scope,
/// from this frame or an earlier one, that has come back with an error.
pub fn check_submission(watch: &mut ErrorWatch, check: ScopeCheck) -> Result<(), PostProcessError> {
    watch.watch(check);
    match watch.poll() {
        Some(message) => Err(PostProcessError::Gpu(message)),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostInputs {
    pub has_device: bool,
    pub has_scene: bool,
    pub has_camera: bool,
    pub width: u32,
    pub height: u32,
}

impl PostInputs {
    /// First missing input, if any
    pub fn missing(&self) -> Option<&'static str> {
        if !self.has_device {
            Some("rendering device")
        } else if !self.has_scene {
            Some("scene")
        } else if !self.has_camera {
            Some("camera")
        } else if self.width == 0 || self.height == 0 {
            Some("viewport size")
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct PostProcessGuard {
    state: PostProcessState,
}

impl PostProcessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PostProcessState {
        &self.state
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, PostProcessState::Disabled { .. })
    }

    pub fn disabled_reason(&self) -> Option<&str> {
        match &self.state {
            PostProcessState::Disabled { reason } => Some(reason),
            _ => None,
        }
    }

    /// Turn post-processing off for the session. The first reason wins.
    pub fn disable(&mut self, error: PostProcessError) {
        if self.is_disabled() {
            return;
        }
        let reason = error.to_string();
        tracing::warn!("Post-processing disabled: {}", reason);
        self.state = PostProcessState::Disabled { reason };
    }

    /// Draw one frame: always `base`, then `post` unless disabled.
    ///
    /// Returns true if `post` ran to completion.
    pub fn render_frame<B, P>(&mut self, inputs: &PostInputs, base: B, post: P) -> bool
    where
        B: FnOnce(),
        P: FnOnce() -> Result<(), PostProcessError>,
    {
        base();

        if self.is_disabled() {
            return false;
        }
        if let Some(missing) = inputs.missing() {
            self.disable(PostProcessError::MissingInput(missing));
            return false;
        }

        match catch_unwind(AssertUnwindSafe(post)) {
            Ok(Ok(())) => {
                if self.state == PostProcessState::Pending {
                    tracing::info!("Post-processing active");
                    self.state = PostProcessState::Active;
                }
                true
            }
            Ok(Err(e)) => {
                self.disable(e);
                false
            }
            Err(payload) => {
                self.disable(PostProcessError::Panicked(panic_message(payload.as_ref())));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> PostInputs {
        PostInputs {
            has_device: true,
            has_scene: true,
            has_camera: true,
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_bloom_settings() {
        let settings = BloomSettings::from_intensity(0.7);
        assert!((settings.strength - 1.4).abs() < 1e-6);
        assert_eq!(settings.radius, 0.4);
        assert_eq!(settings.threshold, 0.85);
    }

    #[test]
    fn test_success_activates() {
        let mut guard = PostProcessGuard::new();
        assert!(guard.render_frame(&inputs(), || {}, || Ok(())));
        assert_eq!(guard.state(), &PostProcessState::Active);
    }

    #[test]
    fn test_panic_disables_but_base_still_renders() {
        let mut guard = PostProcessGuard::new();
        let mut base_calls = 0;

        let ran = guard.render_frame(
            &inputs(),
            || base_calls += 1,
            || -> Result<(), PostProcessError> { panic!("composer exploded") },
        );

        assert!(!ran);
        assert_eq!(base_calls, 1);
        let reason = guard.disabled_reason().unwrap();
        assert!(!reason.is_empty());
        assert!(reason.contains("composer exploded"));
    }

    #[test]
    fn test_missing_inputs_disable() {
        let mut guard = PostProcessGuard::new();
        let mut post_calls = 0;
        let zero_sized = PostInputs {
            width: 0,
            ..inputs()
        };

        guard.render_frame(&zero_sized, || {}, || {
            post_calls += 1;
            Ok(())
        });

        assert_eq!(post_calls, 0);
        assert_eq!(guard.disabled_reason(), Some("missing viewport size"));
    }

    #[test]
    fn test_disablement_is_monotonic() {
        let mut guard = PostProcessGuard::new();
        guard.render_frame(&inputs(), || {}, || {
            Err(PostProcessError::Load(LoadError::Pipeline("no blending".into())))
        });
        assert!(guard.is_disabled());

        let mut base_calls = 0;
        let mut post_calls = 0;
        for _ in 0..3 {
            guard.render_frame(&inputs(), || base_calls += 1, || {
                post_calls += 1;
                Ok(())
            });
        }
        assert_eq!(base_calls, 3);
        assert_eq!(post_calls, 0);
        assert!(guard.disabled_reason().unwrap().contains("no blending"));

        guard.disable(PostProcessError::MissingInput("camera"));
        assert!(guard.disabled_reason().unwrap().contains("no blending"));
    }

    #[test]
    fn test_gpu_validation_error_disables() {
        let mut guard = PostProcessGuard::new();
        let mut watch = ErrorWatch::new();

        let clean = guard.render_frame(&inputs(), || {}, || {
            check_submission(&mut watch, ScopeCheck::resolved(None))
        });
        assert!(clean);
        assert_eq!(guard.state(), &PostProcessState::Active);

        let mut base_calls = 0;
        let ran = guard.render_frame(&inputs(), || base_calls += 1, || {
            check_submission(
                &mut watch,
                ScopeCheck::resolved(Some("render pipeline is invalid".into())),
            )
        });
        assert!(!ran);
        assert_eq!(base_calls, 1);
        assert!(guard.disabled_reason().unwrap().contains("render pipeline is invalid"));
    }

    #[test]
    fn test_missing_input_order() {
        let none = PostInputs {
            has_device: false,
            has_scene: false,
            has_camera: false,
            width: 0,
            height: 0,
        };
        assert_eq!(none.missing(), Some("rendering device"));
        assert_eq!(inputs().missing(), None);
    }
}
