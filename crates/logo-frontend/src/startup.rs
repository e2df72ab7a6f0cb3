//! Startup failure detection
//!
//! For the first seconds after launch every panic and explicitly
//! reported error is recorded, and the first one replaces the whole UI
//! with a diagnostic fallback screen. Known harmless noise is ignored,
//! and so is anything reported after the startup window closed.

use std::sync::Arc;

use parking_lot::Mutex;

/// Length of the startup window in seconds
pub const STARTUP_WINDOW: f64 = 5.0;

/// Messages that never count as a startup failure (matched case-insensitively)
const BENIGN_PATTERNS: [&str; 2] = ["resizeobserver loop", "script error"];

fn is_benign(message: &str) -> bool {
    let message = message.to_lowercase();
    BENIGN_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}

/// A failure recorded during startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFailure {
    pub message: String,
    /// Source location, when known
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartupStatus {
    #[default]
    Starting,
    /// Window closed without failure
    Ready,
    Failed(StartupFailure),
}

#[derive(Debug)]
pub struct StartupMonitor {
    started_at: f64,
    status: StartupStatus,
}

impl StartupMonitor {
    pub fn new(started_at: f64) -> Self {
        Self {
            started_at,
            status: StartupStatus::Starting,
        }
    }

    pub fn status(&self) -> &StartupStatus {
        &self.status
    }

    pub fn failure(&self) -> Option<&StartupFailure> {
        match &self.status {
            StartupStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Close the window once it has elapsed
    pub fn tick(&mut self, now: f64) {
        if self.status == StartupStatus::Starting && now - self.started_at >= STARTUP_WINDOW {
            tracing::info!("Startup phase complete");
            self.status = StartupStatus::Ready;
        }
    }

    /// Record a failure reported at time `at`. Returns true if it was recorded.
    pub fn report_at(&mut self, message: &str, location: Option<String>, at: f64) -> bool {
        self.tick(at);
        if self.status != StartupStatus::Starting {
            return false;
        }
        if is_benign(message) {
            tracing::info!("Ignoring non-fatal error during startup: {}", message);
            return false;
        }

        tracing::error!(
            "Startup failure: {} ({})",
            message,
            location.as_deref().unwrap_or("unknown location")
        );
        self.status = StartupStatus::Failed(StartupFailure {
            message: message.to_string(),
            location,
        });
        true
    }

    pub fn report(&mut self, message: &str, location: Option<String>) -> bool {
        self.report_at(message, location, now_seconds())
    }

    /// Start over, as after a reload
    pub fn restart(&mut self, now: f64) {
        self.started_at = now;
        self.status = StartupStatus::Starting;
    }
}

pub type SharedStartupMonitor = Arc<Mutex<StartupMonitor>>;

pub fn create_startup_monitor() -> SharedStartupMonitor {
    Arc::new(Mutex::new(StartupMonitor::new(now_seconds())))
}

/// Route panics into `monitor`, keeping the previous hook's output
pub fn install_panic_hook(monitor: SharedStartupMonitor) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));

        // The panicking thread may already hold the lock
        if let Some(mut monitor) = monitor.try_lock() {
            monitor.report(&message, location);
        }
        previous(info);
    }));
}

/// Seconds on a monotonic-enough clock
#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_wins() {
        let mut monitor = StartupMonitor::new(0.0);
        assert!(monitor.report_at("device creation failed", Some("app.rs:10".into()), 1.0));
        assert!(!monitor.report_at("second failure", None, 2.0));

        let failure = monitor.failure().unwrap();
        assert_eq!(failure.message, "device creation failed");
        assert_eq!(failure.location.as_deref(), Some("app.rs:10"));
    }

    #[test]
    fn test_benign_noise_is_ignored() {
        let mut monitor = StartupMonitor::new(0.0);
        assert!(!monitor.report_at(
            "ResizeObserver loop completed with undelivered notifications",
            None,
            0.5
        ));
        assert!(!monitor.report_at("Script error.", None, 0.5));
        assert_eq!(monitor.status(), &StartupStatus::Starting);
    }

    #[test]
    fn test_late_reports_are_ignored() {
        let mut monitor = StartupMonitor::new(10.0);
        monitor.tick(12.0);
        assert_eq!(monitor.status(), &StartupStatus::Starting);

        assert!(!monitor.report_at("too late", None, 10.0 + STARTUP_WINDOW));
        assert_eq!(monitor.status(), &StartupStatus::Ready);
    }

    #[test]
    fn test_restart_reopens_window() {
        let mut monitor = StartupMonitor::new(0.0);
        monitor.report_at("boom", None, 1.0);
        monitor.restart(100.0);
        assert_eq!(monitor.status(), &StartupStatus::Starting);
        assert!(monitor.report_at("boom again", None, 101.0));
    }
}
