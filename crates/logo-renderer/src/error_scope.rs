//! Validation errors of individual GPU operations.
//!
//! Once the app installs an uncaptured-error handler, an invalid pipeline
//! or command buffer no longer panics. Work that may fail on its own
//! (the bloom stage) runs inside a validation scope instead, and the
//! scope's result is checked without blocking: natively it is ready at
//! once, on WebGPU it arrives a frame or two later.

use std::future::Future;
use std::pin::Pin;

use futures::FutureExt;

type ScopeFuture = Pin<Box<dyn Future<Output = Option<String>>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutcome {
    Clean,
    Failed(String),
    /// The backend has not answered yet
    Pending,
}

/// Result of one popped validation scope
pub struct ScopeCheck {
    future: Option<ScopeFuture>,
    outcome: Option<ScopeOutcome>,
}

impl ScopeCheck {
    fn from_future(future: impl Future<Output = Option<String>> + 'static) -> Self {
        Self {
            future: Some(Box::pin(future)),
            outcome: None,
        }
    }

    /// An already answered check
    pub fn resolved(error: Option<String>) -> Self {
        Self::from_future(std::future::ready(error))
    }

    /// Check the scope without waiting
    pub fn poll(&mut self) -> ScopeOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let Some(future) = self.future.as_mut() else {
            return ScopeOutcome::Clean;
        };
        match future.now_or_never() {
            Some(error) => {
                let outcome = error.map_or(ScopeOutcome::Clean, ScopeOutcome::Failed);
                self.future = None;
                self.outcome = Some(outcome.clone());
                outcome
            }
            None => ScopeOutcome::Pending,
        }
    }
}

/// Run `work` with validation errors captured instead of reported globally
pub fn validation_scope<T>(device: &wgpu::Device, work: impl FnOnce() -> T) -> (T, ScopeCheck) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = work();
    let popped = device.pop_error_scope();
    let check = ScopeCheck::from_future(async move { popped.await.map(|e| e.to_string()) });
    (value, check)
}

/// Checks still waiting for an answer
#[derive(Default)]
pub struct ErrorWatch {
    checks: Vec<ScopeCheck>,
}

impl ErrorWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, check: ScopeCheck) {
        self.checks.push(check);
    }

    pub fn pending(&self) -> usize {
        self.checks.len()
    }

    /// First failure among the answered checks. Answered checks are dropped.
    pub fn poll(&mut self) -> Option<String> {
        let mut failure = None;
        self.checks.retain_mut(|check| match check.poll() {
            ScopeOutcome::Pending => true,
            ScopeOutcome::Clean => false,
            ScopeOutcome::Failed(message) => {
                failure.get_or_insert(message);
                false
            }
        });
        failure
    }

    pub fn clear(&mut self) {
        self.checks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_check() {
        assert_eq!(ScopeCheck::resolved(None).poll(), ScopeOutcome::Clean);

        let mut failed = ScopeCheck::resolved(Some("invalid pipeline".into()));
        assert_eq!(failed.poll(), ScopeOutcome::Failed("invalid pipeline".into()));
        // answered checks keep their answer
        assert_eq!(failed.poll(), ScopeOutcome::Failed("invalid pipeline".into()));
    }

    #[test]
    fn test_unanswered_check_stays_pending() {
        let mut check = ScopeCheck::from_future(std::future::pending());
        assert_eq!(check.poll(), ScopeOutcome::Pending);
        assert_eq!(check.poll(), ScopeOutcome::Pending);
    }

    #[test]
    fn test_watch_reports_failure_and_keeps_pending() {
        let mut watch = ErrorWatch::new();
        watch.watch(ScopeCheck::resolved(None));
        watch.watch(ScopeCheck::from_future(std::future::pending()));
        watch.watch(ScopeCheck::resolved(Some("bad bind group".into())));

        assert_eq!(watch.poll(), Some("bad bind group".to_string()));
        assert_eq!(watch.pending(), 1);
        assert_eq!(watch.poll(), None);
    }
}
