//! Transient toast notifications

/// How long a notice stays up, in seconds
pub const NOTICE_LIFETIME: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    /// Degraded but usable; stays until dismissed
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    /// UI time the notice was posted at
    pub created: f64,
}

/// Queue of notices shown in the corner of the window
#[derive(Debug, Default)]
pub struct Notifications {
    notices: Vec<Notice>,
    next_id: u64,
    /// Time of the last frame, stamped on new notices
    now: f64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        match kind {
            NoticeKind::Error => tracing::error!("{}", message),
            NoticeKind::Warning => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        self.notices.push(Notice {
            id,
            kind,
            message,
            created: self.now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, message)
    }

    pub fn warn(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|notice| notice.id != id);
    }

    /// Advance the clock and drop notices older than [`NOTICE_LIFETIME`].
    /// Warnings are only removed by [`dismiss`](Self::dismiss).
    pub fn expire(&mut self, now: f64) {
        self.now = now;
        self.notices.retain(|notice| {
            notice.kind == NoticeKind::Warning || now - notice.created < NOTICE_LIFETIME
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notifications = Notifications::new();
        let first = notifications.success("PNG exported successfully");
        let second = notifications.error("Export failed");
        assert_ne!(first, second);
        assert_eq!(notifications.notices().len(), 2);

        notifications.dismiss(first);
        assert_eq!(notifications.notices().len(), 1);
        assert_eq!(notifications.notices()[0].kind, NoticeKind::Error);
    }

    #[test]
    fn test_notices_expire() {
        let mut notifications = Notifications::new();
        notifications.expire(10.0);
        notifications.info("Animation export started");

        notifications.expire(10.0 + NOTICE_LIFETIME - 0.5);
        assert!(!notifications.is_empty());
        notifications.expire(10.0 + NOTICE_LIFETIME);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_warnings_stay_until_dismissed() {
        let mut notifications = Notifications::new();
        let warning = notifications.warn("Visual effects disabled");
        notifications.info("Exported");

        notifications.expire(NOTICE_LIFETIME * 10.0);
        assert_eq!(notifications.notices().len(), 1);
        assert_eq!(notifications.notices()[0].kind, NoticeKind::Warning);

        notifications.dismiss(warning);
        assert!(notifications.is_empty());
    }

    proptest! {
        #[test]
        fn prop_only_fresh_notices_survive(
            posted in proptest::collection::vec(0.0f64..100.0, 1..20),
            wait in 0.0f64..10.0,
        ) {
            let mut sorted = posted.clone();
            sorted.sort_by(f64::total_cmp);
            let now = sorted[sorted.len() - 1] + wait;

            let mut notifications = Notifications::new();
            for at in &sorted {
                notifications.expire(*at);
                notifications.info("Exported");
            }
            notifications.expire(now);

            let fresh = sorted
                .iter()
                .filter(|at| now - **at < NOTICE_LIFETIME)
                .count();
            prop_assert_eq!(notifications.notices().len(), fresh);
        }
    }
}
