//! Reduces loaded call records to the inbound, active calls of one user.

use analyzer_core::models::CallRecord;
use tracing::debug;

/// Keeps inbound calls involving `user` that last at least `threshold`
/// seconds.
#[derive(Debug, Clone, Copy)]
pub struct CallFilter<'a> {
    user: &'a str,
    threshold: u64,
}

impl<'a> CallFilter<'a> {
    pub fn new(user: &'a str, threshold: u64) -> Self {
        Self { user, threshold }
    }

    /// Apply the direction, user and duration predicates in that order.
    ///
    /// Input order is preserved.
    pub fn apply(&self, mut records: Vec<CallRecord>) -> Vec<CallRecord> {
        debug!("Applying filters, initial rows: {}", records.len());

        records.retain(CallRecord::is_inbound);
        debug!("{} rows after 'Inbound' filter.", records.len());

        records.retain(|r| self.matches_user(r));
        debug!(
            "{} rows after user filter for '{}'.",
            records.len(),
            self.user
        );

        records.retain(|r| self.is_active(r));
        debug!(
            "{} rows after duration filter (>={}s).",
            records.len(),
            self.threshold
        );

        records
    }

    /// `true` when `record` passes all three predicates.
    pub fn matches(&self, record: &CallRecord) -> bool {
        record.is_inbound() && self.matches_user(record) && self.is_active(record)
    }

    /// Both endpoints and a non-blank `Created at` must be present, and one
    /// of the endpoints must be the user.
    fn matches_user(&self, record: &CallRecord) -> bool {
        record.caller.is_some()
            && record.callee.is_some()
            && record
                .created_at
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
            && record.involves(self.user)
    }

    fn is_active(&self, record: &CallRecord) -> bool {
        record
            .duration_seconds
            .is_some_and(|secs| secs >= self.threshold)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
