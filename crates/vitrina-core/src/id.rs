//! # Provisional Ids
//!
//! Client-side ids used when the remote store cannot assign one.
//!
//! Ids are derived from the wall clock in milliseconds, bumped so that they
//! are strictly increasing within a session and never collide with an id
//! already in the list:
//! ```text
//! candidate = max(now_ms, last_issued + 1)
//! while taken(candidate) { candidate += 1 }
//! ```

use chrono::Utc;

use crate::types::ProductId;

/// Monotonic generator of provisional product ids.
#[derive(Debug, Clone, Default)]
pub struct ProvisionalIds {
    last_issued: ProductId,
}

impl ProvisionalIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next id, skipping any id for which `taken` returns true.
    pub fn next(&mut self, taken: impl Fn(ProductId) -> bool) -> ProductId {
        self.next_at(Utc::now().timestamp_millis(), taken)
    }

    /// Same as [`next`](Self::next) with an explicit clock reading.
    pub fn next_at(&mut self, now_ms: i64, taken: impl Fn(ProductId) -> bool) -> ProductId {
        let mut candidate = now_ms.max(self.last_issued.saturating_add(1));
        while taken(candidate) {
            candidate = candidate.saturating_add(1);
        }
        self.last_issued = candidate;
        candidate
    }
}
