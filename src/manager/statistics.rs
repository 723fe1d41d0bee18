//! Wait-time bookkeeping for served requests.
//!
//! Purely observational. Nothing in the dispatch path reads these numbers.

use serde::{Deserialize, Serialize};

use crate::elevator_logic::request::Request;

/// Accumulates how many requests were picked up and how long they waited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Requests picked up so far
    pub served: u64,
    /// Sum of rounds between issue and pickup over all served requests
    pub total_wait_rounds: u64,
}

impl Statistics {
    /// Records that `request` was picked up in `round`.
    pub fn record_pickup(&mut self, request: &Request, round: u64) {
        self.served += 1;
        self.total_wait_rounds += round.saturating_sub(request.issued_at_round);
    }

    /// Average rounds a served request waited. 0 when nothing has been served.
    pub fn average_wait(&self) -> f64 {
        if self.served == 0 {
            return 0.0;
        }
        self.total_wait_rounds as f64 / self.served as f64
    }
}
