//! Read-only snapshots of the bank, published after every round.
//!
//! The dispatcher owns the live [crate::manager::Bank]. Everything else sees the
//! bank through a [BankView] sent on a `tokio::sync::watch` channel.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config;
use crate::elevator_logic::request::{Floor, Heading};
use crate::manager::board::PendingEntry;
use crate::print;

/// Snapshot of one car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarView {
    /// Index of the car in the bank
    pub id: usize,
    /// Current floor
    pub floor: Floor,
    /// Direction of travel, `None` when idle
    pub heading: Option<Heading>,
    /// Committed floor, `None` when idle
    pub target: Option<Floor>,
}

/// Snapshot of the whole bank after a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankView {
    /// The round this snapshot was taken after. 0 before the first round.
    pub round: u64,
    /// Highest floor
    pub max_floor: Floor,
    /// Every car, in index order
    pub cars: Vec<CarView>,
    /// Requests still on the board, by ascending floor
    pub pending: Vec<PendingEntry>,
    /// Requests picked up so far
    pub served: u64,
    /// Average rounds from issue to pickup. 0 when nothing has been served.
    pub average_wait: f64,
}

impl BankView {
    /// The cars standing on `floor`
    pub fn cars_on(&self, floor: Floor) -> impl Iterator<Item = &CarView> + '_ {
        self.cars.iter().filter(move |car| car.floor == floor)
    }

    /// The pending entry at `(floor, heading)`, if any
    pub fn pending_at(&self, floor: Floor, heading: Heading) -> Option<&PendingEntry> {
        self.pending
            .iter()
            .find(|entry| entry.request.origin == floor && entry.request.heading == heading)
    }
}

/// Returns a copy of the latest snapshot on the watch.
pub fn get_view(view_rx: &watch::Receiver<BankView>) -> BankView {
    view_rx.borrow().clone()
}

/// Waits for the next snapshot and stores it in `view`.
///
/// Returns `false` once the dispatcher has dropped its sender.
pub async fn update_view(view_rx: &mut watch::Receiver<BankView>, view: &mut BankView) -> bool {
    if view_rx.changed().await.is_err() {
        return false;
    }
    *view = view_rx.borrow_and_update().clone();
    true
}

/// Prints every new snapshot until the dispatcher goes away.
pub async fn print_views(mut view_rx: watch::Receiver<BankView>) {
    let mut view = get_view(&view_rx);
    while update_view(&mut view_rx, &mut view).await {
        print::bank_view(&view);
        if config::is_on(&config::PRINT_JSON_ON) {
            print::bank_view_json(&view);
        }
    }
    print::warn("Dispatcher stopped publishing, printer exits".to_string());
}
