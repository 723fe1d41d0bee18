//! The pending request board.
//!
//! One slot per (floor, heading). A slot holds at most one request; a new call
//! for an occupied slot replaces the old one. The `claimed` flag only says that
//! some car has been found for the request, the slot itself is cleared when a
//! car actually handles it.

use serde::{Deserialize, Serialize};

use crate::elevator_logic::request::{Floor, Heading, Request};

/// A request waiting on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    /// The waiting request
    pub request: Request,
    /// True once a car has been committed to it or will pass by it
    pub claimed: bool,
}

/// Per-floor, per-heading table of pending requests for floors `1..=max_floor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBoard {
    slots: Vec<[Option<PendingEntry>; 2]>,
}

impl PendingBoard {
    /// An empty board for floors `1..=max_floor`.
    pub fn new(max_floor: Floor) -> Self {
        Self { slots: vec![[None; 2]; max_floor as usize] }
    }

    /// Highest floor on the board
    pub fn max_floor(&self) -> Floor {
        self.slots.len() as Floor
    }

    /// True if `floor` has a row on the board
    pub fn contains_floor(&self, floor: Floor) -> bool {
        floor >= 1 && floor <= self.max_floor()
    }

    fn slot(&self, floor: Floor, heading: Heading) -> Option<&Option<PendingEntry>> {
        if !self.contains_floor(floor) {
            return None;
        }
        self.slots.get(floor as usize - 1).map(|row| &row[heading.index()])
    }

    fn slot_mut(&mut self, floor: Floor, heading: Heading) -> Option<&mut Option<PendingEntry>> {
        if !self.contains_floor(floor) {
            return None;
        }
        self.slots.get_mut(floor as usize - 1).map(|row| &mut row[heading.index()])
    }

    /// The entry at `(floor, heading)`, if any.
    pub fn get(&self, floor: Floor, heading: Heading) -> Option<&PendingEntry> {
        self.slot(floor, heading).and_then(|slot| slot.as_ref())
    }

    /// Puts `request` on its slot as unclaimed, replacing whatever was there.
    /// Returns false, leaving the board untouched, if the origin is off the board.
    pub fn post(&mut self, request: Request) -> bool {
        match self.slot_mut(request.origin, request.heading) {
            Some(slot) => {
                *slot = Some(PendingEntry { request, claimed: false });
                true
            }
            None => false,
        }
    }

    /// Marks the entry at `(floor, heading)` as claimed. No-op on an empty slot.
    pub fn claim(&mut self, floor: Floor, heading: Heading) {
        if let Some(Some(entry)) = self.slot_mut(floor, heading) {
            entry.claimed = true;
        }
    }

    /// Empties the slot and returns what was in it.
    pub fn take(&mut self, floor: Floor, heading: Heading) -> Option<PendingEntry> {
        self.slot_mut(floor, heading).and_then(|slot| slot.take())
    }

    /// Unclaimed requests, by ascending floor and Up before Down.
    pub fn unclaimed(&self) -> Vec<Request> {
        self.entries()
            .filter(|entry| !entry.claimed)
            .map(|entry| entry.request)
            .collect()
    }

    /// Every occupied slot, by ascending floor and Up before Down.
    pub fn entries(&self) -> impl Iterator<Item = &PendingEntry> + '_ {
        self.slots.iter().flat_map(|row| row.iter().flatten())
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// True if no request is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
