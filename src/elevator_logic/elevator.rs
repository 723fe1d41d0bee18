//! The per-car motion state machine.
//!
//! A car is either [Motion::Idle] or [Motion::Moving] towards a target floor.
//! It only changes state through [Elevator::handle] (take on or extend a
//! commitment) and [Elevator::move_once] (advance one floor per round).
//!
//! # States
//! - `Idle`: no commitment, the car stays where it is.
//! - `Moving { heading: Up, target }`: `target > floor`.
//! - `Moving { heading: Down, target }`: `target < floor`.
//!
//! # Example
//! ```
//! use elevatorbank::elevator_logic::elevator::Elevator;
//! use elevatorbank::elevator_logic::request::{HallCall, Heading};
//! use elevatorbank::manager::statistics::Statistics;
//!
//! let mut car = Elevator::new();
//! let mut stats = Statistics::default();
//!
//! car.handle(&HallCall::new(3, Heading::Up, 6).issue(1), 1, &mut stats);
//! assert_eq!(car.target(), Some(3));
//!
//! car.move_once();
//! car.move_once();
//! assert!(car.is_idle());
//! assert_eq!(car.floor, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::config;
use crate::elevator_logic::request::{Floor, Heading, Request};
use crate::manager::statistics::Statistics;

/// What a car is currently committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// No commitment
    Idle,
    /// Travelling towards `target`
    Moving {
        /// Direction of travel
        heading: Heading,
        /// The floor the car is committed to reach
        target: Floor,
    },
}

/// One car in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// The floor the car is on
    pub floor: Floor,
    /// Current commitment
    pub motion: Motion,
}

impl Default for Elevator {
    fn default() -> Self {
        Self::new()
    }
}

impl Elevator {
    /// A car idle at the ground floor.
    pub fn new() -> Self {
        Self::at(config::GROUND_FLOOR)
    }

    /// A car idle at `floor`.
    pub fn at(floor: Floor) -> Self {
        Self { floor, motion: Motion::Idle }
    }

    /// A car at `floor` already moving towards `target`.
    /// Gives an idle car if the two floors are equal.
    pub fn moving(floor: Floor, target: Floor) -> Self {
        Self { floor, motion: commitment(floor, target) }
    }

    /// True if the car has no commitment.
    pub fn is_idle(&self) -> bool {
        self.motion == Motion::Idle
    }

    /// Direction of travel, `None` when idle.
    pub fn heading(&self) -> Option<Heading> {
        match self.motion {
            Motion::Idle => None,
            Motion::Moving { heading, .. } => Some(heading),
        }
    }

    /// Committed floor, `None` when idle.
    pub fn target(&self) -> Option<Floor> {
        match self.motion {
            Motion::Idle => None,
            Motion::Moving { target, .. } => Some(target),
        }
    }

    /// Takes on `request`, or folds it into the current commitment.
    ///
    /// - Idle: head for the origin, or straight for the destination if the car is
    ///   already at the origin.
    /// - Moving down: the target can only move further down.
    /// - Moving up: the target can only move further up.
    ///
    /// If the car stands on the request's origin this counts as a pickup and is
    /// recorded in `stats`. Returns whether a pickup happened.
    pub fn handle(&mut self, request: &Request, round: u64, stats: &mut Statistics) -> bool {
        match self.motion {
            Motion::Idle => {
                let target = if self.floor != request.origin {
                    request.origin
                } else {
                    request.destination
                };
                self.motion = commitment(self.floor, target);
            }
            Motion::Moving { heading: Heading::Down, target } => {
                self.motion = Motion::Moving {
                    heading: Heading::Down,
                    target: target.min(request.destination),
                };
            }
            Motion::Moving { heading: Heading::Up, target } => {
                self.motion = Motion::Moving {
                    heading: Heading::Up,
                    target: target.max(request.destination),
                };
            }
        }

        let picked_up = self.floor == request.origin;
        if picked_up {
            stats.record_pickup(request, round);
        }
        picked_up
    }

    /// Advances one floor in the direction of travel and drops the commitment on
    /// arrival. Idle cars stay put. Returns true if the car arrived this step.
    pub fn move_once(&mut self) -> bool {
        let Motion::Moving { heading, target } = self.motion else {
            return false;
        };

        match heading {
            Heading::Up => self.floor = self.floor.saturating_add(1),
            Heading::Down => self.floor = self.floor.saturating_sub(1),
        }

        if self.floor == target {
            self.motion = Motion::Idle;
            return true;
        }
        false
    }

    /// Whether this car can absorb `request` without a dedicated assignment,
    /// either because it is already heading for the request's floor or because it
    /// will pass that floor in the requested direction.
    ///
    /// Idle cars always answer `false`.
    pub fn can_pick_up(&self, request: &Request) -> bool {
        let Motion::Moving { heading, target } = self.motion else {
            return false;
        };

        if target == request.origin {
            return true;
        }

        match heading {
            Heading::Down => {
                self.floor > request.origin
                    && request.heading == Heading::Down
                    && target < request.origin
            }
            Heading::Up => {
                self.floor < request.origin
                    && request.heading == Heading::Up
                    && target > request.origin
            }
        }
    }
}

/// The motion a car at `floor` gets when committed to `target`.
fn commitment(floor: Floor, target: Floor) -> Motion {
    if target > floor {
        Motion::Moving { heading: Heading::Up, target }
    } else if target < floor {
        Motion::Moving { heading: Heading::Down, target }
    } else {
        Motion::Idle
    }
}
