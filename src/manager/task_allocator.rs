//! Greedy dispatch policy for a single request.
//!
//! For every request the allocator tries, in order:
//! 1. to drop it if it points outside the building,
//! 2. to leave it to a car that will pass its floor anyway (pass-through),
//! 3. to commit the nearest idle car to it,
//! 4. otherwise to leave it unclaimed on the board for the next round.
//!
//! The work per request is linear in the number of cars. There is no global
//! re-optimization across requests.

use crate::elevator_logic::elevator::Elevator;
use crate::elevator_logic::request::Request;
use crate::manager::board::PendingBoard;
use crate::manager::statistics::Statistics;

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The origin floor is not on the board
    OriginOutOfRange,
    /// The destination floor is not on the board
    DestinationOutOfRange,
}

/// What the allocator did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Refused, the board is unchanged
    Dropped(DropReason),
    /// Claimed on behalf of car `car`, which will pass the origin floor
    PassThrough {
        /// Index of the passing car
        car: usize,
    },
    /// Car `car` was idle and has been committed to the request
    Assigned {
        /// Index of the committed car
        car: usize,
        /// True if the car was already on the origin floor and took the request on the spot
        picked_up: bool,
    },
    /// No car can take it this round. Left unclaimed on the board.
    Pending,
}

/// Runs the dispatch policy for `request`.
///
/// The request is (re)posted on the board as unclaimed before any car is
/// considered, so a request that no car can take stays visible to the next sweep.
/// Ties between equally distant idle cars go to the lowest index.
pub fn assign_request(
    request: Request,
    elevators: &mut [Elevator],
    board: &mut PendingBoard,
    stats: &mut Statistics,
    round: u64,
) -> Assignment {
    if !board.contains_floor(request.origin) {
        return Assignment::Dropped(DropReason::OriginOutOfRange);
    }
    if !board.contains_floor(request.destination) {
        return Assignment::Dropped(DropReason::DestinationOutOfRange);
    }

    board.post(request);

    if let Some(car) = elevators.iter().position(|e| e.can_pick_up(&request)) {
        board.claim(request.origin, request.heading);
        return Assignment::PassThrough { car };
    }

    match nearest_idle(elevators, &request) {
        Some(car) => {
            let picked_up = elevators[car].handle(&request, round, stats);
            if picked_up {
                // Already on board the car, nothing left to wait for
                board.take(request.origin, request.heading);
            } else {
                board.claim(request.origin, request.heading);
            }
            Assignment::Assigned { car, picked_up }
        }
        None => Assignment::Pending,
    }
}

/// Index of the idle car closest to the request's origin. First one wins on ties.
pub fn nearest_idle(elevators: &[Elevator], request: &Request) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (idx, elevator) in elevators.iter().enumerate().filter(|(_, e)| e.is_idle()) {
        let distance = elevator.floor.abs_diff(request.origin);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}
