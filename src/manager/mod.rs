//! The dispatcher: owns the cars, the pending board and the statistics, and
//! drives the bank one round at a time.
//!
//! # A round
//! 1. Every car looks at the board slot on its own floor and takes a matching
//!    request (idle cars: down before up, moving cars: their own direction only).
//! 2. Every unclaimed request on the board goes through the dispatch policy
//!    again, by ascending floor, up before down.
//! 3. At most one new call is taken from the [RequestSource] and dispatched.
//! 4. Every car moves one floor.
//!
//! [Bank::run_round] is the only way to mutate a bank, so a round is atomic to
//! everything outside this module.

pub mod board;
pub mod statistics;
pub mod task_allocator;

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;

use crate::bank_view::{BankView, CarView};
use crate::config::SimConfig;
use crate::elevator_logic::elevator::Elevator;
use crate::elevator_logic::request::{Floor, Heading, Request};
use crate::intake::RequestSource;
use crate::print;

use board::PendingBoard;
use statistics::Statistics;
use task_allocator::{assign_request, Assignment, DropReason};

/// Something that happened during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// A new call was taken in from the request source
    Received {
        /// The call, stamped with this round
        request: Request,
    },
    /// A car took a request while standing on its origin floor
    PickedUp {
        /// Index of the car
        car: usize,
        /// The request that was picked up
        request: Request,
    },
    /// An idle car was committed to a request on another floor
    Assigned {
        /// Index of the car
        car: usize,
        /// The request it is heading for
        request: Request,
    },
    /// A request was claimed for a car that will pass its floor
    PassThrough {
        /// Index of the passing car
        car: usize,
        /// The claimed request
        request: Request,
    },
    /// No car could take the request this round
    Waiting {
        /// The request left on the board
        request: Request,
    },
    /// A request was refused
    Dropped {
        /// The refused request
        request: Request,
        /// Why
        reason: DropReason,
    },
    /// A car reached its target and went idle
    Arrived {
        /// Index of the car
        car: usize,
        /// The floor it stopped at
        floor: Floor,
    },
}

/// Everything that happened in one round, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundReport {
    /// The round number, starting at 1
    pub round: u64,
    /// Events in the order they happened
    pub events: Vec<RoundEvent>,
}

/// The simulated elevator bank.
#[derive(Debug, Clone)]
pub struct Bank {
    elevators: Vec<Elevator>,
    board: PendingBoard,
    stats: Statistics,
    round: u64,
}

impl Bank {
    /// `elevator_count` idle cars on the ground floor of a building with floors `1..=max_floor`.
    pub fn new(elevator_count: usize, max_floor: Floor) -> Self {
        Self::with_elevators(vec![Elevator::new(); elevator_count], max_floor)
    }

    /// A bank built from a validated [SimConfig].
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.elevator_count, config.max_floor)
    }

    /// A bank with cars in the given states. Mostly useful to set up a scenario.
    pub fn with_elevators(elevators: Vec<Elevator>, max_floor: Floor) -> Self {
        Self {
            elevators,
            board: PendingBoard::new(max_floor),
            stats: Statistics::default(),
            round: 0,
        }
    }

    /// The cars, in index order
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// The pending board
    pub fn board(&self) -> &PendingBoard {
        &self.board
    }

    /// Wait-time statistics so far
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// The last completed round. 0 before the first round.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Highest floor
    pub fn max_floor(&self) -> Floor {
        self.board.max_floor()
    }

    /// Runs one full round, taking at most one call from `source`.
    pub fn run_round<S: RequestSource + ?Sized>(&mut self, source: &mut S) -> RoundReport {
        self.round += 1;
        let mut report = RoundReport { round: self.round, events: Vec::new() };

        self.pick_up_at_current_floors(&mut report);

        for request in self.board.unclaimed() {
            self.dispatch(request, &mut report);
        }

        if let Some(call) = source.next_request() {
            let request = call.issue(self.round);
            report.events.push(RoundEvent::Received { request });
            self.dispatch(request, &mut report);
        }

        for (car, elevator) in self.elevators.iter_mut().enumerate() {
            if elevator.move_once() {
                report.events.push(RoundEvent::Arrived { car, floor: elevator.floor });
            }
        }

        report
    }

    /// Step 1 of a round: cars take what is waiting on their own floor.
    fn pick_up_at_current_floors(&mut self, report: &mut RoundReport) {
        for (car, elevator) in self.elevators.iter_mut().enumerate() {
            let servable: &[Heading] = match elevator.heading() {
                None => &[Heading::Down, Heading::Up],
                Some(Heading::Up) => &[Heading::Up],
                Some(Heading::Down) => &[Heading::Down],
            };

            let found = servable
                .iter()
                .find_map(|&heading| self.board.take(elevator.floor, heading));

            if let Some(entry) = found {
                let request = entry.request;
                elevator.handle(&request, self.round, &mut self.stats);
                report.events.push(RoundEvent::PickedUp { car, request });
            }
        }
    }

    /// Runs the dispatch policy for `request` and records the outcome.
    fn dispatch(&mut self, request: Request, report: &mut RoundReport) {
        let outcome = assign_request(request, &mut self.elevators, &mut self.board, &mut self.stats, self.round);
        let event = match outcome {
            Assignment::Dropped(reason) => RoundEvent::Dropped { request, reason },
            Assignment::PassThrough { car } => RoundEvent::PassThrough { car, request },
            Assignment::Assigned { car, picked_up: true } => RoundEvent::PickedUp { car, request },
            Assignment::Assigned { car, picked_up: false } => RoundEvent::Assigned { car, request },
            Assignment::Pending => RoundEvent::Waiting { request },
        };
        report.events.push(event);
    }

    /// A read-only snapshot of the bank.
    pub fn view(&self) -> BankView {
        BankView {
            round: self.round,
            max_floor: self.max_floor(),
            cars: self
                .elevators
                .iter()
                .enumerate()
                .map(|(id, e)| CarView { id, floor: e.floor, heading: e.heading(), target: e.target() })
                .collect(),
            pending: self.board.entries().copied().collect(),
            served: self.stats.served,
            average_wait: self.stats.average_wait(),
        }
    }
}

/// Drives `bank` forever (or for `max_rounds` rounds), one round per `period`.
///
/// After each round the report is logged and a fresh [BankView] is published on
/// `view_tx`. Returns the bank when the round limit is reached.
pub async fn run_dispatcher<S: RequestSource>(
    mut bank: Bank,
    mut source: S,
    view_tx: watch::Sender<BankView>,
    period: Duration,
    max_rounds: Option<u64>,
) -> Bank {
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    loop {
        ticker.tick().await;

        let report = bank.run_round(&mut source);
        log_report(&report);
        // Ingen mottakar er ok, printeren kan vere slått av
        let _ = view_tx.send(bank.view());

        if max_rounds.is_some_and(|max| bank.round() >= max) {
            return bank;
        }
    }
}

/// Logs every event of a round with a suitable level.
pub fn log_report(report: &RoundReport) {
    for event in &report.events {
        match event {
            RoundEvent::Received { request } => {
                print::info(format!("Round {}: new request {}", report.round, request));
            }
            RoundEvent::PickedUp { car, request } => {
                print::ok(format!(
                    "Round {}: car {} picked up {} after {} rounds",
                    report.round,
                    car,
                    request,
                    report.round.saturating_sub(request.issued_at_round)
                ));
            }
            RoundEvent::Assigned { car, request } => {
                print::info(format!("Round {}: car {} sent to floor {}", report.round, car, request.origin));
            }
            RoundEvent::PassThrough { car, request } => {
                print::info(format!(
                    "Round {}: car {} will pass floor {} going {}",
                    report.round, car, request.origin, request.heading
                ));
            }
            RoundEvent::Waiting { request } => {
                print::warn(format!("Round {}: no car available for {}", report.round, request));
            }
            RoundEvent::Dropped { request, reason } => {
                print::warn(format!("Round {}: dropped {} ({:?})", report.round, request, reason));
            }
            RoundEvent::Arrived { car, floor } => {
                print::info(format!("Round {}: car {} arrived at floor {}", report.round, car, floor));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevator_logic::request::HallCall;
    use std::collections::VecDeque;

    fn no_calls() -> VecDeque<HallCall> {
        VecDeque::new()
    }

    #[test]
    fn idle_car_prefers_down_over_up_on_its_floor() {
        let mut bank = Bank::with_elevators(vec![Elevator::at(4)], 7);
        bank.board.post(HallCall::new(4, Heading::Up, 6).issue(0));
        bank.board.post(HallCall::new(4, Heading::Down, 2).issue(0));

        let report = bank.run_round(&mut no_calls());

        assert_eq!(bank.elevators()[0].heading(), Some(Heading::Down));
        assert!(bank.board().get(4, Heading::Down).is_none());
        assert!(report.events.iter().any(|e| matches!(e, RoundEvent::PickedUp { car: 0, .. })));
        // the up call is still there and now has nobody idle to go to
        assert!(bank.board().get(4, Heading::Up).is_some());
    }

    #[test]
    fn moving_car_ignores_calls_in_the_other_direction() {
        let mut bank = Bank::with_elevators(vec![Elevator::moving(3, 6)], 7);
        bank.board.post(HallCall::new(3, Heading::Down, 1).issue(0));

        bank.run_round(&mut no_calls());

        assert!(bank.board().get(3, Heading::Down).is_some());
        assert_eq!(bank.elevators()[0].target(), Some(6));
        assert_eq!(bank.statistics().served, 0);
    }

    #[test]
    fn only_one_call_is_taken_per_round() {
        let mut bank = Bank::new(2, 7);
        let mut calls = VecDeque::from(vec![HallCall::new(3, Heading::Up, 5), HallCall::new(6, Heading::Down, 2)]);

        bank.run_round(&mut calls);
        assert_eq!(calls.len(), 1);

        bank.run_round(&mut calls);
        assert!(calls.is_empty());
    }

    #[test]
    fn top_floor_requests_are_retried() {
        let mut bank = Bank::with_elevators(vec![Elevator::moving(1, 3)], 7);
        let mut calls = VecDeque::from(vec![HallCall::new(7, Heading::Down, 1)]);

        let first = bank.run_round(&mut calls);
        assert!(first.events.iter().any(|e| matches!(e, RoundEvent::Waiting { .. })));

        // car arrives at 3 in round 2 and is idle in round 3
        bank.run_round(&mut no_calls());
        let third = bank.run_round(&mut no_calls());
        assert!(third.events.iter().any(|e| matches!(e, RoundEvent::Assigned { car: 0, .. })));
        assert_eq!(bank.elevators()[0].heading(), Some(Heading::Up));
    }

    #[test]
    fn view_reflects_bank() {
        let mut bank = Bank::new(2, 7);
        bank.run_round(&mut VecDeque::from(vec![HallCall::new(5, Heading::Up, 7)]));

        let view = bank.view();
        assert_eq!(view.round, 1);
        assert_eq!(view.max_floor, 7);
        assert_eq!(view.cars.len(), 2);
        assert_eq!(view.cars[0], CarView { id: 0, floor: 2, heading: Some(Heading::Up), target: Some(5) });
        assert_eq!(view.cars[1], CarView { id: 1, floor: 1, heading: None, target: None });
        assert_eq!(view.pending.len(), 1);
        assert!(view.pending[0].claimed);
        assert_eq!(view.average_wait, 0.0);
    }

    #[tokio::test]
    async fn dispatcher_runs_bounded_rounds_and_publishes_views() {
        let bank = Bank::new(1, 7);
        let (view_tx, view_rx) = watch::channel(bank.view());
        let calls = VecDeque::from(vec![HallCall::new(3, Heading::Up, 4)]);

        let bank = run_dispatcher(bank, calls, view_tx, Duration::from_millis(1), Some(4)).await;

        assert_eq!(bank.round(), 4);
        let view = view_rx.borrow().clone();
        assert_eq!(view.round, 4);
        assert_eq!(view.served, 1);
        assert_eq!(view.cars[0].floor, 4);
    }
}
