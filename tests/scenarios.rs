use std::collections::VecDeque;

use elevatorbank::elevator_logic::elevator::{Elevator, Motion};
use elevatorbank::elevator_logic::request::{HallCall, Heading};
use elevatorbank::manager::task_allocator::DropReason;
use elevatorbank::manager::{Bank, RoundEvent};

fn calls(list: &[(u8, Heading, u8)]) -> VecDeque<HallCall> {
    list.iter().map(|&(o, h, d)| HallCall::new(o, h, d)).collect()
}

fn none() -> VecDeque<HallCall> {
    VecDeque::new()
}

/// Checks the invariants that must hold after every round.
fn assert_invariants(bank: &Bank) {
    for (idx, car) in bank.elevators().iter().enumerate() {
        assert_eq!(car.is_idle(), car.target().is_none(), "car {} idle/target mismatch", idx);
        assert_eq!(car.is_idle(), car.heading().is_none(), "car {} idle/heading mismatch", idx);
        assert!(car.floor >= 1 && car.floor <= bank.max_floor(), "car {} left the building: {}", idx, car.floor);
        if let Motion::Moving { heading, target } = car.motion {
            match heading {
                Heading::Up => assert!(target > car.floor),
                Heading::Down => assert!(target < car.floor),
            }
        }
    }
}

#[test]
fn scenario_a_single_car_serves_one_request() {
    let mut bank = Bank::new(1, 7);
    let mut source = calls(&[(5, Heading::Up, 7)]);

    // round 1 takes the call and starts moving towards floor 5
    bank.run_round(&mut source);
    assert_eq!(bank.elevators()[0].heading(), Some(Heading::Up));
    assert_eq!(bank.elevators()[0].target(), Some(5));

    // after 4 rounds the car stands on floor 5
    for _ in 0..3 {
        bank.run_round(&mut source);
        assert_invariants(&bank);
    }
    assert_eq!(bank.round(), 4);
    assert_eq!(bank.elevators()[0].floor, 5);
    assert!(bank.elevators()[0].is_idle());
    assert_eq!(bank.statistics().served, 0);

    // round 5: picked up on floor 5, issued in round 1
    let report = bank.run_round(&mut source);
    assert!(report.events.iter().any(|e| matches!(e, RoundEvent::PickedUp { car: 0, .. })));
    assert_eq!(bank.statistics().served, 1);
    assert_eq!(bank.statistics().average_wait(), 4.0);
    assert_eq!(bank.elevators()[0].target(), Some(7));
    assert!(bank.board().is_empty());

    // round 6 reaches 7 and goes idle
    let report = bank.run_round(&mut source);
    assert!(report.events.contains(&RoundEvent::Arrived { car: 0, floor: 7 }));
    assert_eq!(bank.elevators()[0], Elevator::at(7));
    assert_invariants(&bank);
}

#[test]
fn scenario_b_passing_car_claims_without_reassignment() {
    let mut bank = Bank::with_elevators(vec![Elevator::moving(2, 6)], 7);
    let mut source = calls(&[(4, Heading::Up, 5)]);

    let report = bank.run_round(&mut source);
    assert!(report.events.iter().any(|e| matches!(e, RoundEvent::PassThrough { car: 0, .. })));
    assert!(bank.board().get(4, Heading::Up).unwrap().claimed);
    assert_eq!(bank.elevators()[0].target(), Some(6));
    assert_eq!(bank.elevators()[0].floor, 3);

    // reaches floor 4 at the end of round 2
    bank.run_round(&mut none());
    assert_eq!(bank.elevators()[0].floor, 4);
    assert!(bank.board().get(4, Heading::Up).is_some());

    // round 3: opportunistic pickup keeps target 6
    let report = bank.run_round(&mut none());
    assert!(report.events.iter().any(|e| matches!(e, RoundEvent::PickedUp { car: 0, .. })));
    assert!(bank.board().is_empty());
    assert_eq!(bank.elevators()[0].heading(), Some(Heading::Up));
    assert_eq!(bank.elevators()[0].target(), Some(6));
    assert_eq!(bank.statistics().served, 1);
    assert_eq!(bank.statistics().total_wait_rounds, 2);
}

#[test]
fn scenario_c_tie_between_idle_cars_goes_to_first_car() {
    let mut bank = Bank::with_elevators(vec![Elevator::at(7), Elevator::at(1)], 7);
    let report = bank.run_round(&mut calls(&[(4, Heading::Down, 1)]));

    assert!(report.events.iter().any(|e| matches!(e, RoundEvent::Assigned { car: 0, .. })));
    assert_eq!(bank.elevators()[0].heading(), Some(Heading::Down));
    assert!(bank.elevators()[1].is_idle());

    let mut bank = Bank::with_elevators(vec![Elevator::at(1), Elevator::at(7)], 7);
    let report = bank.run_round(&mut calls(&[(4, Heading::Down, 1)]));

    assert!(report.events.iter().any(|e| matches!(e, RoundEvent::Assigned { car: 0, .. })));
    assert_eq!(bank.elevators()[0].heading(), Some(Heading::Up));
    assert!(bank.elevators()[1].is_idle());
}

#[test]
fn scenario_d_out_of_range_request_is_dropped() {
    let mut bank = Bank::new(2, 7);
    let report = bank.run_round(&mut calls(&[(8, Heading::Down, 1)]));

    assert!(report.events.iter().any(|e| matches!(
        e,
        RoundEvent::Dropped { reason: DropReason::OriginOutOfRange, .. }
    )));
    assert!(bank.board().is_empty());
    assert_eq!(bank.elevators(), &[Elevator::at(1), Elevator::at(1)]);
}

#[test]
fn unclaimed_request_survives_until_a_car_frees_up() {
    let mut bank = Bank::with_elevators(vec![Elevator::moving(1, 4)], 7);
    let mut source = calls(&[(2, Heading::Down, 1)]);

    // car passes floor 2 going up, can not take a down call
    bank.run_round(&mut source);
    for _ in 0..2 {
        assert!(bank.board().get(2, Heading::Down).is_some());
        assert!(!bank.board().get(2, Heading::Down).unwrap().claimed);
        bank.run_round(&mut none());
        assert_invariants(&bank);
    }

    // car is idle at 4 now, next sweep sends it down
    assert!(bank.elevators()[0].is_idle());
    bank.run_round(&mut none());
    assert!(bank.board().get(2, Heading::Down).unwrap().claimed);

    for _ in 0..10 {
        bank.run_round(&mut none());
        assert_invariants(&bank);
    }
    assert_eq!(bank.statistics().served, 1);
    assert!(bank.board().is_empty());
    assert_eq!(bank.elevators()[0], Elevator::at(1));
}

#[test]
fn busy_bank_keeps_invariants_and_serves_everything() {
    let mut bank = Bank::new(3, 10);
    let mut source = calls(&[
        (5, Heading::Up, 9),
        (3, Heading::Down, 1),
        (10, Heading::Down, 2),
        (7, Heading::Up, 8),
        (2, Heading::Up, 6),
        (9, Heading::Down, 4),
        (4, Heading::Up, 10),
        (6, Heading::Down, 1),
    ]);

    for _ in 0..80 {
        bank.run_round(&mut source);
        assert_invariants(&bank);
    }

    assert!(source.is_empty());
    assert!(bank.board().is_empty(), "left on board: {:?}", bank.board().unclaimed());
    assert_eq!(bank.statistics().served, 8);
    assert!(bank.elevators().iter().all(|car| car.is_idle()));
}

#[test]
fn second_call_on_same_slot_overwrites_the_first() {
    let mut bank = Bank::with_elevators(vec![Elevator::moving(1, 2)], 7);
    let mut source = calls(&[(5, Heading::Down, 1), (5, Heading::Down, 3)]);

    bank.run_round(&mut source);
    bank.run_round(&mut source);

    let entry = bank.board().get(5, Heading::Down).unwrap();
    assert_eq!(entry.request.destination, 3);
    assert_eq!(entry.request.issued_at_round, 2);
    assert_eq!(bank.board().len(), 1);
}
