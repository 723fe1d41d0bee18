#![warn(missing_docs)]
//! # elevatorbank
//!
//! Round-based simulation of a bank of elevator cars serving hall calls.
//!
//! Calls arrive asynchronously on a named pipe, wait on a per-floor board and are
//! handed to cars by a greedy dispatcher: a car that will pass the floor anyway
//! gets it for free, otherwise the nearest idle car is sent. Every round each car
//! moves one floor.
//!
//! ## Overview
//! - **config**: Default parameters, the runtime [config::SimConfig] and print flags.
//! - **init**: Command line parsing.
//! - **print**: Colour coded logging and the bank table.
//! - **elevator_logic**: Requests and the per-car state machine.
//! - **manager**: The pending board, the dispatch policy, statistics and the round driver.
//! - **intake**: Reading calls from a pipe or stdin into the dispatcher.
//! - **bank_view**: Read-only snapshots published after each round.

/// Global variables and runtime configuration
pub mod config;

/// Startup functions
pub mod init;

/// Print functions with color coding
pub mod print;

pub mod elevator_logic;

pub mod manager;

pub mod intake;

pub mod bank_view;
