//! Car-level logic: the request model and the per-car state machine.
//!
//! Nothing in here knows about other cars or the pending board. That is the
//! job of [crate::manager].

pub mod elevator;
pub mod request;
