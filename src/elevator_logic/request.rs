//! Requests and the wire format they arrive in.
//!
//! A hall call arrives from the outside as a text line `floor,direction,target`
//! and is parsed into a [HallCall]. When the bank takes the call in, it is stamped
//! with the current round and becomes a [Request], which is what the dispatch
//! logic and the cars work with.
//!
//! # Example
//! ```
//! use elevatorbank::elevator_logic::request::{HallCall, Heading};
//!
//! let call: HallCall = "5,up,7".parse().unwrap();
//! assert_eq!(call.heading, Heading::Up);
//!
//! let request = call.issue(3);
//! assert_eq!(request.issued_at_round, 3);
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

/// A floor number. Floors start at 1.
pub type Floor = u8;

/// The direction a call wants to travel, or a moving car is travelling in.
///
/// There is no idle variant here: an idle car is described by
/// [crate::elevator_logic::elevator::Motion::Idle], and a call without a valid
/// direction never gets past the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Heading {
    /// Towards higher floors
    Up = 0,
    /// Towards lower floors
    Down = 1,
}

impl Heading {
    /// Both headings, in board order
    pub const ALL: [Heading; 2] = [Heading::Up, Heading::Down];

    /// Column of this heading in [crate::manager::board::PendingBoard]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::Up => write!(f, "up"),
            Heading::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Heading {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Heading::Up),
            "down" => Ok(Heading::Down),
            other => Err(anyhow!("Unknown direction '{}', expected 'up' or 'down'", other)),
        }
    }
}

/// A parsed hall call, not yet taken in by the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallCall {
    /// The floor the call was made from
    pub origin: Floor,
    /// The direction the caller wants to go
    pub heading: Heading,
    /// The floor the caller wants to get to
    pub destination: Floor,
}

impl HallCall {
    /// Creates a call.
    pub fn new(origin: Floor, heading: Heading, destination: Floor) -> Self {
        Self { origin, heading, destination }
    }

    /// Stamps the call with the round it was taken in, turning it into a [Request].
    pub fn issue(self, round: u64) -> Request {
        Request {
            origin: self.origin,
            heading: self.heading,
            destination: self.destination,
            issued_at_round: round,
        }
    }
}

impl FromStr for HallCall {
    type Err = anyhow::Error;

    /// Parses `floor,direction,target`.
    ///
    /// The heading is not checked against the sign of `target - floor`,
    /// so `3,up,1` is a valid call.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 3 {
            bail!("Expected 3 comma-separated fields, got {} in '{}'", fields.len(), line.trim());
        }

        let origin = fields[0]
            .trim()
            .parse::<Floor>()
            .with_context(|| format!("Invalid origin floor '{}'", fields[0].trim()))?;
        let heading = fields[1].parse::<Heading>()?;
        let destination = fields[2]
            .trim()
            .parse::<Floor>()
            .with_context(|| format!("Invalid target floor '{}'", fields[2].trim()))?;

        Ok(HallCall::new(origin, heading, destination))
    }
}

impl fmt::Display for HallCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.origin, self.heading, self.destination)
    }
}

/// A call the bank has taken in. Immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The floor the car must stop at to pick the caller up
    pub origin: Floor,
    /// The direction the caller wants to go
    pub heading: Heading,
    /// The floor the caller is going to
    pub destination: Floor,
    /// The round the request was taken in, used for wait time statistics
    pub issued_at_round: u64,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "floor {} {} -> {} (round {})",
            self.origin, self.heading, self.destination, self.issued_at_round
        )
    }
}
