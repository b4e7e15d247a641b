//! Alien Sweep: a single-screen shooter against a descending alien formation.
//!
//! The library holds the whole rule set as a deterministic simulation. The
//! `alien-sweep` binary wraps it in a terminal front-end.

pub mod clock;
pub mod config;
pub mod game;

pub use clock::{Clock, TickKind};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameEvent, Hud, Overlay, Status};
