//! # Omni Bot
//!
//! Discord bot for betting lines, injury reports, AI answers and stock charts.
//!
//! This is the main binary crate: it wires the configured providers into the
//! command framework and runs the Discord client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
