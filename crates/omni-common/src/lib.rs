//! # Omni Common
//!
//! Shared types, errors, logging, and the text formatting core for Omni Bot.
//!
//! Everything in this crate is free of I/O apart from logging setup: the odds
//! converter, the block builders and the message packer are pure functions
//! that the command layer feeds with provider data.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chunking;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use chunking::*;
pub use error::*;
pub use formatting::*;
pub use logging::*;
pub use models::*;
pub use types::*;
pub use utils::*;
