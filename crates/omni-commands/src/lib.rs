//! # Omni Commands
//!
//! Discord slash commands for Omni Bot using the Poise framework.
//!
//! Each command splits into a builder that talks to the injected providers
//! and returns a [`CommandOutcome`], and a thin poise handler that defers the
//! interaction and sends the outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod ask;
pub mod autocomplete;
pub mod framework;
pub mod general;
pub mod reply;
pub mod sports;
pub mod stocks;

pub use ask::*;
pub use autocomplete::*;
pub use framework::*;
pub use general::*;
pub use reply::*;
pub use sports::*;
pub use stocks::*;
