//! # Omni Providers
//!
//! HTTP collaborators for Omni Bot: betting lines, injury reports, AI
//! answers and stock market data.
//!
//! Each provider sits behind an async trait from [`traits`] so the command
//! layer can be tested with mocks. The concrete clients share one
//! [`ApiClient`], which owns the connection pool, the rate limiter and the
//! retry policy. Response parsing is exposed as plain functions
//! ([`parse_markets`], [`parse_injury_report`], [`snapshot_from_chart`]) that
//! work on raw bodies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assistant;
pub mod http;
pub mod injuries;
pub mod odds;
pub mod quotes;
pub mod traits;

pub use assistant::*;
pub use http::*;
pub use injuries::*;
pub use odds::*;
pub use quotes::*;
pub use traits::*;
