//! # Omni Charts
//!
//! Stock price chart rendering for Omni Bot.
//!
//! Charts are drawn with plotters into an in-memory bitmap and encoded as
//! PNG, ready to attach to a Discord reply.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod stock_chart;
pub mod traits;
pub mod utils;

pub use stock_chart::*;
pub use traits::*;
pub use utils::*;
