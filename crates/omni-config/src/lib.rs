//! # Omni Config
//!
//! Type-safe configuration for Omni Bot.
//!
//! Settings come from an optional TOML file, are overridden by environment
//! variables, and are validated once at startup. The loaded [`Config`] is
//! immutable afterwards and shared behind an `Arc`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
