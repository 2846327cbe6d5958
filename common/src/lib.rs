//! # Shared building blocks
//!
//! Types every other crate in the workspace agrees on: the run [`config`],
//! typed [`error`]s, the inventory [`inventory`] schema and outcomes, and the
//! IPv4 [`network::range`] expander.

pub mod config;
pub mod error;
pub mod inventory;
pub mod network;

mod macros;

pub use macros::{STATUS_TARGET, SUCCESS_TARGET};

#[doc(hidden)]
pub use tracing as __tracing;
