//! # Sweep Engine
//!
//! * [`transport`]: one HTTP request against the inventory endpoint.
//! * [`retry`]: the per-address attempt state machine.
//! * [`client`]: an inventory query for one address, retries included.
//! * [`sweep`]: bounded fan-out across a whole address list.
//! * [`report`]: CSV and error-log rendering.

pub mod client;
pub mod report;
pub mod retry;
pub mod sweep;
pub mod transport;
