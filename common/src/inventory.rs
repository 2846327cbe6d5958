//! # Inventory Data Model
//!
//! The fixed column schema, the per-host record shaped against it, and the
//! aggregate outcome of a sweep.

mod outcome;
mod schema;

pub use outcome::{SweepFailure, SweepResult};
pub use schema::{FIELD_SCHEMA, IP_FIELD, InventoryRecord};
