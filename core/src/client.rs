//! Inventory query for a single address.
//!
//! Wraps an [`InventoryTransport`] with the fixed retry policy and shapes a
//! successful JSON body into an [`InventoryRecord`].

use std::collections::HashMap;

use async_trait::async_trait;
use invsweep_common::config::{Config, RetryPolicy};
use invsweep_common::inventory::{FIELD_SCHEMA, InventoryRecord, SweepFailure};
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::retry;
use crate::transport::{AttemptError, HttpTransport, InventoryTransport};

/// Anything able to resolve one address into a record or a terminal failure.
#[async_trait]
pub trait InventoryProbe: Send + Sync {
    async fn query(&self, address: &str) -> Result<InventoryRecord, SweepFailure>;
}

pub struct InventoryClient<T> {
    transport: T,
    policy: RetryPolicy,
}

impl InventoryClient<HttpTransport> {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(HttpTransport::from_config(cfg)?, cfg.retry))
    }
}

impl<T: InventoryTransport> InventoryClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }
}

#[async_trait]
impl<T: InventoryTransport> InventoryProbe for InventoryClient<T> {
    async fn query(&self, address: &str) -> Result<InventoryRecord, SweepFailure> {
        let max_attempts: u32 = self.policy.max_attempts;
        let outcome: Result<Box<RawValue>, String> = retry::run_with_retry(self.policy, |attempt| async move {
            let result: Result<Box<RawValue>, AttemptError> = self.transport.fetch(address).await;
            if let Err(e) = &result {
                debug!("{address}: attempt {attempt}/{max_attempts} failed: {e}");
            }
            result
        })
        .await;

        match outcome {
            Ok(body) => Ok(shape_record(address, &body)),
            Err(reason) => {
                warn!("{address}: giving up after {max_attempts} attempts: {reason}");
                Err(SweepFailure::new(address, reason))
            }
        }
    }
}

/// Projects a JSON body onto the schema. `ip` always comes from `address`;
/// a body that is not an object yields an otherwise empty record.
pub fn shape_record(address: &str, body: &RawValue) -> InventoryRecord {
    let mut record: InventoryRecord = InventoryRecord::new(address);
    let Ok(fields) = serde_json::from_str::<HashMap<String, Box<RawValue>>>(body.get()) else {
        return record;
    };

    for field in FIELD_SCHEMA.iter().skip(1) {
        if let Some(value) = fields.get(*field) {
            record.set(field, coerce(value));
        }
    }
    record
}

/// Strings are unescaped, `null` is empty, anything else keeps the exact
/// text the endpoint sent (key order, number formatting, spacing).
fn coerce(value: &RawValue) -> String {
    let text: &str = value.get();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str::<String>(text).unwrap_or_else(|_| text.to_string()),
        _ if text == "null" => String::new(),
        _ => text.to_string(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
