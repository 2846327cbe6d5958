//! # Sweep Coordinator
//!
//! Fans one task out per address, gated by a counting semaphore so that at
//! most `concurrency` queries run at once. A permit is held for the full retry
//! sequence of its address.
//!
//! Tasks report their completion through the [`JoinSet`]; the coordinator is
//! the only writer of the progress counter and re-assembles outcomes by input
//! index, so completion order never leaks into the result.

use std::sync::Arc;
use std::time::Instant;

use invsweep_common::inventory::{InventoryRecord, SweepFailure, SweepResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::client::InventoryProbe;

type Outcome = Result<InventoryRecord, SweepFailure>;

/// Snapshot handed to the progress callback after every finished address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepProgress {
    pub completed: usize,
    pub total: usize,
    pub last_address: String,
}

pub struct SweepCoordinator<P> {
    probe: Arc<P>,
    concurrency: usize,
}

impl<P: InventoryProbe + 'static> SweepCoordinator<P> {
    /// A zero `concurrency` is raised to one.
    pub fn new(probe: P, concurrency: usize) -> Self {
        Self::with_shared(Arc::new(probe), concurrency)
    }

    pub fn with_shared(probe: Arc<P>, concurrency: usize) -> Self {
        Self {
            probe,
            concurrency: concurrency.max(1),
        }
    }

    /// Queries every address and waits for all of them.
    ///
    /// Each address ends up either in `records` (input order) or in `failures`
    /// (input order as well), never both.
    pub async fn sweep<F>(&self, addresses: Vec<String>, mut on_progress: F) -> SweepResult
    where
        F: FnMut(&SweepProgress),
    {
        let total: usize = addresses.len();
        let started: Instant = Instant::now();
        info!("Sweeping {total} addresses, {} at a time", self.concurrency);

        let gate: Arc<Semaphore> = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<(usize, String, Outcome)> = JoinSet::new();

        for (index, address) in addresses.iter().cloned().enumerate() {
            let gate = Arc::clone(&gate);
            let probe = Arc::clone(&self.probe);
            tasks.spawn(async move {
                let outcome: Outcome = match gate.acquire_owned().await {
                    Ok(_permit) => probe.query(&address).await,
                    Err(_) => Err(SweepFailure::new(address.as_str(), "admission gate closed")),
                };
                (index, address, outcome)
            });
        }

        let mut slots: Vec<Option<Outcome>> = vec![None; total];
        let mut completed: usize = 0;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, address, outcome)) => {
                    slots[index] = Some(outcome);
                    completed += 1;
                    on_progress(&SweepProgress {
                        completed,
                        total,
                        last_address: address,
                    });
                }
                Err(e) => error!("sweep task ended abnormally: {e}"),
            }
        }

        // Addresses whose task panicked still owe exactly one outcome.
        for (slot, address) in slots.iter_mut().zip(&addresses) {
            if slot.is_none() {
                *slot = Some(Err(SweepFailure::new(address.as_str(), "sweep task aborted")));
                completed += 1;
                on_progress(&SweepProgress {
                    completed,
                    total,
                    last_address: address.clone(),
                });
            }
        }

        let mut result: SweepResult = SweepResult::default();
        for outcome in slots.into_iter().flatten() {
            match outcome {
                Ok(record) => result.records.push(record),
                Err(failure) => result.failures.push(failure),
            }
        }

        info!(
            "Sweep finished in {:.2}s: {} records, {} failures",
            started.elapsed().as_secs_f64(),
            result.records.len(),
            result.failures.len()
        );
        result
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
