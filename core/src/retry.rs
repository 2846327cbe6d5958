//! Per-address retry state machine.
//!
//! ```text
//! Pending ──► Attempting(n) ──┬──► Succeeded
//!                  ▲          ├──► Retrying { n, reason } ──(delay)──┐
//!                  │          └──► Failed { n, reason }              │
//!                  └─────────────────────────────────────────────────┘
//! ```
//!
//! A failed attempt only becomes terminal when it was the last one allowed by
//! the [`RetryPolicy`], so the reason of the final attempt is the one kept.

use std::fmt::Display;
use std::future::Future;

use invsweep_common::config::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState<T> {
    Pending,
    Attempting(u32),
    Retrying { attempt: u32, reason: String },
    Succeeded(T),
    Failed { attempts: u32, reason: String },
}

#[derive(Debug)]
pub struct RetryMachine<T> {
    policy: RetryPolicy,
    state: AttemptState<T>,
}

impl<T> RetryMachine<T> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: AttemptState::Pending,
        }
    }

    pub fn state(&self) -> &AttemptState<T> {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            AttemptState::Succeeded(_) | AttemptState::Failed { .. }
        )
    }

    /// Moves into the next attempt and returns its 1-based number, or `None`
    /// once the machine is terminal.
    pub fn begin_attempt(&mut self) -> Option<u32> {
        let next: u32 = match &self.state {
            AttemptState::Pending => 1,
            AttemptState::Retrying { attempt, .. } => attempt + 1,
            AttemptState::Attempting(n) => *n,
            AttemptState::Succeeded(_) | AttemptState::Failed { .. } => return None,
        };

        if next > self.policy.max_attempts {
            self.state = AttemptState::Failed {
                attempts: next - 1,
                reason: "no attempts permitted".to_string(),
            };
            return None;
        }

        self.state = AttemptState::Attempting(next);
        Some(next)
    }

    /// Records the outcome of the attempt in flight.
    pub fn record<E: Display>(&mut self, outcome: Result<T, E>) {
        let AttemptState::Attempting(attempt) = self.state else {
            return;
        };

        self.state = match outcome {
            Ok(value) => AttemptState::Succeeded(value),
            Err(err) if attempt < self.policy.max_attempts => AttemptState::Retrying {
                attempt,
                reason: err.to_string(),
            },
            Err(err) => AttemptState::Failed {
                attempts: attempt,
                reason: err.to_string(),
            },
        };
    }

    /// Final outcome. A machine stopped before reaching a terminal state
    /// reports the interruption as its failure reason.
    pub fn into_outcome(self) -> Result<T, String> {
        match self.state {
            AttemptState::Succeeded(value) => Ok(value),
            AttemptState::Failed { reason, .. } => Err(reason),
            AttemptState::Retrying { attempt, reason } => Err(format!(
                "interrupted after attempt {attempt}: {reason}"
            )),
            AttemptState::Attempting(n) => Err(format!("interrupted during attempt {n}")),
            AttemptState::Pending => Err("no attempt was made".to_string()),
        }
    }
}

/// Drives `attempt` through a [`RetryMachine`], sleeping `policy.delay`
/// between attempts and never after the last one.
pub async fn run_with_retry<T, E, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, String>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut machine: RetryMachine<T> = RetryMachine::new(policy);

    loop {
        if matches!(machine.state(), AttemptState::Retrying { .. }) && !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }

        let Some(n) = machine.begin_attempt() else {
            break;
        };
        let outcome: Result<T, E> = attempt(n).await;
        machine.record(outcome);
    }

    machine.into_outcome()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
