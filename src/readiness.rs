//! Startup readiness gate
//!
//! Blocks server initialization until the database is reachable and the
//! schema exists, retrying connectivity failures up to a fixed bound.
//! Exhausting the bound is not fatal: the gate reports `Failed` and the
//! caller keeps serving in a degraded state.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Gate progression: `NotStarted → Attempting(n) → Ready | Failed`
///
/// `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    NotStarted,
    Attempting(u32),
    Ready,
    Failed,
}

/// Outcome of a single gate attempt
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Backend not reachable yet; the gate waits and retries
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// Any other error class; propagated immediately
    #[error(transparent)]
    Fatal(#[from] AppError),
}

/// Retry bounds for the gate
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(3),
        }
    }
}

/// Terminal gate outcome with the number of attempts consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateReport {
    pub state: GateState,
    pub attempts: u32,
}

impl GateReport {
    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }
}

/// Bounded-retry readiness gate
pub struct ReadinessGate {
    policy: RetryPolicy,
    state: GateState,
}

impl ReadinessGate {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: GateState::NotStarted,
        }
    }

    /// Current gate state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Run the gate to a terminal state
    ///
    /// Calls `attempt` once per attempt (1-based). `Unreachable` outcomes are
    /// logged and retried after `policy.interval`; `Fatal` outcomes propagate
    /// without consuming further attempts. Returns a `Failed` report, not an
    /// error, once `policy.max_attempts` attempts are exhausted.
    pub async fn run<F, Fut>(&mut self, mut attempt: F) -> Result<GateReport, AppError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<(), GateError>>,
    {
        for n in 1..=self.policy.max_attempts {
            self.state = GateState::Attempting(n);

            match attempt(n).await {
                Ok(()) => {
                    self.state = GateState::Ready;
                    tracing::info!(attempt = n, "Database ready");
                    return Ok(GateReport {
                        state: self.state,
                        attempts: n,
                    });
                }
                Err(GateError::Unreachable(reason)) => {
                    tracing::warn!(
                        attempt = n,
                        max_attempts = self.policy.max_attempts,
                        reason = %reason,
                        "Database not ready, retrying"
                    );
                    if n < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.interval).await;
                    }
                }
                Err(GateError::Fatal(err)) => return Err(err),
            }
        }

        self.state = GateState::Failed;
        tracing::error!(
            attempts = self.policy.max_attempts,
            "Database failed to start"
        );
        Ok(GateReport {
            state: self.state,
            attempts: self.policy.max_attempts,
        })
    }
}
