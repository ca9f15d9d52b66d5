//! Circuit breaker guarding calls to a remote service.
//!
//! The breaker is a three-state machine:
//!
//! - **Closed**: calls pass through and their outcomes are recorded in a
//!   sliding window. When the failure rate over the window reaches the
//!   configured threshold the breaker opens.
//! - **Open**: calls fail immediately with [`RemoteError::Unavailable`]
//!   without touching the network. Once the open timeout has elapsed the next
//!   call moves the breaker to half-open.
//! - **Half-open**: a limited number of probe calls are let through. Any
//!   failure reopens the breaker; enough consecutive successes close it.
//!
//! Each remote client owns its breaker. Clones share state, so every
//! concurrent caller of one client observes the same breaker.

use super::{RemoteError, RemoteResult};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Tuning parameters for a [`CircuitBreaker`].
///
/// # Examples
///
/// ```
/// use atelier::remote::BreakerConfig;
///
/// let config = BreakerConfig::default();
/// assert!(config.validate().is_ok());
///
/// let strict = BreakerConfig::strict();
/// assert!(strict.minimum_calls < config.minimum_calls);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Failure percentage (1–100) at which the breaker opens.
    pub failure_rate_threshold: u8,
    /// Number of most recent outcomes considered while closed.
    pub sliding_window_size: u32,
    /// Minimum outcomes in the window before the rate is evaluated.
    pub minimum_calls: u32,
    /// Seconds the breaker stays open before admitting probes.
    pub open_timeout_secs: u64,
    /// Probe calls admitted while half-open; this many successes close it.
    pub half_open_permitted_calls: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50,
            sliding_window_size: 20,
            minimum_calls: 10,
            open_timeout_secs: 30,
            half_open_permitted_calls: 3,
        }
    }
}

impl BreakerConfig {
    /// Creates a configuration that trips quickly and recovers cautiously.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            failure_rate_threshold: 25,
            sliding_window_size: 10,
            minimum_calls: 4,
            open_timeout_secs: 60,
            half_open_permitted_calls: 5,
        }
    }

    /// Returns the open timeout as a [`Duration`].
    #[must_use]
    pub const fn open_timeout(&self) -> Duration {
        Duration::from_secs(self.open_timeout_secs)
    }

    /// Checks that the settings describe a usable breaker.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBreakerConfig`] naming the first offending setting.
    pub const fn validate(&self) -> Result<(), InvalidBreakerConfig> {
        if self.failure_rate_threshold == 0 || self.failure_rate_threshold > 100 {
            return Err(InvalidBreakerConfig::ThresholdOutOfRange(
                self.failure_rate_threshold,
            ));
        }
        if self.sliding_window_size == 0 {
            return Err(InvalidBreakerConfig::EmptyWindow);
        }
        if self.minimum_calls == 0 || self.minimum_calls > self.sliding_window_size {
            return Err(InvalidBreakerConfig::MinimumCallsOutOfRange {
                minimum_calls: self.minimum_calls,
                window: self.sliding_window_size,
            });
        }
        if self.half_open_permitted_calls == 0 {
            return Err(InvalidBreakerConfig::NoProbeCalls);
        }
        Ok(())
    }
}

/// Errors returned when validating a [`BreakerConfig`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidBreakerConfig {
    /// The failure threshold is not a percentage in 1–100.
    #[error("failure rate threshold must be within 1..=100, got {0}")]
    ThresholdOutOfRange(u8),

    /// The sliding window holds no outcomes.
    #[error("sliding window size must be positive")]
    EmptyWindow,

    /// The minimum call count cannot be satisfied by the window.
    #[error("minimum calls {minimum_calls} must be within 1..={window}")]
    MinimumCallsOutOfRange {
        /// Configured minimum calls.
        minimum_calls: u32,
        /// Configured window size.
        window: u32,
    },

    /// Half-open state would never admit a probe.
    #[error("half-open permitted calls must be positive")]
    NoProbeCalls,
}

/// Externally visible breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Calls pass through.
    Closed,
    /// Calls are rejected without a network attempt.
    Open,
    /// Probe calls test whether the service has recovered.
    HalfOpen,
}

impl CircuitState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PermitKind {
    Normal,
    Probe,
}

#[derive(Debug)]
enum BreakerState {
    Closed { outcomes: VecDeque<Outcome> },
    Open { opened_at: DateTime<Utc> },
    HalfOpen { in_flight: u32, successes: u32 },
}

impl BreakerState {
    const fn closed() -> Self {
        Self::Closed {
            outcomes: VecDeque::new(),
        }
    }

    const fn public(&self) -> CircuitState {
        match self {
            Self::Closed { .. } => CircuitState::Closed,
            Self::Open { .. } => CircuitState::Open,
            Self::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }
}

/// Circuit breaker for one remote service.
#[derive(Clone)]
pub struct CircuitBreaker {
    service: Arc<str>,
    config: BreakerConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    state: Arc<Mutex<BreakerState>>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CircuitBreaker")
            .field("service", &self.service)
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CircuitBreaker {
    /// Creates a closed breaker for the named service.
    #[must_use]
    pub fn new<C>(service: impl Into<String>, config: BreakerConfig, clock: Arc<C>) -> Self
    where
        C: Clock + Send + Sync + 'static,
    {
        let service: String = service.into();
        Self {
            service: Arc::from(service),
            config,
            clock,
            state: Arc::new(Mutex::new(BreakerState::closed())),
        }
    }

    /// Returns the name of the guarded service.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the breaker configuration.
    #[must_use]
    pub const fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.lock().public()
    }

    /// Forces the breaker open, starting a fresh open timeout.
    pub fn trip(&self) {
        let opened_at = self.clock.utc();
        *self.lock() = BreakerState::Open { opened_at };
        warn!(service = %self.service, "circuit breaker forced open");
    }

    /// Forces the breaker closed and clears recorded outcomes.
    pub fn reset(&self) {
        *self.lock() = BreakerState::closed();
        info!(service = %self.service, "circuit breaker reset");
    }

    /// Runs `operation` under the breaker.
    ///
    /// The future is not polled when the breaker rejects the call, so no
    /// network attempt is made.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Unavailable`] when the breaker is open (or
    /// half-open with every probe slot taken), otherwise the result of the
    /// operation.
    pub async fn call<T, F>(&self, operation: F) -> RemoteResult<T>
    where
        F: Future<Output = RemoteResult<T>>,
    {
        let permit = self.acquire()?;
        let result = operation.await;
        let outcome = match &result {
            Err(RemoteError::Call { .. }) => Outcome::Failure,
            Ok(_) | Err(RemoteError::Unavailable { .. }) => Outcome::Success,
        };
        permit.settle(outcome);
        result
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unavailable(&self) -> RemoteError {
        RemoteError::Unavailable {
            service: self.service.to_string(),
        }
    }

    fn open_timeout(&self) -> TimeDelta {
        TimeDelta::from_std(self.config.open_timeout()).unwrap_or(TimeDelta::MAX)
    }

    fn acquire(&self) -> RemoteResult<CallPermit<'_>> {
        let mut state = self.lock();
        let now = self.clock.utc();
        match &mut *state {
            BreakerState::Closed { .. } => Ok(CallPermit::new(self, PermitKind::Normal)),
            BreakerState::Open { opened_at } => {
                if now.signed_duration_since(*opened_at) < self.open_timeout() {
                    return Err(self.unavailable());
                }
                *state = BreakerState::HalfOpen {
                    in_flight: 1,
                    successes: 0,
                };
                info!(service = %self.service, "circuit breaker half-open, admitting probe");
                Ok(CallPermit::new(self, PermitKind::Probe))
            }
            BreakerState::HalfOpen {
                in_flight,
                successes,
            } => {
                if in_flight.saturating_add(*successes) >= self.config.half_open_permitted_calls {
                    return Err(self.unavailable());
                }
                *in_flight = in_flight.saturating_add(1);
                Ok(CallPermit::new(self, PermitKind::Probe))
            }
        }
    }

    fn record(&self, kind: PermitKind, outcome: Outcome) {
        let mut state = self.lock();
        let now = self.clock.utc();
        let next = match (&mut *state, kind) {
            (BreakerState::Closed { outcomes }, PermitKind::Normal) => {
                outcomes.push_back(outcome);
                let window = usize::try_from(self.config.sliding_window_size).unwrap_or(usize::MAX);
                while outcomes.len() > window {
                    outcomes.pop_front();
                }
                self.exceeds_failure_rate(outcomes)
                    .then_some(BreakerState::Open { opened_at: now })
            }
            (
                BreakerState::HalfOpen {
                    in_flight,
                    successes,
                },
                PermitKind::Probe,
            ) => {
                *in_flight = in_flight.saturating_sub(1);
                match outcome {
                    Outcome::Failure => Some(BreakerState::Open { opened_at: now }),
                    Outcome::Success => {
                        *successes = successes.saturating_add(1);
                        (*successes >= self.config.half_open_permitted_calls)
                            .then(BreakerState::closed)
                    }
                }
            }
            // Outcome of a call admitted under an earlier state.
            _ => None,
        };

        if let Some(next_state) = next {
            match next_state.public() {
                CircuitState::Open => {
                    warn!(service = %self.service, "circuit breaker opened");
                }
                CircuitState::Closed => {
                    info!(service = %self.service, "circuit breaker closed after recovery");
                }
                CircuitState::HalfOpen => {}
            }
            *state = next_state;
        }
    }

    fn release_probe(&self) {
        let mut state = self.lock();
        if let BreakerState::HalfOpen { in_flight, .. } = &mut *state {
            *in_flight = in_flight.saturating_sub(1);
        }
    }

    fn exceeds_failure_rate(&self, outcomes: &VecDeque<Outcome>) -> bool {
        let calls = u64::try_from(outcomes.len()).unwrap_or(u64::MAX);
        if calls < u64::from(self.config.minimum_calls) {
            return false;
        }
        let failures = outcomes
            .iter()
            .filter(|outcome| **outcome == Outcome::Failure)
            .count();
        let failures = u64::try_from(failures).unwrap_or(u64::MAX);
        failures.saturating_mul(100)
            >= u64::from(self.config.failure_rate_threshold).saturating_mul(calls)
    }
}

/// Admission ticket for one call; a probe that is never settled (because its
/// future was dropped) frees its half-open slot.
struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    kind: PermitKind,
    settled: bool,
}

impl<'a> CallPermit<'a> {
    const fn new(breaker: &'a CircuitBreaker, kind: PermitKind) -> Self {
        Self {
            breaker,
            kind,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Outcome) {
        self.settled = true;
        self.breaker.record(self.kind, outcome);
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.kind == PermitKind::Probe {
            self.breaker.release_probe();
        }
    }
}
