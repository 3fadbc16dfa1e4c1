// ABOUTME: Deadline-driven poll loop: probe, extract, compare until match or timeout.
// ABOUTME: Recoverable failures only influence the retry decision and the final Outcome.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::HealthCheckSpec;
use crate::extract::{AttributeError, extract};
use crate::probe::{HealthProbe, HttpProbe, ProbeError};

/// Stand-in deadline for timeouts too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Terminal result of one poll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The attribute matched the expected status.
    Matched,
    /// The endpoint answered, but never with the expected status.
    NotMatched(String),
    /// The last attempt failed before an attribute could be read.
    Errored(ProbeError),
}

impl Outcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Matched => f.write_str("matched"),
            Outcome::NotMatched(reason) => write!(f, "not matched: {reason}"),
            Outcome::Errored(cause) => write!(f, "errored: {cause}"),
        }
    }
}

/// Why a single attempt did not match.
#[derive(Debug)]
enum AttemptFailure {
    Probe(ProbeError),
    Attribute(AttributeError),
    Mismatch { observed: String, expected: String },
}

impl AttemptFailure {
    fn into_outcome(self) -> Outcome {
        match self {
            AttemptFailure::Probe(e) => Outcome::Errored(e),
            AttemptFailure::Attribute(e) => Outcome::NotMatched(e.to_string()),
            mismatch @ AttemptFailure::Mismatch { .. } => {
                Outcome::NotMatched(mismatch.to_string())
            }
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Probe(e) => write!(f, "{e}"),
            AttemptFailure::Attribute(e) => write!(f, "{e}"),
            AttemptFailure::Mismatch { observed, expected } => {
                write!(f, "status is '{observed}', expected '{expected}'")
            }
        }
    }
}

/// Polls a health endpoint until it reports the expected status.
#[derive(Clone)]
pub struct Poller {
    probe: Arc<dyn HealthProbe>,
    clock: Arc<dyn Clock>,
}

impl Poller {
    pub fn new(probe: Arc<dyn HealthProbe>, clock: Arc<dyn Clock>) -> Self {
        Self { probe, clock }
    }

    /// Poller using plain HTTP and wall-clock time.
    pub fn http() -> Self {
        Self::new(Arc::new(HttpProbe::new()), Arc::new(SystemClock))
    }

    /// Poll until `spec` is satisfied or its timeout elapses.
    ///
    /// A match returns immediately. Otherwise attempts are spaced by the poll
    /// interval (shortened to fit the deadline) and stop once the deadline
    /// has passed or the attempt ceiling is reached.
    pub async fn run(&self, spec: &HealthCheckSpec) -> Outcome {
        let started = self.clock.now();
        let deadline = started
            .checked_add(spec.timeout())
            .unwrap_or_else(|| started + FAR_FUTURE);
        let max_attempts = spec.max_attempts();
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(self.clock.now());
            let request_timeout = spec.request_timeout(remaining);

            let failure = match self.attempt(spec, request_timeout).await {
                Ok(()) => {
                    info!(
                        url = spec.url(),
                        attempt,
                        elapsed = ?self.clock.now().duration_since(started),
                        "health check matched"
                    );
                    return Outcome::Matched;
                }
                Err(failure) => failure,
            };

            let now = self.clock.now();
            if now >= deadline || attempt >= max_attempts {
                warn!(
                    url = spec.url(),
                    attempts = attempt,
                    elapsed = ?now.duration_since(started),
                    reason = %failure,
                    "health check gave up"
                );
                return failure.into_outcome();
            }

            let pause = spec.poll_interval().min(deadline - now);
            debug!(
                url = spec.url(),
                attempt,
                reason = %failure,
                retry_in = ?pause,
                "health check not satisfied yet"
            );
            self.clock.sleep(pause).await;
        }
    }

    async fn attempt(
        &self,
        spec: &HealthCheckSpec,
        request_timeout: Duration,
    ) -> Result<(), AttemptFailure> {
        let document = self
            .probe
            .fetch(spec.url(), request_timeout)
            .await
            .map_err(AttemptFailure::Probe)?;

        let observed =
            extract(&document, spec.attribute_path()).map_err(AttemptFailure::Attribute)?;

        if spec.matches(&observed) {
            Ok(())
        } else {
            Err(AttemptFailure::Mismatch {
                observed,
                expected: spec.expected_status().to_string(),
            })
        }
    }
}

impl fmt::Debug for Poller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller").finish_non_exhaustive()
    }
}
