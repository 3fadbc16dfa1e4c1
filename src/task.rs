// ABOUTME: Health check task executor: config in, ExecutionResult out.
// ABOUTME: Validates before polling and converts engine panics into reported failures.

use serde::Serialize;

use crate::config::{HealthCheckSpec, TaskConfig};
use crate::error::Result;
use crate::poll::{Outcome, Poller};

pub const SUCCESS_MESSAGE: &str = "Health check succeeded";
pub const FAILURE_MESSAGE: &str = "Health check failed";

/// What the task reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    /// Why the check did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Underlying fault when the task itself broke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ExecutionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            detail: None,
            cause: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            detail: None,
            cause: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl From<Outcome> for ExecutionResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Matched => ExecutionResult::success(SUCCESS_MESSAGE),
            Outcome::NotMatched(reason) => {
                ExecutionResult::failure(FAILURE_MESSAGE).with_detail(reason)
            }
            Outcome::Errored(cause) => {
                ExecutionResult::failure(FAILURE_MESSAGE).with_detail(cause.to_string())
            }
        }
    }
}

/// Runs a health check described by a [`TaskConfig`].
#[derive(Debug, Clone)]
pub struct HealthCheckTask {
    poller: Poller,
}

impl HealthCheckTask {
    pub fn new(poller: Poller) -> Self {
        Self { poller }
    }

    /// Validate `config`, then poll until the endpoint matches or times out.
    ///
    /// # Errors
    ///
    /// Configuration problems are returned before any request is made. Once
    /// polling starts, every failure is reported through the
    /// [`ExecutionResult`] instead.
    pub async fn execute(&self, config: &TaskConfig) -> Result<ExecutionResult> {
        let spec = HealthCheckSpec::from_config(config)?;
        Ok(self.run(spec).await)
    }

    /// Poll with an already-built spec.
    pub async fn run(&self, spec: HealthCheckSpec) -> ExecutionResult {
        tracing::info!(
            url = spec.url(),
            attribute = spec.attribute_path(),
            expected = spec.expected_status(),
            interval = ?spec.poll_interval(),
            timeout = ?spec.timeout(),
            "starting health check"
        );

        let poller = self.poller.clone();
        let handle = tokio::spawn(async move { poller.run(&spec).await });

        match handle.await {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "unexpected error occurred when executing health check"
                );
                ExecutionResult::failure(FAILURE_MESSAGE).with_cause(e.to_string())
            }
        }
    }
}

impl Default for HealthCheckTask {
    fn default() -> Self {
        Self::new(Poller::http())
    }
}
