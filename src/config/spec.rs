// ABOUTME: Immutable description of one health check run.
// ABOUTME: Built once from TaskConfig; owns the attempt ceiling and request timeout rules.

use std::time::Duration;

use super::{Property, TaskConfig, validate};
use crate::error::{Error, Result};
use crate::probe::Target;

/// Lower bound for a single request's timeout.
///
/// An attempt scheduled exactly at the deadline has no remaining time left;
/// it still gets this long to complete.
pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckSpec {
    url: String,
    attribute_path: String,
    expected_status: String,
    poll_interval: Duration,
    timeout: Duration,
    request_timeout: Option<Duration>,
}

impl HealthCheckSpec {
    pub fn new(
        url: impl Into<String>,
        attribute_path: impl Into<String>,
        expected_status: impl Into<String>,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            attribute_path: attribute_path.into(),
            expected_status: expected_status.into(),
            poll_interval,
            timeout,
            request_timeout: None,
        }
    }

    /// Cap every request at `timeout`, even when more time remains.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validate `config` and convert it into a spec.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for blank required properties,
    /// `Error::InvalidNumber` for a non-integer delay or timeout and
    /// `Error::InvalidUrl` when the url is not an absolute `http://` URL.
    pub fn from_config(config: &TaskConfig) -> Result<Self> {
        validate(config).map_err(Error::Validation)?;

        let url = required(config, Property::Url);
        Target::parse(url).map_err(|reason| Error::InvalidUrl {
            url: url.to_string(),
            reason,
        })?;

        let spec = Self::new(
            url,
            required(config, Property::Attribute),
            required(config, Property::Status),
            seconds(config, Property::Delay)?,
            seconds(config, Property::Timeout)?,
        );

        Ok(match config.request_timeout {
            Some(timeout) => spec.with_request_timeout(timeout),
            None => spec,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn attribute_path(&self) -> &str {
        &self.attribute_path
    }

    pub fn expected_status(&self) -> &str {
        &self.expected_status
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upper bound on the number of attempts: `floor(timeout / interval) + 1`,
    /// or exactly one when the interval is zero or longer than the timeout.
    pub fn max_attempts(&self) -> u64 {
        if self.poll_interval.is_zero() || self.poll_interval > self.timeout {
            return 1;
        }
        let ratio = self.timeout.as_nanos() / self.poll_interval.as_nanos();
        u64::try_from(ratio).unwrap_or(u64::MAX).saturating_add(1)
    }

    /// Timeout for a request issued with `remaining` time left before the deadline.
    pub fn request_timeout(&self, remaining: Duration) -> Duration {
        let timeout = remaining.max(MIN_REQUEST_TIMEOUT);
        match self.request_timeout {
            Some(cap) => timeout.min(cap),
            None => timeout,
        }
    }

    /// Case-insensitive comparison against the expected status.
    pub fn matches(&self, observed: &str) -> bool {
        observed
            .chars()
            .flat_map(char::to_lowercase)
            .eq(self.expected_status.chars().flat_map(char::to_lowercase))
    }
}

fn required(config: &TaskConfig, property: Property) -> &str {
    // Every required property has a default, so this only falls back to ""
    // if that invariant is ever broken.
    config.value(property).unwrap_or_default()
}

fn seconds(config: &TaskConfig, property: Property) -> Result<Duration> {
    let raw = config.value(property).unwrap_or_default();
    let secs: i64 = raw.parse().map_err(|_| Error::InvalidNumber {
        property,
        value: raw.to_string(),
    })?;
    Ok(Duration::from_secs(u64::try_from(secs).unwrap_or(0)))
}
