// ABOUTME: Probe double that replays scripted responses on a virtual clock.
// ABOUTME: Records when each request was issued so tests can assert on timing.

use async_trait::async_trait;
use healthwait::clock::ManualClock;
use healthwait::probe::{HealthProbe, ProbeError};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::time::Duration;

pub struct ScriptedProbe {
    clock: ManualClock,
    script: Mutex<VecDeque<Result<Value, ProbeError>>>,
    last: Mutex<Option<Result<Value, ProbeError>>>,
    latency: Duration,
    calls: Mutex<Vec<Call>>,
}

#[derive(Debug, Clone)]
pub struct Call {
    /// Virtual time at which the request was issued.
    pub at: Duration,
    pub timeout: Duration,
}

impl ScriptedProbe {
    /// Replay `script` in order; the last entry repeats once the script runs out.
    pub fn new(clock: &ManualClock, script: Vec<Result<Value, ProbeError>>) -> Self {
        Self {
            clock: clock.clone(),
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request takes `latency` of virtual time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_times(&self) -> Vec<Duration> {
        self.calls().into_iter().map(|c| c.at).collect()
    }
}

#[async_trait]
impl HealthProbe for ScriptedProbe {
    async fn fetch(&self, _url: &str, timeout: Duration) -> Result<Value, ProbeError> {
        self.calls.lock().push(Call {
            at: self.clock.elapsed(),
            timeout,
        });
        self.clock.advance(self.latency);

        let next = self.script.lock().pop_front();
        let mut last = self.last.lock();
        match next {
            Some(response) => {
                *last = Some(response.clone());
                response
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(ProbeError::Request("empty script".to_string()))),
        }
    }
}

pub fn status(value: &str) -> Result<Value, ProbeError> {
    Ok(json!({ "status": value }))
}

pub fn refused() -> Result<Value, ProbeError> {
    Err(ProbeError::Connect {
        address: "127.0.0.1:1".to_string(),
        reason: "Connection refused (os error 111)".to_string(),
    })
}

pub fn not_json() -> Result<Value, ProbeError> {
    Err(ProbeError::Decode {
        status: 200,
        reason: "expected value at line 1 column 1".to_string(),
    })
}
