// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates healthwait.yml template files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, HealthCheckSpec, TaskConfig};

/// Write a `healthwait.yml` with default values into `dir`.
///
/// Returns the path written.
pub fn init_config(dir: &Path, url: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = TaskConfig::template();
    if let Some(u) = url {
        config.url = Some(u.to_string());
    }

    // Refuse to write a template that would not load.
    HealthCheckSpec::from_config(&config)?;

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}

fn generate_template_yaml(config: &TaskConfig) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    format!(
        r#"# Endpoint serving the JSON health document
url: {}
# Dot-separated path to the status attribute
attribute: {}
# Expected value (compared case-insensitively)
status: {}
# Seconds between polls
delay: {}
# Seconds before giving up
timeout: {}
# Optional cap on a single request, e.g. 5s
# request_timeout: 5s
"#,
        field(&config.url),
        field(&config.attribute),
        field(&config.status),
        field(&config.delay),
        field(&config.timeout),
    )
}
