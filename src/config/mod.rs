// ABOUTME: Layered task configuration for healthwait.
// ABOUTME: Merges YAML file, environment and flag values, applying property defaults.

mod deserialize;
mod init;
mod property;
mod spec;
mod validation;

pub use init::init_config;
pub use property::Property;
pub use spec::{HealthCheckSpec, MIN_REQUEST_TIMEOUT};
pub use validation::{FieldError, ValidationErrors, validate};

use crate::error::{Error, Result};
use deserialize::deserialize_text;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "healthwait.yml";
pub const CONFIG_FILENAME_ALT: &str = "healthwait.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".healthwait/config.yml";

/// Raw task properties as supplied by one or more configuration layers.
///
/// `None` means the layer did not set the property. Defaults are applied on
/// read through [`TaskConfig::value`], never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub attribute: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub delay: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub timeout: Option<String>,

    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl TaskConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "nothing set", not a parse error.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find a config file in `dir`, trying each known file name in turn.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load the config file in `dir` if there is one.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Read properties from `HEALTHWAIT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let var = |p: Property| std::env::var(p.env_var()).ok();

        let request_timeout = match var(Property::RequestTimeout) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_duration(
                Property::RequestTimeout,
                &raw,
            )?),
            _ => None,
        };

        Ok(Self {
            url: var(Property::Url),
            attribute: var(Property::Attribute),
            status: var(Property::Status),
            delay: var(Property::Delay),
            timeout: var(Property::Timeout),
            request_timeout,
        })
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: TaskConfig) -> TaskConfig {
        TaskConfig {
            url: other.url.or(self.url),
            attribute: other.attribute.or(self.attribute),
            status: other.status.or(self.status),
            delay: other.delay.or(self.delay),
            timeout: other.timeout.or(self.timeout),
            request_timeout: other.request_timeout.or(self.request_timeout),
        }
    }

    /// The value exactly as configured, before defaults.
    ///
    /// Always `None` for [`Property::RequestTimeout`], which is typed.
    pub fn raw(&self, property: Property) -> Option<&str> {
        match property {
            Property::Url => self.url.as_deref(),
            Property::Attribute => self.attribute.as_deref(),
            Property::Status => self.status.as_deref(),
            Property::Delay => self.delay.as_deref(),
            Property::Timeout => self.timeout.as_deref(),
            Property::RequestTimeout => None,
        }
    }

    /// The effective value: the configured one if non-blank, else the default.
    pub fn value(&self, property: Property) -> Option<&str> {
        self.raw(property)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| property.default_value())
    }

    /// Configuration consisting only of the defaults, as written by `init`.
    pub fn template() -> Self {
        let default = |p: Property| p.default_value().map(str::to_string);
        Self {
            url: default(Property::Url),
            attribute: default(Property::Attribute),
            status: default(Property::Status),
            delay: default(Property::Delay),
            timeout: default(Property::Timeout),
            request_timeout: None,
        }
    }
}

pub(crate) fn parse_duration(property: Property, raw: &str) -> Result<Duration> {
    humantime_serde::re::humantime::parse_duration(raw.trim()).map_err(|e| {
        Error::InvalidDuration {
            property,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let config = TaskConfig::default();
        assert_eq!(
            config.value(Property::Url),
            Some("http://localhost:8080/health")
        );
        assert_eq!(config.value(Property::Attribute), Some("status"));
        assert_eq!(config.value(Property::Status), Some("UP"));
        assert_eq!(config.value(Property::Delay), Some("15"));
        assert_eq!(config.value(Property::Timeout), Some("60"));
    }

    #[test]
    fn defaults_apply_when_blank() {
        let config = TaskConfig {
            delay: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.value(Property::Delay), Some("15"));
    }

    #[test]
    fn merge_prefers_overlay() {
        let base = TaskConfig {
            url: Some("http://base/health".to_string()),
            delay: Some("5".to_string()),
            ..Default::default()
        };
        let overlay = TaskConfig {
            url: Some("http://overlay/health".to_string()),
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.url.as_deref(), Some("http://overlay/health"));
        assert_eq!(merged.delay.as_deref(), Some("5"));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(TaskConfig::from_yaml("").unwrap(), TaskConfig::default());
    }
}
