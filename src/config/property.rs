// ABOUTME: Named task properties with their defaults and environment variable names.
// ABOUTME: Every configuration layer addresses values through this enum.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Url,
    Attribute,
    Status,
    Delay,
    Timeout,
    RequestTimeout,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::Url,
        Property::Attribute,
        Property::Status,
        Property::Delay,
        Property::Timeout,
        Property::RequestTimeout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::Url => "Url",
            Property::Attribute => "Attribute",
            Property::Status => "Status",
            Property::Delay => "Delay",
            Property::Timeout => "Timeout",
            Property::RequestTimeout => "RequestTimeout",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Property::Url => "HEALTHWAIT_URL",
            Property::Attribute => "HEALTHWAIT_ATTRIBUTE",
            Property::Status => "HEALTHWAIT_STATUS",
            Property::Delay => "HEALTHWAIT_DELAY",
            Property::Timeout => "HEALTHWAIT_TIMEOUT",
            Property::RequestTimeout => "HEALTHWAIT_REQUEST_TIMEOUT",
        }
    }

    /// Value used when the property is absent or blank.
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            Property::Url => Some("http://localhost:8080/health"),
            Property::Attribute => Some("status"),
            Property::Status => Some("UP"),
            Property::Delay => Some("15"),
            Property::Timeout => Some("60"),
            Property::RequestTimeout => None,
        }
    }

    /// Whether an explicitly blank value is rejected by validation.
    pub fn is_required(self) -> bool {
        matches!(self, Property::Url | Property::Attribute | Property::Status)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
