//! Dialect versions
//!
//! Grammar edges may be gated on a minimum dialect version (for example an
//! alternative that only exists since database release 12.2). The lookahead
//! context carries the version of the dialect being parsed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A `major.minor` dialect version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Errors produced when parsing a [`Version`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },

    #[error("too many version components in '{0}'")]
    TooManyComponents(String),
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses `"12"`, `"12.2"`. A missing minor component is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = input.split('.');
        let component = |part: Option<&str>| -> Result<u16, VersionParseError> {
            match part {
                None => Ok(0),
                Some(text) => text
                    .parse::<u16>()
                    .map_err(|_| VersionParseError::InvalidComponent {
                        input: input.to_string(),
                        component: text.to_string(),
                    }),
            }
        };

        let major = component(parts.next())?;
        let minor = component(parts.next())?;
        if parts.next().is_some() {
            return Err(VersionParseError::TooManyComponents(input.to_string()));
        }
        Ok(Self { major, minor })
    }
}
