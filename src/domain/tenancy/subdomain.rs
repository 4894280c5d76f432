//! Subdomain value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Maximum length of a single DNS label.
pub const MAX_SUBDOMAIN_LEN: usize = 63;

/// A tenant's subdomain label, e.g. `acme` in `acme.lifelegacy.me`.
///
/// Always a single lowercase DNS label: `[a-z0-9-]`, 1 to 63 characters,
/// no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subdomain(String);

impl Subdomain {
    /// Parses a label, trimming whitespace and lowercasing first.
    pub fn new(label: impl AsRef<str>) -> Result<Self, ValidationError> {
        let label = label.as_ref().trim().to_ascii_lowercase();

        if label.is_empty() {
            return Err(ValidationError::empty_field("subdomain"));
        }
        if label.len() > MAX_SUBDOMAIN_LEN {
            return Err(ValidationError::invalid_length(
                "subdomain",
                1,
                MAX_SUBDOMAIN_LEN,
                label.len(),
            ));
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(ValidationError::invalid_format(
                "subdomain",
                format!("unexpected character '{}'", c),
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(ValidationError::invalid_format(
                "subdomain",
                "must not start or end with '-'",
            ));
        }

        Ok(Self(label))
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Subdomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Subdomain {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subdomain> for String {
    fn from(value: Subdomain) -> Self {
        value.0
    }
}
