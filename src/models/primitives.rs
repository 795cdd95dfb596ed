//! Primitive types and newtypes for type-safe API interactions.
//!
//! Account numbers and order ids are both plain strings on the wire; the
//! newtypes keep them from being swapped at call sites.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A strongly-typed account number.
///
/// # Example
///
/// ```
/// use tastytrade_oms::AccountNumber;
///
/// let account = AccountNumber::new("5WV12345");
/// println!("Account: {}", account);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Create a new account number from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the account number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed order ID.
///
/// The API emits order ids as JSON integers; some endpoints echo them back
/// as strings. Both decode to the same `OrderId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the order ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IdValue {
            Int(i64),
            String(String),
        }

        Ok(match IdValue::deserialize(deserializer)? {
            IdValue::Int(i) => OrderId(i.to_string()),
            IdValue::String(s) => OrderId(s),
        })
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// API version in YYYYMMDD format.
///
/// TastyTrade supports date-based API versioning, sent in the
/// `Api-Version` header.
///
/// # Example
///
/// ```
/// use tastytrade_oms::ApiVersion;
///
/// let version = ApiVersion::new("20241201").expect("valid version");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Create a new API version, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is not in YYYYMMDD format.
    pub fn new(version: &str) -> crate::Result<Self> {
        let invalid = || {
            crate::Error::InvalidInput(format!(
                "Invalid API version format: {version}. Expected YYYYMMDD"
            ))
        };

        if version.len() != 8 || !version.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let component = |range: std::ops::Range<usize>| -> crate::Result<u32> {
            version
                .get(range)
                .and_then(|s| s.parse().ok())
                .ok_or_else(invalid)
        };
        let year = component(0..4)?;
        let month = component(4..6)?;
        let day = component(6..8)?;

        if !(2020..=2100).contains(&year) {
            return Err(crate::Error::InvalidInput(format!(
                "Invalid year in API version: {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(crate::Error::InvalidInput(format!(
                "Invalid month in API version: {month}"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(crate::Error::InvalidInput(format!(
                "Invalid day in API version: {day}"
            )));
        }

        Ok(ApiVersion(version.to_string()))
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which TastyTrade deployment to talk to.
///
/// Only used to pick a default base URL; [`ClientConfig`](crate::ClientConfig)
/// accepts any base URL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production environment - real trading with real money.
    #[default]
    Production,
    /// Sandbox/certification environment for testing.
    Sandbox,
}

impl Environment {
    /// Get the base URL for REST API requests.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.tastyworks.com",
            Environment::Sandbox => "https://api.cert.tastyworks.com",
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}
