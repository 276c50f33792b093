//! Typed identifiers for employees and ledger events.
//!
//! An employee is identified by its PIN, which doubles as the login secret
//! on the timeclock keypad. Ledger events carry a UUID.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Length of PINs issued by the directory.
pub const ISSUED_PIN_LEN: usize = 4;
const MIN_PIN_LEN: usize = 4;
const MAX_PIN_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("PIN must be 4-8 digits")]
pub struct InvalidPin;

/// Numeric PIN identifying an employee. Immutable once issued.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
#[schema(value_type = String, example = "0427")]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn parse(raw: &str) -> Result<Self, InvalidPin> {
        let raw = raw.trim();
        let valid_len = (MIN_PIN_LEN..=MAX_PIN_LEN).contains(&raw.len());
        if valid_len && raw.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidPin)
        }
    }

    /// Draws a random PIN of [`ISSUED_PIN_LEN`] digits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_index(rng.gen_range(0..Self::issuable_count()))
    }

    /// Number of distinct PINs the directory can issue.
    pub fn issuable_count() -> u32 {
        10u32.pow(ISSUED_PIN_LEN as u32)
    }

    /// The `index`-th issuable PIN, zero padded.
    pub fn from_index(index: u32) -> Self {
        Self(format!("{:0width$}", index, width = ISSUED_PIN_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = InvalidPin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = InvalidPin;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

/// Unique identifier for a ledger event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
