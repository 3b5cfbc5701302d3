use serde::{Deserialize, Serialize};
use std::fmt;

/// A prepared order as it appears on the wire.
///
/// `temp` is kept as the raw wire string rather than an enum: overflow
/// shelves may hold any temperature class, and an unrecognized class must
/// survive to display with a fallback color instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub temp: String,
    #[serde(rename = "normalizedHealth")]
    pub normalized_health: f64,
}

/// Fixed shelf-name set enforced upstream. Snapshot keys outside this set
/// are flagged and rejected rather than silently admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfName {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl ShelfName {
    pub const ALL: [ShelfName; 4] = [
        ShelfName::Hot,
        ShelfName::Cold,
        ShelfName::Frozen,
        ShelfName::Overflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfName::Hot => "hot",
            ShelfName::Cold => "cold",
            ShelfName::Frozen => "frozen",
            ShelfName::Overflow => "overflow",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "hot" => Some(ShelfName::Hot),
            "cold" => Some(ShelfName::Cold),
            "frozen" => Some(ShelfName::Frozen),
            "overflow" => Some(ShelfName::Overflow),
            _ => None,
        }
    }
}

impl fmt::Display for ShelfName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection state of the single upstream channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Closed,
    Errored,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Closed => "closed",
            ConnectionStatus::Errored => "errored",
        }
    }

    /// Operator-facing status line.
    pub fn status_line(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            _ => "Not Connected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy for the state-sync core. None of these are fatal:
/// connection failures surface as a status indicator, malformed snapshots
/// degrade to a stale display, unknown temperature classes degrade to a
/// neutral color token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    ConnectionFailure(String),
    MalformedSnapshot(String),
    UnrecognizedTemperatureClass(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::ConnectionFailure(reason) => {
                write!(f, "connection failure: {reason}")
            }
            SyncError::MalformedSnapshot(reason) => {
                write!(f, "malformed snapshot: {reason}")
            }
            SyncError::UnrecognizedTemperatureClass(label) => {
                write!(f, "unrecognized temperature class: {label}")
            }
        }
    }
}

impl std::error::Error for SyncError {}
