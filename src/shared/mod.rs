//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── InstrumentId ────────────────────────────────────────────────────────────

/// Newtype for instrument symbols (e.g. `"BTC-USD-SWAP-LIN"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for InstrumentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(InstrumentId(s.to_string()))
    }
}

impl Serialize for InstrumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for InstrumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(InstrumentId(s))
    }
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// Lookback window used to slice a series for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "3h")]
    Last3Hours,
    #[serde(rename = "6h")]
    Last6Hours,
    #[serde(rename = "12h")]
    Last12Hours,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl Window {
    /// All selectors in display order.
    pub const ALL: [Window; 4] = [
        Window::Last3Hours,
        Window::Last6Hours,
        Window::Last12Hours,
        Window::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last3Hours => "3h",
            Self::Last6Hours => "6h",
            Self::Last12Hours => "12h",
            Self::AllTime => "all",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Last3Hours => "3H",
            Self::Last6Hours => "6H",
            Self::Last12Hours => "12H",
            Self::AllTime => "ALL",
        }
    }

    /// Lookback duration, `None` for the unbounded window.
    pub fn duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Last3Hours => Some(TimeDelta::hours(3)),
            Self::Last6Hours => Some(TimeDelta::hours(6)),
            Self::Last12Hours => Some(TimeDelta::hours(12)),
            Self::AllTime => None,
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Window::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown window: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_id_serde() {
        let id = InstrumentId::from("BTC-USD-SWAP-LIN");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"BTC-USD-SWAP-LIN\"");
        let back: InstrumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_window_serde() {
        let w: Window = serde_json::from_str("\"12h\"").unwrap();
        assert_eq!(w, Window::Last12Hours);
        assert_eq!(serde_json::to_string(&Window::AllTime).unwrap(), "\"all\"");
    }

    #[test]
    fn test_window_durations() {
        assert_eq!(Window::Last3Hours.duration(), Some(TimeDelta::hours(3)));
        assert_eq!(Window::Last6Hours.duration(), Some(TimeDelta::hours(6)));
        assert_eq!(Window::Last12Hours.duration(), Some(TimeDelta::hours(12)));
        assert_eq!(Window::AllTime.duration(), None);
    }

    #[test]
    fn test_window_default_is_all_time() {
        assert_eq!(Window::default(), Window::AllTime);
    }

    #[test]
    fn test_window_from_str() {
        assert_eq!("6H".parse::<Window>().unwrap(), Window::Last6Hours);
        assert!("1d".parse::<Window>().is_err());
    }
}
