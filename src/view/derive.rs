//! Display derivations: values computed on demand from the latest state,
//! never stored.

use crate::models::{Order, SyncError};
use std::fmt;

/// Temperature classes with a defined display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureClass {
    Hot,
    Cold,
    Frozen,
}

impl TemperatureClass {
    pub fn from_label(label: &str) -> Result<Self, SyncError> {
        match label {
            "hot" => Ok(TemperatureClass::Hot),
            "cold" => Ok(TemperatureClass::Cold),
            "frozen" => Ok(TemperatureClass::Frozen),
            other => Err(SyncError::UnrecognizedTemperatureClass(other.to_string())),
        }
    }
}

/// Color token for an order's temperature label. `Neutral` is the
/// fallback for labels outside the known set; the order is still shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Red,
    LightBlue,
    LightGray,
    Neutral,
}

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::Red => "red",
            ColorToken::LightBlue => "lightblue",
            ColorToken::LightGray => "lightgray",
            ColorToken::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total mapping from temperature label to display color. Never fails:
/// an unrecognized class degrades to [`ColorToken::Neutral`].
pub fn temperature_color(temp: &str) -> ColorToken {
    match TemperatureClass::from_label(temp) {
        Ok(TemperatureClass::Hot) => ColorToken::Red,
        Ok(TemperatureClass::Cold) => ColorToken::LightBlue,
        Ok(TemperatureClass::Frozen) => ColorToken::LightGray,
        Err(_) => ColorToken::Neutral,
    }
}

/// Freshness as floor(normalizedHealth * 100), deliberately unclamped.
/// Out-of-range values are an upstream decay-model signal the display
/// must preserve, not hide.
pub fn freshness_percent(order: &Order) -> i64 {
    (order.normalized_health * 100.0).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_health(normalized_health: f64) -> Order {
        Order {
            id: "o1".to_string(),
            name: "Soup".to_string(),
            temp: "hot".to_string(),
            normalized_health,
        }
    }

    #[test]
    fn test_freshness_percent_floors() {
        assert_eq!(freshness_percent(&order_with_health(0.73)), 73);
        assert_eq!(freshness_percent(&order_with_health(0.999)), 99);
        assert_eq!(freshness_percent(&order_with_health(1.0)), 100);
        assert_eq!(freshness_percent(&order_with_health(0.0)), 0);
    }

    #[test]
    fn test_freshness_percent_never_clamps() {
        assert_eq!(freshness_percent(&order_with_health(-0.1)), -10);
        assert_eq!(freshness_percent(&order_with_health(1.5)), 150);
    }

    #[test]
    fn test_temperature_color_mapping() {
        assert_eq!(temperature_color("hot"), ColorToken::Red);
        assert_eq!(temperature_color("cold"), ColorToken::LightBlue);
        assert_eq!(temperature_color("frozen"), ColorToken::LightGray);
    }

    #[test]
    fn test_temperature_color_fallback_never_fails() {
        assert_eq!(temperature_color("plasma"), ColorToken::Neutral);
        assert_eq!(temperature_color(""), ColorToken::Neutral);
        assert_eq!(temperature_color("HOT"), ColorToken::Neutral);
    }

    #[test]
    fn test_temperature_class_error_carries_label() {
        let err = TemperatureClass::from_label("plasma").unwrap_err();
        assert_eq!(
            err,
            crate::models::SyncError::UnrecognizedTemperatureClass("plasma".to_string())
        );
    }
}
