use serde::{Deserialize, Serialize};

/// Fixed path suffix identifying the shelf-state stream on the upstream
/// process.
pub const SHELF_STATE_PATH: &str = "/ws/darkKitchenState";

/// Application configuration.
///
/// The simulation tuning fields are inert: they belong to a separate
/// control surface and are carried here as opaque, unvalidated strings.
/// The core never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ws_base_url: String,
    pub min_driver_delay: String,
    pub max_driver_delay: String,
    pub time_units: String,
    pub poisson_rate_param: String,
}

impl Config {
    pub fn from_env() -> Self {
        let ws_base_url = std::env::var("WS_BACKEND_URL")
            .unwrap_or_else(|_| "ws://127.0.0.1:8080".to_string());

        let min_driver_delay =
            std::env::var("MIN_DRIVER_DELAY").unwrap_or_else(|_| "2".to_string());
        let max_driver_delay =
            std::env::var("MAX_DRIVER_DELAY").unwrap_or_else(|_| "8".to_string());
        let time_units = std::env::var("TIME_UNITS").unwrap_or_else(|_| "1000".to_string());
        let poisson_rate_param =
            std::env::var("POISSON_RATE_PARAM").unwrap_or_else(|_| "3.25".to_string());

        Self {
            ws_base_url,
            min_driver_delay,
            max_driver_delay,
            time_units,
            poisson_rate_param,
        }
    }

    /// Full endpoint of the shelf-state stream: base address plus the
    /// fixed path suffix.
    pub fn shelf_state_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.ws_base_url.trim_end_matches('/'),
            SHELF_STATE_PATH
        )
    }
}
