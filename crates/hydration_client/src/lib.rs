//! Provider traits for the environmental and food lookups the bot consumes,
//! plus reqwest-based implementations against OpenWeather and Open Food Facts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod middleware;
pub mod retry;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("lookup failed: {0}")]
    Lookup(String),
}

impl ProviderError {
    /// Build an error from a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ProviderError::NotFound(body),
            _ => ProviderError::Status { status, body },
        }
    }

    /// Whether a retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect(),
            ProviderError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Product name and energy density returned by a food lookup.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub kcal_per_100g: f64,
}

impl FoodInfo {
    /// The "not found" answer: the query echoed back with zero energy.
    pub fn not_found(query: &str) -> Self {
        Self {
            name: query.to_string(),
            kcal_per_100g: 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.kcal_per_100g > 0.0
    }
}

#[async_trait]
pub trait TemperatureProvider: Send + Sync + 'static {
    /// Current air temperature in degrees Celsius for `city`.
    async fn current_temperature(&self, city: &str) -> Result<f64, ProviderError>;
}

#[async_trait]
pub trait FoodLookup: Send + Sync + 'static {
    /// Look up a product by free-text name.
    ///
    /// A product that cannot be found is not an error: the implementor returns
    /// [`FoodInfo::not_found`] and callers check [`FoodInfo::is_found`].
    async fn find_food(&self, query: &str) -> Result<FoodInfo, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_echoes_query() {
        let info = FoodInfo::not_found("кефир");
        assert_eq!(info.name, "кефир");
        assert!(!info.is_found());
    }

    #[test]
    fn status_404_maps_to_not_found() {
        let e = ProviderError::from_status(404, "city not found".into());
        assert!(matches!(e, ProviderError::NotFound(_)));
        assert!(!e.is_transient());
    }

    #[test]
    fn server_errors_are_transient() {
        let e = ProviderError::from_status(503, String::new());
        assert!(e.is_transient());
        let e = ProviderError::from_status(400, String::new());
        assert!(!e.is_transient());
    }
}
