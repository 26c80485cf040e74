//! Logging and metrics wrapper for providers.
//!
//! [`LoggedProvider`] sits between the bot and a concrete provider and adds
//! timing logs plus a lookup counter without touching either side.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::{FoodInfo, FoodLookup, ProviderError, TemperatureProvider};

/// Middleware wrapper that logs and counts every provider call.
#[derive(Clone)]
pub struct LoggedProvider<P> {
    inner: Arc<P>,
    name: &'static str,
}

impl<P> LoggedProvider<P> {
    /// Wrap `provider`; `name` labels log lines and metrics.
    pub fn new(provider: P, name: &'static str) -> Self {
        Self {
            inner: Arc::new(provider),
            name,
        }
    }

    async fn with_logging<F, Fut, T>(&self, operation: F, op: &str) -> Result<T, ProviderError>
    where
        F: FnOnce(Arc<P>) -> Fut,
        Fut: std::future::Future<Output = Result<T, ProviderError>>,
    {
        let start = Instant::now();
        debug!(provider = self.name, "starting {}", op);

        let result = operation(self.inner.clone()).await;

        let duration = start.elapsed();
        let outcome = match &result {
            Ok(_) => {
                debug!(provider = self.name, "{} completed in {:?}", op, duration);
                "ok"
            }
            Err(e) => {
                debug!(provider = self.name, "{} failed in {:?} - error: {}", op, duration, e);
                "error"
            }
        };
        metrics::counter!("provider_lookups_total", "provider" => self.name, "outcome" => outcome)
            .increment(1);
        result
    }
}

#[async_trait]
impl<P: TemperatureProvider> TemperatureProvider for LoggedProvider<P> {
    async fn current_temperature(&self, city: &str) -> Result<f64, ProviderError> {
        self.with_logging(
            |p| async move { p.current_temperature(city).await },
            "current_temperature",
        )
        .await
    }
}

#[async_trait]
impl<P: FoodLookup> FoodLookup for LoggedProvider<P> {
    async fn find_food(&self, query: &str) -> Result<FoodInfo, ProviderError> {
        self.with_logging(|p| async move { p.find_food(query).await }, "find_food")
            .await
    }
}
