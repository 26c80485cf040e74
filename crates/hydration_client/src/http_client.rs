//! HTTP implementations of the provider traits.
//!
//! [`OpenWeatherClient`] implements [`TemperatureProvider`] against the
//! OpenWeather current-weather endpoint and [`OpenFoodFactsClient`]
//! implements [`FoodLookup`] against the Open Food Facts search endpoint.

use crate::config::ProviderConfig;
use crate::retry::RetryPolicy;
use crate::{FoodInfo, FoodLookup, ProviderError, TemperatureProvider};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("reqwest client build should not fail")
}

/// Handle a response, converting status codes to appropriate errors.
async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        return Err(ProviderError::from_status(status.as_u16(), body_snippet));
    }
    Ok(resp.json::<T>().await?)
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<WeatherMain>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: Option<f64>,
}

/// Temperature provider backed by the OpenWeather API.
#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl OpenWeatherClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://api.openweathermap.org"
    /// * `api_key` - the OpenWeather `appid`
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: build_http_client(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.weather_base_url, config.weather_api_key.clone())
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch_temperature(&self, city: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.expose_secret()),
                ("units", "metric"),
            ])
            .send()
            .await?;
        let body: WeatherResponse = handle_response(resp).await?;
        body.main
            .and_then(|m| m.temp)
            .ok_or_else(|| ProviderError::Lookup(format!("no temperature reported for {city}")))
    }
}

#[async_trait]
impl TemperatureProvider for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Result<f64, ProviderError> {
        self.retry
            .retry_transient(|| self.fetch_temperature(city))
            .await
    }
}

/// Food lookup backed by the Open Food Facts product search.
#[derive(Clone, Debug)]
pub struct OpenFoodFactsClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl OpenFoodFactsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_http_client(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.food_base_url)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn search(&self, query: &str) -> Result<FoodInfo, ProviderError> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
            ])
            .send()
            .await?;
        let body: Value = handle_response(resp).await?;
        Ok(first_product_info(&body, query))
    }
}

#[async_trait]
impl FoodLookup for OpenFoodFactsClient {
    async fn find_food(&self, query: &str) -> Result<FoodInfo, ProviderError> {
        self.retry.retry_transient(|| self.search(query)).await
    }
}

/// Pick the display name and kcal/100g of the first search hit.
///
/// The Russian product name wins over the generic one; blank names fall
/// through to the next candidate and finally to the query itself.
fn first_product_info(body: &Value, query: &str) -> FoodInfo {
    let Some(first) = body
        .get("products")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
    else {
        return FoodInfo::not_found(query);
    };

    let name = ["product_name_ru", "product_name"]
        .iter()
        .filter_map(|key| first.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(query)
        .to_string();

    let kcal_per_100g = first
        .get("nutriments")
        .and_then(|n| n.get("energy-kcal_100g"))
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0);

    FoodInfo {
        name,
        kcal_per_100g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_product_prefers_russian_name() {
        let body = json!({"products": [
            {"product_name_ru": "Гречка", "product_name": "Buckwheat", "nutriments": {"energy-kcal_100g": 343}}
        ]});
        let info = first_product_info(&body, "гречка");
        assert_eq!(info.name, "Гречка");
        assert_eq!(info.kcal_per_100g, 343.0);
    }

    #[test]
    fn first_product_skips_blank_names() {
        let body = json!({"products": [
            {"product_name_ru": "", "product_name": "Oat flakes", "nutriments": {"energy-kcal_100g": "366.5"}}
        ]});
        let info = first_product_info(&body, "oats");
        assert_eq!(info.name, "Oat flakes");
        assert_eq!(info.kcal_per_100g, 366.5);
    }

    #[test]
    fn first_product_without_nutriments_has_zero_kcal() {
        let body = json!({"products": [{"product_name": "Mystery"}]});
        let info = first_product_info(&body, "mystery");
        assert_eq!(info.name, "Mystery");
        assert!(!info.is_found());
    }

    #[test]
    fn empty_product_list_is_not_found() {
        let info = first_product_info(&json!({"products": []}), "unobtainium");
        assert_eq!(info, FoodInfo::not_found("unobtainium"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenFoodFactsClient::new("http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
