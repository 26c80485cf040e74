use crate::ProviderError;
use secrecy::SecretString;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_FOOD_BASE_URL: &str = "https://world.openfoodfacts.org";

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub weather_api_key: SecretString,
    pub weather_base_url: String,
    pub food_base_url: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ProviderError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("WEATHER_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::Config("WEATHER_API_KEY missing".into()))?;
        let weather_base_url =
            get("OPENWEATHER_BASE_URL").unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.into());
        let food_base_url =
            get("OPENFOODFACTS_BASE_URL").unwrap_or_else(|| DEFAULT_FOOD_BASE_URL.into());
        Ok(Self {
            weather_api_key: SecretString::new(api.into()),
            weather_base_url,
            food_base_url,
        })
    }
}
