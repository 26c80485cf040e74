use hydration_client::config::ProviderConfig;
use hydration_client::http_client::OpenFoodFactsClient;
use hydration_client::FoodLookup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "banana".to_string());
    let food_base = std::env::var("OPENFOODFACTS_BASE_URL")
        .unwrap_or_else(|_| hydration_client::config::DEFAULT_FOOD_BASE_URL.to_string());
    let client = OpenFoodFactsClient::new(&food_base);

    let info = client.find_food(&query).await?;
    if info.is_found() {
        println!("{}: {} kcal/100g", info.name, info.kcal_per_100g);
    } else {
        println!("{query}: not found");
    }

    // Temperature lookups need an API key; skip quietly when it is not set.
    if let Ok(cfg) = ProviderConfig::from_env() {
        use hydration_client::TemperatureProvider;
        let weather = hydration_client::http_client::OpenWeatherClient::from_config(&cfg);
        let temp = weather.current_temperature("Tashkent").await?;
        println!("Tashkent: {temp:.1}°C");
    }
    Ok(())
}
