//! Weather lookup tool — `get_weather(city)`.
//!
//! Returns deterministic offline weather so the reason-then-act loop can be
//! exercised end-to-end without network access. The same city always gets
//! the same report.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs, required_arg};

pub struct WeatherLookupTool;

#[async_trait]
impl Tool for WeatherLookupTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up the current weather for the given city."
    }

    fn parameters(&self) -> &[&str] {
        &["city"]
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let city = required_arg(args, "city")?.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidArguments("'city' must not be empty".into()));
        }

        let weather = mock_weather(city);
        Ok(format!(
            "{}: current weather is {}, temperature {}°C",
            weather.city, weather.condition, weather.temperature_c
        ))
    }
}

/// A weather report for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub condition: &'static str,
    pub temperature_c: i32,
}

const CONDITIONS: [&str; 8] = [
    "Sunny",
    "Clear",
    "Partly cloudy",
    "Overcast",
    "Light rain",
    "Heavy rain",
    "Thunderstorm",
    "Snow",
];

/// Deterministic mock weather based on a hash of the city name.
pub fn mock_weather(city: &str) -> WeatherReport {
    let hash: u32 = city
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

    let condition = CONDITIONS[(hash as usize / 7) % CONDITIONS.len()];
    let mut temperature_c = (hash % 40) as i32 - 5; // -5 to 34°C
    if condition == "Snow" {
        temperature_c = temperature_c.min(0);
    }

    WeatherReport {
        city: city.to_string(),
        condition,
        temperature_c,
    }
}
