//! Attraction search tool — `get_attraction(city, weather)`.
//!
//! Recommends sights for a city given the weather: indoor venues when it is
//! wet or cold, outdoor ones otherwise. Backed by a small built-in catalogue
//! with a generic fallback for unknown cities.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs, required_arg};

pub struct AttractionSearchTool;

#[async_trait]
impl Tool for AttractionSearchTool {
    fn name(&self) -> &str {
        "get_attraction"
    }

    fn description(&self) -> &str {
        "Recommend tourist attractions for a city, taking its current weather into account."
    }

    fn parameters(&self) -> &[&str] {
        &["city", "weather"]
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let city = required_arg(args, "city")?.trim();
        let weather = required_arg(args, "weather")?.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidArguments("'city' must not be empty".into()));
        }

        let setting = Setting::for_weather(weather);
        let picks = recommend(city, setting);
        Ok(format!(
            "Recommended {} attractions in {} ({}): {}",
            setting.label(),
            city,
            weather,
            picks.join("; ")
        ))
    }
}

/// Whether to favour indoor or outdoor venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Indoor,
    Outdoor,
}

impl Setting {
    /// Classify free-text weather. Anything wet, stormy, or snowy goes indoors.
    pub fn for_weather(weather: &str) -> Self {
        const INDOOR_HINTS: [&str; 6] = ["rain", "storm", "snow", "thunder", "drizzle", "sleet"];
        let weather = weather.to_lowercase();
        if INDOOR_HINTS.iter().any(|hint| weather.contains(hint)) {
            Setting::Indoor
        } else {
            Setting::Outdoor
        }
    }

    fn label(self) -> &'static str {
        match self {
            Setting::Indoor => "indoor",
            Setting::Outdoor => "outdoor",
        }
    }
}

struct CityGuide {
    city: &'static str,
    indoor: &'static [&'static str],
    outdoor: &'static [&'static str],
}

const GUIDES: &[CityGuide] = &[
    CityGuide {
        city: "beijing",
        indoor: &["The Palace Museum", "National Museum of China", "Capital Museum"],
        outdoor: &["Great Wall at Mutianyu", "Temple of Heaven Park", "Summer Palace"],
    },
    CityGuide {
        city: "hangzhou",
        indoor: &["China National Tea Museum", "Zhejiang Provincial Museum"],
        outdoor: &["West Lake", "Lingyin Temple", "Xixi Wetland"],
    },
    CityGuide {
        city: "paris",
        indoor: &["Louvre Museum", "Musée d'Orsay", "Galeries Lafayette"],
        outdoor: &["Eiffel Tower", "Jardin du Luxembourg", "Seine river walk"],
    },
    CityGuide {
        city: "tokyo",
        indoor: &["Tokyo National Museum", "teamLab Planets", "Tsukiji Outer Market"],
        outdoor: &["Senso-ji", "Shinjuku Gyoen", "Meiji Jingu"],
    },
    CityGuide {
        city: "london",
        indoor: &["British Museum", "National Gallery", "Tate Modern"],
        outdoor: &["Hyde Park", "Tower Bridge", "Camden Market"],
    },
];

/// Pick attractions for a city, falling back to generic suggestions.
pub fn recommend(city: &str, setting: Setting) -> Vec<String> {
    let key = city.to_lowercase();
    match GUIDES.iter().find(|g| g.city == key) {
        Some(guide) => {
            let list = match setting {
                Setting::Indoor => guide.indoor,
                Setting::Outdoor => guide.outdoor,
            };
            list.iter().map(|s| s.to_string()).collect()
        }
        None => match setting {
            Setting::Indoor => vec![
                format!("{city} city museum"),
                format!("{city} central shopping arcade"),
            ],
            Setting::Outdoor => vec![
                format!("{city} old town walking tour"),
                format!("{city} riverside park"),
            ],
        },
    }
}
