//! Built-in tool implementations for Wayfarer.
//!
//! Tools give the travel assistant something to act on: a weather lookup
//! and an attraction search. Each is just a named function from string
//! arguments to a string result.

pub mod attraction_search;
pub mod weather_lookup;

use wayfarer_core::tool::ToolRegistry;

pub use attraction_search::AttractionSearchTool;
pub use weather_lookup::WeatherLookupTool;

/// Create the default tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WeatherLookupTool));
    registry.register(Box::new(AttractionSearchTool));
    registry
}
