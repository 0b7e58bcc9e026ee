//! Weather tools module.
//!
//! - `get_weather`: Current weather for a location via OpenWeatherMap

pub mod get_weather;

pub use get_weather::{GetWeatherParams, GetWeatherTool};
