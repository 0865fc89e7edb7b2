//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod debug_info;
pub mod echo;
pub mod fetch_api_data;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

pub use debug_info::{DebugInfoParams, DebugInfoTool};
pub use echo::{EchoParams, EchoTool};
pub use fetch_api_data::{FetchApiDataParams, FetchApiDataTool, HttpMethod};
pub use weather::{WeatherApiParams, WeatherApiTool};
