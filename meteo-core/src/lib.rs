//! Core library for the Open-Meteo forecast SDK.
//!
//! This crate defines:
//! - Request parameters and the weather-variable / unit name tables
//! - Validation of parameters against per-granularity allow-lists
//! - Serialization of parameters into the `/v1/forecast` query string
//! - An HTTP transport and an owned, size-prefixed flatbuffers response
//!
//! It is used by `meteo-cli`, but is meant to be embedded in any binary that
//! needs forecast data.

#[macro_use]
mod names;

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod response;
pub mod transport;
pub mod units;
pub mod validate;
pub mod variable;
pub mod weather_code;

pub use client::{FORECAST_PATH, OpenMeteoClient};
pub use config::ClientConfig;
pub use error::WeatherError;
pub use model::RequestParameters;
pub use query::{to_query, to_query_with};
pub use response::{ForecastResponse, Frames, ResponseSchema};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use units::{
    CellSelection, ForecastModel, PrecipitationUnit, TemperatureUnit, TimeFormat, WindSpeedUnit,
};
pub use validate::{dropped_variables, validate, validate_at};
pub use variable::{Granularity, WeatherVariable};
pub use weather_code::WeatherCode;
