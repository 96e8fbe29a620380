//! Rendering of [`RequestParameters`] into the `/v1/forecast` query string.

use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone, Utc};
use url::form_urlencoded::byte_serialize;

use crate::{Granularity, RequestParameters, WeatherVariable};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render `params` with the device-local clock and the given API key.
///
/// The key is appended only when non-empty. Call [`crate::validate`] first;
/// this function renders whatever it is given, so a non-finite latitude or
/// longitude goes out as `NaN`/`inf` and the API rejects it with a 400.
pub fn to_query(params: &RequestParameters, api_key: Option<&str>) -> String {
    to_query_with(params, api_key, &Local)
}

/// Same as [`to_query`] with timestamps rendered in `tz`.
pub fn to_query_with<Tz>(params: &RequestParameters, api_key: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut query = format!(
        "?latitude={}&longitude={}&format=flatbuffers",
        params.latitude, params.longitude
    );

    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        push_param(&mut query, "apikey", encode(key));
    }

    // NaN is the API's token for "no downscaling"; Display would write `NaN`.
    match params.elevation {
        Some(elevation) if elevation.is_nan() => push_param(&mut query, "elevation", "nan"),
        Some(elevation) => push_param(&mut query, "elevation", elevation),
        None => {}
    }

    for granularity in [Granularity::Hourly, Granularity::Minutely15, Granularity::Current] {
        push_variables(&mut query, granularity, params.variables(granularity));
    }

    let force_timezone_auto = push_variables(&mut query, Granularity::Daily, &params.daily);

    push_option(&mut query, "temperature_unit", params.temperature_unit);
    push_option(&mut query, "wind_speed_unit", params.wind_speed_unit);
    push_option(&mut query, "precipitation_unit", params.precipitation_unit);
    push_option(&mut query, "timeformat", params.timeformat);

    if force_timezone_auto {
        push_param(&mut query, "timezone", "auto");
    } else if let Some(timezone) = &params.timezone {
        push_param(&mut query, "timezone", encode(timezone));
    }

    push_positive(&mut query, "past_days", params.past_days);
    push_positive(&mut query, "forecast_days", params.forecast_days);
    push_positive(&mut query, "forecast_hours", params.forecast_hours);
    push_positive(&mut query, "forecast_minutely_15", params.forecast_minutely_15);
    push_positive(&mut query, "past_hours", params.past_hours);
    push_positive(&mut query, "past_minutely_15", params.past_minutely_15);

    push_time(&mut query, "start_date", params.start_date, tz, DATE_FORMAT);
    push_time(&mut query, "end_date", params.end_date, tz, DATE_FORMAT);
    push_time(&mut query, "start_hour", params.start_hour, tz, DATETIME_FORMAT);
    push_time(&mut query, "end_hour", params.end_hour, tz, DATETIME_FORMAT);
    push_time(&mut query, "start_minutely_15", params.start_minutely_15, tz, DATETIME_FORMAT);
    push_time(&mut query, "end_minutely_15", params.end_minutely_15, tz, DATETIME_FORMAT);

    if !params.models.is_empty() {
        push_param(&mut query, "models", join(params.models.iter()));
    }

    push_option(&mut query, "cell_selection", params.cell_selection);

    query
}

fn push_param(query: &mut String, name: &str, value: impl Display) {
    // Writing into a String cannot fail.
    let _ = write!(query, "&{name}={value}");
}

fn push_option<T: Display>(query: &mut String, name: &str, value: Option<T>) {
    if let Some(value) = value {
        push_param(query, name, value);
    }
}

fn push_positive(query: &mut String, name: &str, value: i32) {
    if value > 0 {
        push_param(query, name, value);
    }
}

fn push_time<Tz>(
    query: &mut String,
    name: &str,
    value: Option<DateTime<Utc>>,
    tz: &Tz,
    format: &str,
) where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(value) = value {
        push_param(query, name, value.with_timezone(tz).format(format));
    }
}

/// Append `&<granularity>=a,b,c`; returns whether anything was written.
fn push_variables(query: &mut String, granularity: Granularity, variables: &[WeatherVariable]) -> bool {
    let selected = join(variables.iter().filter(|v| **v != WeatherVariable::Undefined));
    if selected.is_empty() {
        return false;
    }

    push_param(query, granularity.as_str(), selected);
    true
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(",")
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
