use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    CellSelection, ForecastModel, Granularity, PrecipitationUnit, TemperatureUnit, TimeFormat,
    WeatherVariable, WindSpeedUnit,
};

/// Everything that goes into a `/v1/forecast` query.
///
/// `None` marks an unset option; validation and serialization skip it.
/// The struct is input and output of [`crate::validate`]: lists are filtered
/// and ranges normalised in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestParameters {
    pub latitude: f64,
    pub longitude: f64,
    /// Explicit elevation override in meters; the API uses its DEM when unset.
    /// `NaN` turns statistical downscaling off.
    pub elevation: Option<f64>,

    pub hourly: Vec<WeatherVariable>,
    /// Requesting daily aggregates forces `timezone=auto`.
    pub daily: Vec<WeatherVariable>,
    pub minutely_15: Vec<WeatherVariable>,
    pub current: Vec<WeatherVariable>,

    pub temperature_unit: Option<TemperatureUnit>,
    pub wind_speed_unit: Option<WindSpeedUnit>,
    pub precipitation_unit: Option<PrecipitationUnit>,
    pub timeformat: Option<TimeFormat>,
    pub timezone: Option<String>,

    pub past_days: i32,
    pub forecast_days: i32,
    pub forecast_hours: i32,
    pub forecast_minutely_15: i32,
    pub past_hours: i32,
    pub past_minutely_15: i32,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_hour: Option<DateTime<Utc>>,
    pub end_hour: Option<DateTime<Utc>>,
    pub start_minutely_15: Option<DateTime<Utc>>,
    pub end_minutely_15: Option<DateTime<Utc>>,

    pub models: Vec<ForecastModel>,
    pub cell_selection: Option<CellSelection>,
}

impl RequestParameters {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    pub fn variables(&self, granularity: Granularity) -> &[WeatherVariable] {
        match granularity {
            Granularity::Hourly => &self.hourly,
            Granularity::Daily => &self.daily,
            Granularity::Minutely15 => &self.minutely_15,
            Granularity::Current => &self.current,
        }
    }

    pub fn variables_mut(&mut self, granularity: Granularity) -> &mut Vec<WeatherVariable> {
        match granularity {
            Granularity::Hourly => &mut self.hourly,
            Granularity::Daily => &mut self.daily,
            Granularity::Minutely15 => &mut self.minutely_15,
            Granularity::Current => &mut self.current,
        }
    }

    pub fn with_variables(
        mut self,
        granularity: Granularity,
        variables: impl IntoIterator<Item = WeatherVariable>,
    ) -> Self {
        self.variables_mut(granularity).extend(variables);
        self
    }

    pub fn with_elevation(mut self, meters: f64) -> Self {
        self.elevation = Some(meters);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_models(mut self, models: impl IntoIterator<Item = ForecastModel>) -> Self {
        self.models.extend(models);
        self
    }
}
