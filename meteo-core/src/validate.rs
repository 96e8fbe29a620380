//! In-place coercion of request parameters into something the API accepts.
//!
//! Nothing here fails: illegal variables are blanked out, day counts are
//! clamped and time ranges are completed and ordered.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{Granularity, RequestParameters, WeatherVariable};

pub const PAST_DAYS_MAX: i32 = 92;
pub const FORECAST_DAYS_MAX: i32 = 16;

/// Validate `params` against the current wall-clock time.
pub fn validate(params: &mut RequestParameters) {
    validate_at(params, Utc::now());
}

/// Validate `params`, resolving half-open time ranges to `now`.
pub fn validate_at(params: &mut RequestParameters, now: DateTime<Utc>) {
    for granularity in Granularity::all() {
        filter_variables(params.variables_mut(*granularity), *granularity);
    }

    params.past_days = params.past_days.min(PAST_DAYS_MAX);
    params.forecast_days = params.forecast_days.min(FORECAST_DAYS_MAX);

    normalize_range(&mut params.start_date, &mut params.end_date, now);
    normalize_range(&mut params.start_hour, &mut params.end_hour, now);
    normalize_range(&mut params.start_minutely_15, &mut params.end_minutely_15, now);
}

/// Variables that [`validate`] would blank out, without touching `params`.
pub fn dropped_variables(params: &RequestParameters) -> Vec<(Granularity, WeatherVariable)> {
    Granularity::all()
        .iter()
        .flat_map(|g| {
            params
                .variables(*g)
                .iter()
                .filter(move |v| **v != WeatherVariable::Undefined && !g.allows(**v))
                .map(move |v| (*g, *v))
        })
        .collect()
}

fn filter_variables(variables: &mut [WeatherVariable], granularity: Granularity) {
    for variable in variables.iter_mut() {
        if *variable != WeatherVariable::Undefined && !granularity.allows(*variable) {
            warn!(%granularity, %variable, "dropping variable not offered at this granularity");
            *variable = WeatherVariable::Undefined;
        }
    }
}

fn normalize_range(
    start: &mut Option<DateTime<Utc>>,
    end: &mut Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) {
    if start.is_none() && end.is_none() {
        return;
    }

    let start_at = *start.get_or_insert(now);
    let end_at = *end.get_or_insert(now);

    if start_at > end_at {
        std::mem::swap(start, end);
    }
}
