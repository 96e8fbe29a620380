//! Weather variables and the per-granularity allow-lists that constrain them.

use WeatherVariable::*;

named_enum! {
    /// One observable quantity of the forecast API.
    ///
    /// `Undefined` is the "no selection" marker: validation overwrites illegal
    /// entries with it and serialization skips it.
    pub enum WeatherVariable: "weather variable" {
        Undefined => "undefined",
        ApparentTemperature => "apparent_temperature",
        ApparentTemperatureMax => "apparent_temperature_max",
        ApparentTemperatureMin => "apparent_temperature_min",
        Cape => "cape",
        CloudCover => "cloud_cover",
        CloudCoverHigh => "cloud_cover_high",
        CloudCoverLow => "cloud_cover_low",
        CloudCoverMid => "cloud_cover_mid",
        DaylightDuration => "daylight_duration",
        DewPoint2m => "dew_point_2m",
        DiffuseRadiation => "diffuse_radiation",
        DirectNormalIrradiance => "direct_normal_irradiance",
        DirectRadiation => "direct_radiation",
        Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
        Evapotranspiration => "evapotranspiration",
        FreezingLevelHeight => "freezing_level_height",
        GlobalTiltedIrradiance => "global_tilted_irradiance",
        GlobalTiltedIrradianceInstant => "global_tilted_irradiance_instant",
        IsDay => "is_day",
        LightningPotential => "lightning_potential",
        Precipitation => "precipitation",
        PrecipitationHours => "precipitation_hours",
        PrecipitationProbability => "precipitation_probability",
        PrecipitationProbabilityMax => "precipitation_probability_max",
        PrecipitationProbabilityMean => "precipitation_probability_mean",
        PrecipitationProbabilityMin => "precipitation_probability_min",
        PrecipitationSum => "precipitation_sum",
        PressureMsl => "pressure_msl",
        Rain => "rain",
        RainSum => "rain_sum",
        RelativeHumidity2m => "relative_humidity_2m",
        ShortwaveRadiation => "shortwave_radiation",
        ShortwaveRadiationSum => "shortwave_radiation_sum",
        Showers => "showers",
        ShowersSum => "showers_sum",
        SnowDepth => "snow_depth",
        Snowfall => "snowfall",
        SnowfallHeight => "snowfall_height",
        SnowfallSum => "snowfall_sum",
        SoilMoisture0To1cm => "soil_moisture_0_to_1cm",
        SoilMoisture1To3cm => "soil_moisture_1_to_3cm",
        SoilMoisture27To81cm => "soil_moisture_27_to_81cm",
        SoilMoisture3To9cm => "soil_moisture_3_to_9cm",
        SoilMoisture9To27cm => "soil_moisture_9_to_27cm",
        SoilTemperature0cm => "soil_temperature_0cm",
        SoilTemperature18cm => "soil_temperature_18cm",
        SoilTemperature54cm => "soil_temperature_54cm",
        SoilTemperature6cm => "soil_temperature_6cm",
        Sunrise => "sunrise",
        Sunset => "sunset",
        SunshineDuration => "sunshine_duration",
        SurfacePressure => "surface_pressure",
        Temperature2m => "temperature_2m",
        Temperature2mMax => "temperature_2m_max",
        Temperature2mMin => "temperature_2m_min",
        UvIndexClearSkyMax => "uv_index_clear_sky_max",
        UvIndexMax => "uv_index_max",
        VapourPressureDeficit => "vapour_pressure_deficit",
        Visibility => "visibility",
        WeatherCode => "weather_code",
        WindDirection10m => "wind_direction_10m",
        WindDirection10mDominant => "wind_direction_10m_dominant",
        WindDirection120m => "wind_direction_120m",
        WindDirection180m => "wind_direction_180m",
        WindDirection80m => "wind_direction_80m",
        WindGusts10m => "wind_gusts_10m",
        WindGusts10mMax => "wind_gusts_10m_max",
        WindSpeed10m => "wind_speed_10m",
        WindSpeed10mMax => "wind_speed_10m_max",
        WindSpeed120m => "wind_speed_120m",
        WindSpeed180m => "wind_speed_180m",
        WindSpeed80m => "wind_speed_80m",
        UvIndex => "uv_index",
    }
}

/// Time resolution a variable list is requested at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Hourly,
    Daily,
    Minutely15,
    Current,
}

impl Granularity {
    /// Query parameter name of the list.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Minutely15 => "minutely_15",
            Granularity::Current => "current",
        }
    }

    pub const fn all() -> &'static [Granularity] {
        &[
            Granularity::Hourly,
            Granularity::Daily,
            Granularity::Minutely15,
            Granularity::Current,
        ]
    }

    /// Variables the API accepts at this granularity.
    pub const fn allowed(&self) -> &'static [WeatherVariable] {
        match self {
            Granularity::Hourly => HOURLY,
            Granularity::Daily => DAILY,
            Granularity::Minutely15 => MINUTELY_15,
            Granularity::Current => CURRENT,
        }
    }

    pub fn allows(&self, variable: WeatherVariable) -> bool {
        self.allowed().contains(&variable)
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const HOURLY: &[WeatherVariable] = &[
    Temperature2m,
    RelativeHumidity2m,
    DewPoint2m,
    ApparentTemperature,
    PressureMsl,
    SurfacePressure,
    CloudCover,
    CloudCoverLow,
    CloudCoverMid,
    CloudCoverHigh,
    WindSpeed10m,
    WindSpeed80m,
    WindSpeed120m,
    WindSpeed180m,
    WindDirection10m,
    WindDirection80m,
    WindDirection120m,
    WindDirection180m,
    WindGusts10m,
    ShortwaveRadiation,
    DirectRadiation,
    DirectNormalIrradiance,
    DiffuseRadiation,
    GlobalTiltedIrradiance,
    VapourPressureDeficit,
    Cape,
    Evapotranspiration,
    Et0FaoEvapotranspiration,
    Precipitation,
    Snowfall,
    PrecipitationProbability,
    Rain,
    Showers,
    WeatherCode,
    SnowDepth,
    FreezingLevelHeight,
    Visibility,
    SoilTemperature0cm,
    SoilTemperature6cm,
    SoilTemperature18cm,
    SoilTemperature54cm,
    SoilMoisture0To1cm,
    SoilMoisture1To3cm,
    SoilMoisture3To9cm,
    SoilMoisture9To27cm,
    SoilMoisture27To81cm,
    IsDay,
    UvIndex,
];

const DAILY: &[WeatherVariable] = &[
    Temperature2mMax,
    Temperature2mMin,
    ApparentTemperatureMax,
    ApparentTemperatureMin,
    PrecipitationSum,
    RainSum,
    ShowersSum,
    SnowfallSum,
    PrecipitationHours,
    PrecipitationProbabilityMax,
    PrecipitationProbabilityMin,
    PrecipitationProbabilityMean,
    WeatherCode,
    Sunrise,
    Sunset,
    SunshineDuration,
    DaylightDuration,
    WindSpeed10mMax,
    WindGusts10mMax,
    WindDirection10mDominant,
    ShortwaveRadiationSum,
    Et0FaoEvapotranspiration,
    UvIndexMax,
    UvIndexClearSkyMax,
];

const MINUTELY_15: &[WeatherVariable] = &[
    Temperature2m,
    RelativeHumidity2m,
    DewPoint2m,
    ApparentTemperature,
    ShortwaveRadiation,
    DirectRadiation,
    DirectNormalIrradiance,
    GlobalTiltedIrradiance,
    GlobalTiltedIrradianceInstant,
    DiffuseRadiation,
    SunshineDuration,
    LightningPotential,
    Precipitation,
    Snowfall,
    Rain,
    Showers,
    SnowfallHeight,
    FreezingLevelHeight,
    Cape,
    WindSpeed10m,
    WindSpeed80m,
    WindDirection10m,
    WindDirection80m,
    WindGusts10m,
    Visibility,
    WeatherCode,
];

const CURRENT: &[WeatherVariable] = &[
    ApparentTemperature,
    Cape,
    CloudCover,
    CloudCoverHigh,
    CloudCoverLow,
    CloudCoverMid,
    DewPoint2m,
    DiffuseRadiation,
    DirectNormalIrradiance,
    DirectRadiation,
    Et0FaoEvapotranspiration,
    Evapotranspiration,
    FreezingLevelHeight,
    GlobalTiltedIrradiance,
    GlobalTiltedIrradianceInstant,
    IsDay,
    LightningPotential,
    Precipitation,
    PrecipitationProbability,
    PressureMsl,
    Rain,
    RelativeHumidity2m,
    ShortwaveRadiation,
    Showers,
    SnowDepth,
    Snowfall,
    SnowfallHeight,
    SoilMoisture0To1cm,
    SoilMoisture1To3cm,
    SoilMoisture27To81cm,
    SoilMoisture3To9cm,
    SoilMoisture9To27cm,
    SoilTemperature0cm,
    SoilTemperature18cm,
    SoilTemperature54cm,
    SoilTemperature6cm,
    SunshineDuration,
    SurfacePressure,
    Temperature2m,
    VapourPressureDeficit,
    Visibility,
    WeatherCode,
    WindDirection10m,
    WindDirection120m,
    WindDirection180m,
    WindDirection80m,
    WindGusts10m,
    WindSpeed10m,
    WindSpeed120m,
    WindSpeed180m,
    WindSpeed80m,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_lists_never_contain_undefined() {
        for g in Granularity::all() {
            assert!(!g.allows(WeatherVariable::Undefined), "{g}");
        }
    }

    #[test]
    fn aggregates_are_daily_only() {
        assert!(Granularity::Daily.allows(WeatherVariable::Temperature2mMax));
        assert!(!Granularity::Hourly.allows(WeatherVariable::Temperature2mMax));
        assert!(!Granularity::Current.allows(WeatherVariable::PrecipitationSum));
        assert!(!Granularity::Minutely15.allows(WeatherVariable::Sunrise));
    }

    #[test]
    fn every_allowed_variable_is_in_the_enum_table() {
        for g in Granularity::all() {
            for v in g.allowed() {
                assert!(WeatherVariable::ALL.contains(v));
            }
        }
    }

    #[test]
    fn the_table_has_every_variable_once() {
        assert_eq!(WeatherVariable::ALL.len(), 74);
        assert_eq!(WeatherVariable::ALL[0], WeatherVariable::Undefined);
    }
}
