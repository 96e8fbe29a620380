/// WMO weather interpretation codes reported in the `weather_code` variable.
///
/// See <https://open-meteo.com/en/docs> for the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WeatherCode {
    ClearSky = 0,
    MainlyClear = 1,
    PartlyCloudy = 2,
    Overcast = 3,
    Fog = 45,
    DepositingRimeFog = 48,
    DrizzleLight = 51,
    DrizzleModerate = 53,
    DrizzleDense = 55,
    FreezingDrizzleLight = 56,
    FreezingDrizzleDense = 57,
    RainSlight = 61,
    RainModerate = 63,
    RainHeavy = 65,
    FreezingRainLight = 66,
    FreezingRainHeavy = 67,
    SnowFallSlight = 71,
    SnowFallModerate = 73,
    SnowFallHeavy = 75,
    SnowGrains = 77,
    RainShowersSlight = 80,
    RainShowersModerate = 81,
    RainShowersViolent = 82,
    SnowShowersSlight = 85,
    SnowShowersHeavy = 86,
    ThunderstormSlightModerate = 95,
    ThunderstormSlightHail = 96,
    ThunderstormHeavyHail = 99,
}

impl WeatherCode {
    /// Map a raw WMO code; `None` for codes outside the table.
    pub const fn from_wmo(code: u8) -> Option<Self> {
        use WeatherCode::*;

        let known = match code {
            0 => ClearSky,
            1 => MainlyClear,
            2 => PartlyCloudy,
            3 => Overcast,
            45 => Fog,
            48 => DepositingRimeFog,
            51 => DrizzleLight,
            53 => DrizzleModerate,
            55 => DrizzleDense,
            56 => FreezingDrizzleLight,
            57 => FreezingDrizzleDense,
            61 => RainSlight,
            63 => RainModerate,
            65 => RainHeavy,
            66 => FreezingRainLight,
            67 => FreezingRainHeavy,
            71 => SnowFallSlight,
            73 => SnowFallModerate,
            75 => SnowFallHeavy,
            77 => SnowGrains,
            80 => RainShowersSlight,
            81 => RainShowersModerate,
            82 => RainShowersViolent,
            85 => SnowShowersSlight,
            86 => SnowShowersHeavy,
            95 => ThunderstormSlightModerate,
            96 => ThunderstormSlightHail,
            99 => ThunderstormHeavyHail,
            _ => return None,
        };
        Some(known)
    }

    pub const fn code(&self) -> u8 {
        *self as u8
    }

    pub const fn description(&self) -> &'static str {
        use WeatherCode::*;

        match self {
            ClearSky => "Clear sky",
            MainlyClear => "Mainly clear",
            PartlyCloudy => "Partly cloudy",
            Overcast => "Overcast",
            Fog => "Fog",
            DepositingRimeFog => "Depositing rime fog",
            DrizzleLight => "Light drizzle",
            DrizzleModerate => "Moderate drizzle",
            DrizzleDense => "Dense drizzle",
            FreezingDrizzleLight => "Light freezing drizzle",
            FreezingDrizzleDense => "Dense freezing drizzle",
            RainSlight => "Slight rain",
            RainModerate => "Moderate rain",
            RainHeavy => "Heavy rain",
            FreezingRainLight => "Light freezing rain",
            FreezingRainHeavy => "Heavy freezing rain",
            SnowFallSlight => "Slight snow fall",
            SnowFallModerate => "Moderate snow fall",
            SnowFallHeavy => "Heavy snow fall",
            SnowGrains => "Snow grains",
            RainShowersSlight => "Slight rain showers",
            RainShowersModerate => "Moderate rain showers",
            RainShowersViolent => "Violent rain showers",
            SnowShowersSlight => "Slight snow showers",
            SnowShowersHeavy => "Heavy snow showers",
            ThunderstormSlightModerate => "Slight or moderate thunderstorm",
            ThunderstormSlightHail => "Thunderstorm with slight hail",
            ThunderstormHeavyHail => "Thunderstorm with heavy hail",
        }
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
