//! Unit preferences, output format and grid-cell options of a forecast request.

named_enum! {
    pub enum TemperatureUnit: "temperature unit" {
        Celsius => "celsius",
        Fahrenheit => "fahrenheit",
    }
}

named_enum! {
    pub enum WindSpeedUnit: "wind speed unit" {
        Kmh => "kmh",
        Ms => "ms",
        Mph => "mph",
        Kn => "kn",
    }
}

named_enum! {
    pub enum PrecipitationUnit: "precipitation unit" {
        Mm => "mm",
        Inch => "inch",
    }
}

named_enum! {
    pub enum TimeFormat: "time format" {
        Iso8601 => "iso8601",
        Unixtime => "unixtime",
    }
}

named_enum! {
    /// How the API picks the grid cell for a coordinate.
    pub enum CellSelection: "cell selection" {
        Land => "land",
        Sea => "sea",
        Nearest => "nearest",
    }
}

named_enum! {
    /// Forecast model identifiers accepted by the `models` parameter.
    pub enum ForecastModel: "forecast model" {
        BestMatch => "best_match",
        EcmwfIfs025 => "ecmwf_ifs025",
        EcmwfAifs025 => "ecmwf_aifs025",
        GfsSeamless => "gfs_seamless",
        GfsGlobal => "gfs_global",
        GfsHrrr => "gfs_hrrr",
        IconSeamless => "icon_seamless",
        IconGlobal => "icon_global",
        IconEu => "icon_eu",
        IconD2 => "icon_d2",
        GemSeamless => "gem_seamless",
        GemGlobal => "gem_global",
        MeteofranceSeamless => "meteofrance_seamless",
        MeteofranceArpegeWorld => "meteofrance_arpege_world",
        MeteofranceAromeFrance => "meteofrance_arome_france",
        JmaSeamless => "jma_seamless",
        JmaGsm => "jma_gsm",
        MetnoNordic => "metno_nordic",
        UkmoSeamless => "ukmo_seamless",
        KnmiSeamless => "knmi_seamless",
        DmiSeamless => "dmi_seamless",
        CmaGrapesGlobal => "cma_grapes_global",
        BomAccessGlobal => "bom_access_global",
    }
}
