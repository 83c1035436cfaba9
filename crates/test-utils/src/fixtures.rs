//! Common fixtures for coverage-client tests.

/// Named locations used across the test suite, as (name, lon, lat).
pub mod locations {
    /// Helsinki city center.
    pub const HELSINKI: (&str, f64, f64) = ("Helsinki", 24.9384, 60.1699);

    /// Turku.
    pub const TURKU: (&str, f64, f64) = ("Turku", 22.2666, 60.4518);

    /// Tampere.
    pub const TAMPERE: (&str, f64, f64) = ("Tampere", 23.7610, 61.4978);

    /// Harmaja lighthouse, off Helsinki.
    pub const HARMAJA: (&str, f64, f64) = ("Harmaja", 24.9754, 60.1049);

    /// The default multi-city batch.
    pub const CITIES: [(&str, f64, f64); 3] = [HELSINKI, TURKU, TAMPERE];

    /// An unclosed ring over the central Gulf of Finland.
    pub const GULF_OF_FINLAND: [(f64, f64); 4] = [
        (24.0, 59.6),
        (27.0, 59.6),
        (27.0, 60.4),
        (24.0, 60.4),
    ];
}

/// Parameter names as the upstream service spells them.
pub mod parameters {
    /// Air temperature, 2 m.
    pub const TEMPERATURE: &str = "Temperature";

    /// Wind speed, m/s.
    pub const WIND_SPEED: &str = "WindSpeedMS";

    /// Relative humidity, percent.
    pub const HUMIDITY: &str = "Humidity";

    /// Weather condition code.
    pub const WEATHER_SYMBOL: &str = "WeatherSymbol3";

    /// Significant wave height, m (marine collections).
    pub const WAVE_HEIGHT: &str = "SignificantWaveHeight";
}
