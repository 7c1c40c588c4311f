//! Names of the quantities the synthesizer produces.

/// Significant wave height (m).
pub const WAVE_HEIGHT: &str = "VHM0";
/// Sea surface height above geoid (m).
pub const SEA_LEVEL: &str = "zos";
pub const WATER_TEMP: &str = "water_temp";
pub const WIND_SPEED: &str = "wind_speed";
pub const WAVE_PERIOD: &str = "wave_period";
pub const WAVE_DIRECTION: &str = "wave_direction";
pub const PRESSURE: &str = "pressure";

/// Wave product name for the mean wave period.
pub const MEAN_WAVE_PERIOD: &str = "VTM02";
/// Wave product name for the mean wave direction.
pub const MEAN_WAVE_DIRECTION: &str = "VMDR";

/// One physically linked quantity of a synthetic sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    WaveHeight,
    SeaLevel,
    WaterTemp,
    WindSpeed,
    WavePeriod,
    WaveDirection,
    Pressure,
}

impl Quantity {
    pub const ALL: [Quantity; 7] = [
        Quantity::WaveHeight,
        Quantity::SeaLevel,
        Quantity::WaterTemp,
        Quantity::WindSpeed,
        Quantity::WavePeriod,
        Quantity::WaveDirection,
        Quantity::Pressure,
    ];

    /// Output name of this quantity in a synthetic point.
    pub fn name(self) -> &'static str {
        match self {
            Quantity::WaveHeight => WAVE_HEIGHT,
            Quantity::SeaLevel => SEA_LEVEL,
            Quantity::WaterTemp => WATER_TEMP,
            Quantity::WindSpeed => WIND_SPEED,
            Quantity::WavePeriod => WAVE_PERIOD,
            Quantity::WaveDirection => WAVE_DIRECTION,
            Quantity::Pressure => PRESSURE,
        }
    }

    /// Look up a variable name, accepting wave product aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            WAVE_HEIGHT => Some(Quantity::WaveHeight),
            SEA_LEVEL => Some(Quantity::SeaLevel),
            WATER_TEMP => Some(Quantity::WaterTemp),
            WIND_SPEED => Some(Quantity::WindSpeed),
            WAVE_PERIOD | MEAN_WAVE_PERIOD => Some(Quantity::WavePeriod),
            WAVE_DIRECTION | MEAN_WAVE_DIRECTION => Some(Quantity::WaveDirection),
            PRESSURE => Some(Quantity::Pressure),
            _ => None,
        }
    }
}

/// Whether the synthesizer can produce a value for `name`.
pub fn is_synthesizable(name: &str) -> bool {
    Quantity::from_name(name).is_some()
}
