use crate::math::AIR_DENSITY_SEA_LEVEL;

const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
const LAPSE_RATE_K_PER_M: f64 = 0.0065;
const TROPOPAUSE_ALTITUDE_M: f64 = 11_000.0;
/// g / (R * L) - 1 for dry air in the ISA troposphere.
const DENSITY_EXPONENT: f64 = 4.2559;

/// ISA troposphere state used to pick the air density for an operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub density: f64,
    pub temperature_k: f64,
}

impl Atmosphere {
    /// Altitude is clamped to the troposphere, `[0, 11000]` m.
    pub fn at_altitude(altitude: f64) -> Self {
        let h = altitude.clamp(0.0, TROPOPAUSE_ALTITUDE_M);
        let temperature_k = SEA_LEVEL_TEMPERATURE_K - LAPSE_RATE_K_PER_M * h;
        let temperature_ratio = temperature_k / SEA_LEVEL_TEMPERATURE_K;
        let density = AIR_DENSITY_SEA_LEVEL * temperature_ratio.powf(DENSITY_EXPONENT);

        Self {
            density,
            temperature_k,
        }
    }

    pub fn sea_level() -> Self {
        Self::at_altitude(0.0)
    }
}
