//! Unit conversion from canonical metric readings to display units.
//!
//! All conversions are pure and total over the unit enums. Unknown unit
//! strings are rejected once, when parsing, with [`UnitError::Unsupported`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KMH_PER_MPS: f64 = 3.6;
const KNOTS_DIVISOR: f64 = 1.852;
const HPA_PER_MMHG: f64 = 1.33322;
const MM_PER_INCH: f64 = 25.4;
const KM_PER_MILE: f64 = 1.60934;

/// Unit parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("Unsupported {measure} unit: {value:?}")]
    Unsupported { measure: &'static str, value: String },
}

impl UnitError {
    fn unsupported(measure: &'static str, value: &str) -> Self {
        Self::Unsupported {
            measure,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindSpeedUnit {
    #[default]
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "m/s")]
    MetersPerSecond,
    Knots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "hPa")]
    Hectopascals,
    /// Millimeters of mercury
    #[serde(rename = "mm")]
    Millimeters,
    /// Inches of mercury
    Inches,
    #[serde(rename = "kPa")]
    Kilopascals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PrecipitationUnit {
    #[default]
    #[serde(alias = "mm")]
    Millimeters,
    Inches,
}

impl TemperatureUnit {
    /// Setting string as stored in the settings document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl WindSpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MetersPerSecond => "m/s",
            Self::Knots => "Knots",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MetersPerSecond => "m/s",
            Self::Knots => "kn",
        }
    }
}

impl PressureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hectopascals => "hPa",
            Self::Millimeters => "mm",
            Self::Inches => "Inches",
            Self::Kilopascals => "kPa",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Hectopascals => "hPa",
            Self::Millimeters => "mmHg",
            Self::Inches => "inHg",
            Self::Kilopascals => "kPa",
        }
    }
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilometers => "Kilometers",
            Self::Miles => "Miles",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kilometers => "km",
            Self::Miles => "mi",
        }
    }
}

impl PrecipitationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeters => "Millimeters",
            Self::Inches => "Inches",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Celsius" => Ok(Self::Celsius),
            "Fahrenheit" => Ok(Self::Fahrenheit),
            other => Err(UnitError::unsupported("temperature", other)),
        }
    }
}

impl FromStr for WindSpeedUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "km/h" => Ok(Self::KilometersPerHour),
            "m/s" => Ok(Self::MetersPerSecond),
            "Knots" => Ok(Self::Knots),
            other => Err(UnitError::unsupported("wind speed", other)),
        }
    }
}

impl FromStr for PressureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hPa" => Ok(Self::Hectopascals),
            "mm" => Ok(Self::Millimeters),
            "Inches" => Ok(Self::Inches),
            "kPa" => Ok(Self::Kilopascals),
            other => Err(UnitError::unsupported("pressure", other)),
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kilometers" => Ok(Self::Kilometers),
            "Miles" => Ok(Self::Miles),
            other => Err(UnitError::unsupported("distance", other)),
        }
    }
}

impl FromStr for PrecipitationUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Millimeters" | "mm" => Ok(Self::Millimeters),
            "Inches" => Ok(Self::Inches),
            other => Err(UnitError::unsupported("precipitation", other)),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PrecipitationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display unit choice per measure, passed explicitly to every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind_speed: WindSpeedUnit,
    pub pressure: PressureUnit,
    pub precipitation: PrecipitationUnit,
    pub distance: DistanceUnit,
}

/// Celsius to the requested unit. Not rounded.
pub fn convert_temperature(value_c: f64, to: TemperatureUnit) -> f64 {
    match to {
        TemperatureUnit::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Celsius => value_c,
    }
}

/// m/s to the requested unit, rounded to a whole number.
///
/// The knots branch divides by 1.852 (the km-per-nautical-mile factor)
/// rather than converting from m/s; existing dashboards depend on it.
pub fn convert_wind_speed(value_mps: f64, to: WindSpeedUnit) -> f64 {
    match to {
        WindSpeedUnit::KilometersPerHour => (value_mps * KMH_PER_MPS).round(),
        WindSpeedUnit::MetersPerSecond => value_mps.round(),
        WindSpeedUnit::Knots => (value_mps / KNOTS_DIVISOR).round(),
    }
}

/// hPa to the requested unit, rounded to two decimals unless already whole.
pub fn convert_pressure(value_hpa: f64, to: PressureUnit) -> f64 {
    let converted = match to {
        PressureUnit::Hectopascals => value_hpa,
        PressureUnit::Millimeters => value_hpa / HPA_PER_MMHG,
        PressureUnit::Inches => value_hpa / HPA_PER_MMHG / MM_PER_INCH,
        PressureUnit::Kilopascals => value_hpa / 10.0,
    };
    round_to_hundredths(converted)
}

/// Kilometers to the requested unit. Callers convert meters to km first.
pub fn convert_distance(value_km: f64, to: DistanceUnit) -> f64 {
    match to {
        DistanceUnit::Miles => value_km / KM_PER_MILE,
        DistanceUnit::Kilometers => value_km,
    }
}

/// Millimeters to the requested unit.
pub fn convert_precipitation(value_mm: f64, to: PrecipitationUnit) -> f64 {
    match to {
        PrecipitationUnit::Inches => value_mm / MM_PER_INCH,
        PrecipitationUnit::Millimeters => value_mm,
    }
}

/// String-keyed variant for callers holding raw setting values.
///
/// # Errors
/// Returns [`UnitError::Unsupported`] when `unit` is not a known temperature unit.
pub fn convert_temperature_str(value_c: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(convert_temperature(value_c, unit.parse()?))
}

/// # Errors
/// Returns [`UnitError::Unsupported`] when `unit` is not a known wind speed unit.
pub fn convert_wind_speed_str(value_mps: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(convert_wind_speed(value_mps, unit.parse()?))
}

/// # Errors
/// Returns [`UnitError::Unsupported`] when `unit` is not a known pressure unit.
pub fn convert_pressure_str(value_hpa: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(convert_pressure(value_hpa, unit.parse()?))
}

/// # Errors
/// Returns [`UnitError::Unsupported`] when `unit` is not a known distance unit.
pub fn convert_distance_str(value_km: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(convert_distance(value_km, unit.parse()?))
}

/// # Errors
/// Returns [`UnitError::Unsupported`] when `unit` is not a known precipitation unit.
pub fn convert_precipitation_str(value_mm: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(convert_precipitation(value_mm, unit.parse()?))
}

fn round_to_hundredths(value: f64) -> f64 {
    if value.fract() == 0.0 {
        return value;
    }
    (value * 100.0).round() / 100.0
}
