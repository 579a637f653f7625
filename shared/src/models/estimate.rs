//! ET0 estimate models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Decimal places kept in every published ET0 value
pub const ET0_DECIMALS: i32 = 2;

/// Method that produced an estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Et0Method {
    #[serde(rename = "penman_monteith_fao56")]
    PenmanMonteith,
    #[serde(rename = "hargreaves_samani")]
    HargreavesSamani,
    #[serde(rename = "priestley_taylor")]
    PriestleyTaylor,
    #[serde(rename = "temperatura_simples")]
    TemperatureOnly,
    #[serde(rename = "estimativa_padrao")]
    DefaultEstimate,
    #[serde(rename = "estimativa_sazonal")]
    SeasonalEstimate,
    #[serde(rename = "estacao_meteorologica")]
    StationReported,
}

impl Et0Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Et0Method::PenmanMonteith => "penman_monteith_fao56",
            Et0Method::HargreavesSamani => "hargreaves_samani",
            Et0Method::PriestleyTaylor => "priestley_taylor",
            Et0Method::TemperatureOnly => "temperatura_simples",
            Et0Method::DefaultEstimate => "estimativa_padrao",
            Et0Method::SeasonalEstimate => "estimativa_sazonal",
            Et0Method::StationReported => "estacao_meteorologica",
        }
    }
}

impl std::fmt::Display for Et0Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence grade attached to every estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataQuality {
    #[serde(rename = "muito_baixa")]
    VeryLow,
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::High => "alta",
            DataQuality::Medium => "media",
            DataQuality::Low => "baixa",
            DataQuality::VeryLow => "muito_baixa",
        }
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade data quality from the number of non-null parameters used
pub fn grade_by_parameter_count(count: usize) -> DataQuality {
    match count {
        0 => DataQuality::VeryLow,
        1 => DataQuality::Low,
        2 | 3 => DataQuality::Medium,
        _ => DataQuality::High,
    }
}

/// Where an ET0 value comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Et0Source {
    /// Computed by this service
    #[default]
    Calculado,
    /// Pre-computed by the station firmware
    Estacao,
}

/// Display precision of a consumed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// °C, 1 dp
    Temperature,
    /// %, 0 dp
    Humidity,
    /// MJ/m²/day, 2 dp
    Radiation,
    /// m/s, 1 dp
    Wind,
    /// degrees, 2 dp
    Latitude,
    /// meters, 0 dp
    Altitude,
    /// whole numbers (day-of-year, month)
    Integer,
}

impl Precision {
    pub fn decimals(&self) -> usize {
        match self {
            Precision::Temperature | Precision::Wind => 1,
            Precision::Radiation | Precision::Latitude => 2,
            Precision::Humidity | Precision::Altitude | Precision::Integer => 0,
        }
    }

    pub fn format(&self, value: f64) -> String {
        let factor = 10f64.powi(self.decimals() as i32);
        // Adding 0.0 turns a rounded -0.0 into 0.0
        let value = (value * factor).round() / factor + 0.0;
        format!("{:.*}", self.decimals(), value)
    }
}

/// Ordered map of the inputs a method actually consumed, pre-formatted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsedParameters(BTreeMap<String, String>);

impl UsedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f64, precision: Precision) -> Self {
        self.0.insert(name.to_string(), precision.format(value));
        self
    }

    pub fn with_optional(self, name: &str, value: Option<f64>, precision: Precision) -> Self {
        match value {
            Some(value) => self.with(name, value, precision),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

/// Result of an ET0 estimation. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Et0Result {
    /// mm/day, rounded to `ET0_DECIMALS` and never negative
    pub value: f64,
    pub method: Et0Method,
    pub quality: DataQuality,
    pub parameters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Et0Source,
}

impl Et0Result {
    pub fn new(
        value: f64,
        method: Et0Method,
        quality: DataQuality,
        parameters: UsedParameters,
    ) -> Self {
        Self {
            value: round_et0(value),
            method,
            quality,
            parameters: parameters.into_map(),
            note: None,
            source: Et0Source::Calculado,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_source(mut self, source: Et0Source) -> Self {
        self.source = source;
        self
    }
}

/// Clamp to zero and round to `ET0_DECIMALS`. Non-finite input yields zero.
pub fn round_et0(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    let factor = 10f64.powi(ET0_DECIMALS);
    (value * factor).round() / factor
}
