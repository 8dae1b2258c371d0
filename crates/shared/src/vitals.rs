//! Vital-signs snapshot taken during an assessment

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TriageError;

/// Level of consciousness on the AVPU scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consciousness {
    Alert,
    /// Responds to verbal stimulus
    Verbal,
    /// Responds to painful stimulus
    Pain,
    Unresponsive,
}

impl Consciousness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Consciousness::Alert => "alert",
            Consciousness::Verbal => "verbal",
            Consciousness::Pain => "pain",
            Consciousness::Unresponsive => "unresponsive",
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Consciousness::Alert)
    }
}

impl fmt::Display for Consciousness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Consciousness {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alert" | "a" => Ok(Consciousness::Alert),
            "verbal" | "v" => Ok(Consciousness::Verbal),
            "pain" | "p" => Ok(Consciousness::Pain),
            "unresponsive" | "u" => Ok(Consciousness::Unresponsive),
            other => Err(TriageError::InvalidVital(format!(
                "unknown consciousness state '{}' (expected alert, verbal, pain or unresponsive)",
                other
            ))),
        }
    }
}

/// Partially-populated vital signs.
///
/// Every field is optional; `None` means "not measured", never "normal".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    /// Beats per minute
    #[serde(default)]
    pub heart_rate: Option<u32>,

    /// mmHg
    #[serde(default)]
    pub systolic_bp: Option<u32>,

    /// Percent (0-100)
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,

    /// Breaths per minute
    #[serde(default)]
    pub respiratory_rate: Option<u32>,

    /// Degrees Celsius
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Self-reported pain, 0-10
    #[serde(default)]
    pub pain_scale: Option<u8>,

    #[serde(default)]
    pub consciousness: Option<Consciousness>,
}

impl VitalSigns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set heart rate
    pub fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    /// Builder: set systolic blood pressure
    pub fn with_systolic_bp(mut self, mmhg: u32) -> Self {
        self.systolic_bp = Some(mmhg);
        self
    }

    /// Builder: set oxygen saturation
    pub fn with_oxygen_saturation(mut self, percent: f64) -> Self {
        self.oxygen_saturation = Some(percent);
        self
    }

    /// Builder: set respiratory rate
    pub fn with_respiratory_rate(mut self, per_minute: u32) -> Self {
        self.respiratory_rate = Some(per_minute);
        self
    }

    /// Builder: set temperature
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    /// Builder: set pain scale
    pub fn with_pain_scale(mut self, score: u8) -> Self {
        self.pain_scale = Some(score);
        self
    }

    /// Builder: set consciousness
    pub fn with_consciousness(mut self, state: Consciousness) -> Self {
        self.consciousness = Some(state);
        self
    }

    /// Check if nothing has been measured
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set a single field from a `key=value` style pair.
    ///
    /// Accepted keys: `hr`, `sbp`, `spo2`, `rr`, `temp`, `pain`, `avpu`
    /// (and their long forms).
    pub fn set_field(&mut self, key: &str, value: &str) -> crate::Result<()> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "hr" | "heart_rate" | "heartrate" => self.heart_rate = Some(parse_number(key, value)?),
            "sbp" | "systolic" | "systolic_bp" => self.systolic_bp = Some(parse_number(key, value)?),
            "spo2" | "sats" | "oxygen_saturation" => {
                self.oxygen_saturation = Some(parse_oxygen_saturation(value)?)
            }
            "rr" | "resp_rate" | "respiratory_rate" => {
                self.respiratory_rate = Some(parse_number(key, value)?)
            }
            "temp" | "temperature" => self.temperature = Some(parse_temperature(value)?),
            "pain" | "pain_scale" => {
                let score: u8 = parse_number(key, value)?;
                if score > 10 {
                    return Err(TriageError::InvalidVital(format!(
                        "pain scale must be 0-10, got {}",
                        score
                    )));
                }
                self.pain_scale = Some(score);
            }
            "avpu" | "consciousness" => self.consciousness = Some(value.parse()?),
            other => {
                return Err(TriageError::InvalidVital(format!("unknown vital sign '{}'", other)));
            }
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TriageError::InvalidVital(format!("invalid value '{}' for {}", value, key)))
}

/// A finite reading; NaN or infinity would compare as normal against every threshold
fn parse_finite(key: &str, value: &str) -> crate::Result<f64> {
    let reading: f64 = parse_number(key, value)?;
    if !reading.is_finite() {
        return Err(TriageError::InvalidVital(format!(
            "{} must be a finite number, got '{}'",
            key, value
        )));
    }
    Ok(reading)
}

/// Parse an oxygen saturation percentage (0-100)
pub fn parse_oxygen_saturation(value: &str) -> crate::Result<f64> {
    let percent = parse_finite("spo2", value)?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(TriageError::InvalidVital(format!(
            "oxygen saturation must be 0-100, got {}",
            percent
        )));
    }
    Ok(percent)
}

/// Parse a temperature in degrees Celsius
pub fn parse_temperature(value: &str) -> crate::Result<f64> {
    parse_finite("temp", value)
}
