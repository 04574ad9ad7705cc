//! Energy mode reported by the user when starting a focus session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::task::EnergyLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyMode {
    /// Only low-energy tasks
    Tired,
    /// Medium and high energy tasks
    Ready,
}

impl Default for EnergyMode {
    fn default() -> Self {
        EnergyMode::Ready
    }
}

impl EnergyMode {
    /// Any mode other than `tired` behaves like `ready`.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("tired") {
            EnergyMode::Tired
        } else {
            EnergyMode::Ready
        }
    }

    pub fn accepts(&self, energy: EnergyLevel) -> bool {
        match self {
            EnergyMode::Tired => energy == EnergyLevel::Low,
            EnergyMode::Ready => matches!(energy, EnergyLevel::Medium | EnergyLevel::High),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyMode::Tired => "tired",
            EnergyMode::Ready => "ready",
        }
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tired" | "low" => Ok(EnergyMode::Tired),
            "ready" | "normal" | "high" => Ok(EnergyMode::Ready),
            other => Err(ValidationError::InvalidValue {
                field: "mode".to_string(),
                message: format!("expected tired or ready, got '{other}'"),
            }),
        }
    }
}
