use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rotation direction accepted by `set_direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorDirection {
    #[default]
    Forward,
    Backward,
}

impl MotorDirection {
    pub fn code(&self) -> &'static str {
        match self {
            MotorDirection::Forward => "forward",
            MotorDirection::Backward => "backward",
        }
    }

    pub fn all() -> Vec<MotorDirection> {
        vec![MotorDirection::Forward, MotorDirection::Backward]
    }
}

impl fmt::Display for MotorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MotorDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "forward" => Ok(MotorDirection::Forward),
            "backward" => Ok(MotorDirection::Backward),
            other => anyhow::bail!("Unknown motor direction: {}", other),
        }
    }
}
