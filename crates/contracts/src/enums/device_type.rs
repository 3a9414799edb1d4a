use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device kinds served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    TemperatureSensor,
    PressureSensor,
    HumiditySensor,
    DcMotor,
    StepperMotor,
}

impl DeviceType {
    /// Path segment and wire code of the type
    pub fn code(&self) -> &'static str {
        match self {
            DeviceType::TemperatureSensor => "temperature_sensor",
            DeviceType::PressureSensor => "pressure_sensor",
            DeviceType::HumiditySensor => "humidity_sensor",
            DeviceType::DcMotor => "dc_motor",
            DeviceType::StepperMotor => "stepper_motor",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceType::TemperatureSensor => "Temperature Sensor",
            DeviceType::PressureSensor => "Pressure Sensor",
            DeviceType::HumiditySensor => "Humidity Sensor",
            DeviceType::DcMotor => "DC Motor",
            DeviceType::StepperMotor => "Stepper Motor",
        }
    }

    pub fn all() -> Vec<DeviceType> {
        vec![
            DeviceType::TemperatureSensor,
            DeviceType::PressureSensor,
            DeviceType::HumiditySensor,
            DeviceType::DcMotor,
            DeviceType::StepperMotor,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DeviceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::from_code(s.trim())
            .ok_or_else(|| anyhow::anyhow!("Unknown device type: {}", s))
    }
}
