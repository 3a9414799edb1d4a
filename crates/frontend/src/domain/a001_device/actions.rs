//! Per device type panel configuration.
//!
//! Every device panel is the same generic panel; what differs between a
//! temperature sensor and a stepper motor is only the list of buttons,
//! described here as data.

use crate::shared::lifecycle::LoadingPhase;
use contracts::enums::{DeviceType, MotorDirection};

/// What a read button fetches
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOp {
    Status,
    Version,
    /// `GET /devices/{type}/{operation}`, body must be numeric
    Number {
        operation: &'static str,
        quantity: &'static str,
    },
    /// `GET /devices/{type}/{operation}`, body shown as is
    Text { operation: &'static str },
}

#[derive(Debug, Clone)]
pub struct ReadAction {
    pub key: &'static str,
    pub label: &'static str,
    pub op: ReadOp,
    pub render: Option<fn(&str) -> String>,
}

impl ReadAction {
    fn new(key: &'static str, label: &'static str, op: ReadOp) -> Self {
        Self {
            key,
            label,
            op,
            render: None,
        }
    }

    fn rendered(mut self, render: fn(&str) -> String) -> Self {
        self.render = Some(render);
        self
    }

    /// Text shown under the button for a raw reading
    pub fn render_value(&self, raw: &str) -> String {
        match self.render {
            Some(render) => render(raw),
            None => raw.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteInput {
    Text,
    Number,
    /// Select with `(value, label)` options
    Choice(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteAction {
    pub key: &'static str,
    pub label: &'static str,
    /// `PUT /devices/{type}/{operation}`
    pub operation: &'static str,
    /// Query parameter carrying the value
    pub param: &'static str,
    pub input: WriteInput,
    pub unit: Option<&'static str>,
    /// Initial buffer content
    pub initial: String,
}

impl WriteAction {
    fn number(
        key: &'static str,
        label: &'static str,
        operation: &'static str,
        param: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            operation,
            param,
            input: WriteInput::Number,
            unit: Some(unit),
            initial: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DeviceAction {
    Read(ReadAction),
    Write(WriteAction),
}

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub device_type: DeviceType,
    pub title: &'static str,
    pub actions: Vec<DeviceAction>,
}

impl PanelConfig {
    /// Build the panel layout for one device type
    pub fn for_device(device_type: DeviceType) -> Self {
        let mut actions = vec![
            DeviceAction::Read(ReadAction::new("status", "Get Status", ReadOp::Status)),
            DeviceAction::Read(ReadAction::new("version", "Get Version", ReadOp::Version)),
        ];

        match device_type {
            DeviceType::TemperatureSensor => {
                actions.push(DeviceAction::Read(
                    ReadAction::new(
                        "temperature",
                        "Read Temperature",
                        ReadOp::Number {
                            operation: "read_temperature",
                            quantity: "temperature",
                        },
                    )
                    .rendered(|v| format!("Temperature: {}°C", v)),
                ));
            }
            DeviceType::PressureSensor => {
                actions.push(DeviceAction::Read(
                    ReadAction::new(
                        "pressure",
                        "Read Pressure",
                        ReadOp::Number {
                            operation: "read_pressure",
                            quantity: "pressure",
                        },
                    )
                    .rendered(|v| format!("Pressure: {} hPa", v)),
                ));
            }
            DeviceType::HumiditySensor => {
                actions.push(DeviceAction::Read(
                    ReadAction::new(
                        "humidity",
                        "Read Humidity",
                        ReadOp::Number {
                            operation: "read_humidity",
                            quantity: "humidity",
                        },
                    )
                    .rendered(|v| format!("Humidity: {}%", v)),
                ));
            }
            DeviceType::DcMotor => {
                actions.push(DeviceAction::Write(WriteAction::number(
                    "set_speed", "Set Speed", "set_speed", "speed", "%",
                )));
                actions.push(DeviceAction::Read(
                    speed_read().rendered(|v| format!("Speed: {} %", v)),
                ));
            }
            DeviceType::StepperMotor => {
                actions.push(DeviceAction::Write(WriteAction::number(
                    "set_speed",
                    "Set Speed",
                    "set_speed",
                    "speed",
                    "steps/second",
                )));
                actions.push(DeviceAction::Read(
                    speed_read().rendered(|v| format!("{} steps/second", v)),
                ));
                actions.push(DeviceAction::Write(WriteAction {
                    key: "set_direction",
                    label: "Set Direction",
                    operation: "set_direction",
                    param: "direction",
                    input: WriteInput::Choice(
                        MotorDirection::all()
                            .into_iter()
                            .map(|d| (d.code().to_string(), d.code().to_string()))
                            .collect(),
                    ),
                    unit: None,
                    initial: MotorDirection::default().code().to_string(),
                }));
                actions.push(DeviceAction::Read(ReadAction::new(
                    "direction",
                    "Get Direction",
                    ReadOp::Text {
                        operation: "get_direction",
                    },
                )));
                actions.push(DeviceAction::Write(WriteAction::number(
                    "set_acceleration",
                    "Set Acceleration",
                    "set_acceleration",
                    "acceleration",
                    "steps/second²",
                )));
                actions.push(DeviceAction::Read(
                    ReadAction::new(
                        "acceleration",
                        "Get Acceleration",
                        ReadOp::Number {
                            operation: "get_acceleration",
                            quantity: "acceleration",
                        },
                    )
                    .rendered(|v| format!("{} steps/second²", v)),
                ));
                actions.push(DeviceAction::Write(WriteAction::number(
                    "set_relative_location",
                    "Move Relative",
                    "set_relative_location",
                    "relative_location",
                    "steps",
                )));
                actions.push(DeviceAction::Write(WriteAction::number(
                    "set_absolute_location",
                    "Move Absolute",
                    "set_absolute_location",
                    "absolute_location",
                    "steps",
                )));
                actions.push(DeviceAction::Read(
                    ReadAction::new(
                        "position",
                        "Get Position",
                        ReadOp::Number {
                            operation: "get_location",
                            quantity: "position",
                        },
                    )
                    .rendered(|v| format!("{} steps", v)),
                ));
            }
        }

        Self {
            device_type,
            title: device_type.display_name(),
            actions,
        }
    }

    pub fn write_actions(&self) -> impl Iterator<Item = &WriteAction> {
        self.actions.iter().filter_map(|a| match a {
            DeviceAction::Write(w) => Some(w),
            DeviceAction::Read(_) => None,
        })
    }
}

fn speed_read() -> ReadAction {
    ReadAction::new(
        "speed",
        "Get Speed",
        ReadOp::Number {
            operation: "get_speed",
            quantity: "speed",
        },
    )
}

/// Whether an action button is disabled.
///
/// Every control is locked while any operation is in flight; reads and
/// writes also need a selected device, writes a non-empty buffer.
pub fn action_disabled(phase: LoadingPhase, has_selection: bool, buffer: Option<&str>) -> bool {
    phase != LoadingPhase::Idle
        || !has_selection
        || buffer.is_some_and(|b| b.trim().is_empty())
}
