pub mod device_type;
pub mod motor_direction;

pub use device_type::DeviceType;
pub use motor_direction::MotorDirection;
