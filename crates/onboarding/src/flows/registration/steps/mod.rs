pub mod address;
pub mod occupation;
pub mod password;
pub mod personal_info;
pub mod risk_tolerance;
pub mod set_pin;
