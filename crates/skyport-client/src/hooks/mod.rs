mod use_flight_input;
mod use_phone_device;
mod use_skyport;

pub use use_flight_input::use_flight_input;
pub use use_phone_device::use_phone_device;
pub use use_skyport::*;
