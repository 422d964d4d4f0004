//! Typed records decoded from controller responses.
//!
//! The field layouts follow the controller's JSON API. Fields the firmware
//! may omit (or that vary between controller generations) are optional, and
//! unknown fields are ignored, so model drift on the device side does not
//! break decoding.

pub mod device;
pub mod information;
pub mod room;
pub mod service;

pub use device::Device;
pub use information::{Information, PublicInformation};
pub use room::Room;
pub use service::DeviceService;
