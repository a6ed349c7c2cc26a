//! LogiLed — color-curve animation and one-shot effects for Logitech LED devices.

pub mod config;
pub mod curve;
pub mod device;
pub mod error;
pub mod keys;
pub mod led;
pub mod scheduler;
pub mod session;

pub use error::LogiLedError;
