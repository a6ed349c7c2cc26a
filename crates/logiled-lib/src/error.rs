//! Unified error type for the logiled-lib crate.
//!
//! [`LogiLedError`] wraps the device-level [`DeviceError`] and the
//! domain-specific error kinds (`Config`, `Color`, `Curve`, `Bitmap`). `From` impls
//! allow `?` to propagate across module boundaries.

use std::fmt;

use crate::device::DeviceError;

/// Unified error type for logiled-lib operations.
#[derive(Debug)]
pub enum LogiLedError {
    /// Lighting device error (init, SDK call).
    Device(DeviceError),
    /// Standard I/O error (config persistence, bitmap files).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Color curve construction error.
    Curve(String),
    /// Lighting bitmap shape error.
    Bitmap(String),
}

impl fmt::Display for LogiLedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogiLedError::Device(e) => write!(f, "{e}"),
            LogiLedError::Io(e) => write!(f, "I/O error: {e}"),
            LogiLedError::Config(e) => write!(f, "Config error: {e}"),
            LogiLedError::Color(e) => write!(f, "Color error: {e}"),
            LogiLedError::Curve(e) => write!(f, "Curve error: {e}"),
            LogiLedError::Bitmap(e) => write!(f, "Bitmap error: {e}"),
        }
    }
}

impl std::error::Error for LogiLedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogiLedError::Device(e) => Some(e),
            LogiLedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for LogiLedError {
    fn from(e: DeviceError) -> Self {
        LogiLedError::Device(e)
    }
}

impl From<std::io::Error> for LogiLedError {
    fn from(e: std::io::Error) -> Self {
        LogiLedError::Io(e)
    }
}

/// Crate-level Result alias using [`LogiLedError`].
pub type Result<T> = std::result::Result<T, LogiLedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_device_error() {
        let e: LogiLedError = DeviceError::NotInitialized.into();
        assert!(matches!(e, LogiLedError::Device(DeviceError::NotInitialized)));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: LogiLedError = io_err.into();
        assert!(matches!(e, LogiLedError::Io(_)));
    }

    #[test]
    fn display_device_error() {
        let e = LogiLedError::Device(DeviceError::InitFailed("no LGS".into()));
        assert_eq!(e.to_string(), "LED SDK init failed: no LGS");
    }

    #[test]
    fn display_config_error() {
        let e = LogiLedError::Config("frame_rate must be positive".into());
        assert_eq!(e.to_string(), "Config error: frame_rate must be positive");
    }

    #[test]
    fn display_color_error() {
        let e = LogiLedError::Color("bad hex".into());
        assert_eq!(e.to_string(), "Color error: bad hex");
    }

    #[test]
    fn display_curve_error() {
        let e = LogiLedError::Curve("no keys".into());
        assert_eq!(e.to_string(), "Curve error: no keys");
    }

    #[test]
    fn source_chains_device_error() {
        let e = LogiLedError::Device(DeviceError::CallFailed("set_lighting".into()));
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("set_lighting"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = LogiLedError::Curve("test".into());
        assert!(std::error::Error::source(&e).is_none());
    }

    #[test]
    fn question_mark_propagation_device_to_logiled() {
        fn inner() -> crate::device::Result<()> {
            Err(DeviceError::NotInitialized)
        }
        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }
        let err = outer().unwrap_err();
        assert!(matches!(err, LogiLedError::Device(DeviceError::NotInitialized)));
    }
}
