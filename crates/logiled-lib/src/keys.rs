//! Key identifiers and target device types.
//!
//! [`LogiLedKey`] enumerates every keyboard key, numpad key and extra
//! G-key/logo zone addressable by the LED SDK. Each variant maps 1:1 onto a
//! vendor [`KeyName`] code (keyboard scan codes, `0xFFFx` for G-keys,
//! `0xFFFFx` for logo zones) through a single static table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogiLedError;

/// Vendor key code as understood by the LED SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct KeyName(pub u32);

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

macro_rules! logiled_keys {
    ($($key:ident => $code:expr),+ $(,)?) => {
        /// Mouse and keyboard keys addressable by per-key lighting.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum LogiLedKey {
            $($key),+
        }

        impl LogiLedKey {
            /// Every key, in declaration order.
            pub const ALL: &'static [LogiLedKey] = &[$(LogiLedKey::$key),+];

            /// Vendor key code for this key.
            pub fn key_name(self) -> KeyName {
                match self {
                    $(LogiLedKey::$key => KeyName($code)),+
                }
            }

            /// Variant name, e.g. `"NumEnter"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(LogiLedKey::$key => stringify!($key)),+
                }
            }
        }
    };
}

logiled_keys! {
    Escape => 0x01,
    F1 => 0x3B,
    F2 => 0x3C,
    F3 => 0x3D,
    F4 => 0x3E,
    F5 => 0x3F,
    F6 => 0x40,
    F7 => 0x41,
    F8 => 0x42,
    F9 => 0x43,
    F10 => 0x44,
    F11 => 0x57,
    F12 => 0x58,
    PrintScreen => 0x137,
    ScrollLock => 0x46,
    PauseBreak => 0x145,
    Tilde => 0x29,
    One => 0x02,
    Two => 0x03,
    Three => 0x04,
    Four => 0x05,
    Five => 0x06,
    Six => 0x07,
    Seven => 0x08,
    Eight => 0x09,
    Nine => 0x0A,
    Zero => 0x0B,
    Minus => 0x0C,
    Equals => 0x0D,
    Backspace => 0x0E,
    Insert => 0x152,
    Home => 0x147,
    PageUp => 0x149,
    NumLock => 0x45,
    NumSlash => 0x135,
    NumAsterisk => 0x37,
    NumMinus => 0x4A,
    Tab => 0x0F,
    Q => 0x10,
    W => 0x11,
    E => 0x12,
    R => 0x13,
    T => 0x14,
    Y => 0x15,
    U => 0x16,
    I => 0x17,
    O => 0x18,
    P => 0x19,
    OpenBracket => 0x1A,
    CloseBracket => 0x1B,
    Backslash => 0x2B,
    KeyboardDelete => 0x153,
    End => 0x14F,
    PageDown => 0x151,
    NumSeven => 0x47,
    NumEight => 0x48,
    NumNine => 0x49,
    NumPlus => 0x4E,
    CapsLock => 0x3A,
    A => 0x1E,
    S => 0x1F,
    D => 0x20,
    F => 0x21,
    G => 0x22,
    H => 0x23,
    J => 0x24,
    K => 0x25,
    L => 0x26,
    Semicolon => 0x27,
    Apostrophe => 0x28,
    Enter => 0x1C,
    NumFour => 0x4B,
    NumFive => 0x4C,
    NumSix => 0x4D,
    LeftShift => 0x2A,
    Z => 0x2C,
    X => 0x2D,
    C => 0x2E,
    V => 0x2F,
    B => 0x30,
    N => 0x31,
    M => 0x32,
    Comma => 0x33,
    Period => 0x34,
    ForwardSlash => 0x35,
    RightShift => 0x36,
    ArrowUp => 0x148,
    NumOne => 0x4F,
    NumTwo => 0x50,
    NumThree => 0x51,
    NumEnter => 0x11C,
    LeftControl => 0x1D,
    LeftWindows => 0x15B,
    LeftAlt => 0x38,
    Space => 0x39,
    RightAlt => 0x138,
    RightWindows => 0x15C,
    ApplicationSelect => 0x15D,
    RightControl => 0x11D,
    ArrowLeft => 0x14B,
    ArrowDown => 0x150,
    ArrowRight => 0x14D,
    NumZero => 0x52,
    NumPeriod => 0x53,
    G1 => 0xFFF1,
    G2 => 0xFFF2,
    G3 => 0xFFF3,
    G4 => 0xFFF4,
    G5 => 0xFFF5,
    G6 => 0xFFF6,
    G7 => 0xFFF7,
    G8 => 0xFFF8,
    G9 => 0xFFF9,
    GLogo => 0xFFFF1,
    GBadge => 0xFFFF2,
}

impl fmt::Display for LogiLedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogiLedKey {
    type Err = LogiLedError;

    /// Case-insensitive lookup by variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LogiLedKey::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogiLedError::Config(format!("Unknown key: {s}")))
    }
}

impl Serialize for LogiLedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LogiLedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which class of device subsequent SDK calls should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    #[default]
    All,
    Monochrome,
    PerKeyRgb,
    Rgb,
}

impl DeviceType {
    /// Bitmask passed to the SDK's target-device call.
    pub fn sdk_mask(self) -> u32 {
        match self {
            DeviceType::Monochrome => 0x1,
            DeviceType::Rgb => 0x2,
            DeviceType::PerKeyRgb => 0x4,
            DeviceType::All => 0x7,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceType::All => "all",
            DeviceType::Monochrome => "monochrome",
            DeviceType::PerKeyRgb => "per-key-rgb",
            DeviceType::Rgb => "rgb",
        };
        f.write_str(s)
    }
}

impl FromStr for DeviceType {
    type Err = LogiLedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "all" => Ok(DeviceType::All),
            "monochrome" => Ok(DeviceType::Monochrome),
            "per-key-rgb" | "perkeyrgb" => Ok(DeviceType::PerKeyRgb),
            "rgb" => Ok(DeviceType::Rgb),
            other => Err(LogiLedError::Config(format!(
                "Unknown device type: {other} (use all, monochrome, rgb or per-key-rgb)"
            ))),
        }
    }
}
