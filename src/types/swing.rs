// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Louver swing types.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Swing mode as reported by the appliance.
///
/// The code is a bit mask: the low two bits drive the horizontal louvers,
/// the next two the vertical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SwingMode {
    /// Louvers fixed.
    Off,
    /// Horizontal louvers swing.
    Horizontal,
    /// Vertical louvers swing.
    Vertical,
    /// Both sets swing.
    Both,
}

impl SwingMode {
    /// Returns the appliance's numeric code for this mode.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Off => 0x0,
            Self::Horizontal => 0x3,
            Self::Vertical => 0xC,
            Self::Both => 0xF,
        }
    }
}

impl TryFrom<u8> for SwingMode {
    type Error = ValidationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x0 => Ok(Self::Off),
            0x3 => Ok(Self::Horizontal),
            0xC => Ok(Self::Vertical),
            0xF => Ok(Self::Both),
            _ => Err(ValidationError::InvalidValue {
                control: "swing_mode".to_string(),
                value: code.to_string(),
            }),
        }
    }
}

impl From<SwingMode> for u8 {
    fn from(mode: SwingMode) -> Self {
        mode.code()
    }
}

/// Swing mode as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingSetting {
    /// No swing.
    Off,
    /// Vertical swing.
    Vertical,
    /// Horizontal swing.
    Horizontal,
    /// Swing in both directions.
    Both,
}

impl SwingSetting {
    /// All symbolic swing settings.
    pub const ALL: [Self; 4] = [Self::Off, Self::Vertical, Self::Horizontal, Self::Both];

    /// Returns the symbolic string for this setting.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for SwingSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwingSetting {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "both" => Ok(Self::Both),
            _ => Err(ValidationError::InvalidValue {
                control: "swing_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
