// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode types.
//!
//! The appliance knows five operating modes plus an "unset" value it reports
//! when no mode has been selected. The user-facing thermostat only offers
//! four: `off`, `auto`, `cool` and `heat`. `off` is not a native mode at all,
//! it is the power flag.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Operating mode as reported by the appliance.
///
/// Serializes as the appliance's numeric code.
///
/// # Examples
///
/// ```
/// use airco_sync::types::OperationalMode;
///
/// assert_eq!(OperationalMode::Cool.code(), 2);
/// assert_eq!(OperationalMode::try_from(4).unwrap(), OperationalMode::Heat);
/// assert!(OperationalMode::try_from(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OperationalMode {
    /// No mode selected.
    Unset,
    /// Appliance picks heating or cooling on its own.
    Auto,
    /// Cooling.
    Cool,
    /// Dehumidifying.
    Dry,
    /// Heating.
    Heat,
    /// Air circulation only.
    Fan,
}

impl OperationalMode {
    /// Returns the appliance's numeric code for this mode.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::Auto => 1,
            Self::Cool => 2,
            Self::Dry => 3,
            Self::Heat => 4,
            Self::Fan => 5,
        }
    }

    /// Returns the lowercase name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Dry => "dry",
            Self::Heat => "heat",
            Self::Fan => "fan",
        }
    }
}

impl fmt::Display for OperationalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for OperationalMode {
    type Error = ValidationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unset),
            1 => Ok(Self::Auto),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Dry),
            4 => Ok(Self::Heat),
            5 => Ok(Self::Fan),
            _ => Err(ValidationError::InvalidValue {
                control: "operational_mode".to_string(),
                value: code.to_string(),
            }),
        }
    }
}

impl From<OperationalMode> for u8 {
    fn from(mode: OperationalMode) -> Self {
        mode.code()
    }
}

/// Thermostat mode as shown to the user.
///
/// # Examples
///
/// ```
/// use airco_sync::types::ThermostatMode;
///
/// let mode: ThermostatMode = "cool".parse().unwrap();
/// assert_eq!(mode, ThermostatMode::Cool);
/// assert_eq!(ThermostatMode::Off.as_str(), "off");
/// assert!("dry".parse::<ThermostatMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    /// Appliance switched off.
    Off,
    /// Automatic heating or cooling.
    Auto,
    /// Cooling.
    Cool,
    /// Heating.
    Heat,
}

impl ThermostatMode {
    /// All symbolic modes, in display order.
    pub const ALL: [Self; 4] = [Self::Off, Self::Auto, Self::Cool, Self::Heat];

    /// Returns the symbolic string for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Auto => "auto",
            Self::Cool => "cool",
            Self::Heat => "heat",
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "auto" => Ok(Self::Auto),
            "cool" => Ok(Self::Cool),
            "heat" => Ok(Self::Heat),
            _ => Err(ValidationError::InvalidValue {
                control: "mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operational_mode_codes_round_trip() {
        for code in 0..=5 {
            let mode = OperationalMode::try_from(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn operational_mode_rejects_unknown_code() {
        let err = OperationalMode::try_from(6).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn operational_mode_serializes_as_code() {
        let json = serde_json::to_string(&OperationalMode::Heat).unwrap();
        assert_eq!(json, "4");
        let mode: OperationalMode = serde_json::from_str("3").unwrap();
        assert_eq!(mode, OperationalMode::Dry);
        assert!(serde_json::from_str::<OperationalMode>("42").is_err());
    }

    #[test]
    fn thermostat_mode_parse_is_case_sensitive() {
        assert_eq!("heat".parse::<ThermostatMode>().unwrap(), ThermostatMode::Heat);
        assert!("HEAT".parse::<ThermostatMode>().is_err());
    }

    #[test]
    fn thermostat_mode_display_matches_parse() {
        for mode in ThermostatMode::ALL {
            assert_eq!(mode.to_string().parse::<ThermostatMode>().unwrap(), mode);
        }
    }
}
