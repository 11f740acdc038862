// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature type.

use std::fmt;

use crate::error::ValidationError;

/// Setpoint in degrees Celsius (16-30).
///
/// Only setpoints sent to the appliance are validated. Values reported by the
/// appliance are taken as they come.
///
/// # Examples
///
/// ```
/// use airco_sync::types::TargetTemperature;
///
/// let t = TargetTemperature::new(21.5).unwrap();
/// assert_eq!(t.celsius(), 21.5);
///
/// assert!(TargetTemperature::new(35.0).is_err());
/// assert!(TargetTemperature::new(f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct TargetTemperature(f32);

impl TargetTemperature {
    /// Lowest accepted setpoint.
    pub const MIN: f32 = 16.0;

    /// Highest accepted setpoint.
    pub const MAX: f32 = 30.0;

    /// Creates a new setpoint.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` if the value is outside
    /// [16, 30] or not a number.
    pub fn new(celsius: f32) -> Result<Self, ValidationError> {
        // NaN fails the range check too
        if !(Self::MIN..=Self::MAX).contains(&celsius) {
            return Err(ValidationError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: celsius,
            });
        }
        Ok(Self(celsius))
    }

    /// Returns the setpoint in degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl TryFrom<f32> for TargetTemperature {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetTemperature> for f32 {
    fn from(value: TargetTemperature) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(TargetTemperature::new(16.0).is_ok());
        assert!(TargetTemperature::new(30.0).is_ok());
        assert!(TargetTemperature::new(15.5).is_err());
        assert!(TargetTemperature::new(30.5).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(TargetTemperature::new(f32::INFINITY).is_err());
        assert!(TargetTemperature::new(f32::NAN).is_err());
    }

    #[test]
    fn display_has_unit() {
        assert_eq!(TargetTemperature::new(22.0).unwrap().to_string(), "22°C");
    }
}
