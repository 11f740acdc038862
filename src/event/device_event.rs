// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::codec::Diagnostic;
use crate::state::ControlUpdate;

/// Events emitted while synchronizing an appliance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DeviceEvent {
    /// An observable received a value, from a poll or a confirmed write.
    ControlUpdated(ControlUpdate),

    /// A snapshot could not be fully decoded.
    Diagnostic(Diagnostic),

    /// A poll cycle failed. Carries the error message; the next tick retries.
    PollFailed(String),
}

impl DeviceEvent {
    /// Returns the update carried by this event, if any.
    #[must_use]
    pub fn update(&self) -> Option<&ControlUpdate> {
        match self {
            Self::ControlUpdated(update) => Some(update),
            _ => None,
        }
    }

    /// Returns `true` for events that signal a problem.
    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Diagnostic(_) | Self::PollFailed(_))
    }
}
