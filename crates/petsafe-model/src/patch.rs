// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tri-state field for partial updates.
//!
//! An edit form cannot tell "left empty" from "cleared" by looking at the
//! text alone, so the two are separate states here:
//!
//! | state      | on the wire                   |
//! |------------|-------------------------------|
//! | `Unset`    | key omitted                   |
//! | `Clear`    | `null` (or `""`, see [`clear_as_empty`]) |
//! | `Set(v)`   | `v`                           |
//!
//! Fields must carry `#[serde(default, skip_serializing_if = "Patch::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the upstream value untouched.
    Unset,
    /// Remove the upstream value.
    Clear,
    /// Replace the upstream value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `Some` sets, `None` leaves the field untouched.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

impl Patch<String> {
    /// Patch from raw form input: blank text leaves the field untouched.
    ///
    /// Clearing has to be requested explicitly with [`Patch::Clear`].
    pub fn from_form(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::Unset
        } else {
            Self::Set(trimmed.to_string())
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unset | Self::Clear => serializer.serialize_none(),
        }
    }
}

/// Absent -> `Unset` (via `#[serde(default)]`), `null` -> `Clear`, value -> `Set`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}

/// Serializer for text fields the upstream clears with `""` rather than `null`.
pub fn clear_as_empty<S: Serializer>(patch: &Patch<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match patch {
        Patch::Set(value) => serializer.serialize_str(value),
        Patch::Clear => serializer.serialize_str(""),
        Patch::Unset => serializer.serialize_none(),
    }
}
