// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `{"data": …}` response wrapper.

use serde::Deserialize;

/// Upstream response wrapper. A missing or `null` `data` means "no content".
///
/// Sibling keys such as `"success"` are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn into_option(self) -> Option<T> {
        self.data
    }
}

impl<T> Envelope<Vec<T>> {
    /// The list payload; `null` or absent becomes an empty vector.
    pub fn into_list(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}
