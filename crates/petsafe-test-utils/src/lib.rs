// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for PetSafe tests.
//!
//! - [`MockTransport`] - scripted upstream with a call counter
//! - [`fixtures`] - canned credentials and upstream bodies

pub mod fixtures;
pub mod mock_transport;

pub use mock_transport::MockTransport;
