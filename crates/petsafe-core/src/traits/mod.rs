// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams for the PetSafe client proxy.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch, so the transport and
//! the persistence backend can be swapped for test doubles.

pub mod persistence;
pub mod transport;

pub use persistence::CredentialPersistence;
pub use transport::Transport;
