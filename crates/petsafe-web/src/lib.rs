// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browser-facing front end for the PetSafe upstream.
//!
//! Each browser session gets its own memory-backed credential store, looked
//! up through a session cookie. The upstream tokens never leave the server;
//! handlers call the upstream on the browser's behalf and translate
//! classified failures into HTTP outcomes the browser can act on.

pub mod error;
pub mod form;
pub mod handlers;
pub mod server;
pub mod session;

pub use error::WebError;
pub use server::{ServerConfig, WebState, router, spawn_idle_sweep, start_server};
