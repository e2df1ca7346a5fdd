// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory room harness for testing chat scripts.
//!
//! The harness replaces the real chat transport with a simulated room that
//! records every message exchanged and lets tests play users speaking,
//! entering, and leaving:
//!
//! ```no_run
//! # async fn demo() -> Result<(), botling_core::BotlingError> {
//! use botling_harness::Harness;
//!
//! let harness = Harness::new("scripts");
//! let room = harness.room().httpd(false).build().await?;
//!
//! room.user.say("alice", "ping").await;
//! assert_eq!(
//!     room.messages(),
//!     vec![("alice", "ping").into(), ("botling", "@alice pong").into()],
//! );
//! room.teardown();
//! # Ok(())
//! # }
//! ```
//!
//! Each injected event returns a [`botling_core::Completion`]; awaiting it
//! waits for the runtime to finish reacting to that specific event. There
//! is no timeout: a script that never finishes hangs the awaiting test.

pub mod adapter;
pub mod harness;
pub mod robot;
pub mod room;

pub use adapter::{RoomAdapter, BOT_NAME};
pub use harness::{Harness, RoomBuilder};
pub use robot::MockRobot;
pub use room::{Room, SimUser};

pub use botling_core::{
    BotlingError, BusEvent, Completion, Envelope, EnvelopeBuilder, MessageEntry, StandardEnvelope,
    TextMessage, User, UserAttrs,
};
