// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Botling chat-bot test harness.
//!
//! This crate holds everything shared between the script runtime and the
//! room harness: message logs, the per-event completion handle, the
//! per-room event bus, the adapter seam traits, and the error type.

pub mod bus;
pub mod completion;
pub mod error;
pub mod log;
pub mod traits;
pub mod types;

pub use bus::{BusEvent, EventBus};
pub use completion::{Completion, CompletionSignal};
pub use error::BotlingError;
pub use log::{MessageEntry, MessageLog, PrivateMessages};
pub use traits::{EnvelopeBuilder, RoomLogSource, StandardEnvelope, Transport};
pub use types::{Envelope, InboundEvent, TextMessage, User, UserAttrs, Utterance};
