// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The simulated room adapter: the outbound half of the harness.
//!
//! `RoomAdapter` stands in for a real chat transport. Outbound sends append
//! to the in-memory logs instead of hitting a network, and the runtime's
//! internal events can be re-emitted unchanged on the room's bus for tests
//! that assert on them.

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;

use botling_core::{
    BotlingError, BusEvent, Envelope, EventBus, MessageEntry, MessageLog, PrivateMessages,
    RoomLogSource, Transport,
};

/// The bot identity recorded as the author of every outbound message.
pub const BOT_NAME: &str = "botling";

/// The simulated adapter for one test room.
///
/// Owns the shared message log and the per-recipient private buckets for
/// the lifetime of the room. The room name is assigned exactly once by the
/// factory before the first event is injected.
#[derive(Debug)]
pub struct RoomAdapter {
    name: OnceLock<String>,
    messages: MessageLog,
    private: PrivateMessages,
    bus: EventBus,
}

impl RoomAdapter {
    pub(crate) fn new(bus: EventBus) -> Self {
        Self {
            name: OnceLock::new(),
            messages: MessageLog::new(),
            private: PrivateMessages::new(),
            bus,
        }
    }

    /// The room's configured name; empty until the factory assigns it.
    pub fn name(&self) -> &str {
        self.name.get().map(String::as_str).unwrap_or("")
    }

    pub(crate) fn assign_name(&self, name: String) -> Result<(), BotlingError> {
        self.name
            .set(name)
            .map_err(|_| BotlingError::Internal("room name assigned twice".to_string()))
    }

    /// Snapshot of the shared room log in issue order.
    pub fn messages(&self) -> Vec<MessageEntry> {
        self.messages.snapshot()
    }

    /// Snapshot of every private-message bucket.
    pub fn private_messages(&self) -> HashMap<String, Vec<MessageEntry>> {
        self.private.snapshot()
    }

    /// The private bucket for one recipient, if any.
    pub fn private_messages_to(&self, recipient: &str) -> Option<Vec<MessageEntry>> {
        self.private.bucket(recipient)
    }

    /// Re-emit an arbitrary named event on the room's bus, unchanged.
    pub fn forward_event(&self, event: BusEvent) {
        self.bus.emit(event);
    }

    pub(crate) fn bus(&self) -> &EventBus {
        &self.bus
    }
}

impl RoomLogSource for RoomAdapter {
    fn room_log(&self) -> &MessageLog {
        &self.messages
    }
}

#[async_trait]
impl Transport for RoomAdapter {
    async fn send(&self, _envelope: &Envelope, texts: &[String]) {
        for text in texts {
            self.room_log().append(BOT_NAME, text.clone());
        }
    }

    async fn reply(&self, envelope: &Envelope, texts: &[String]) {
        for text in texts {
            self.room_log()
                .append(BOT_NAME, format!("@{} {}", envelope.user.name, text));
        }
    }

    async fn send_private(&self, envelope: &Envelope, texts: &[String]) {
        for text in texts {
            self.private
                .append(&envelope.user.name, BOT_NAME, text.clone());
        }
    }
}
