// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-room event bus.
//!
//! Each test room owns its own subscription registry, so tests stay
//! isolated from one another and there is no process-wide listener cap to
//! relax. Subscriptions are unbounded; closed subscribers are pruned on the
//! next emit.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

/// A named event carried on the bus, with an optional JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    pub name: String,
    pub payload: serde_json::Value,
}

impl BusEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Fan-out bus scoped to one room. Cheap to clone; clones share the same
/// subscriber registry.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<BusEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber receiving every event emitted after this
    /// call.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<BusEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, pruning closed ones.
    pub fn emit(&self, event: BusEvent) {
        tracing::debug!(event = %event.name, "bus emit");
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
