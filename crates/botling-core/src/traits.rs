// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between the harness, the adapter, and the runtime.

use async_trait::async_trait;

use crate::log::MessageLog;
use crate::types::{Envelope, User};

/// The outbound transport seam: what a chat adapter must offer the runtime.
///
/// The simulated room adapter is the only in-tree implementation; a real
/// deployment would put a network-backed adapter behind the same trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver each text to the room addressed by the envelope.
    async fn send(&self, envelope: &Envelope, texts: &[String]);

    /// Like [`send`](Transport::send), but address the triggering user with
    /// an `@<name> ` prefix on every text.
    async fn reply(&self, envelope: &Envelope, texts: &[String]);

    /// Deliver each text privately to the envelope's user, never to the
    /// room.
    async fn send_private(&self, envelope: &Envelope, texts: &[String]);
}

/// Uniform access to a room's shared message log.
///
/// Every adapter-like component answers "where do this room's messages
/// live" through this one accessor, so callers never branch on concrete
/// types to find the log.
pub trait RoomLogSource {
    fn room_log(&self) -> &MessageLog;
}

/// Extension point for tests that want to intercept envelope construction.
///
/// The harness builds one envelope per dispatched event; substituting a
/// custom builder lets advanced tests reshape the user or room before any
/// script sees it.
pub trait EnvelopeBuilder: Send + Sync {
    fn build(&self, user: &User, room: &str) -> Envelope;
}

/// The default envelope shape: triggering user and room, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEnvelope;

impl EnvelopeBuilder for StandardEnvelope {
    fn build(&self, user: &User, room: &str) -> Envelope {
        Envelope {
            user: user.clone(),
            room: room.to_owned(),
        }
    }
}
