// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mock runtime wrapper: a bot runtime with no real transport.
//!
//! `MockRobot` hosts the script engine with the simulated room adapter
//! installed as its sole transport. Inbound events queue onto a single
//! dispatch worker, so events injected sequentially are dispatched
//! sequentially. Messages the bot addresses to rooms other than its own
//! land in a per-room cross-room table instead of the shared log.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use botling_core::{
    BusEvent, CompletionSignal, Envelope, EnvelopeBuilder, InboundEvent, MessageEntry, MessageLog,
    RoomLogSource, Transport,
};
use botling_runtime::{Engine, ScriptHost};

use crate::adapter::{RoomAdapter, BOT_NAME};

type Inbound = (InboundEvent, CompletionSignal);

/// The runtime wrapper for one test room.
pub struct MockRobot {
    engine: Engine,
    adapter: Arc<RoomAdapter>,
    messages_to: Mutex<HashMap<String, Vec<MessageEntry>>>,
    envelopes: Box<dyn EnvelopeBuilder>,
    listener: Mutex<Option<TcpListener>>,
    inbox: mpsc::UnboundedSender<Inbound>,
}

impl MockRobot {
    /// Assemble the robot and start its dispatch worker. The worker holds
    /// only a weak reference, so dropping the room shuts it down.
    pub(crate) fn start(
        engine: Engine,
        adapter: Arc<RoomAdapter>,
        envelopes: Box<dyn EnvelopeBuilder>,
        listener: Option<TcpListener>,
    ) -> Arc<Self> {
        let (inbox, queue) = mpsc::unbounded_channel();
        let robot = Arc::new(Self {
            engine,
            adapter,
            messages_to: Mutex::new(HashMap::new()),
            envelopes,
            listener: Mutex::new(listener),
            inbox,
        });
        tokio::spawn(dispatch_loop(Arc::downgrade(&robot), queue));
        robot
    }

    /// The receive-pipeline entry point: enqueue one inbound event with its
    /// completion signal. If the worker is gone the signal is dropped and
    /// the event's completion never settles.
    pub(crate) fn receive(&self, event: InboundEvent, signal: CompletionSignal) {
        if self.inbox.send((event, signal)).is_err() {
            tracing::warn!("dispatch worker gone, event dropped");
        }
    }

    async fn process(&self, event: InboundEvent, signal: CompletionSignal) {
        let envelope = self.envelopes.build(event.user(), self.adapter.name());
        tracing::debug!(user = %envelope.user.name, room = %envelope.room, "dispatching event");
        self.engine.dispatch(self, &envelope, &event, signal).await;
    }

    /// Route a bot-authored message: the adapter's own room goes to the
    /// shared log, any other room to its lazily created cross-room bucket.
    pub(crate) fn route_to_room(&self, room: &str, text: &str) {
        if room == self.adapter.name() {
            self.room_log().append(BOT_NAME, text.to_owned());
        } else {
            tracing::debug!(room, "cross-room message");
            self.messages_to
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(room.to_owned())
                .or_default()
                .push(MessageEntry::new(BOT_NAME, text.to_owned()));
        }
    }

    /// Snapshot of the cross-room bucket for `room` (empty if none).
    pub(crate) fn messages_to(&self, room: &str) -> Vec<MessageEntry> {
        self.messages_to
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(room)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn listener_addr(&self) -> Option<SocketAddr> {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|l| l.local_addr().ok())
    }

    /// Release the network listener, if one was requested. No-op otherwise.
    pub(crate) fn teardown(&self) {
        let closed = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if closed.is_some() {
            tracing::debug!("listener closed");
        }
    }
}

async fn dispatch_loop(robot: Weak<MockRobot>, mut queue: mpsc::UnboundedReceiver<Inbound>) {
    while let Some((event, signal)) = queue.recv().await {
        let Some(robot) = robot.upgrade() else {
            break;
        };
        robot.process(event, signal).await;
    }
}

impl RoomLogSource for MockRobot {
    fn room_log(&self) -> &MessageLog {
        self.adapter.room_log()
    }
}

#[async_trait]
impl ScriptHost for MockRobot {
    async fn send(&self, envelope: &Envelope, texts: &[String]) {
        self.adapter.send(envelope, texts).await;
    }

    async fn reply(&self, envelope: &Envelope, texts: &[String]) {
        self.adapter.reply(envelope, texts).await;
    }

    async fn send_private(&self, envelope: &Envelope, texts: &[String]) {
        self.adapter.send_private(envelope, texts).await;
    }

    async fn message_room(&self, room: &str, text: &str) {
        self.route_to_room(room, text);
    }

    fn emit(&self, event: BusEvent) {
        self.adapter.bus().emit(event);
    }
}
