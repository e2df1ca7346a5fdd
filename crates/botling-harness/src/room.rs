// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assembled room handed to test code, and its event injector.
//!
//! `Room` couples the simulated adapter's logs with `room.user`, the
//! injector that plays inbound traffic: `say` wraps text into a message
//! stamped with the room, `enter`/`leave` synthesize lifecycle events.
//! Every injection returns a [`Completion`] that settles once the runtime
//! has finished reacting to that event.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::mpsc;

use botling_core::{
    BusEvent, Completion, InboundEvent, MessageEntry, RoomLogSource, TextMessage, User, UserAttrs,
    Utterance,
};

use crate::adapter::RoomAdapter;
use crate::robot::MockRobot;

/// One simulated chat room under test.
pub struct Room {
    /// The inbound half: simulated users speaking, entering, leaving.
    pub user: SimUser,
    adapter: Arc<RoomAdapter>,
    robot: Arc<MockRobot>,
}

impl Room {
    pub(crate) fn new(adapter: Arc<RoomAdapter>, robot: Arc<MockRobot>) -> Self {
        Self {
            user: SimUser {
                adapter: adapter.clone(),
                robot: robot.clone(),
            },
            adapter,
            robot,
        }
    }

    /// The room's configured name.
    pub fn name(&self) -> &str {
        self.adapter.name()
    }

    /// Snapshot of the shared room log in issue order.
    pub fn messages(&self) -> Vec<MessageEntry> {
        self.adapter.messages()
    }

    /// Snapshot of every private-message bucket, keyed by recipient.
    pub fn private_messages(&self) -> HashMap<String, Vec<MessageEntry>> {
        self.adapter.private_messages()
    }

    /// The private bucket for one recipient, if any private message was
    /// sent to them.
    pub fn private_messages_to(&self, recipient: &str) -> Option<Vec<MessageEntry>> {
        self.adapter.private_messages_to(recipient)
    }

    /// Messages the bot addressed to `room` when that is not this room's
    /// name. Empty if none were routed there.
    pub fn messages_to(&self, room: &str) -> Vec<MessageEntry> {
        self.robot.messages_to(room)
    }

    /// Re-emit an arbitrary named event on the room's bus, unchanged.
    pub fn forward_event(&self, event: BusEvent) {
        self.adapter.forward_event(event);
    }

    /// Subscribe to the room's bus: receives forwarded events and events
    /// emitted by scripts from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<BusEvent> {
        self.adapter.bus().subscribe()
    }

    /// The bound listener address, when the room was built with `httpd`.
    pub fn listener_addr(&self) -> Option<SocketAddr> {
        self.robot.listener_addr()
    }

    /// Release the room's network listener, if any. No-op otherwise.
    pub fn teardown(&self) {
        self.robot.teardown();
    }
}

/// Injector for simulated user activity in one room.
pub struct SimUser {
    adapter: Arc<RoomAdapter>,
    robot: Arc<MockRobot>,
}

impl SimUser {
    /// A user speaks in the room.
    ///
    /// Raw text is wrapped into a [`TextMessage`] whose user is stamped
    /// with this room's name; a pre-built message is used verbatim. The
    /// input is appended to the room log before dispatch, so the log
    /// reflects it even if the runtime never completes.
    pub fn say(&self, user_name: &str, utterance: impl Into<Utterance>) -> Completion {
        self.say_with(user_name, utterance, UserAttrs::new())
    }

    /// Like [`say`](SimUser::say), with extra user attributes. The `room`
    /// attribute is always overwritten with this room's name.
    pub fn say_with(
        &self,
        user_name: &str,
        utterance: impl Into<Utterance>,
        attrs: UserAttrs,
    ) -> Completion {
        let message = match utterance.into() {
            Utterance::Message(message) => message,
            Utterance::Text(text) => TextMessage::new(self.stamped_user(user_name, attrs), text),
        };
        self.adapter
            .room_log()
            .append(user_name, message.text.clone());
        self.dispatch(InboundEvent::Text(message))
    }

    /// A user enters the room. Lifecycle events are not messages and never
    /// touch the room log.
    pub fn enter(&self, user_name: &str) -> Completion {
        self.enter_with(user_name, UserAttrs::new())
    }

    pub fn enter_with(&self, user_name: &str, attrs: UserAttrs) -> Completion {
        self.dispatch(InboundEvent::Enter(self.stamped_user(user_name, attrs)))
    }

    /// A user leaves the room. Lifecycle events are not messages and never
    /// touch the room log.
    pub fn leave(&self, user_name: &str) -> Completion {
        self.leave_with(user_name, UserAttrs::new())
    }

    pub fn leave_with(&self, user_name: &str, attrs: UserAttrs) -> Completion {
        self.dispatch(InboundEvent::Leave(self.stamped_user(user_name, attrs)))
    }

    fn stamped_user(&self, user_name: &str, mut attrs: UserAttrs) -> User {
        attrs.insert("room".to_string(), self.adapter.name().to_owned());
        User::with_attrs(user_name, attrs)
    }

    fn dispatch(&self, event: InboundEvent) -> Completion {
        let (signal, completion) = Completion::pair();
        self.robot.receive(event, signal);
        completion
    }
}
