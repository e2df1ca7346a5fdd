// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common value types exchanged between the harness and the runtime.
//!
//! All of these are ephemeral: a [`User`] and the [`InboundEvent`] wrapping
//! it are built fresh for each injected event and consumed by one dispatch.

use std::collections::HashMap;

/// Arbitrary attribute bag attached to a simulated user (room, roles, ...).
pub type UserAttrs = HashMap<String, String>;

/// A simulated chat user: a name plus an attribute bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub attrs: UserAttrs,
}

impl User {
    /// Create a user with an empty attribute bag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: UserAttrs::new(),
        }
    }

    /// Create a user with the given attributes.
    pub fn with_attrs(name: impl Into<String>, attrs: UserAttrs) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }

    /// The room this user was stamped with, if any.
    pub fn room(&self) -> Option<&str> {
        self.attrs.get("room").map(String::as_str)
    }
}

/// The addressing bundle attached to every outbound send: the triggering
/// user and the room the exchange happens in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub user: User,
    pub room: String,
}

/// A text message as handed to the runtime's receive pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub user: User,
    pub text: String,
}

impl TextMessage {
    pub fn new(user: User, text: impl Into<String>) -> Self {
        Self {
            user,
            text: text.into(),
        }
    }
}

/// One simulated inbound event, consumed by exactly one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A user spoke in the room.
    Text(TextMessage),
    /// A user entered the room (lifecycle event, not a message).
    Enter(User),
    /// A user left the room (lifecycle event, not a message).
    Leave(User),
}

impl InboundEvent {
    /// The user that triggered this event.
    pub fn user(&self) -> &User {
        match self {
            InboundEvent::Text(msg) => &msg.user,
            InboundEvent::Enter(user) | InboundEvent::Leave(user) => user,
        }
    }

    /// The message text, for text events.
    pub fn text(&self) -> Option<&str> {
        match self {
            InboundEvent::Text(msg) => Some(&msg.text),
            _ => None,
        }
    }
}

/// What a simulated user says: either raw text, which the injector wraps
/// into a [`TextMessage`] stamped with the room, or a fully-formed message
/// used verbatim.
#[derive(Debug, Clone)]
pub enum Utterance {
    Text(String),
    Message(TextMessage),
}

impl From<&str> for Utterance {
    fn from(text: &str) -> Self {
        Utterance::Text(text.to_owned())
    }
}

impl From<String> for Utterance {
    fn from(text: String) -> Self {
        Utterance::Text(text)
    }
}

impl From<TextMessage> for Utterance {
    fn from(message: TextMessage) -> Self {
        Utterance::Message(message)
    }
}
