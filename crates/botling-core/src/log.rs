// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only message logs.
//!
//! A [`MessageLog`] records every `(author, text)` pair in issue order and
//! never mutates or removes an entry. [`PrivateMessages`] keeps one such
//! ordered sequence per recipient, with buckets created lazily on first
//! send. Reads hand out owned snapshots so a caller never observes later
//! appends through a previously returned value.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// One recorded `(author, text)` pair. Identity is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub author: String,
    pub text: String,
}

impl MessageEntry {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

impl From<(&str, &str)> for MessageEntry {
    fn from((author, text): (&str, &str)) -> Self {
        Self::new(author, text)
    }
}

// A panicking script task must not wedge every later assertion, so lock
// poisoning is shrugged off and the guard recovered.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// The shared room log: an append-only ordered record of messages.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<Vec<MessageEntry>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one entry to the end of the log.
    pub fn append(&self, author: impl Into<String>, text: impl Into<String>) {
        relock(&self.entries).push(MessageEntry::new(author, text));
    }

    /// An owned copy of the full log in append order.
    pub fn snapshot(&self) -> Vec<MessageEntry> {
        relock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        relock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-recipient private message buckets.
#[derive(Debug, Default)]
pub struct PrivateMessages {
    buckets: Mutex<HashMap<String, Vec<MessageEntry>>>,
}

impl PrivateMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the recipient's bucket, creating it on first use.
    pub fn append(
        &self,
        recipient: &str,
        author: impl Into<String>,
        text: impl Into<String>,
    ) {
        relock(&self.buckets)
            .entry(recipient.to_owned())
            .or_default()
            .push(MessageEntry::new(author, text));
    }

    /// The bucket for one recipient, if any private message was sent to them.
    pub fn bucket(&self, recipient: &str) -> Option<Vec<MessageEntry>> {
        relock(&self.buckets).get(recipient).cloned()
    }

    /// An owned copy of every bucket.
    pub fn snapshot(&self) -> HashMap<String, Vec<MessageEntry>> {
        relock(&self.buckets).clone()
    }
}
