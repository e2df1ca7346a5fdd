// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script files and their compiled form.
//!
//! A script file looks like:
//!
//! ```toml
//! [[rule]]
//! hear = "^ping$"
//! reply = ["pong"]
//!
//! [[rule]]
//! on = "enter"
//! send_private = ["hi {user}"]
//! ```
//!
//! Action texts support `{user}` substitution (the triggering user's name)
//! and, for `hear` rules, `$1`-style capture expansion from the trigger
//! regex.

use std::path::Path;

use regex::{Captures, Regex};
use serde::Deserialize;

use botling_core::{BotlingError, BusEvent};

/// What fires a rule.
#[derive(Debug)]
pub enum Trigger {
    /// A text message matching this pattern.
    Hear(Regex),
    /// A user entering the room.
    Enter,
    /// A user leaving the room.
    Leave,
}

/// One outbound action taken when a rule fires.
#[derive(Debug, Clone)]
pub enum Action {
    Send(Vec<String>),
    Reply(Vec<String>),
    SendPrivate(Vec<String>),
    MessageRoom { room: String, text: String },
    Emit(BusEvent),
}

/// A compiled rule: one trigger, zero or more actions.
#[derive(Debug)]
pub struct Rule {
    pub trigger: Trigger,
    pub actions: Vec<Action>,
}

/// A compiled script: its rules in file order.
#[derive(Debug)]
pub struct Script {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Script {
    /// Parse one script file's source. `path` is used for the script name
    /// and for error context only.
    pub fn parse(path: &Path, src: &str) -> Result<Self, BotlingError> {
        let file: ScriptFile = toml::from_str(src).map_err(|e| BotlingError::ScriptParse {
            path: path.to_owned(),
            source: Box::new(e),
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let rules = file
            .rule
            .into_iter()
            .map(RuleSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, rules })
    }
}

/// Substitute `{user}` and expand regex captures into an action template.
pub(crate) fn expand(template: &str, user: &str, caps: Option<&Captures<'_>>) -> String {
    let with_user = template.replace("{user}", user);
    match caps {
        Some(caps) => {
            let mut out = String::new();
            caps.expand(&with_user, &mut out);
            out
        }
        None => with_user,
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    rule: Vec<RuleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleSpec {
    hear: Option<String>,
    on: Option<String>,
    #[serde(default)]
    send: Vec<String>,
    #[serde(default)]
    reply: Vec<String>,
    #[serde(default)]
    send_private: Vec<String>,
    #[serde(default)]
    message_room: Vec<RoomMessageSpec>,
    #[serde(default)]
    emit: Vec<EmitSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoomMessageSpec {
    room: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmitSpec {
    name: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl RuleSpec {
    fn compile(self) -> Result<Rule, BotlingError> {
        let trigger = match (self.hear, self.on.as_deref()) {
            (Some(pattern), None) => {
                let regex = Regex::new(&pattern).map_err(|e| BotlingError::Pattern {
                    pattern,
                    source: e,
                })?;
                Trigger::Hear(regex)
            }
            (None, Some("enter")) => Trigger::Enter,
            (None, Some("leave")) => Trigger::Leave,
            (None, Some(other)) => {
                return Err(BotlingError::Script(format!(
                    "unknown lifecycle trigger `{other}` (expected `enter` or `leave`)"
                )));
            }
            (Some(_), Some(_)) => {
                return Err(BotlingError::Script(
                    "rule has both `hear` and `on` triggers".to_string(),
                ));
            }
            (None, None) => {
                return Err(BotlingError::Script(
                    "rule has no `hear` or `on` trigger".to_string(),
                ));
            }
        };

        let mut actions = Vec::new();
        if !self.send.is_empty() {
            actions.push(Action::Send(self.send));
        }
        if !self.reply.is_empty() {
            actions.push(Action::Reply(self.reply));
        }
        if !self.send_private.is_empty() {
            actions.push(Action::SendPrivate(self.send_private));
        }
        for spec in self.message_room {
            actions.push(Action::MessageRoom {
                room: spec.room,
                text: spec.text,
            });
        }
        for spec in self.emit {
            actions.push(Action::Emit(BusEvent::with_payload(spec.name, spec.payload)));
        }

        Ok(Rule { trigger, actions })
    }
}
