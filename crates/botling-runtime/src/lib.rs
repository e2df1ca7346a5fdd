// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference script runtime for the Botling test harness.
//!
//! Scripts are declarative TOML files: each rule pairs one trigger (a
//! `hear` regex for text, or an `on = "enter"` / `on = "leave"` lifecycle
//! hook) with outbound actions (`send`, `reply`, `send_private`,
//! `message_room`, `emit`). The [`Engine`] loads script files in
//! registration order and dispatches one inbound event at a time against a
//! [`ScriptHost`], resolving the event's completion signal when every
//! matching rule has run.
//!
//! The harness drives this crate only through [`Engine::load_script`] and
//! [`Engine::dispatch`]; anything honoring that surface could stand in for
//! it.

pub mod engine;
pub mod script;

pub use engine::{Engine, ScriptHost};
pub use script::{Action, Rule, Script, Trigger};
