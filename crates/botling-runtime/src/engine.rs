// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The receive pipeline: script registration and event dispatch.

use std::path::Path;

use async_trait::async_trait;

use botling_core::{BotlingError, BusEvent, CompletionSignal, Envelope, InboundEvent};

use crate::script::{expand, Action, Script, Trigger};

/// What the engine needs from whatever hosts it: the outbound surface
/// scripts write to. The mock robot wrapper is the in-tree implementation.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    async fn send(&self, envelope: &Envelope, texts: &[String]);
    async fn reply(&self, envelope: &Envelope, texts: &[String]);
    async fn send_private(&self, envelope: &Envelope, texts: &[String]);
    async fn message_room(&self, room: &str, text: &str);
    fn emit(&self, event: BusEvent);
}

/// The script runtime: holds every loaded script in registration order and
/// dispatches one inbound event at a time.
#[derive(Debug, Default)]
pub struct Engine {
    scripts: Vec<Script>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one script file from `dir`, appending its rules after every
    /// previously registered script. Errors propagate unrecovered.
    pub async fn load_script(&mut self, dir: &Path, file: &str) -> Result<(), BotlingError> {
        let path = dir.join(file);
        let src = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BotlingError::ScriptRead {
                path: path.clone(),
                source: e,
            })?;
        let script = Script::parse(&path, &src)?;
        tracing::debug!(script = %script.name, rules = script.rules.len(), "script registered");
        self.scripts.push(script);
        Ok(())
    }

    /// Script names in registration order.
    pub fn script_names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run every rule matching `event`, in registration order, then resolve
    /// the completion signal exactly once.
    ///
    /// A panicking host drops the signal before it is resolved, which
    /// leaves the event's completion pending forever. That mirrors the
    /// documented behavior for scripts that never finish.
    pub async fn dispatch(
        &self,
        host: &dyn ScriptHost,
        envelope: &Envelope,
        event: &InboundEvent,
        signal: CompletionSignal,
    ) {
        let user = envelope.user.name.clone();
        for script in &self.scripts {
            for rule in &script.rules {
                let caps = match (&rule.trigger, event) {
                    (Trigger::Hear(regex), InboundEvent::Text(msg)) => {
                        match regex.captures(&msg.text) {
                            Some(caps) => Some(caps),
                            None => continue,
                        }
                    }
                    (Trigger::Enter, InboundEvent::Enter(_)) => None,
                    (Trigger::Leave, InboundEvent::Leave(_)) => None,
                    _ => continue,
                };

                tracing::debug!(script = %script.name, "rule matched");
                for action in &rule.actions {
                    match action {
                        Action::Send(texts) => {
                            let texts: Vec<String> =
                                texts.iter().map(|t| expand(t, &user, caps.as_ref())).collect();
                            host.send(envelope, &texts).await;
                        }
                        Action::Reply(texts) => {
                            let texts: Vec<String> =
                                texts.iter().map(|t| expand(t, &user, caps.as_ref())).collect();
                            host.reply(envelope, &texts).await;
                        }
                        Action::SendPrivate(texts) => {
                            let texts: Vec<String> =
                                texts.iter().map(|t| expand(t, &user, caps.as_ref())).collect();
                            host.send_private(envelope, &texts).await;
                        }
                        Action::MessageRoom { room, text } => {
                            let text = expand(text, &user, caps.as_ref());
                            host.message_room(room, &text).await;
                        }
                        Action::Emit(event) => host.emit(event.clone()),
                    }
                }
            }
        }
        signal.resolve();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use botling_core::{Completion, TextMessage, User};

    /// Records every host call as a flat string for order assertions.
    #[derive(Default)]
    struct RecordingHost {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ScriptHost for RecordingHost {
        async fn send(&self, _envelope: &Envelope, texts: &[String]) {
            self.record(format!("send {}", texts.join("|")));
        }
        async fn reply(&self, envelope: &Envelope, texts: &[String]) {
            self.record(format!("reply @{} {}", envelope.user.name, texts.join("|")));
        }
        async fn send_private(&self, envelope: &Envelope, texts: &[String]) {
            self.record(format!("private {} {}", envelope.user.name, texts.join("|")));
        }
        async fn message_room(&self, room: &str, text: &str) {
            self.record(format!("room {room} {text}"));
        }
        fn emit(&self, event: BusEvent) {
            self.record(format!("emit {}", event.name));
        }
    }

    async fn engine_from(sources: &[(&str, &str)]) -> Engine {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new();
        for (file, src) in sources {
            tokio::fs::write(dir.path().join(file), src).await.unwrap();
            engine.load_script(dir.path(), file).await.unwrap();
        }
        engine
    }

    fn text_event(user: &str, text: &str) -> (Envelope, InboundEvent) {
        let user = User::new(user);
        let envelope = Envelope {
            user: user.clone(),
            room: "room1".to_string(),
        };
        (envelope, InboundEvent::Text(TextMessage::new(user, text)))
    }

    #[tokio::test]
    async fn dispatch_runs_matching_rule_and_resolves() {
        let engine = engine_from(&[(
            "pong.toml",
            r#"
            [[rule]]
            hear = "^ping$"
            reply = ["pong"]
            "#,
        )])
        .await;

        let host = RecordingHost::default();
        let (envelope, event) = text_event("alice", "ping");
        let (signal, completion) = Completion::pair();
        engine.dispatch(&host, &envelope, &event, signal).await;

        completion.await;
        assert_eq!(host.calls(), vec!["reply @alice pong"]);
    }

    #[tokio::test]
    async fn dispatch_resolves_even_without_a_match() {
        let engine = engine_from(&[]).await;
        let host = RecordingHost::default();
        let (envelope, event) = text_event("alice", "anything");
        let (signal, completion) = Completion::pair();
        engine.dispatch(&host, &envelope, &event, signal).await;

        completion.await;
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn capture_expansion_reaches_the_host() {
        let engine = engine_from(&[(
            "memo.toml",
            r#"
            [[rule]]
            hear = "^remember (.+)$"
            send = ["{user} wants me to remember $1"]
            "#,
        )])
        .await;

        let host = RecordingHost::default();
        let (envelope, event) = text_event("alice", "remember the milk");
        let (signal, completion) = Completion::pair();
        engine.dispatch(&host, &envelope, &event, signal).await;

        completion.await;
        assert_eq!(
            host.calls(),
            vec!["send alice wants me to remember the milk"]
        );
    }

    #[tokio::test]
    async fn lifecycle_triggers_only_fire_on_their_event() {
        let engine = engine_from(&[(
            "welcome.toml",
            r#"
            [[rule]]
            on = "enter"
            send_private = ["hi {user}"]
            "#,
        )])
        .await;

        let host = RecordingHost::default();
        let user = User::new("bob");
        let envelope = Envelope {
            user: user.clone(),
            room: "room1".to_string(),
        };

        let (signal, completion) = Completion::pair();
        engine
            .dispatch(&host, &envelope, &InboundEvent::Enter(user.clone()), signal)
            .await;
        completion.await;

        let (signal, completion) = Completion::pair();
        engine
            .dispatch(&host, &envelope, &InboundEvent::Leave(user), signal)
            .await;
        completion.await;

        assert_eq!(host.calls(), vec!["private bob hi bob"]);
    }

    #[tokio::test]
    async fn scripts_run_in_registration_order() {
        let first = r#"
            [[rule]]
            hear = "^go$"
            send = ["from-a"]
        "#;
        let second = r#"
            [[rule]]
            hear = "^go$"
            send = ["from-b"]
        "#;
        let engine = engine_from(&[("a.toml", first), ("b.toml", second)]).await;
        assert_eq!(engine.script_names(), vec!["a", "b"]);

        let host = RecordingHost::default();
        let (envelope, event) = text_event("alice", "go");
        let (signal, completion) = Completion::pair();
        engine.dispatch(&host, &envelope, &event, signal).await;

        completion.await;
        assert_eq!(host.calls(), vec!["send from-a", "send from-b"]);
    }

    #[tokio::test]
    async fn load_script_propagates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new();
        let err = engine.load_script(dir.path(), "missing.toml").await.unwrap_err();
        assert!(matches!(err, BotlingError::ScriptRead { .. }));
    }
}
