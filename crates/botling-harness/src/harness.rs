// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The harness factory: assembles one room per test.
//!
//! A `Harness` is configured once with the script paths under test; each
//! [`RoomBuilder::build`] call loads those scripts into a fresh engine,
//! signals the ready hook, assigns the room name, and returns the
//! assembled [`Room`]. Load errors propagate to the caller unrecovered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::TcpListener;

use botling_core::{BotlingError, BusEvent, EnvelopeBuilder, EventBus, StandardEnvelope};
use botling_runtime::Engine;

use crate::adapter::RoomAdapter;
use crate::robot::MockRobot;
use crate::room::Room;

/// Factory for simulated rooms running a fixed set of scripts.
#[derive(Debug, Clone)]
pub struct Harness {
    script_paths: Vec<PathBuf>,
}

impl Harness {
    /// A harness loading scripts from one path: a file loads that one
    /// script, a directory loads every file inside it in lexicographic
    /// order.
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_paths: vec![script_path.into()],
        }
    }

    /// A harness loading scripts from several paths, in the given order.
    pub fn from_paths(script_paths: Vec<PathBuf>) -> Self {
        Self { script_paths }
    }

    /// Start configuring a new room.
    pub fn room(&self) -> RoomBuilder<'_> {
        RoomBuilder {
            harness: self,
            name: "room1".to_string(),
            httpd: true,
            envelopes: Box::new(StandardEnvelope),
        }
    }
}

/// Builder for one simulated room.
pub struct RoomBuilder<'a> {
    harness: &'a Harness,
    name: String,
    httpd: bool,
    envelopes: Box<dyn EnvelopeBuilder>,
}

impl RoomBuilder<'_> {
    /// The room's name. Defaults to `"room1"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether to bind a real listener socket for the room's runtime.
    /// Defaults to `true`; the port is always ephemeral.
    pub fn httpd(mut self, httpd: bool) -> Self {
        self.httpd = httpd;
        self
    }

    /// Substitute the envelope-construction extension point.
    pub fn envelopes(mut self, envelopes: Box<dyn EnvelopeBuilder>) -> Self {
        self.envelopes = envelopes;
        self
    }

    /// Load every configured script, signal the ready hook, and assemble
    /// the room.
    ///
    /// The `loaded` ready event fires during assembly, before the room
    /// exists: it is a signal to the runtime side, and no
    /// [`Room::subscribe`](crate::Room::subscribe) call can observe it.
    pub async fn build(self) -> Result<Room, BotlingError> {
        let mut engine = Engine::new();
        for path in &self.harness.script_paths {
            load_path(&mut engine, path).await?;
        }

        let bus = EventBus::new();
        let adapter = Arc::new(RoomAdapter::new(bus.clone()));

        // Ready hook: everything is registered, nothing has run yet.
        bus.emit(BusEvent::new("loaded"));

        adapter.assign_name(self.name)?;

        let listener = if self.httpd {
            Some(TcpListener::bind(("127.0.0.1", 0)).await?)
        } else {
            None
        };

        let robot = MockRobot::start(engine, adapter.clone(), self.envelopes, listener);
        Ok(Room::new(adapter, robot))
    }
}

/// Load one configured path: a single script file, or every file of a
/// directory sorted lexicographically for deterministic registration order.
async fn load_path(engine: &mut Engine, path: &Path) -> Result<(), BotlingError> {
    let not_found = |source| BotlingError::ScriptPath {
        path: path.to_owned(),
        source,
    };
    let metadata = tokio::fs::metadata(path).await.map_err(not_found)?;

    if metadata.is_dir() {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(path).await.map_err(not_found)?;
        while let Some(entry) = entries.next_entry().await.map_err(not_found)? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        for name in names {
            engine.load_script(path, &name).await?;
        }
    } else {
        let dir = path.parent().unwrap_or(Path::new("."));
        let file = path.file_name().ok_or_else(|| {
            BotlingError::Internal(format!("script path {} has no file name", path.display()))
        })?;
        engine.load_script(dir, &file.to_string_lossy()).await?;
    }
    Ok(())
}
