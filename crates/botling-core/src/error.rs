// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Botling test harness.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for harness assembly and script loading.
///
/// All variants are load-time failures: they surface synchronously from the
/// harness factory and are never recovered there. Dispatch-time failures
/// stay inside the runtime (see the crate docs on the completion contract).
#[derive(Debug, Error)]
pub enum BotlingError {
    /// A configured script path does not exist or cannot be inspected.
    #[error("script path not found: {path}")]
    ScriptPath {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A script file exists but could not be read.
    #[error("failed to read script {path}")]
    ScriptRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A script file is not valid TOML.
    #[error("failed to parse script {path}")]
    ScriptParse {
        path: PathBuf,
        source: Box<toml::de::Error>,
    },

    /// A rule's `hear` trigger is not a valid regular expression.
    #[error("invalid trigger pattern `{pattern}`")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    /// A rule is structurally malformed (e.g. zero or two triggers).
    #[error("malformed script rule: {0}")]
    Script(String),

    /// I/O failure outside script loading (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
