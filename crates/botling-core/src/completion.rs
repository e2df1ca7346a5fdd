// SPDX-FileCopyrightText: 2026 Botling Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-event completion handles.
//!
//! Each injected event yields one [`Completion`] future and one
//! [`CompletionSignal`]. The signal travels through the runtime's receive
//! pipeline and is resolved exactly once when the runtime has finished
//! reacting to that event; the completion carries no value.
//!
//! There is deliberately no timeout: a runtime that never resolves its
//! signal (or drops it, e.g. a script swallowing the event) leaves the
//! completion pending forever, and the awaiting test hangs. Detecting that
//! is out of scope for the harness.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// The runtime's half of the contract: resolves the matching [`Completion`]
/// at most once, by move.
#[derive(Debug)]
pub struct CompletionSignal {
    tx: oneshot::Sender<()>,
}

impl CompletionSignal {
    /// Mark the event as fully processed.
    pub fn resolve(self) {
        // The receiver may already be gone if the test dropped its handle.
        let _ = self.tx.send(());
    }
}

/// The test's half of the contract: a future that resolves once the runtime
/// signals it has finished processing the injected event.
#[derive(Debug)]
#[must_use = "a completion does nothing unless awaited"]
pub struct Completion {
    rx: Option<oneshot::Receiver<()>>,
}

impl Completion {
    /// Create a linked signal/completion pair for one event.
    pub fn pair() -> (CompletionSignal, Completion) {
        let (tx, rx) = oneshot::channel();
        (CompletionSignal { tx }, Completion { rx: Some(rx) })
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Pending;
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(Ok(())) => {
                this.rx = None;
                Poll::Ready(())
            }
            // A dropped signal means the runtime never finished. Stay
            // pending, matching the no-timeout contract.
            Poll::Ready(Err(_)) => {
                this.rx = None;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolve_completes_the_handle() {
        let (signal, completion) = Completion::pair();
        signal.resolve();
        completion.await;
    }

    #[tokio::test(start_paused = true)]
    async fn unresolved_signal_leaves_handle_pending() {
        let (signal, completion) = Completion::pair();
        drop(signal);

        let waited = tokio::time::timeout(Duration::from_secs(60), completion).await;
        assert!(waited.is_err(), "completion must never settle on a dropped signal");
    }

    #[tokio::test]
    async fn resolve_after_dropped_completion_is_harmless() {
        let (signal, completion) = Completion::pair();
        drop(completion);
        signal.resolve();
    }
}
