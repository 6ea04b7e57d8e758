//! Request dispatch — one independent task per filter submission.
//!
//! Tasks are not cancelled, queued, or ordered. Each one sends its outcome
//! down a channel when the remote call resolves, and the receiver folds
//! outcomes into the session in arrival order.

use crate::llm::{CompletionClient, FetchError};
use crate::session::Session;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A resolved request.
#[derive(Debug)]
pub struct CompletionEvent {
    pub request_id: u64,
    pub outcome: Result<String, FetchError>,
}

pub struct Pipeline {
    tx: UnboundedSender<CompletionEvent>,
    next_id: u64,
}

/// Create a pipeline and the receiver its tasks report to.
pub fn channel() -> (Pipeline, UnboundedReceiver<CompletionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Pipeline { tx, next_id: 1 }, rx)
}

impl Pipeline {
    /// Build the prompt from `session` and spawn the remote call.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn submit(&mut self, session: &mut Session, client: &CompletionClient) -> u64 {
        let request_id = self.next_id;
        self.next_id += 1;

        let prompt = session.begin_request();
        log::info!(
            "[PIPELINE] Request #{} submitted ({} chars prompt, {} in flight)",
            request_id,
            prompt.len(),
            session.in_flight()
        );

        let client = client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.complete(&prompt).await;
            if tx.send(CompletionEvent { request_id, outcome }).is_err() {
                log::warn!("[PIPELINE] Request #{} resolved after shutdown", request_id);
            }
        });

        request_id
    }
}

/// Fold one event into the session.
pub fn deliver(session: &mut Session, event: CompletionEvent) {
    log::info!(
        "[PIPELINE] Request #{} resolved ({})",
        event.request_id,
        if event.outcome.is_ok() { "ok" } else { "failed" }
    );
    session.receive_completion(event.outcome);
}

/// Deliver every event that has already arrived, without waiting.
/// Returns how many were delivered.
pub fn drain(rx: &mut UnboundedReceiver<CompletionEvent>, session: &mut Session) -> usize {
    let mut delivered = 0;
    while let Ok(event) = rx.try_recv() {
        deliver(session, event);
        delivered += 1;
    }
    delivered
}
