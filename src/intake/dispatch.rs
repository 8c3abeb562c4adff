//! Dispatcher — fans inbound messages out to one worker per chat.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::channels::{Channel, IncomingMessage};
use crate::error::Result;
use crate::intake::engine::IntakeEngine;

/// Worker handle for one chat.
struct ChatWorker {
    tx: UnboundedSender<IncomingMessage>,
    handle: JoinHandle<()>,
}

/// Routes inbound messages to per-chat workers.
///
/// Each chat gets its own task consuming its own queue, so messages from one
/// user are processed strictly in order while users never block each other.
pub struct Dispatcher {
    engine: Arc<IntakeEngine>,
    channel: Arc<dyn Channel>,
    workers: HashMap<String, ChatWorker>,
}

impl Dispatcher {
    pub fn new(engine: Arc<IntakeEngine>, channel: Arc<dyn Channel>) -> Self {
        Self {
            engine,
            channel,
            workers: HashMap::new(),
        }
    }

    /// Consume the channel's message stream until it ends.
    ///
    /// The stream never ends on a live transport; when it does (tests,
    /// channel teardown), workers are drained and joined before returning.
    pub async fn run(mut self) -> Result<()> {
        let mut stream = self.channel.start().await?;

        while let Some(msg) = stream.next().await {
            let worker = self.workers.entry(msg.chat_id.clone()).or_insert_with(|| {
                spawn_chat_worker(Arc::clone(&self.engine), Arc::clone(&self.channel))
            });
            if worker.tx.send(msg).is_err() {
                tracing::warn!("Chat worker queue closed; dropping message");
            }
        }

        // Stream ended: close the worker queues and let them drain.
        for (chat_id, worker) in self.workers.drain() {
            drop(worker.tx);
            if let Err(e) = worker.handle.await {
                tracing::warn!(%chat_id, "Chat worker panicked: {e}");
            }
        }

        Ok(())
    }
}

/// Spawn a worker that serializes one chat's messages.
fn spawn_chat_worker(engine: Arc<IntakeEngine>, channel: Arc<dyn Channel>) -> ChatWorker {
    let (tx, mut rx) = mpsc::unbounded_channel::<IncomingMessage>();

    let handle = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Some(reply) = engine.handle_message(&msg).await {
                if let Err(e) = channel.respond(&msg, reply).await {
                    tracing::warn!(chat_id = %msg.chat_id, "Failed to send reply: {e}");
                }
            }
        }
    });

    ChatWorker { tx, handle }
}
