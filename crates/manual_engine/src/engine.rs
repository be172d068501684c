use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use manual_core::SearchGeneration;
use manual_logging::{manual_error, manual_info};

use crate::catalog::{CatalogClient, CatalogSettings, YouTubeCatalogClient};
use crate::{EngineEvent, FailureKind, FetchError};

enum EngineCommand {
    Search {
        generation: SearchGeneration,
        keyword: String,
        page_size: u32,
    },
}

/// Runs catalog fetches on a background tokio runtime and reports completions
/// as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let client = YouTubeCatalogClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn CatalogClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    manual_error!("failed to start engine runtime: {}", err);
                    reject_commands(&cmd_rx, &event_tx, &format!("runtime failed to start: {err}"));
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues a search. Fails when the engine thread is gone, in which case no
    /// completion event will follow.
    pub fn search(
        &self,
        generation: SearchGeneration,
        keyword: impl Into<String>,
        page_size: u32,
    ) -> Result<(), FetchError> {
        self.cmd_tx
            .send(EngineCommand::Search {
                generation,
                keyword: keyword.into(),
                page_size,
            })
            .map_err(|_| FetchError::new(FailureKind::EngineUnavailable, "engine thread has stopped"))
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn CatalogClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Search {
            generation,
            keyword,
            page_size,
        } => {
            manual_info!("search generation={} keyword={:?}", generation, keyword);
            let result = client.fetch_page(&keyword, page_size).await;
            let _ = event_tx.send(EngineEvent::CatalogFetched {
                generation,
                keyword,
                result,
            });
        }
    }
}

/// Answers every queued and future command with a failure until the handle is dropped.
fn reject_commands(
    cmd_rx: &mpsc::Receiver<EngineCommand>,
    event_tx: &mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Search {
                generation,
                keyword,
                ..
            } => {
                let _ = event_tx.send(EngineEvent::CatalogFetched {
                    generation,
                    keyword,
                    result: Err(FetchError::new(FailureKind::EngineUnavailable, reason)),
                });
            }
        }
    }
}
