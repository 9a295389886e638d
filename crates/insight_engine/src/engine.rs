use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};

use crate::client::InsightClient;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineError, EngineEvent, Generation};

enum EngineCommand {
    Fetch { generation: Generation, query: String },
}

/// Front-end side of the engine: commands go in, [`EngineEvent`]s come out.
///
/// Fetches run concurrently on a background tokio runtime and are never
/// cancelled; ordering is left to the generation carried by each event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(&settings)?);
        Self::with_fetcher(fetcher, settings.base_url)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = InsightClient::new(fetcher, base_url);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("insight-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&client, command, event_tx).await;
                });
            }
            engine_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, generation: Generation, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            generation,
            query: query.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &InsightClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { generation, query } => {
            engine_info!("Fetch generation={} query={}", generation, query);
            if let Some(document) = client.fetch_document(&query).await {
                let _ = event_tx.send(EngineEvent::InsightsReady {
                    generation,
                    document,
                });
            }
        }
    }
}
