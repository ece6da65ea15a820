use std::sync::{mpsc, Arc};
use std::thread;

use jam_logging::{jam_debug, jam_warn};

use crate::client::{ApiSettings, JamApi, ReqwestJamApi};
use crate::{
    ApiError, CollectionMetadata, CollectionResponse, CompanyBatch, CopyCompaniesInput,
    EngineError, ImportReceipt, PageRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    ListCollections,
    GetCollection { id: String, page: PageRequest },
    ListCompanies(PageRequest),
    CopyCompanies(CopyCompaniesInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CollectionsLoaded(Result<Vec<CollectionMetadata>, ApiError>),
    CollectionLoaded {
        id: String,
        page: PageRequest,
        result: Result<CollectionResponse, ApiError>,
    },
    CompaniesLoaded {
        page: PageRequest,
        result: Result<CompanyBatch, ApiError>,
    },
    CopyFinished {
        input: CopyCompaniesInput,
        result: Result<Option<ImportReceipt>, ApiError>,
    },
}

/// Sends requests to a background runtime. Each command runs as its own task,
/// so a slow request never holds back others.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the engine against the HTTP API described by `settings`.
    pub fn spawn(
        settings: &ApiSettings,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let api = ReqwestJamApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    /// Spawns the engine against any [`JamApi`] implementation.
    pub fn with_api(
        api: Arc<dyn JamApi>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("jam-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        jam_debug!("Engine event dropped; receiver closed");
                    }
                });
            }
            jam_debug!("Engine command channel closed; shutting down");
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            jam_warn!("Engine is not running; command dropped");
        }
    }

    pub fn list_collections(&self) {
        self.send(EngineCommand::ListCollections);
    }

    pub fn get_collection(&self, id: impl Into<String>, page: PageRequest) {
        self.send(EngineCommand::GetCollection {
            id: id.into(),
            page,
        });
    }

    pub fn list_companies(&self, page: PageRequest) {
        self.send(EngineCommand::ListCompanies(page));
    }

    pub fn copy_companies(&self, input: CopyCompaniesInput) {
        self.send(EngineCommand::CopyCompanies(input));
    }
}

async fn handle_command(api: &dyn JamApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::ListCollections => {
            EngineEvent::CollectionsLoaded(api.list_collections().await)
        }
        EngineCommand::GetCollection { id, page } => {
            let result = api.get_collection(&id, page).await;
            EngineEvent::CollectionLoaded { id, page, result }
        }
        EngineCommand::ListCompanies(page) => {
            let result = api.list_companies(page).await;
            EngineEvent::CompaniesLoaded { page, result }
        }
        EngineCommand::CopyCompanies(input) => {
            let result = api.copy_companies(&input).await;
            EngineEvent::CopyFinished { input, result }
        }
    }
}
