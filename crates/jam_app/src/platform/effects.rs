use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use jam_core::{
    CollectionPage, CollectionSummary, CompanyRow, CopyRequest, Effect, Job, Msg, PageKey,
    DEFAULT_PAGE_SIZE,
};
use jam_engine::{
    ApiSettings, CollectionMetadata, CollectionResponse, CopyCompaniesInput, EngineError,
    EngineEvent, EngineHandle, JobRecord, PageRequest,
};
use jam_logging::{jam_debug, jam_info, jam_warn};

use super::persistence;

/// Turns core effects into engine commands and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    state_file: PathBuf,
}

impl EffectRunner {
    pub fn new(
        settings: &ApiSettings,
        state_file: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::spawn(settings)?;
        spawn_event_loop(events, msg_tx);
        Ok(Self { engine, state_file })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCollections => self.engine.list_collections(),
                Effect::FetchCollectionPage(key) => {
                    jam_debug!(
                        "FetchCollectionPage id={} offset={} limit={}",
                        key.collection_id,
                        key.offset,
                        key.limit
                    );
                    self.engine
                        .get_collection(key.collection_id, PageRequest::new(key.offset, key.limit));
                }
                Effect::CopyCompanies(request) => {
                    jam_info!(
                        "CopyCompanies source={} target={} selected={}",
                        request.source_collection_id,
                        request.target_collection_id,
                        request.selected_company_ids.len()
                    );
                    self.engine.copy_companies(copy_input(request));
                }
                Effect::LocationChanged(location) => {
                    persistence::save_location(&self.state_file, &location);
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in events {
            let Some(msg) = map_event(event) else {
                continue;
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::CollectionsLoaded(result) => Some(Msg::CollectionsLoaded(
            result
                .map(map_collections)
                .map_err(|err| err.user_message()),
        )),
        EngineEvent::CollectionLoaded { id, page, result } => {
            Some(Msg::CollectionPageLoaded {
                key: page_key(id, page),
                result: result.map(map_page).map_err(|err| {
                    jam_warn!("Collection page failed: {}", err);
                    err.user_message()
                }),
            })
        }
        EngineEvent::CopyFinished { input, result } => {
            let result = match result {
                Ok(Some(receipt)) => {
                    jam_info!(
                        "Copy into {} dispatched as job {}",
                        input.target_collection_id,
                        receipt.job_id
                    );
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => {
                    jam_warn!(
                        "Copy from {} into {} failed: {}",
                        input.source_collection_id,
                        input.target_collection_id,
                        err
                    );
                    Err(err.user_message())
                }
            };
            Some(Msg::CopyFinished(result))
        }
        EngineEvent::CompaniesLoaded { .. } => None,
    }
}

fn page_key(id: String, page: PageRequest) -> PageKey {
    PageKey {
        collection_id: id,
        offset: page.offset.unwrap_or(0),
        limit: page.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    }
}

fn copy_input(request: CopyRequest) -> CopyCompaniesInput {
    CopyCompaniesInput {
        source_collection_id: request.source_collection_id,
        target_collection_id: request.target_collection_id,
        selected_company_ids: request.selected_company_ids,
    }
}

fn map_collections(list: Vec<CollectionMetadata>) -> Vec<CollectionSummary> {
    list.into_iter()
        .map(|collection| CollectionSummary {
            id: collection.id,
            name: collection.collection_name,
        })
        .collect()
}

fn map_page(response: CollectionResponse) -> CollectionPage {
    CollectionPage {
        id: response.id,
        name: response.collection_name,
        companies: response
            .companies
            .into_iter()
            .map(|company| CompanyRow {
                id: company.id,
                name: company.company_name,
                liked: company.liked,
            })
            .collect(),
        total: response.total,
        job: response.job.map(map_job),
    }
}

fn map_job(job: JobRecord) -> Job {
    Job {
        id: job.id,
        status: job.status,
        message: job.message.unwrap_or_default(),
        source_collection_id: job.source_collection_id,
        target_collection_id: job.target_collection_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jam_engine::{ApiError, CompanyRecord, ImportReceipt};

    fn response(job: Option<JobRecord>) -> CollectionResponse {
        CollectionResponse {
            id: "c1".to_string(),
            collection_name: "My List".to_string(),
            companies: vec![CompanyRecord {
                id: 7,
                company_name: "Acme".to_string(),
                liked: true,
            }],
            total: 120,
            job,
        }
    }

    #[test]
    fn page_events_keep_their_key() {
        let msg = map_event(EngineEvent::CollectionLoaded {
            id: "c1".to_string(),
            page: PageRequest::new(50, 25),
            result: Ok(response(None)),
        });
        match msg {
            Some(Msg::CollectionPageLoaded { key, result }) => {
                assert_eq!(
                    key,
                    PageKey {
                        collection_id: "c1".to_string(),
                        offset: 50,
                        limit: 25,
                    }
                );
                let page = result.unwrap();
                assert_eq!(page.total, 120);
                assert_eq!(page.companies[0].name, "Acme");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn job_without_message_maps_to_empty_text() {
        let job = JobRecord {
            id: "j1".to_string(),
            status: "active".to_string(),
            message: None,
            source_collection_id: "c1".to_string(),
            target_collection_id: "c2".to_string(),
        };
        let page = map_page(response(Some(job)));
        assert_eq!(page.job.map(|job| job.message), Some(String::new()));
    }

    #[test]
    fn api_errors_become_user_messages() {
        let msg = map_event(EngineEvent::CollectionsLoaded(Err(ApiError::HttpStatus {
            status: 404,
            detail: Some("Collection not found".to_string()),
        })));
        assert_eq!(
            msg,
            Some(Msg::CollectionsLoaded(Err("Collection not found".to_string())))
        );
    }

    #[test]
    fn copy_receipt_is_success() {
        let input = CopyCompaniesInput {
            source_collection_id: "c1".to_string(),
            target_collection_id: "c2".to_string(),
            selected_company_ids: vec!["7".to_string()],
        };
        let msg = map_event(EngineEvent::CopyFinished {
            input,
            result: Ok(Some(ImportReceipt {
                message: "Dispatched job!".to_string(),
                job_id: "j1".to_string(),
            })),
        });
        assert_eq!(msg, Some(Msg::CopyFinished(Ok(()))));
    }

    #[test]
    fn copy_failure_carries_server_detail() {
        let input = CopyCompaniesInput {
            source_collection_id: "c1".to_string(),
            target_collection_id: "c2".to_string(),
            selected_company_ids: Vec::new(),
        };
        let msg = map_event(EngineEvent::CopyFinished {
            input,
            result: Err(ApiError::HttpStatus {
                status: 400,
                detail: Some("Collection has an active job".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::CopyFinished(Err("Collection has an active job".to_string())))
        );
    }

    #[test]
    fn copy_request_maps_field_for_field() {
        let input = copy_input(CopyRequest {
            source_collection_id: "src".to_string(),
            target_collection_id: "T".to_string(),
            selected_company_ids: vec!["7".to_string(), "12".to_string()],
        });
        assert_eq!(input.source_collection_id, "src");
        assert_eq!(input.target_collection_id, "T");
        assert_eq!(input.selected_company_ids, vec!["7", "12"]);
    }
}
