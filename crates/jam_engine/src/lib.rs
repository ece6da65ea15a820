//! Jam engine: REST client for the collections API and background request execution.
mod client;
mod engine;
mod error;
mod types;

pub use client::{ApiSettings, JamApi, ReqwestJamApi, DEFAULT_BASE_URL};
pub use engine::{EngineCommand, EngineEvent, EngineHandle};
pub use error::{ApiError, EngineError};
pub use types::{
    CollectionMetadata, CollectionResponse, CompanyBatch, CompanyRecord, CopyCompaniesInput,
    ImportReceipt, JobRecord, PageRequest,
};
