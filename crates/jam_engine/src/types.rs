use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Entry of `GET /collections`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionMetadata {
    pub id: String,
    pub collection_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyRecord {
    pub id: i64,
    pub company_name: String,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub source_collection_id: String,
    pub target_collection_id: String,
}

/// Body of `GET /collections/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionResponse {
    pub id: String,
    pub collection_name: String,
    pub companies: Vec<CompanyRecord>,
    pub total: u64,
    #[serde(default)]
    pub job: Option<JobRecord>,
}

/// Body of `GET /companies`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyBatch {
    pub companies: Vec<CompanyRecord>,
}

/// Paging window; `None` leaves the server default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageRequest {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }
}

/// Input of a copy request. The target travels in the path, the rest in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCompaniesInput {
    pub source_collection_id: String,
    pub target_collection_id: String,
    pub selected_company_ids: Vec<String>,
}

impl CopyCompaniesInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.source_collection_id.trim().is_empty() {
            return Err(ApiError::Validation(
                "source collection id must not be empty".to_string(),
            ));
        }
        if self.target_collection_id.trim().is_empty() {
            return Err(ApiError::Validation(
                "target collection id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> ImportBody<'_> {
        ImportBody {
            source_collection_id: &self.source_collection_id,
            selected_company_ids: &self.selected_company_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportBody<'a> {
    pub source_collection_id: &'a str,
    pub selected_company_ids: &'a [String],
}

/// Acknowledgement of a dispatched copy job, when the server sends one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportReceipt {
    pub message: String,
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}
