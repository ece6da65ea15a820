use std::time::Duration;

use jam_logging::{jam_debug, jam_info, jam_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::map_reqwest_error;
use crate::types::ErrorBody;
use crate::{
    ApiError, CollectionMetadata, CollectionResponse, CompanyBatch, CopyCompaniesInput,
    ImportReceipt, PageRequest,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// The collections REST API.
#[async_trait::async_trait]
pub trait JamApi: Send + Sync {
    async fn list_collections(&self) -> Result<Vec<CollectionMetadata>, ApiError>;

    async fn get_collection(
        &self,
        id: &str,
        page: PageRequest,
    ) -> Result<CollectionResponse, ApiError>;

    async fn list_companies(&self, page: PageRequest) -> Result<CompanyBatch, ApiError>;

    /// Starts a copy job. The server may or may not acknowledge it with a body.
    async fn copy_companies(
        &self,
        input: &CopyCompaniesInput,
    ) -> Result<Option<ImportReceipt>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJamApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestJamApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str], page: PageRequest) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if page.offset.is_some() || page.limit.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(offset) = page.offset {
                query.append_pair("offset", &offset.to_string());
            }
            if let Some(limit) = page.limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        jam_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl JamApi for ReqwestJamApi {
    async fn list_collections(&self) -> Result<Vec<CollectionMetadata>, ApiError> {
        let url = self.endpoint(&["collections"], PageRequest::default())?;
        self.get_json(url).await
    }

    async fn get_collection(
        &self,
        id: &str,
        page: PageRequest,
    ) -> Result<CollectionResponse, ApiError> {
        let url = self.endpoint(&["collections", id], page)?;
        self.get_json(url).await
    }

    async fn list_companies(&self, page: PageRequest) -> Result<CompanyBatch, ApiError> {
        let url = self.endpoint(&["companies"], page)?;
        self.get_json(url).await
    }

    async fn copy_companies(
        &self,
        input: &CopyCompaniesInput,
    ) -> Result<Option<ImportReceipt>, ApiError> {
        input.validate()?;
        let url = self.endpoint(
            &["collections", &input.target_collection_id, "import"],
            PageRequest::default(),
        )?;
        jam_info!(
            "POST {} source={} selected={}",
            url,
            input.source_collection_id,
            input.selected_company_ids.len()
        );
        let response = self
            .client
            .post(url)
            .json(&input.body())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if body.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice::<ImportReceipt>(&body) {
            Ok(receipt) => Ok(Some(receipt)),
            Err(err) => {
                jam_warn!("Ignoring unrecognized import acknowledgement: {}", err);
                Ok(None)
            }
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .map(|body| match body.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });
    jam_warn!("Request failed with {}: {:?}", status, detail);
    Err(ApiError::HttpStatus {
        status: status.as_u16(),
        detail,
    })
}
