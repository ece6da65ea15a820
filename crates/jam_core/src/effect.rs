use crate::{CopyRequest, PageKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load collection metadata for the list and the copy targets.
    FetchCollections,
    /// Load one page of a collection, including its total and active job.
    FetchCollectionPage(PageKey),
    /// Start a server-side copy job.
    CopyCompanies(CopyRequest),
    /// The shareable location changed and should be persisted.
    LocationChanged(String),
}
