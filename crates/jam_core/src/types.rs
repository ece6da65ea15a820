pub type CollectionId = String;
pub type CompanyId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub id: CollectionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRow {
    pub id: CompanyId,
    pub name: String,
    pub liked: bool,
}

/// A server-side copy job touching a collection, as last reported by a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub status: String,
    pub message: String,
    pub source_collection_id: CollectionId,
    pub target_collection_id: CollectionId,
}

/// One server page of a collection plus its total row count and active job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPage {
    pub id: CollectionId,
    pub name: String,
    pub companies: Vec<CompanyRow>,
    pub total: u64,
    pub job: Option<Job>,
}
