use std::fmt;

use crate::{CollectionId, CollectionSummary, CompanyId};

pub const TARGET_REQUIRED: &str = "Target collection is required";

/// Payload of a copy (import) request. An empty `selected_company_ids`
/// asks the server to copy the whole source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub source_collection_id: CollectionId,
    pub target_collection_id: CollectionId,
    pub selected_company_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyValidationError {
    MissingTarget,
    MissingSource,
}

impl fmt::Display for CopyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyValidationError::MissingTarget => f.write_str(TARGET_REQUIRED),
            CopyValidationError::MissingSource => f.write_str("Source collection is required"),
        }
    }
}

impl CopyRequest {
    pub fn validate(&self) -> Result<(), CopyValidationError> {
        if self.source_collection_id.is_empty() {
            return Err(CopyValidationError::MissingSource);
        }
        if self.target_collection_id.is_empty() {
            return Err(CopyValidationError::MissingTarget);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOption {
    pub id: CollectionId,
    pub label: String,
}

/// Modal form choosing where to copy the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDialog {
    source: CollectionId,
    selected: Vec<CompanyId>,
    options: Vec<TargetOption>,
    target: Option<usize>,
    error: Option<String>,
    pending: bool,
}

impl CopyDialog {
    pub fn open(
        source: &CollectionId,
        selected: &[CompanyId],
        collections: &[CollectionSummary],
    ) -> Self {
        let options = collections
            .iter()
            .filter(|collection| &collection.id != source)
            .map(|collection| TargetOption {
                id: collection.id.clone(),
                label: collection.name.clone(),
            })
            .collect();
        Self {
            source: source.clone(),
            selected: selected.to_vec(),
            options,
            target: None,
            error: None,
            pending: false,
        }
    }

    pub fn source(&self) -> &CollectionId {
        &self.source
    }

    pub fn options(&self) -> &[TargetOption] {
        &self.options
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    pub fn target(&self) -> Option<&TargetOption> {
        self.target.and_then(|index| self.options.get(index))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_partial(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Moves the chosen target; the first move from "nothing chosen" lands on
    /// the first (down) or last (up) option.
    pub fn move_target(&mut self, delta: isize) {
        if self.options.is_empty() || self.pending {
            return;
        }
        let last = self.options.len() - 1;
        self.target = Some(match self.target {
            None if delta < 0 => last,
            None => 0,
            Some(index) => index.saturating_add_signed(delta).min(last),
        });
        self.error = None;
    }

    /// Validates the form and, when valid, marks it pending and returns the
    /// request to send.
    pub fn submit(&mut self) -> Option<CopyRequest> {
        if self.pending {
            return None;
        }
        let request = CopyRequest {
            source_collection_id: self.source.clone(),
            target_collection_id: self
                .target()
                .map(|option| option.id.clone())
                .unwrap_or_default(),
            selected_company_ids: self.selected.iter().map(ToString::to_string).collect(),
        };
        match request.validate() {
            Ok(()) => {
                self.error = None;
                self.pending = true;
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub(crate) fn fail(&mut self) {
        self.pending = false;
    }
}
