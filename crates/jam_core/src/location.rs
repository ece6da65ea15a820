use std::fmt;

use url::{form_urlencoded, Url};

pub const COLLECTION_PARAM: &str = "collection";
pub const DEFAULT_LOCATION: &str = "jam://collections";

/// Shareable description of the current view.
///
/// Any absolute URL is accepted, so a link copied from the web front end
/// (`http://localhost:5173/?collection=...`) restores the same view. Query
/// parameters other than `collection` are kept untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLocation {
    base: String,
    params: Vec<(String, String)>,
}

impl Default for ViewLocation {
    fn default() -> Self {
        Self {
            base: DEFAULT_LOCATION.to_string(),
            params: Vec::new(),
        }
    }
}

impl ViewLocation {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(raw.trim())?;
        let params = url.query_pairs().into_owned().collect();
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self {
            base: url.to_string(),
            params,
        })
    }

    /// Location pointing at `id` on the default base.
    pub fn for_collection(id: &str) -> Self {
        let mut location = Self::default();
        location.set_collection(Some(id));
        location
    }

    /// The selected collection, ignoring empty values.
    pub fn collection(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, value)| key == COLLECTION_PARAM && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    pub fn set_collection(&mut self, id: Option<&str>) {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let mut replaced = false;
                self.params.retain_mut(|(key, value)| {
                    if key != COLLECTION_PARAM {
                        return true;
                    }
                    if replaced {
                        return false;
                    }
                    *value = id.to_string();
                    replaced = true;
                    true
                });
                if !replaced {
                    self.params.push((COLLECTION_PARAM.to_string(), id.to_string()));
                }
            }
            None => self.params.retain(|(key, _)| key != COLLECTION_PARAM),
        }
    }
}

impl fmt::Display for ViewLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if !self.params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.params.iter())
                .finish();
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
