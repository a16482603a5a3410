use {
    crate::{error::ViewError, projection::comparator::SortKey},
    serde::{Deserialize, Serialize},
};

/// Declarative sort and pagination settings for a view.
///
/// ```json
/// { "sort": [{ "path": "author.name" }, { "path": "date", "direction": "desc" }],
///   "page_size": 20, "page": 1 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub sort: Vec<SortKey>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        Ok(serde_json::from_str(json)?)
    }
}
