use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown sort direction. Expected 'asc' or 'desc'. Input: '{0}'")]
    UnknownDirection(String),

    #[error("Invalid sort key. Required format is 'path' or 'path asc|desc'. Input: '{0}'")]
    InvalidSortKey(String),

    #[error("JSON error. cause: {0}")]
    Json(#[from] serde_json::Error),
}
