use astra::Response;
use thiserror::Error;

use crate::inventory::snapshot::SnapshotError;
use crate::inventory::TransformError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (snapshots, export).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Snapshot Error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Inventory Error: {0}")]
    Transform(#[from] TransformError),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Snapshot(SnapshotError::NotFound(_)) => 404,
            ServerError::Snapshot(SnapshotError::InvalidDate(_)) => 400,
            ServerError::Snapshot(_) => 500,
            ServerError::Transform(_) => 500,
            ServerError::XlsxError(_) => 500,
            ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
