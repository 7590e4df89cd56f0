#![forbid(unsafe_code)]

use crate::wire::WireError;
use ad_core::model::ValidationError;
use ad_storage::StoreError;

/// A data operation failed either at the store or while mapping the wire
/// row into a typed record.
#[derive(Debug)]
pub enum DataError {
    Store(StoreError),
    Wire(WireError),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "store: {err}"),
            Self::Wire(err) => write!(f, "row mapping: {err}"),
        }
    }
}

impl std::error::Error for DataError {}

#[derive(Debug)]
pub enum AppError {
    /// A data operation reached the cache without a session. Screens behind
    /// the session gate cannot produce this; it indicates a wiring bug.
    Unauthenticated,
    FetchFailed(DataError),
    CreateFailed(DataError),
    UpdateFailed(DataError),
    SignOutFailed(StoreError),
    Validation(ValidationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "not signed in"),
            Self::FetchFailed(err) => write!(f, "fetch failed: {err}"),
            Self::CreateFailed(err) => write!(f, "create failed: {err}"),
            Self::UpdateFailed(err) => write!(f, "update failed: {err}"),
            Self::SignOutFailed(err) => write!(f, "sign out failed: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
