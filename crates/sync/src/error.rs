use feedboard_core::error::CoreError;
use feedboard_db::DataError;

/// Errors re-raised by module mutators after the failure toast is shown.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SyncResult<T> = Result<T, SyncError>;
