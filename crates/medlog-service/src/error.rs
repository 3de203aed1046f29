use medlog_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The in-memory list holds the change but the file may not
    #[error("could not write {}", path.display())]
    Persistence { path: PathBuf },
}
