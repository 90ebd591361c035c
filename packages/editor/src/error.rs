//! Error types for the editor

use thiserror::Error;
use trellis_blocks::BlockError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Block(#[from] BlockError),

    /// Remote persistence failed. Fatal to the save attempt only; the
    /// document stays intact in memory and retry is a new user-initiated
    /// save.
    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("no snapshot to resume for document '{0}'")]
    NoSnapshot(String),
}
