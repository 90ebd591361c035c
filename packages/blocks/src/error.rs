//! Error types for the block model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("content serialization failed for kind '{kind}': {source}")]
    Serialize {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
