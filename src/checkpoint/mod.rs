pub mod resume;
pub mod state;
pub mod store;

use thiserror::Error;

pub use resume::RunSummary;
pub use state::ScanState;
pub use store::CheckpointStore;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
    #[error("Run failed at combination {combination}, repeat {repeat}: {source}")]
    Task {
        combination: usize,
        repeat: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
