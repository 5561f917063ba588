use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("Component '{0}' is already running")]
    AlreadyRunning(String),

    #[error("Component '{0}' is not running")]
    NotRunning(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
