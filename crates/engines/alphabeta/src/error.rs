use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("transposition table needs at least one slot")]
    EmptyTable,
    #[error("failed to start search threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
