use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("api client error: {0}")]
    Client(#[from] store::ClientBuildError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown timezone: {0}")]
    Timezone(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}
