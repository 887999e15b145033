use thiserror::Error;

#[derive(Error, Debug)]
pub enum KoError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid token tier {tier}: expected 1-{max}")]
    InvalidTier { tier: u32, max: u32 },

    #[error("Could not read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type KoResult<T> = Result<T, KoError>;
