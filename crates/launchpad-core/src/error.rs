use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error in {id}: {source}")]
    Parse {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Launch error: {0}")]
    Launch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
