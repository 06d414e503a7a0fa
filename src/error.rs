use thiserror::Error;

#[derive(Error, Debug)]
pub enum KhataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported statement: {0}")]
    Format(String),

    #[error("Statement schema error: {0}")]
    Schema(String),

    #[error("Mapping store error: {0}")]
    Mapping(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KhataError>;
