use thiserror::Error;

#[derive(Error, Debug)]
pub enum HydrateError {
    #[error("Cannot stringify a function: {name}")]
    UnsupportedCallable { name: String },
    #[error("Cannot stringify arbitrary non-POJOs: instance of {class}")]
    UnsupportedInstance { class: String },
    #[error("Cannot stringify POJOs with symbolic keys: {key}")]
    UnsupportedKeyType { key: String },
    #[error("Invalid payload name: {0}")]
    InvalidPayloadName(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HydrateError>;
