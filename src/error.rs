use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildGenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Query init error: {0}")]
    QueryInit(String),

    #[error("Invalid label {label:?}: {reason}")]
    LabelParse { label: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hook not supported: {0}")]
    Unsupported(&'static str),
}

impl From<toml::de::Error> for BuildGenError {
    fn from(e: toml::de::Error) -> Self {
        BuildGenError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BuildGenError>;
