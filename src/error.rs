use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Resource type not registered: {0}")]
    UnknownResourceType(String),

    #[error("No resource registered for apiVersion {api_version} and kind {kind}")]
    UnknownApiVersionKind { api_version: String, kind: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported attribute: {path}")]
    UnknownAttribute { path: String },

    #[error("Field has no matching attribute: {path}")]
    UnknownField { path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
