#[derive(Debug, thiserror::Error)]
pub enum JarError {
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
