use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Rejections raised while decoding a message that crossed the port boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("unknown port: {0}")]
    UnknownPort(String),

    #[error("unknown IPC kind: {0}")]
    UnknownKind(String),

    #[error("invalid payload for {port}: {reason}")]
    InvalidPayload { port: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("host application is already attached")]
    AppAlreadySet,
}

#[derive(Debug, thiserror::Error)]
pub enum PageSyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
