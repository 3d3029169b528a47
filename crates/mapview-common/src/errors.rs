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

/// Errors raised on the host <-> embedded content path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("method not implemented: {0}")]
    NotImplemented(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("dispatch failed: {0}")]
    Dispatch(String),

    #[error("no map view with id {0}")]
    ViewNotFound(u32),
}

impl BridgeError {
    /// Wire error code reported back to the host in `{errorCode, errorMessage}`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgs(_) => "INVALID_ARGS",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::Script(_) => "JS_ERROR",
            Self::Dispatch(_) => "DISPATCH_ERROR",
            Self::ViewNotFound(_) => "UNKNOWN_VIEW",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapViewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
