//! Engine error types

use thiserror::Error;

pub use printflow_escpos::EncodeError;

use crate::render::{RasterizeError, RenderError};

/// Engine-level error types
#[derive(Debug, Error)]
pub enum EngineError {
    /// Stream encoding error
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// External renderer failure
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Rasterizer failure
    #[error("rasterize error: {0}")]
    Rasterize(#[from] RasterizeError),

    /// HTTP client construction failure
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Classifier rule compilation failure
    #[error("invalid classifier rule: {0}")]
    Rules(#[from] regex::Error),

    /// Configuration provider failure
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Configuration provider failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config provider failed: {0}")]
    Provider(String),
}

/// Agent status probe failure
///
/// The three classes stay distinct so callers can tell a slow agent from a
/// dead one or a rejecting one.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("status check timed out")]
    Timeout,

    #[error("agent unreachable: {0}")]
    Offline(String),

    #[error("agent rejected status request: HTTP {0}")]
    Rejected(u16),

    #[error("malformed status response: {0}")]
    Malformed(String),
}
