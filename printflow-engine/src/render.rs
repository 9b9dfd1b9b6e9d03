//! External rendering collaborators
//!
//! The engine never interprets markup or pixels itself; templates are turned
//! into markup by a [`Renderer`] and markup into PNG bytes by a
//! [`Rasterizer`]. Both are opaque behind these traits, which is what lets
//! the formatters fall back to plain text when either collaborator fails.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Formats a raw amount into a display string with currency symbol
pub type CurrencyFormat = dyn Fn(f64) -> String + Send + Sync;

/// External renderer failure
#[derive(Debug, Error)]
#[error("renderer failed for template {template:?}: {reason}")]
pub struct RenderError {
    pub template: String,
    pub reason: String,
}

impl RenderError {
    pub fn new(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

/// Rasterizer failure, including a failed lazy load of the library itself
#[derive(Debug, Error)]
#[error("rasterizer failed: {0}")]
pub struct RasterizeError(pub String);

/// Renders a named template with structured data into markup
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(
        &self,
        template: &str,
        data: &Value,
        format_currency: &CurrencyFormat,
    ) -> Result<String, RenderError>;
}

/// Rasterizes markup into PNG bytes, returned base64-encoded
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, markup: &str, scale: f64) -> Result<String, RasterizeError>;
}
