//! Printer identity and output-mode resolution
//!
//! Centralizes the scattered fallback chains of the host integration into a
//! single documented precedence order.

use crate::directory::PrinterDirectory;
use crate::types::{Confidence, OutputMode, PrinterTarget};
use tracing::warn;

/// Sentinel used when no printer configuration is resolvable
///
/// The job is still attempted against this name so the failure surfaces at
/// the agent rather than silently vanishing.
pub const DEFAULT_PRINTER_NAME: &str = "Microsoft Print to PDF";

/// Resolves target printer identity and output mode
#[derive(Debug, Clone)]
pub struct PrinterResolver {
    directory: PrinterDirectory,
}

impl PrinterResolver {
    pub fn new(directory: PrinterDirectory) -> Self {
        Self { directory }
    }

    /// Resolve a printer target
    ///
    /// Name precedence, first match wins:
    /// 1. explicit printer name supplied with the request
    /// 2. directory entry by printer id
    /// 3. main-printer identity
    /// 4. [`DEFAULT_PRINTER_NAME`], flagged as a configuration error
    ///
    /// Mode: a directory-cached mode for the id overrides `requested_mode`;
    /// a cut payload forces `Text` last, unconditionally, because the cutter
    /// sequence must never be rasterized. Never fails.
    pub async fn resolve(
        &self,
        explicit_name: Option<&str>,
        printer_id: Option<&str>,
        requested_mode: OutputMode,
        cut_payload: bool,
    ) -> PrinterTarget {
        let cached = match printer_id {
            Some(id) => self.directory.lookup(id).await,
            None => None,
        };

        let (name, confidence) = if let Some(name) = explicit_name.filter(|n| !n.is_empty()) {
            (name.to_string(), Confidence::Direct)
        } else if let Some(entry) = &cached {
            (entry.name.clone(), Confidence::Cached)
        } else if let Some(main) = self.directory.main_printer().await {
            (main.name, Confidence::Fallback)
        } else {
            warn!(
                printer_id = printer_id.unwrap_or(""),
                fallback = DEFAULT_PRINTER_NAME,
                "no printer configuration resolvable, using default sentinel"
            );
            (DEFAULT_PRINTER_NAME.to_string(), Confidence::Default)
        };

        let mut mode = cached.map(|c| c.mode).unwrap_or(requested_mode);
        if cut_payload {
            mode = OutputMode::Text;
        }

        PrinterTarget {
            name,
            mode,
            confidence,
        }
    }
}
