//! Session-scoped printer directory
//!
//! Maps printer ids to their resolved device name and output mode, plus the
//! single main-printer entry. Populated once during session initialization
//! from the configuration collaborator; re-initialization replaces the
//! directory wholesale rather than merging.

use crate::error::ConfigError;
use crate::types::OutputMode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One printer row as supplied by the configuration collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterRow {
    pub id: String,
    pub name: String,
    pub mode: OutputMode,
}

/// Main receipt printer identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainPrinter {
    pub name: String,
    pub mode: OutputMode,
}

/// Everything the engine needs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub server_url: String,
    #[serde(default)]
    pub main_printer: Option<MainPrinter>,
    #[serde(default)]
    pub printers: Vec<PrinterRow>,
}

/// Supplies session configuration: agent URL, main printer, directory rows
///
/// Stands in for the host's ORM/config lookups; treated as opaque.
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn load(&self) -> Result<SessionConfig, ConfigError>;
}

/// Directory entry for one printer id
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPrinter {
    pub name: String,
    pub mode: OutputMode,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    printers: HashMap<String, CachedPrinter>,
    main: Option<MainPrinter>,
}

/// In-memory printer directory
///
/// Reads observe either the old or new directory atomically per entry; a
/// refresh swaps the whole map under the write lock, so no entry is ever
/// partially written.
#[derive(Debug, Clone)]
pub struct PrinterDirectory {
    inner: Arc<RwLock<DirectoryInner>>,
}

impl PrinterDirectory {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DirectoryInner::default())),
        }
    }

    /// Populate the directory from configuration rows
    ///
    /// Replaces any previous contents wholesale.
    pub async fn initialize(&self, rows: &[PrinterRow], main: Option<MainPrinter>) {
        let mut printers = HashMap::with_capacity(rows.len());
        for row in rows {
            if row.name.is_empty() {
                tracing::warn!(printer_id = %row.id, "skipping printer row without a device name");
                continue;
            }
            printers.insert(
                row.id.clone(),
                CachedPrinter {
                    name: row.name.clone(),
                    mode: row.mode,
                },
            );
        }

        let mut inner = self.inner.write().await;
        inner.printers = printers;
        inner.main = main;

        tracing::info!(
            printers = inner.printers.len(),
            main = inner.main.as_ref().map(|m| m.name.as_str()),
            "printer directory initialized"
        );
    }

    /// Re-run initialization with fresh rows (wholesale replacement)
    pub async fn refresh(&self, rows: &[PrinterRow], main: Option<MainPrinter>) {
        self.initialize(rows, main).await;
    }

    /// Look up a printer by id
    pub async fn lookup(&self, id: &str) -> Option<CachedPrinter> {
        let inner = self.inner.read().await;
        inner.printers.get(id).cloned()
    }

    /// Main receipt printer, if configured
    pub async fn main_printer(&self) -> Option<MainPrinter> {
        let inner = self.inner.read().await;
        inner.main.clone()
    }

    /// All cached printer ids
    pub async fn printer_ids(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut ids: Vec<String> = inner.printers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.printers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.printers.is_empty()
    }
}

impl Default for PrinterDirectory {
    fn default() -> Self {
        Self::new()
    }
}
