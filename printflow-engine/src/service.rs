//! Print-flow orchestration
//!
//! Wires the formatters, resolver and dispatcher together behind one service
//! the host calls into. Dispatch failures never propagate as faults out of
//! the print path; the host reads the returned outcome and may fall back to
//! its own local printing.

use crate::dispatcher::AgentDispatcher;
use crate::directory::{ConfigProvider, PrinterDirectory};
use crate::encoder::{JobEncoder, is_cut_stream};
use crate::error::EngineResult;
use crate::history::PrintHistory;
use crate::kitchen::KitchenTicketFormatter;
use crate::receipt::FinalReceiptFormatter;
use crate::render::{CurrencyFormat, Rasterizer, Renderer};
use crate::resolver::PrinterResolver;
use crate::types::{DispatchOutcome, OrderChangeEvent, OutputMode, PrintSource, RawType};
use printflow_escpos::DEFAULT_WIDTH;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Template identifier handed to the renderer for order changes
pub const ORDER_CHANGE_TEMPLATE: &str = "order_change_receipt";

/// Rasterization scale for receipt images
pub const IMAGE_SCALE: f64 = 2.0;

/// One printer's batch of sequential order changes
#[derive(Debug, Clone)]
pub struct PrinterChanges {
    pub printer_id: Option<String>,
    pub changes: Vec<OrderChangeEvent>,
}

/// Print-flow service
pub struct PrintFlowService {
    dispatcher: AgentDispatcher,
    directory: PrinterDirectory,
    resolver: PrinterResolver,
    kitchen: KitchenTicketFormatter,
    receipt: FinalReceiptFormatter,
    history: PrintHistory,
    renderer: Option<Arc<dyn Renderer>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    currency: Arc<CurrencyFormat>,
}

impl PrintFlowService {
    /// Create a service talking to the agent at `server_url`
    pub fn new(server_url: &str) -> EngineResult<Self> {
        let directory = PrinterDirectory::new();
        Ok(Self {
            dispatcher: AgentDispatcher::new(server_url)?,
            resolver: PrinterResolver::new(directory.clone()),
            directory,
            kitchen: KitchenTicketFormatter::new(DEFAULT_WIDTH)?,
            receipt: FinalReceiptFormatter::new(DEFAULT_WIDTH)?,
            history: PrintHistory::new(),
            renderer: None,
            rasterizer: None,
            currency: Arc::new(|amount| format!("{amount:.2}")),
        })
    }

    /// Create a service from a configuration collaborator
    ///
    /// Loads the agent URL and printer rows and populates the directory.
    pub async fn from_provider(provider: &dyn ConfigProvider) -> EngineResult<Self> {
        let config = provider.load().await?;
        let service = Self::new(&config.server_url)?;
        service
            .directory
            .initialize(&config.printers, config.main_printer)
            .await;
        Ok(service)
    }

    /// Reload printer rows from the collaborator
    ///
    /// The agent URL is fixed at construction; only the directory is
    /// replaced, wholesale.
    pub async fn refresh(&self, provider: &dyn ConfigProvider) -> EngineResult<()> {
        let config = provider.load().await?;
        self.directory
            .refresh(&config.printers, config.main_printer)
            .await;
        Ok(())
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn with_currency_format(mut self, currency: Arc<CurrencyFormat>) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_status_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_status_timeout(timeout);
        self
    }

    pub fn directory(&self) -> &PrinterDirectory {
        &self.directory
    }

    pub fn dispatcher(&self) -> &AgentDispatcher {
        &self.dispatcher
    }

    pub fn history(&self) -> &PrintHistory {
        &self.history
    }

    /// Output mode of the main receipt printer; text when unconfigured
    pub async fn main_mode(&self) -> OutputMode {
        self.directory
            .main_printer()
            .await
            .map(|m| m.mode)
            .unwrap_or(OutputMode::Text)
    }

    /// Print one order change to one station printer
    ///
    /// Text targets get the embedded kitchen ticket; image targets go
    /// through the renderer and rasterizer, falling back to the plain-text
    /// ticket when either collaborator fails.
    pub async fn print_order_change(
        &self,
        printer_id: Option<&str>,
        event: &OrderChangeEvent,
    ) -> DispatchOutcome {
        let target = self
            .resolver
            .resolve(None, printer_id, OutputMode::Text, false)
            .await;

        match target.mode {
            OutputMode::Text => self.send_kitchen_text(&target.name, event).await,
            OutputMode::Image => match self.rasterize_order_change(event).await {
                Some(png) => match JobEncoder::image(&target.name, &png) {
                    Ok(job) => {
                        let outcome = self.dispatcher.send_image_then_cut(&job).await;
                        self.history.record(&job, &outcome).await;
                        outcome
                    }
                    Err(e) => DispatchOutcome::failed(e.to_string()),
                },
                None => self.send_kitchen_text(&target.name, event).await,
            },
        }
    }

    /// Print batches of order changes, printer by printer
    ///
    /// Strictly sequential: within one printer, change N+1 is not dispatched
    /// before change N's dispatch has returned. Failures are recorded per
    /// change and never abort the remaining batches.
    pub async fn print_order_changes(&self, batches: &[PrinterChanges]) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        for batch in batches {
            for change in &batch.changes {
                let outcome = self
                    .print_order_change(batch.printer_id.as_deref(), change)
                    .await;
                if !outcome.successful {
                    warn!(
                        printer_id = batch.printer_id.as_deref().unwrap_or(""),
                        agent_offline = outcome.agent_offline,
                        error = ?outcome.error,
                        "kitchen print was not successful"
                    );
                }
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Reformat and print a rendered receipt dump on the main printer
    pub async fn print_receipt_dump(&self, dump: &str) -> DispatchOutcome {
        let target = self
            .resolver
            .resolve(None, None, OutputMode::Text, false)
            .await;
        let stream = self.receipt.format(dump);
        match JobEncoder::text(&target.name, &stream) {
            Ok(job) => {
                let outcome = self.dispatcher.send(&job).await;
                self.history.record(&job, &outcome).await;
                outcome
            }
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }

    /// Print an already-rasterized receipt on the main printer, then cut
    pub async fn print_receipt_image(&self, png_base64: &str) -> DispatchOutcome {
        let target = self
            .resolver
            .resolve(None, None, OutputMode::Image, false)
            .await;
        match JobEncoder::image(&target.name, png_base64) {
            Ok(job) => {
                let outcome = self.dispatcher.send_image_then_cut(&job).await;
                self.history.record(&job, &outcome).await;
                outcome
            }
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }

    /// Print a ready-made command stream as a text job
    ///
    /// The generic entry point for callers that format their own streams. A
    /// stream that is exactly the cut sequence forces text mode through the
    /// resolver regardless of the target's cached mode.
    pub async fn print_stream(
        &self,
        explicit_name: Option<&str>,
        printer_id: Option<&str>,
        stream: &str,
    ) -> DispatchOutcome {
        let target = self
            .resolver
            .resolve(
                explicit_name,
                printer_id,
                OutputMode::Text,
                is_cut_stream(stream),
            )
            .await;
        match JobEncoder::text(&target.name, stream) {
            Ok(job) => {
                let outcome = self.dispatcher.send(&job).await;
                self.history.record(&job, &outcome).await;
                outcome
            }
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }

    /// Print a tagged source
    pub async fn print(&self, source: &PrintSource) -> DispatchOutcome {
        match source {
            PrintSource::KitchenChange(event) => self.print_order_change(None, event).await,
            PrintSource::TextDump(dump) => self.print_receipt_dump(dump).await,
        }
    }

    /// Print an externally-generated document, `copies` times, sequentially
    ///
    /// Stops at the first copy the agent does not accept.
    pub async fn print_document(
        &self,
        printer_name: Option<&str>,
        raw_type: RawType,
        payload_base64: &str,
        copies: u32,
    ) -> Vec<DispatchOutcome> {
        let target = self
            .resolver
            .resolve(printer_name, None, OutputMode::Text, false)
            .await;
        let job = match JobEncoder::prepared(&target.name, raw_type, payload_base64) {
            Ok(job) => job,
            Err(e) => return vec![DispatchOutcome::failed(e.to_string())],
        };

        let mut outcomes = Vec::with_capacity(copies as usize);
        for copy in 1..=copies {
            info!(printer = %job.printer_name, copy, copies, "sending document copy");
            let outcome = self.dispatcher.send(&job).await;
            self.history.record(&job, &outcome).await;
            let stop = !outcome.successful;
            outcomes.push(outcome);
            if stop {
                break;
            }
        }
        outcomes
    }

    async fn send_kitchen_text(&self, printer: &str, event: &OrderChangeEvent) -> DispatchOutcome {
        let stream = self.kitchen.format(event);
        match JobEncoder::text(printer, &stream) {
            Ok(job) => {
                let outcome = self.dispatcher.send(&job).await;
                self.history.record(&job, &outcome).await;
                outcome
            }
            Err(e) => DispatchOutcome::failed(e.to_string()),
        }
    }

    /// Render and rasterize an order change; `None` means fall back to text
    async fn rasterize_order_change(&self, event: &OrderChangeEvent) -> Option<String> {
        let (renderer, rasterizer) = match (&self.renderer, &self.rasterizer) {
            (Some(re), Some(ra)) => (re, ra),
            _ => {
                warn!("image target without renderer/rasterizer, using text fallback");
                return None;
            }
        };

        let data = match serde_json::to_value(event) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "order change not serializable for renderer");
                return None;
            }
        };

        let markup = match renderer
            .render(ORDER_CHANGE_TEMPLATE, &data, self.currency.as_ref())
            .await
        {
            Ok(markup) => markup,
            Err(e) => {
                warn!(error = %e, "render failed, using text fallback");
                return None;
            }
        };

        match rasterizer.rasterize(&markup, IMAGE_SCALE).await {
            Ok(png) => Some(png),
            Err(e) => {
                warn!(error = %e, "rasterize failed, using text fallback");
                None
            }
        }
    }
}
