//! Receipt-to-printer formatting engine and print-job dispatcher
//!
//! Turns structured order changes or rendered receipt dumps into fixed-width
//! ESC/POS command streams, resolves the target printer and output mode, and
//! ships encoded jobs to a local print agent over HTTP. Print failures are
//! returned as data, never as faults that could break the surrounding sale.

pub mod directory;
pub mod dispatcher;
pub mod encoder;
pub mod error;
pub mod history;
pub mod kitchen;
pub mod receipt;
pub mod render;
pub mod resolver;
pub mod service;
pub mod types;

pub use directory::{
    CachedPrinter, ConfigProvider, MainPrinter, PrinterDirectory, PrinterRow, SessionConfig,
};
pub use dispatcher::AgentDispatcher;
pub use encoder::{JobEncoder, is_cut_stream};
pub use error::{ConfigError, EngineError, EngineResult, StatusError};
pub use history::{JobStatus, PrintHistory, PrintRecord};
pub use kitchen::KitchenTicketFormatter;
pub use receipt::{ClassifierRules, FinalReceiptFormatter, GUEST_KEYWORDS, TOTAL_KEYWORDS};
pub use render::{CurrencyFormat, Rasterizer, RasterizeError, RenderError, Renderer};
pub use resolver::{DEFAULT_PRINTER_NAME, PrinterResolver};
pub use service::{IMAGE_SCALE, ORDER_CHANGE_TEMPLATE, PrintFlowService, PrinterChanges};
pub use types::{
    AgentStatus, ChangeItem, ChangeMeta, Confidence, DispatchOutcome, LineKind, OrderChangeEvent,
    OutputMode, PrintJob, PrintSource, PrinterTarget, RawType, TicketLine,
};
