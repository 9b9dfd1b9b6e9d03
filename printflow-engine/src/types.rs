//! Core printing types: ticket lines, order changes, targets and jobs

use serde::{Deserialize, Serialize};

/// Classification tag for one output line of a reformatted receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Separator,
    Header,
    Total,
    Product,
    Plain,
}

/// Canonical representation of one output line
///
/// `Total` and `Product` lines always carry a non-empty `right` value once
/// classification succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLine {
    pub kind: LineKind,
    pub left: String,
    pub right: String,
}

impl TicketLine {
    pub fn separator() -> Self {
        Self {
            kind: LineKind::Separator,
            left: String::new(),
            right: String::new(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Plain,
            left: text.into(),
            right: String::new(),
        }
    }

    pub fn header(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Header,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn total(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Total,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn product(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Product,
            left: left.into(),
            right: right.into(),
        }
    }
}

/// One added or cancelled item within an order change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeItem {
    /// Always >= 1
    pub quantity: u32,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Metadata carried alongside an order change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeMeta {
    pub config_name: String,
    pub employee_name: String,
    /// Wall-clock time string as the host formatted it
    pub time: String,
    #[serde(default)]
    pub table_name: Option<String>,
    /// Guest-count / tracking field, used first for order-number derivation
    #[serde(default)]
    pub tracking_number: Option<String>,
    /// Order display name, the derivation fallback
    #[serde(default)]
    pub order_name: Option<String>,
}

/// Structured order-change data, created per order mutation and consumed
/// immediately; never persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderChangeEvent {
    #[serde(default)]
    pub new_items: Vec<ChangeItem>,
    #[serde(default)]
    pub cancelled_items: Vec<ChangeItem>,
    pub meta: ChangeMeta,
}

/// Tagged print input, replacing ad hoc field-presence probing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrintSource {
    KitchenChange(OrderChangeEvent),
    TextDump(String),
}

/// Output mode of a printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Text,
    Image,
}

/// How the resolver arrived at a printer identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Explicit printer name supplied with the request
    Direct,
    /// Directory entry matched by printer id
    Cached,
    /// Process main-printer identity
    Fallback,
    /// Sentinel default; configuration is missing
    Default,
}

/// Resolved printer identity and output mode
///
/// `name` is never empty: absent configuration resolves to the default
/// sentinel with `Confidence::Default`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterTarget {
    pub name: String,
    pub mode: OutputMode,
    pub confidence: Confidence,
}

/// Payload type tag understood by the print agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawType {
    Text,
    Image,
    Pdf,
    Zpl,
}

/// One encoded print job; serializes directly as the agent request body
///
/// `raw_data` is base64 and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    pub printer_name: String,
    pub raw_type: RawType,
    pub raw_data: String,
}

/// Agent status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    pub printers: Vec<String>,
    pub version: String,
}

/// Structured result of one dispatch attempt
///
/// Dispatch failures are data, never faults: the caller inspects the outcome
/// and decides on a local fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub successful: bool,
    pub error: Option<String>,
    /// Transport-level failure: the agent itself is unreachable
    pub agent_offline: bool,
    /// HTTP status of the agent response, when one arrived
    pub status: Option<u16>,
}

impl DispatchOutcome {
    pub fn accepted(status: u16) -> Self {
        Self {
            successful: true,
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn rejected(status: u16) -> Self {
        Self {
            successful: false,
            error: Some(format!("agent returned HTTP {status}")),
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            successful: false,
            error: Some(error.into()),
            agent_offline: true,
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            successful: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_job_wire_format() {
        let job = PrintJob {
            printer_name: "EPSON TM-T20".to_string(),
            raw_type: RawType::Image,
            raw_data: "aGVsbG8=".to_string(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["printer_name"], "EPSON TM-T20");
        assert_eq!(json["raw_type"], "image");
        assert_eq!(json["raw_data"], "aGVsbG8=");
    }

    #[test]
    fn test_output_mode_serde() {
        assert_eq!(serde_json::to_string(&OutputMode::Text).unwrap(), "\"text\"");
        let mode: OutputMode = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(mode, OutputMode::Image);
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = DispatchOutcome::accepted(200);
        assert!(ok.successful);
        assert_eq!(ok.status, Some(200));

        let rej = DispatchOutcome::rejected(500);
        assert!(!rej.successful);
        assert!(!rej.agent_offline);
        assert_eq!(rej.status, Some(500));

        let off = DispatchOutcome::offline("connection refused");
        assert!(off.agent_offline);
        assert_eq!(off.status, None);
    }
}
