//! Kitchen ticket formatter
//!
//! Renders structured order-change data into an ESC/POS command stream for
//! kitchen-station printers. The stream carries no trailing cut: several
//! tickets may share one physical session, so the cut boundary belongs to
//! the caller.

use crate::types::{ChangeItem, ChangeMeta, OrderChangeEvent};
use printflow_escpos::{DEFAULT_WIDTH, EscPosBuilder, filter_printable_ascii};
use regex::Regex;

/// Minimum digits in the large order number
const NUMBER_MIN_DIGITS: usize = 4;

/// Kitchen ticket formatter
pub struct KitchenTicketFormatter {
    width: usize,
    digit_run: Regex,
}

impl KitchenTicketFormatter {
    /// Create a formatter for the given paper width in characters
    pub fn new(width: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            width,
            digit_run: Regex::new(r"\d{4,6}")?,
        })
    }

    pub fn with_default_width() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_WIDTH)
    }

    /// Format an order change as a command stream
    ///
    /// Section order is fixed: header, order-identifier block, item groups.
    /// Trailing whitespace is trimmed and no cut is appended.
    pub fn format(&self, event: &OrderChangeEvent) -> String {
        let mut b = EscPosBuilder::new(self.width);

        // Header: centered bold title, normal timestamp, full-width rule
        b.align_center();
        b.bold_on();
        b.write_line("KITCHEN ORDER");
        b.bold_off();
        b.size_reset();
        b.write_line(&format!("TIME: {}", event.meta.time));
        b.align_left();
        b.dash_sep();

        // Order-identifier block
        if let Some(table) = &event.meta.table_name
            && !table.is_empty()
        {
            b.write_line(table);
        }
        b.align_center();
        b.bold_on();
        b.size_double();
        b.write_line(&format!("#{}", self.order_number(&event.meta)));
        b.size_reset();
        b.bold_off();
        b.align_left();
        b.dash_sep();

        // Item groups, new first, only when non-empty
        if !event.new_items.is_empty() {
            self.write_group(&mut b, "NEW ITEMS", &event.new_items);
        }
        if !event.cancelled_items.is_empty() {
            self.write_group(&mut b, "CANCELLED", &event.cancelled_items);
        }

        b.finalize().trim_end().to_string()
    }

    fn write_group(&self, b: &mut EscPosBuilder, title: &str, items: &[ChangeItem]) {
        b.bold_on();
        b.write_line(&format!("{}:", title));
        b.bold_off();

        for item in items {
            let name = filter_printable_ascii(&item.name);
            b.bold_on();
            b.write(&format!("{:>5}", item.quantity));
            b.bold_off();
            b.write_line(&format!(" {}", name));

            if let Some(note) = &item.note
                && !note.is_empty()
            {
                b.write_line(&format!("     (Note: {})", note));
            }
        }
        b.newline();
    }

    /// Derive the large order number
    ///
    /// In order: a non-zero guest-count/tracking field zero-padded to at
    /// least four digits; else the first 4-6 digit run in the order display
    /// name; else the last four chars of that name; else `"0000"`.
    fn order_number(&self, meta: &ChangeMeta) -> String {
        if let Some(tracking) = &meta.tracking_number
            && !tracking.is_empty()
            && tracking != "0"
        {
            if tracking.chars().count() >= NUMBER_MIN_DIGITS {
                return tracking.clone();
            }
            return format!("{:0>width$}", tracking, width = NUMBER_MIN_DIGITS);
        }

        let raw = meta.order_name.as_deref().unwrap_or("");
        if let Some(m) = self.digit_run.find(raw) {
            return m.as_str().to_string();
        }

        let chars: Vec<char> = raw.chars().collect();
        if chars.len() >= NUMBER_MIN_DIGITS {
            return chars[chars.len() - NUMBER_MIN_DIGITS..].iter().collect();
        }

        "0000".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeItem;
    use printflow_escpos::cmd;

    fn formatter() -> KitchenTicketFormatter {
        KitchenTicketFormatter::new(42).unwrap()
    }

    fn meta(tracking: Option<&str>, order_name: Option<&str>) -> ChangeMeta {
        ChangeMeta {
            config_name: "Main POS".to_string(),
            employee_name: "Dana".to_string(),
            time: "12:30:15".to_string(),
            table_name: Some("Table 5".to_string()),
            tracking_number: tracking.map(String::from),
            order_name: order_name.map(String::from),
        }
    }

    fn item(qty: u32, name: &str, note: Option<&str>) -> ChangeItem {
        ChangeItem {
            quantity: qty,
            name: name.to_string(),
            note: note.map(String::from),
        }
    }

    fn event() -> OrderChangeEvent {
        OrderChangeEvent {
            new_items: vec![
                item(2, "Burger", Some("no onions")),
                item(1, "Fries", None),
            ],
            cancelled_items: vec![item(1, "Cola", None)],
            meta: meta(Some("0042"), None),
        }
    }

    #[test]
    fn test_format_is_idempotent() {
        let f = formatter();
        let ev = event();
        assert_eq!(f.format(&ev), f.format(&ev));
    }

    #[test]
    fn test_section_order_and_content() {
        let stream = formatter().format(&event());

        assert!(stream.starts_with(cmd::INIT));
        let title = stream.find("KITCHEN ORDER").unwrap();
        let time = stream.find("TIME: 12:30:15").unwrap();
        let table = stream.find("Table 5").unwrap();
        let number = stream.find("#0042").unwrap();
        let new_group = stream.find("NEW ITEMS:").unwrap();
        let cancelled = stream.find("CANCELLED:").unwrap();
        assert!(title < time && time < table && table < number);
        assert!(number < new_group && new_group < cancelled);

        // 2x scale wraps the order number
        let size2x = stream.find(cmd::SIZE_DOUBLE).unwrap();
        assert!(size2x < number);
    }

    #[test]
    fn test_no_trailing_cut_or_whitespace() {
        let stream = formatter().format(&event());
        assert!(!stream.contains(cmd::CUT));
        assert_eq!(stream, stream.trim_end());
    }

    #[test]
    fn test_quantity_padded_to_five() {
        let stream = formatter().format(&event());
        assert!(stream.contains(&format!("{}    2{} Burger", cmd::BOLD_ON, cmd::BOLD_OFF)));
    }

    #[test]
    fn test_note_line_indented() {
        let stream = formatter().format(&event());
        assert!(stream.contains("     (Note: no onions)"));
    }

    #[test]
    fn test_non_ascii_dropped_not_substituted() {
        let f = formatter();
        let mut ev = event();
        ev.new_items = vec![item(1, "Crème brûlée", None)];
        let stream = f.format(&ev);
        assert!(stream.contains(" Crme brle\n"));
        assert!(!stream.contains("è"));
    }

    #[test]
    fn test_empty_groups_omitted() {
        let f = formatter();
        let mut ev = event();
        ev.cancelled_items.clear();
        let stream = f.format(&ev);
        assert!(!stream.contains("CANCELLED"));
    }

    #[test]
    fn test_order_number_from_tracking() {
        let f = formatter();
        assert_eq!(f.order_number(&meta(Some("0042"), None)), "0042");
        assert_eq!(f.order_number(&meta(Some("42"), None)), "0042");
        assert_eq!(f.order_number(&meta(Some("98765"), None)), "98765");
    }

    #[test]
    fn test_order_number_from_name_digits() {
        let f = formatter();
        assert_eq!(
            f.order_number(&meta(None, Some("Order-198273"))),
            "198273"
        );
        assert_eq!(f.order_number(&meta(Some("0"), Some("Order-198273"))), "198273");
    }

    #[test]
    fn test_order_number_name_tail() {
        let f = formatter();
        assert_eq!(f.order_number(&meta(None, Some("TAKEAWAY-AB12"))), "AB12");
    }

    #[test]
    fn test_order_number_default() {
        let f = formatter();
        assert_eq!(f.order_number(&meta(None, Some("AB"))), "0000");
        assert_eq!(f.order_number(&meta(None, None)), "0000");
    }
}
