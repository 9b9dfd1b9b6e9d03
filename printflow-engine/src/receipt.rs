//! Final receipt reformatter
//!
//! Takes a delinearized dump of rendered receipt text and rebuilds it as a
//! fixed-width command stream. Classification is a single forward pass over
//! the lines with an ordered rule list and no backtracking; a line that
//! matches no rule degrades to centered plain text, never to an error.

use crate::types::{LineKind, TicketLine};
use printflow_escpos::{DEFAULT_WIDTH, EscPosBuilder};
use regex::Regex;

/// Keyword set marking total/tax/amount lines
///
/// Kept as data so the set can be swapped without touching rule logic.
pub const TOTAL_KEYWORDS: &[&str] = &[
    "TOTAL", "VAT", "Tax", "Amount", "Cash", "Change", "Totaal", "Gesamt", "Totale", "Sum",
    "Huf", "Amt", "Efectivo", "Cambio", "Troco", "Rendu", "Espèces", "Bargeld", "Contanti",
];

/// Keyword set marking guest/table header lines
pub const GUEST_KEYWORDS: &[&str] = &["Guest", "Table", "Mesa", "Invitados"];

/// Price token: a numeric run optionally bracketed by a single
/// non-alphanumeric currency symbol on either side
const PRICE_TOKEN: &str = r"[^\d\s\w]?\s*[\d.,]+\s*[^\d\s\w]?";

/// Compiled classification rules
///
/// All patterns live here so each rule is testable against literal line
/// fixtures independently of the render pass.
pub struct ClassifierRules {
    total_line: Regex,
    guest_line: Regex,
    guest_number: Regex,
    guest_suffix: Regex,
    separator: Regex,
    skip_line: Regex,
    powered_by: Regex,
    order_ref: Regex,
    datetime: Regex,
    price_tail: Regex,
    label_value: Regex,
    gap_split: Regex,
    space_split: Regex,
    trailing_dots: Regex,
}

impl ClassifierRules {
    /// Compile the built-in rule set
    pub fn builtin() -> Result<Self, regex::Error> {
        Ok(Self {
            total_line: Regex::new(&format!("(?i){}", TOTAL_KEYWORDS.join("|")))?,
            guest_line: Regex::new(&format!("(?i){}", GUEST_KEYWORDS.join("|")))?,
            guest_number: Regex::new(r"(\d{4,})$")?,
            guest_suffix: Regex::new(r"(?i),\s*Guests:?\s*$")?,
            separator: Regex::new(r"^-+$|_{3,}")?,
            skip_line: Regex::new(r"(?i)/ Unit|Tax ID|VAT:")?,
            powered_by: Regex::new(r"(?i)Powered\s+by\s+\w+")?,
            order_ref: Regex::new(r"(?i)(Order\s+[\w-]{5,})")?,
            datetime: Regex::new(r"(\d{2}/\d{2}/\d{4}\s+\d{1,2}:\d{2}:\d{2})")?,
            price_tail: Regex::new(&format!(r"{PRICE_TOKEN}$"))?,
            label_value: Regex::new(&format!(r"^(.*?)\s*({PRICE_TOKEN})$"))?,
            gap_split: Regex::new(&format!(r"^(.*?)(?:\s{{2,}}|\t)({PRICE_TOKEN})$"))?,
            space_split: Regex::new(&format!(r"\s{PRICE_TOKEN}$"))?,
            trailing_dots: Regex::new(r"\.+$")?,
        })
    }

    pub fn is_separator(&self, line: &str) -> bool {
        self.separator.is_match(line)
    }

    pub fn is_total(&self, line: &str) -> bool {
        self.total_line.is_match(line)
    }

    /// Guest/table header split: `(prefix, number)` when the line carries a
    /// guest keyword and ends in a 4+ digit run
    pub fn guest_header(&self, line: &str) -> Option<(String, String)> {
        if !self.guest_line.is_match(line) {
            return None;
        }
        let caps = self.guest_number.captures(line)?;
        let number = caps.get(1)?.as_str().to_string();
        let prefix = line[..line.len() - number.len()].trim();
        let prefix = self.guest_suffix.replace(prefix, "").trim().to_string();
        Some((prefix, number))
    }

    /// Label/value split for total lines
    pub fn label_value(&self, line: &str) -> Option<(String, String)> {
        let caps = self.label_value.captures(line)?;
        Some((
            caps.get(1)?.as_str().trim().to_string(),
            caps.get(2)?.as_str().trim().to_string(),
        ))
    }

    pub fn ends_with_price(&self, line: &str) -> bool {
        self.price_tail.is_match(line)
    }

    /// Name/price split at a run of 2+ spaces or a tab before the price
    pub fn gap_split(&self, line: &str) -> Option<(String, String)> {
        let caps = self.gap_split.captures(line)?;
        Some((
            caps.get(1)?.as_str().to_string(),
            caps.get(2)?.as_str().to_string(),
        ))
    }

    /// Name/price split at the last single whitespace before the price
    pub fn space_split(&self, line: &str) -> Option<(String, String)> {
        let m = self.space_split.find(line)?;
        Some((
            line[..m.start()].to_string(),
            line[m.start()..].trim().to_string(),
        ))
    }
}

/// Final receipt formatter
pub struct FinalReceiptFormatter {
    width: usize,
    rules: ClassifierRules,
}

impl FinalReceiptFormatter {
    pub fn new(width: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            width,
            rules: ClassifierRules::builtin()?,
        })
    }

    pub fn with_default_width() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_WIDTH)
    }

    /// Reformat a receipt dump as a command stream
    ///
    /// No trailing cut and no trailing blank line.
    pub fn format(&self, dump: &str) -> String {
        self.run(dump).0
    }

    /// Classification view of the same pass, for inspection and testing
    pub fn classify(&self, dump: &str) -> Vec<TicketLine> {
        self.run(dump).1
    }

    /// Split the dump into classifiable lines
    ///
    /// Drops branding and unit/tax-id annotation lines, and re-breaks order
    /// references and date-time stamps the source markup merged onto a
    /// neighboring physical line.
    fn preprocess(&self, dump: &str) -> Vec<String> {
        let text = self.rules.powered_by.replace_all(dump, "");
        let text = self.rules.order_ref.replace_all(&text, "\n$1\n");
        let text = self.rules.datetime.replace_all(&text, "\n$1\n");

        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !self.rules.skip_line.is_match(l))
            .map(String::from)
            .collect()
    }

    fn run(&self, dump: &str) -> (String, Vec<TicketLine>) {
        let lines = self.preprocess(dump);
        let mut b = EscPosBuilder::new(self.width);
        let mut ticket: Vec<TicketLine> = Vec::with_capacity(lines.len());
        b.align_center();

        let mut in_products = false;
        let mut pending: Option<String> = None;

        for line in &lines {
            if self.rules.is_separator(line) {
                self.flush_pending(&mut b, &mut ticket, &mut pending);
                b.align_left();
                b.dash_sep();
                ticket.push(TicketLine::separator());
                in_products = false;
                continue;
            }

            if let Some((prefix, number)) = self.rules.guest_header(line) {
                b.align_center();
                b.bold_on();
                b.write_line(&prefix);
                b.size_double();
                b.write_line(&number);
                b.size_reset();
                b.bold_off();
                b.align_left();
                b.dash_sep();
                ticket.push(TicketLine::header(prefix, number));
                ticket.push(TicketLine::separator());
                continue;
            }

            if self.rules.is_total(line) {
                self.flush_pending(&mut b, &mut ticket, &mut pending);
                if let Some((label, value)) = self.rules.label_value(line) {
                    let emphasize = {
                        let upper = label.to_uppercase();
                        upper.contains("TOTAL") || upper.contains("SUM")
                    };
                    b.align_left();
                    b.bold_on();
                    if emphasize {
                        b.size_double_height();
                    }
                    b.write_line(&self.justify(&label, &value));
                    if emphasize {
                        b.size_reset();
                    }
                    b.bold_off();
                    ticket.push(TicketLine::total(label, value));
                } else {
                    b.align_center();
                    b.write_line(line);
                    ticket.push(TicketLine::plain(line.as_str()));
                }
                continue;
            }

            if self.rules.ends_with_price(line) {
                if !in_products {
                    b.align_left();
                    in_products = true;
                }
                let (name, price) = if let Some(split) = self.rules.gap_split(line) {
                    split
                } else if let Some(name) = pending.take() {
                    (name, line.clone())
                } else if let Some(split) = self.rules.space_split(line) {
                    split
                } else {
                    (String::new(), line.clone())
                };

                let name = name.trim().to_string();
                let price = price.trim().to_string();
                b.write_line(&self.justify(&name, &price));
                ticket.push(TicketLine {
                    kind: LineKind::Product,
                    left: self.strip_leader(&name),
                    right: price,
                });
                continue;
            }

            // no rule matched
            self.flush_pending(&mut b, &mut ticket, &mut pending);
            if in_products {
                pending = Some(line.clone());
            } else {
                b.align_center();
                b.write_line(line);
                ticket.push(TicketLine::plain(line.as_str()));
            }
        }

        self.flush_pending(&mut b, &mut ticket, &mut pending);
        (b.finalize().trim_end().to_string(), ticket)
    }

    /// Justify a name/value pair to exactly `width` columns
    ///
    /// Leader dots are stripped from the name; the gap never collapses below
    /// one space, so an over-long pair overflows rather than truncating the
    /// value.
    fn justify(&self, left: &str, right: &str) -> String {
        let left = self.strip_leader(left);
        let pad = self
            .width
            .saturating_sub(left.chars().count() + right.chars().count())
            .max(1);
        format!("{}{}{}", left, " ".repeat(pad), right)
    }

    fn strip_leader(&self, name: &str) -> String {
        self.rules
            .trailing_dots
            .replace(name, "")
            .trim_end()
            .to_string()
    }

    fn flush_pending(
        &self,
        b: &mut EscPosBuilder,
        ticket: &mut Vec<TicketLine>,
        pending: &mut Option<String>,
    ) {
        if let Some(name) = pending.take() {
            b.align_left();
            b.write_line(&name);
            ticket.push(TicketLine::plain(name));
        }
    }
}
