//! # Receipt Payload and Layout
//!
//! This module defines the immutable receipt payload and composes it into
//! the ordered command sequence a print job sends to the device.
//!
//! ## Layout
//!
//! The layout is fixed. Besides the item lines, a receipt always prints
//! the same 19-line skeleton:
//!
//! ```text
//! Grocery Store                 (bold, centered)
//! Phone: 555-0100               (centered)
//!
//! ORDER RECEIPT                 (bold, centered)
//!
//! Order ID: #42
//! Date: 2026-08-07 14:05
//!
//! CUSTOMER                      (bold)
//! Name: Ada
//! Phone: 555-0199
//!
//! ITEMS                         (bold)
//! 3 x Apple                     (two lines per item)
//!      3 @ $1.99 = $5.97
//!
//! TOTAL                         (bold)
//! $5.97                         (bold, right)
//!
//! Thank you for your order!     (centered)
//! Please come again!            (centered)
//! ```
//!
//! The whole job is bracketed by an initialize command at the start and a
//! full paper cut at the end. Composition is pure; nothing here touches a
//! transport.

use serde::{Deserialize, Serialize};

use crate::error::ReciboError;
use crate::protocol::commands;
use crate::protocol::line::{LineStyle, encode_line};

/// Number of lines every receipt prints besides the per-item lines.
pub const SKELETON_LINES: usize = 19;

// ============================================================================
// PAYLOAD
// ============================================================================

/// One purchased item on a receipt.
///
/// Serialized field names are camelCase to match the order payloads the
/// storefront emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl ReceiptItem {
    /// Extended price for this item (quantity × unit price).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Everything needed to render one printed receipt.
///
/// Immutable input to a single print operation; the date arrives
/// preformatted and is printed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub store_name: String,
    pub store_phone: String,
    pub order_id: u32,
    pub order_date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<ReceiptItem>,
    pub total: f64,
}

impl ReceiptPayload {
    /// Validate payload invariants before printing.
    ///
    /// Item quantities must be positive; zero-quantity lines would render
    /// a nonsense `0 @ $x = $0.00` entry on paper.
    pub fn validate(&self) -> Result<(), ReciboError> {
        for item in &self.items {
            if item.quantity == 0 {
                return Err(ReciboError::InvalidPayload(format!(
                    "item '{}' has zero quantity",
                    item.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// MONEY FORMATTING
// ============================================================================

/// Render a monetary amount with exactly two fraction digits.
///
/// ## Example
///
/// ```
/// use recibo::receipt::money;
///
/// assert_eq!(money(5.97), "5.97");
/// assert_eq!(money(2.0 * 1.995), "3.99");
/// assert_eq!(money(10.0), "10.00");
/// ```
#[inline]
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

// ============================================================================
// PRINT COMMANDS
// ============================================================================

/// Named control sequences a print job may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSequence {
    /// Reset the printer at job start (`ESC @`)
    Init,
    /// Full paper cut at job end (`GS V 0`)
    CutFull,
}

impl ControlSequence {
    /// Wire bytes for this control sequence.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Init => commands::init(),
            Self::CutFull => commands::cut_full(),
        }
    }
}

/// The unit of output sent to the device.
///
/// A print job is an ordered `Vec<PrintCommand>`; each command encodes to
/// one buffer and is delivered as one characteristic write. Order is
/// significant and must match the receipt's visual layout exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintCommand {
    /// Pre-encoded bytes, sent as-is
    Raw(Vec<u8>),
    /// One styled logical line
    Text { content: String, style: LineStyle },
    /// A named control sequence
    Control(ControlSequence),
}

impl PrintCommand {
    /// Wire bytes for this command.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => bytes.clone(),
            Self::Text { content, style } => encode_line(content, style),
            Self::Control(seq) => seq.encode(),
        }
    }
}

fn text(content: impl Into<String>, style: LineStyle) -> PrintCommand {
    PrintCommand::Text {
        content: content.into(),
        style,
    }
}

fn blank() -> PrintCommand {
    text("", LineStyle::new())
}

// ============================================================================
// LAYOUT COMPOSITION
// ============================================================================

/// Compose a payload into the fixed receipt command sequence.
///
/// Returns `Control(Init)`, the [`SKELETON_LINES`] + 2·N text lines, then
/// `Control(CutFull)`. Composition never fails; payload validation is a
/// separate concern ([`ReceiptPayload::validate`]).
pub fn compose(payload: &ReceiptPayload) -> Vec<PrintCommand> {
    let mut job = Vec::with_capacity(SKELETON_LINES + payload.items.len() * 2 + 2);

    job.push(PrintCommand::Control(ControlSequence::Init));

    // Header
    job.push(text(&payload.store_name, LineStyle::new().bold().center()));
    job.push(text(
        format!("Phone: {}", payload.store_phone),
        LineStyle::new().center(),
    ));
    job.push(blank());

    // Order details
    job.push(text("ORDER RECEIPT", LineStyle::new().bold().center()));
    job.push(blank());
    job.push(text(
        format!("Order ID: #{}", payload.order_id),
        LineStyle::new(),
    ));
    job.push(text(format!("Date: {}", payload.order_date), LineStyle::new()));
    job.push(blank());

    // Customer info
    job.push(text("CUSTOMER", LineStyle::new().bold()));
    job.push(text(
        format!("Name: {}", payload.customer_name),
        LineStyle::new(),
    ));
    job.push(text(
        format!("Phone: {}", payload.customer_phone),
        LineStyle::new(),
    ));
    job.push(blank());

    // Items: a name line and an indented price line per item
    job.push(text("ITEMS", LineStyle::new().bold()));
    for item in &payload.items {
        job.push(text(
            format!("{} x {}", item.quantity, item.name),
            LineStyle::new(),
        ));
        job.push(text(
            format!(
                "     {} @ ${} = ${}",
                item.quantity,
                money(item.unit_price),
                money(item.line_total())
            ),
            LineStyle::new(),
        ));
    }
    job.push(blank());

    // Total
    job.push(text("TOTAL", LineStyle::new().bold()));
    job.push(text(
        format!("${}", money(payload.total)),
        LineStyle::new().bold().right(),
    ));
    job.push(blank());

    // Footer
    job.push(text("Thank you for your order!", LineStyle::new().center()));
    job.push(text("Please come again!", LineStyle::new().center()));

    job.push(PrintCommand::Control(ControlSequence::CutFull));

    job
}

// ============================================================================
// TESTS
// ============================================================================
