//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by generic thermal receipt printers (58mm and 80mm Bluetooth
//! models sold under many brands).
//!
//! ## Module Structure
//!
//! - [`commands`]: Job-level commands (initialize, paper cut)
//! - [`line`]: Per-line styling (alignment, bold) and the line encoder
//! - [`cp437`]: Unicode to single-byte text encoding
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::{commands, line};
//! use recibo::protocol::line::LineStyle;
//!
//! // Build a minimal print job by hand
//! let mut data = Vec::new();
//!
//! // Initialize printer
//! data.extend(commands::init());
//!
//! // One styled line (controls + text + terminator + resets in one buffer)
//! data.extend(line::encode_line("RECEIPT", &LineStyle::new().bold().center()));
//!
//! // Cut the paper
//! data.extend(commands::cut_full());
//!
//! // Send `data` to the printer via a transport...
//! ```
//!
//! ## Protocol Reference
//!
//! Command sequences follow the ESC/POS convention established by the
//! "ESC/POS Application Programming Guide" (Epson) as implemented by
//! generic GATT receipt printers.

pub mod commands;
pub mod cp437;
pub mod line;
