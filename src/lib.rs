//! # Recibo - Bluetooth LE Receipt Printing
//!
//! Recibo is a Rust library for printing order receipts on generic
//! ESC/POS thermal printers over Bluetooth LE. It provides:
//!
//! - **Protocol implementation**: ESC/POS command and line builders
//! - **Receipt layout**: fixed storefront receipt composition
//! - **Transport**: GATT central connection with a mock for tests
//! - **Client**: connection lifecycle and sequential job delivery
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{
//!     printer::PrinterClient,
//!     receipt::{ReceiptItem, ReceiptPayload},
//!     transport::{BleTransport, ConnectOptions},
//! };
//!
//! # async fn demo() -> Result<(), recibo::ReciboError> {
//! // One client per printer; discovery options select the device
//! let mut client = PrinterClient::new(BleTransport::new(), ConnectOptions::default());
//!
//! // Check the capability before offering printing at all
//! if !client.is_supported().await {
//!     return Ok(());
//! }
//!
//! // connect -> print -> disconnect
//! client.connect().await?;
//! let payload = ReceiptPayload {
//!     store_name: "Grocery Store".to_string(),
//!     store_phone: "555-0100".to_string(),
//!     order_id: 42,
//!     order_date: "2026-08-07 14:05".to_string(),
//!     customer_name: "Ada".to_string(),
//!     customer_phone: "555-0199".to_string(),
//!     items: vec![ReceiptItem {
//!         name: "Apple".to_string(),
//!         quantity: 3,
//!         unit_price: 1.99,
//!     }],
//!     total: 5.97,
//! };
//! let result = client.print_receipt(&payload).await;
//! client.disconnect().await;
//! result?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and text encoding |
//! | [`receipt`] | Receipt payload and layout composition |
//! | [`printer`] | Connection lifecycle and job delivery |
//! | [`transport`] | Communication backends (BLE, mock) |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Generic 58mm/80mm Bluetooth LE receipt printers exposing the common
//! `0x18F0` print service with a writable `0x2AF0` characteristic. Other
//! ESC/POS printers should work with adjusted discovery options.

pub mod error;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod transport;

// Re-exports for convenience
pub use error::ReciboError;
pub use printer::PrinterClient;
pub use receipt::ReceiptPayload;
pub use transport::BleTransport;
