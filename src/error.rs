//! # Error Types
//!
//! This module defines error types used throughout the recibo library.
//!
//! The variants mirror the stages of a print job: capability probing,
//! device discovery, link setup, and per-line writes. None of them trigger
//! automatic retries anywhere in the crate; a retry is always a fresh
//! `connect()` + print initiated by the caller.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum ReciboError {
    /// The host exposes no Bluetooth LE capability at all
    #[error("Bluetooth LE is not available on this host")]
    NotSupported,

    /// No device matched the discovery filter before the deadline,
    /// or device selection was cancelled
    #[error("No matching printer found")]
    DeviceNotFound,

    /// Link, service, or characteristic resolution failed
    #[error("Link failure: {0}")]
    LinkFailure(String),

    /// A write was attempted without an active session
    #[error("Not connected to a printer")]
    NotConnected,

    /// The transport rejected or failed a write mid-job
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// A receipt payload failed validation
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
