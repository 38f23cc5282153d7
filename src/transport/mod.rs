//! # Printer Transport Layer
//!
//! This module provides communication backends for delivering encoded
//! commands to printers.
//!
//! ## Available Transports
//!
//! - [`ble`]: Bluetooth LE GATT central (the path used against real hardware)
//! - [`mock`]: capturing in-memory channel for tests and dry runs
//!
//! ## Shape of a Session
//!
//! A [`Transport`] turns a [`ConnectOptions`] into a [`WriteChannel`]: it
//! discovers a matching device, opens the link, and resolves the writable
//! endpoint. The channel then accepts sequential writes until closed. One
//! channel maps to one device session; channels are not reused after
//! `close()`.

pub mod ble;
pub mod mock;

pub use ble::BleTransport;
pub use mock::MockTransport;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ReciboError;

// ============================================================================
// DISCOVERY DEFAULTS
// ============================================================================

/// Print service advertised by generic BLE receipt printers
pub const PRINT_SERVICE: Uuid = Uuid::from_u128(0x000018f0_0000_1000_8000_00805f9b34fb);

/// Writable characteristic under [`PRINT_SERVICE`]
pub const PRINT_CHARACTERISTIC: Uuid = Uuid::from_u128(0x00002af0_0000_1000_8000_00805f9b34fb);

/// Default device-name prefix accepted during discovery
pub const DEFAULT_NAME_PREFIX: &str = "Printer";

/// Default bound on discovery + link + characteristic resolution
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default bound on a single characteristic write
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// CONNECT OPTIONS
// ============================================================================

/// Parameters for one discovery + connection attempt.
///
/// A device matches when its advertised name starts with
/// `device_name_prefix` OR its advertisement carries `service`. The
/// writable endpoint is `characteristic` under that service.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Accept devices whose name starts with this prefix (`None` disables
    /// name matching; service matching still applies)
    pub device_name_prefix: Option<String>,
    /// Service UUID to scan for
    pub service: Uuid,
    /// Writable characteristic UUID under the service
    pub characteristic: Uuid,
    /// Deadline covering discovery, link, and characteristic resolution
    pub connect_timeout: Duration,
    /// Deadline for each individual write
    pub write_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            device_name_prefix: Some(DEFAULT_NAME_PREFIX.to_string()),
            service: PRINT_SERVICE,
            characteristic: PRINT_CHARACTERISTIC,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

// ============================================================================
// TRAITS
// ============================================================================

/// A connection backend: capability probe + device discovery.
#[async_trait]
pub trait Transport {
    type Channel: WriteChannel;

    /// Whether the host exposes this transport at all.
    ///
    /// Pure query, safe to call at any time. Callers use it to gate
    /// `connect()` rather than attempting a connection and classifying
    /// the failure.
    async fn is_supported(&self) -> bool;

    /// Discover a matching device and open its writable channel.
    ///
    /// Each attempt is a fresh discovery; this layer never retries on its
    /// own.
    async fn connect(&self, options: &ConnectOptions) -> Result<Self::Channel, ReciboError>;
}

/// An open, writable device session.
#[async_trait]
pub trait WriteChannel: Send {
    /// Deliver one buffer to the device.
    ///
    /// Buffers must be written one at a time, in order; the device does
    /// not tolerate overlapping commands.
    async fn write(&mut self, data: &[u8]) -> Result<(), ReciboError>;

    /// Release the session. Infallible from the caller's perspective and
    /// safe to call on a channel that already lost its link.
    async fn close(&mut self);
}
