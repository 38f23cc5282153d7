//! # Bluetooth LE GATT Transport
//!
//! This module connects to receipt printers that expose an ESC/POS write
//! characteristic over Bluetooth LE, the common scheme for inexpensive
//! 58mm/80mm Bluetooth printers: a primary service `0x18F0` carrying a
//! writable characteristic `0x2AF0`.
//!
//! ## Discovery
//!
//! Scanning filters on the configured service UUID; a peripheral is
//! accepted when its advertised local name starts with the configured
//! prefix OR its advertisement lists the service. Discovery, link setup,
//! and characteristic resolution all share one deadline
//! ([`ConnectOptions::connect_timeout`]).
//!
//! ## Write Semantics
//!
//! Writes use write-without-response when the characteristic offers it
//! (these printers usually do), falling back to acknowledged writes
//! otherwise. One encoded line per write; the printer consumes buffers in
//! arrival order.
//!
//! ## Platform Notes
//!
//! `btleplug` backs this transport with the platform stack (BlueZ on
//! Linux, CoreBluetooth on macOS, WinRT on Windows). Pairing is not
//! required for these printers; they accept writes from any central.

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{
    Central, CharPropFlags, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tokio::time::{Instant, sleep, timeout_at};

use super::{ConnectOptions, Transport, WriteChannel};
use crate::error::ReciboError;

/// Interval between scan-result polls during discovery
const SCAN_POLL: Duration = Duration::from_millis(500);

// ============================================================================
// TRANSPORT
// ============================================================================

/// # Bluetooth LE Printer Transport
///
/// Stateless discovery front-end; each [`connect`](Transport::connect)
/// call performs a fresh scan and yields an independent [`BleChannel`].
///
/// ## Example
///
/// ```no_run
/// use recibo::transport::{BleTransport, ConnectOptions, Transport, WriteChannel};
/// use recibo::protocol::commands;
///
/// # async fn demo() -> Result<(), recibo::ReciboError> {
/// let transport = BleTransport::new();
/// let mut channel = transport.connect(&ConnectOptions::default()).await?;
/// channel.write(&commands::init()).await?;
/// channel.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BleTransport;

impl BleTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for BleTransport {
    type Channel = BleChannel;

    /// True when at least one Bluetooth adapter is present and usable.
    async fn is_supported(&self) -> bool {
        match Manager::new().await {
            Ok(manager) => manager
                .adapters()
                .await
                .map(|adapters| !adapters.is_empty())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn connect(&self, options: &ConnectOptions) -> Result<BleChannel, ReciboError> {
        let deadline = Instant::now() + options.connect_timeout;

        let adapter = default_adapter().await?;
        let peripheral = discover(&adapter, options, deadline).await?;

        timeout_at(deadline, peripheral.connect())
            .await
            .map_err(|_| ReciboError::LinkFailure("connection timed out".to_string()))?
            .map_err(|e| ReciboError::LinkFailure(format!("GATT connect failed: {}", e)))?;

        // The link is up; from here on, tear it down before surfacing an error
        match resolve_characteristic(&peripheral, options, deadline).await {
            Ok(characteristic) => Ok(BleChannel::new(
                peripheral,
                characteristic,
                options.write_timeout,
            )),
            Err(e) => {
                let _ = peripheral.disconnect().await;
                Err(e)
            }
        }
    }
}

/// First available Bluetooth adapter on this host.
async fn default_adapter() -> Result<Adapter, ReciboError> {
    let manager = Manager::new()
        .await
        .map_err(|_| ReciboError::NotSupported)?;
    manager
        .adapters()
        .await
        .map_err(|_| ReciboError::NotSupported)?
        .into_iter()
        .next()
        .ok_or(ReciboError::NotSupported)
}

/// Scan until a peripheral matches the filter or the deadline passes.
async fn discover(
    adapter: &Adapter,
    options: &ConnectOptions,
    deadline: Instant,
) -> Result<Peripheral, ReciboError> {
    adapter
        .start_scan(ScanFilter {
            services: vec![options.service],
        })
        .await
        .map_err(|e| ReciboError::LinkFailure(format!("scan failed to start: {}", e)))?;

    let result = loop {
        if Instant::now() >= deadline {
            break Err(ReciboError::DeviceNotFound);
        }
        sleep(SCAN_POLL).await;

        let peripherals = match adapter.peripherals().await {
            Ok(peripherals) => peripherals,
            Err(e) => break Err(ReciboError::LinkFailure(format!("scan query failed: {}", e))),
        };
        if let Some(found) = first_match(peripherals, options).await {
            break Ok(found);
        }
    };

    let _ = adapter.stop_scan().await;
    result
}

/// Pick the first scanned peripheral accepted by the discovery filter.
async fn first_match(peripherals: Vec<Peripheral>, options: &ConnectOptions) -> Option<Peripheral> {
    for peripheral in peripherals {
        if matches_filter(&peripheral, options).await {
            return Some(peripheral);
        }
    }
    None
}

/// Name-prefix OR advertised-service match.
async fn matches_filter(peripheral: &Peripheral, options: &ConnectOptions) -> bool {
    let Ok(Some(props)) = peripheral.properties().await else {
        return false;
    };

    let name_match = match (&options.device_name_prefix, &props.local_name) {
        (Some(prefix), Some(name)) => name.starts_with(prefix.as_str()),
        _ => false,
    };

    name_match || props.services.contains(&options.service)
}

/// Enumerate GATT services and locate the writable print characteristic.
async fn resolve_characteristic(
    peripheral: &Peripheral,
    options: &ConnectOptions,
    deadline: Instant,
) -> Result<Characteristic, ReciboError> {
    timeout_at(deadline, peripheral.discover_services())
        .await
        .map_err(|_| ReciboError::LinkFailure("service discovery timed out".to_string()))?
        .map_err(|e| ReciboError::LinkFailure(format!("service discovery failed: {}", e)))?;

    peripheral
        .characteristics()
        .into_iter()
        .find(|c| c.uuid == options.characteristic)
        .ok_or_else(|| {
            ReciboError::LinkFailure(format!(
                "characteristic {} not found",
                options.characteristic
            ))
        })
}

// ============================================================================
// CHANNEL
// ============================================================================

/// An open GATT session to one printer.
///
/// Owns the peripheral and its resolved write characteristic for the
/// lifetime of the session; both are released together by
/// [`close`](WriteChannel::close).
pub struct BleChannel {
    peripheral: Peripheral,
    characteristic: Characteristic,
    write_type: WriteType,
    write_timeout: Duration,
}

impl BleChannel {
    fn new(peripheral: Peripheral, characteristic: Characteristic, write_timeout: Duration) -> Self {
        let write_type = if characteristic
            .properties
            .contains(CharPropFlags::WRITE_WITHOUT_RESPONSE)
        {
            WriteType::WithoutResponse
        } else {
            WriteType::WithResponse
        };
        Self {
            peripheral,
            characteristic,
            write_type,
            write_timeout,
        }
    }
}

#[async_trait]
impl WriteChannel for BleChannel {
    async fn write(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        tokio::time::timeout(
            self.write_timeout,
            self.peripheral
                .write(&self.characteristic, data, self.write_type),
        )
        .await
        .map_err(|_| ReciboError::WriteFailure("write timed out".to_string()))?
        .map_err(|e| ReciboError::WriteFailure(e.to_string()))
    }

    /// Drop the characteristic handle and close the link. Release order is
    /// the reverse of acquisition: characteristic, session, device
    /// reference (the last two when `self` drops).
    async fn close(&mut self) {
        let _ = self.peripheral.disconnect().await;
    }
}

// ============================================================================
// SCANNING (CLI support)
// ============================================================================

/// A device seen during a scan that the discovery filter would accept.
#[derive(Debug, Clone)]
pub struct DiscoveredPrinter {
    /// Advertised local name, if any
    pub name: Option<String>,
    /// Platform address (MAC on Linux/Windows, UUID-derived on macOS)
    pub address: String,
}

/// List matching printers seen within `duration`.
///
/// Does not connect to anything; the caller picks a device and follows up
/// with a regular [`Transport::connect`].
pub async fn scan(
    options: &ConnectOptions,
    duration: Duration,
) -> Result<Vec<DiscoveredPrinter>, ReciboError> {
    let adapter = default_adapter().await?;

    adapter
        .start_scan(ScanFilter {
            services: vec![options.service],
        })
        .await
        .map_err(|e| ReciboError::LinkFailure(format!("scan failed to start: {}", e)))?;

    sleep(duration).await;

    let peripherals = adapter
        .peripherals()
        .await
        .map_err(|e| ReciboError::LinkFailure(format!("scan query failed: {}", e)))?;

    let mut found = Vec::new();
    for peripheral in peripherals {
        if matches_filter(&peripheral, options).await {
            let name = peripheral
                .properties()
                .await
                .ok()
                .flatten()
                .and_then(|p| p.local_name);
            found.push(DiscoveredPrinter {
                name,
                address: peripheral.address().to_string(),
            });
        }
    }

    let _ = adapter.stop_scan().await;
    Ok(found)
}

// Discovery and write paths require a live adapter and printer; they are
// exercised manually and through the mock transport's contract tests.
