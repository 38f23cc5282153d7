//! # Mock Transport
//!
//! A capturing in-memory transport. Every buffer written to a
//! [`MockChannel`] lands in a shared [`WriteLog`], so tests and the CLI's
//! dry-run mode can observe the exact frame sequence a print job would
//! send to hardware.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ConnectOptions, Transport, WriteChannel};
use crate::error::ReciboError;

// ============================================================================
// WRITE LOG
// ============================================================================

/// Shared capture of everything written through a [`MockTransport`].
///
/// Cloning is cheap; all clones observe the same log.
#[derive(Debug, Clone, Default)]
pub struct WriteLog {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
    closes: Arc<AtomicUsize>,
}

impl WriteLog {
    /// All captured frames, one per write, in arrival order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().unwrap().clone()
    }

    /// Number of writes captured so far.
    pub fn write_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    /// Number of channels closed so far.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// All frames concatenated into one stream, as the device would see it.
    pub fn stream(&self) -> Vec<u8> {
        self.frames.lock().unwrap().concat()
    }

    fn push(&self, frame: &[u8]) {
        self.frames.lock().unwrap().push(frame.to_vec());
    }

    fn record_close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Behavior of a [`MockTransport`] on connect and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Connect succeeds; all writes succeed
    Ok,
    /// Capability probe reports false; connect fails with `NotSupported`
    Unsupported,
    /// Discovery never matches; connect fails with `DeviceNotFound`
    Absent,
    /// Connect succeeds; writes with index >= n fail with `WriteFailure`
    FailWritesFrom(usize),
}

/// In-memory [`Transport`] with scriptable failure behavior.
#[derive(Debug)]
pub struct MockTransport {
    log: WriteLog,
    mode: Mode,
}

impl MockTransport {
    /// A transport where everything succeeds.
    pub fn new() -> Self {
        Self {
            log: WriteLog::default(),
            mode: Mode::Ok,
        }
    }

    /// A host with no Bluetooth capability.
    pub fn unsupported() -> Self {
        Self {
            log: WriteLog::default(),
            mode: Mode::Unsupported,
        }
    }

    /// A host where no device ever matches the filter.
    pub fn absent() -> Self {
        Self {
            log: WriteLog::default(),
            mode: Mode::Absent,
        }
    }

    /// A printer whose link dies mid-job: writes 0..n succeed and are
    /// captured, write n and later fail.
    pub fn failing_from(n: usize) -> Self {
        Self {
            log: WriteLog::default(),
            mode: Mode::FailWritesFrom(n),
        }
    }

    /// Handle on the shared capture log.
    pub fn log(&self) -> WriteLog {
        self.log.clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Channel = MockChannel;

    async fn is_supported(&self) -> bool {
        self.mode != Mode::Unsupported
    }

    async fn connect(&self, _options: &ConnectOptions) -> Result<MockChannel, ReciboError> {
        match self.mode {
            Mode::Unsupported => Err(ReciboError::NotSupported),
            Mode::Absent => Err(ReciboError::DeviceNotFound),
            Mode::Ok => Ok(MockChannel {
                log: self.log.clone(),
                fail_from: None,
                writes: 0,
            }),
            Mode::FailWritesFrom(n) => Ok(MockChannel {
                log: self.log.clone(),
                fail_from: Some(n),
                writes: 0,
            }),
        }
    }
}

// ============================================================================
// CHANNEL
// ============================================================================

/// Channel produced by [`MockTransport`].
#[derive(Debug)]
pub struct MockChannel {
    log: WriteLog,
    fail_from: Option<usize>,
    writes: usize,
}

#[async_trait]
impl WriteChannel for MockChannel {
    async fn write(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        let index = self.writes;
        self.writes += 1;

        if let Some(n) = self.fail_from {
            if index >= n {
                return Err(ReciboError::WriteFailure(format!(
                    "mock write {} rejected",
                    index
                )));
            }
        }

        self.log.push(data);
        Ok(())
    }

    async fn close(&mut self) {
        self.log.record_close();
    }
}

// ============================================================================
// TESTS
// ============================================================================
