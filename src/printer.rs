//! # Printer Client
//!
//! This module owns the connection lifecycle and translates receipts into
//! the ordered byte stream delivered to the device.
//!
//! ## State Machine
//!
//! ```text
//! Disconnected --connect()--> Connected --print_line()/print_receipt()--> Connected
//!                                  |
//!                            disconnect()
//!                                  v
//!                            Disconnected
//! ```
//!
//! Writes in `Disconnected` fail with [`ReciboError::NotConnected`] and
//! never reach a transport. `connect()` while already connected tears
//! down the existing session first, so the client can never hold two live
//! links.
//!
//! ## Sequencing
//!
//! A print job is a sequential chain of awaits: one characteristic write
//! at a time, in layout order. The device does not tolerate overlapping
//! commands, and a control sequence must arrive before the text it
//! modifies, so nothing here buffers, merges, or parallelizes writes.

use crate::error::ReciboError;
use crate::protocol::line::{LineStyle, encode_line};
use crate::receipt::{self, PrintCommand, ReceiptPayload};
use crate::transport::{ConnectOptions, Transport, WriteChannel};

// ============================================================================
// SESSION STATE
// ============================================================================

/// Tagged connection state.
///
/// The channel exists only while connected; there is no representable
/// state with a characteristic but no session.
enum Session<C> {
    Disconnected,
    Connected { channel: C },
}

// ============================================================================
// CLIENT
// ============================================================================

/// # Printer Client
///
/// Drives one printer over one transport. At most one session is live per
/// client; a second job must wait for the first to finish (the caller
/// serializes invocations, e.g. by disabling its print trigger while a
/// job is in flight).
///
/// ## Example
///
/// ```no_run
/// use recibo::printer::PrinterClient;
/// use recibo::receipt::{ReceiptItem, ReceiptPayload};
/// use recibo::transport::{BleTransport, ConnectOptions};
///
/// # async fn demo() -> Result<(), recibo::ReciboError> {
/// let mut client = PrinterClient::new(BleTransport::new(), ConnectOptions::default());
///
/// client.connect().await?;
/// let payload = ReceiptPayload {
///     store_name: "Grocery Store".to_string(),
///     store_phone: "555-0100".to_string(),
///     order_id: 42,
///     order_date: "2026-08-07 14:05".to_string(),
///     customer_name: "Ada".to_string(),
///     customer_phone: "555-0199".to_string(),
///     items: vec![ReceiptItem {
///         name: "Apple".to_string(),
///         quantity: 3,
///         unit_price: 1.99,
///     }],
///     total: 5.97,
/// };
/// let result = client.print_receipt(&payload).await;
/// client.disconnect().await;
/// result?;
/// # Ok(())
/// # }
/// ```
pub struct PrinterClient<T: Transport> {
    transport: T,
    options: ConnectOptions,
    session: Session<T::Channel>,
}

impl<T: Transport> PrinterClient<T> {
    /// Create a disconnected client.
    pub fn new(transport: T, options: ConnectOptions) -> Self {
        Self {
            transport,
            options,
            session: Session::Disconnected,
        }
    }

    /// Whether the host exposes the transport at all.
    ///
    /// Callers use this to disable printing affordances up front instead
    /// of attempting `connect()` and classifying the failure.
    pub async fn is_supported(&self) -> bool {
        self.transport.is_supported().await
    }

    /// Whether a session is currently open.
    pub fn is_connected(&self) -> bool {
        matches!(self.session, Session::Connected { .. })
    }

    /// Discover a matching printer and open a session.
    ///
    /// Any existing session is torn down first. Errors with
    /// [`ReciboError::DeviceNotFound`] when nothing matches the filter and
    /// [`ReciboError::LinkFailure`] when the link or characteristic
    /// resolution fails. Never retries; each call is one fresh attempt.
    pub async fn connect(&mut self) -> Result<(), ReciboError> {
        self.disconnect().await;
        let channel = self.transport.connect(&self.options).await?;
        self.session = Session::Connected { channel };
        Ok(())
    }

    /// Close the session. Idempotent.
    ///
    /// Releases the channel, then the link, then the device reference
    /// (reverse of acquisition), and always lands in `Disconnected`, even
    /// after a print job failed mid-stream.
    pub async fn disconnect(&mut self) {
        if let Session::Connected { channel } = &mut self.session {
            channel.close().await;
        }
        self.session = Session::Disconnected;
    }

    /// Deliver one buffer, or fail with `NotConnected` before anything is
    /// written.
    async fn send(&mut self, data: &[u8]) -> Result<(), ReciboError> {
        match &mut self.session {
            Session::Connected { channel } => channel.write(data).await,
            Session::Disconnected => Err(ReciboError::NotConnected),
        }
    }

    /// Print one styled line.
    ///
    /// The line is encoded as a single buffer (controls, text, terminator,
    /// unconditional format resets) and delivered as exactly one write, so
    /// formatting never leaks across lines and controls always precede the
    /// text they modify.
    pub async fn print_line(&mut self, text: &str, style: LineStyle) -> Result<(), ReciboError> {
        self.send(&encode_line(text, &style)).await
    }

    /// Send one pre-composed command.
    pub async fn print_command(&mut self, command: &PrintCommand) -> Result<(), ReciboError> {
        self.send(&command.encode()).await
    }

    /// Print a full receipt in the fixed layout.
    ///
    /// Initialize, the layout lines, full cut — one write per command.
    /// The first failed write aborts the remaining sequence; the paper may
    /// then hold a truncated receipt, and the caller should treat the job
    /// as not completed cleanly and offer a manual reprint. The session
    /// stays open either way; cleanup is the caller's `disconnect()`.
    pub async fn print_receipt(&mut self, payload: &ReceiptPayload) -> Result<(), ReciboError> {
        for command in receipt::compose(payload) {
            self.send(&command.encode()).await?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{ControlSequence, ReceiptItem, SKELETON_LINES};
    use crate::transport::MockTransport;

    fn sample_payload() -> ReceiptPayload {
        ReceiptPayload {
            store_name: "Grocery Store".to_string(),
            store_phone: "555-0100".to_string(),
            order_id: 42,
            order_date: "2026-08-07 14:05".to_string(),
            customer_name: "Ada".to_string(),
            customer_phone: "555-0199".to_string(),
            items: vec![ReceiptItem {
                name: "Apple".to_string(),
                quantity: 3,
                unit_price: 1.99,
            }],
            total: 5.97,
        }
    }

    fn client(transport: MockTransport) -> PrinterClient<MockTransport> {
        PrinterClient::new(transport, ConnectOptions::default())
    }

    #[tokio::test]
    async fn test_print_receipt_disconnected_fails_without_writes() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        let result = client.print_receipt(&sample_payload()).await;
        assert!(matches!(result, Err(ReciboError::NotConnected)));
        assert_eq!(log.write_count(), 0);
    }

    #[tokio::test]
    async fn test_print_line_disconnected_fails() {
        let mut client = client(MockTransport::new());
        let result = client.print_line("hi", LineStyle::new()).await;
        assert!(matches!(result, Err(ReciboError::NotConnected)));
    }

    #[tokio::test]
    async fn test_full_receipt_write_count() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        client.connect().await.unwrap();
        client.print_receipt(&sample_payload()).await.unwrap();

        // init + skeleton + 2 lines for the single item + cut
        assert_eq!(log.write_count(), SKELETON_LINES + 2 + 2);
    }

    #[tokio::test]
    async fn test_receipt_stream_bracketed() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        client.connect().await.unwrap();
        client.print_receipt(&sample_payload()).await.unwrap();

        let frames = log.frames();
        assert_eq!(frames.first().unwrap(), &ControlSequence::Init.encode());
        assert_eq!(frames.last().unwrap(), &ControlSequence::CutFull.encode());
    }

    #[tokio::test]
    async fn test_mid_job_failure_aborts_and_stays_connected() {
        // Fail from the 5th write onward
        let transport = MockTransport::failing_from(5);
        let log = transport.log();
        let mut client = client(transport);

        client.connect().await.unwrap();
        let result = client.print_receipt(&sample_payload()).await;

        assert!(matches!(result, Err(ReciboError::WriteFailure(_))));
        // Only the writes before the failure went out
        assert_eq!(log.write_count(), 5);
        // No disconnect on failure; that's the caller's call
        assert!(client.is_connected());

        client.disconnect().await;
        assert!(!client.is_connected());
        assert_eq!(log.close_count(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        client.disconnect().await;
        assert_eq!(log.close_count(), 0);

        client.connect().await.unwrap();
        client.disconnect().await;
        client.disconnect().await;
        assert_eq!(log.close_count(), 1);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_reconnect_tears_down_previous_session() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        client.connect().await.unwrap();
        client.connect().await.unwrap();

        // The first session was closed before the second opened
        assert_eq!(log.close_count(), 1);
        assert!(client.is_connected());
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_disconnected() {
        let mut client = client(MockTransport::absent());
        assert!(matches!(
            client.connect().await,
            Err(ReciboError::DeviceNotFound)
        ));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_print_line_is_one_write() {
        let transport = MockTransport::new();
        let log = transport.log();
        let mut client = client(transport);

        client.connect().await.unwrap();
        client
            .print_line("TOTAL", LineStyle::new().bold())
            .await
            .unwrap();

        assert_eq!(log.write_count(), 1);
        assert_eq!(
            log.frames()[0],
            encode_line("TOTAL", &LineStyle::new().bold())
        );
    }

    #[tokio::test]
    async fn test_capability_probe() {
        assert!(client(MockTransport::new()).is_supported().await);
        assert!(!client(MockTransport::unsupported()).is_supported().await);
    }
}
