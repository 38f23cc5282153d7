//! # Receipt Layout Tests
//!
//! End-to-end checks that a known order payload produces the exact frame
//! sequence the printer expects: initialize first, the fixed line layout
//! in order, full cut last. Frames are captured through the mock
//! transport, so these tests cover composition, encoding, and client
//! sequencing together without hardware.

use pretty_assertions::assert_eq;

use recibo::printer::PrinterClient;
use recibo::protocol::line::{Alignment, LineStyle, encode_line};
use recibo::receipt::{ReceiptItem, ReceiptPayload, SKELETON_LINES};
use recibo::transport::{ConnectOptions, MockTransport};

/// The payload used throughout: one order with a single line item.
fn grocery_order() -> ReceiptPayload {
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

/// Print through a mock transport and return the captured frames.
async fn captured_frames(payload: &ReceiptPayload) -> Vec<Vec<u8>> {
    let transport = MockTransport::new();
    let log = transport.log();
    let mut client = PrinterClient::new(transport, ConnectOptions::default());

    client.connect().await.unwrap();
    client.print_receipt(payload).await.unwrap();
    client.disconnect().await;

    log.frames()
}

fn line(text: &str) -> Vec<u8> {
    encode_line(text, &LineStyle::new())
}

fn bold(text: &str) -> Vec<u8> {
    encode_line(text, &LineStyle::new().bold())
}

fn bold_center(text: &str) -> Vec<u8> {
    encode_line(text, &LineStyle::new().bold().center())
}

fn center(text: &str) -> Vec<u8> {
    encode_line(text, &LineStyle::new().center())
}

#[tokio::test]
async fn full_receipt_frame_sequence() {
    let frames = captured_frames(&grocery_order()).await;

    let expected: Vec<Vec<u8>> = vec![
        vec![0x1B, 0x40], // initialize
        bold_center("Grocery Store"),
        center("Phone: 555-0100"),
        line(""),
        bold_center("ORDER RECEIPT"),
        line(""),
        line("Order ID: #42"),
        line("Date: 2026-08-07 14:05"),
        line(""),
        bold("CUSTOMER"),
        line("Name: Ada"),
        line("Phone: 555-0199"),
        line(""),
        bold("ITEMS"),
        line("3 x Apple"),
        line("     3 @ $1.99 = $5.97"),
        line(""),
        bold("TOTAL"),
        encode_line("$5.97", &LineStyle::new().bold().right()),
        line(""),
        center("Thank you for your order!"),
        center("Please come again!"),
        vec![0x1D, 0x56, 0x00], // full cut
    ];

    assert_eq!(frames, expected);
}

#[tokio::test]
async fn job_is_bracketed_by_init_and_cut() {
    let frames = captured_frames(&grocery_order()).await;

    assert_eq!(frames.first().unwrap(), &vec![0x1B, 0x40]);
    assert_eq!(frames.last().unwrap(), &vec![0x1D, 0x56, 0x00]);
    // Neither command appears anywhere else in the job
    assert!(!frames[1..frames.len() - 1]
        .iter()
        .any(|f| f == &vec![0x1B, 0x40] || f == &vec![0x1D, 0x56, 0x00]));
}

#[tokio::test]
async fn item_lines_present_and_in_order() {
    let frames = captured_frames(&grocery_order()).await;

    let name_pos = frames
        .iter()
        .position(|f| f == &line("3 x Apple"))
        .expect("item name line present");
    let price_pos = frames
        .iter()
        .position(|f| f == &line("     3 @ $1.99 = $5.97"))
        .expect("item price line present");
    assert_eq!(price_pos, name_pos + 1);
}

#[tokio::test]
async fn frame_count_scales_with_items() {
    for n in [0usize, 1, 2, 5] {
        let mut payload = grocery_order();
        payload.items = (0..n)
            .map(|i| ReceiptItem {
                name: format!("Item {}", i),
                quantity: 1,
                unit_price: 0.99,
            })
            .collect();

        let frames = captured_frames(&payload).await;
        // init + skeleton + two lines per item + cut
        assert_eq!(frames.len(), SKELETON_LINES + 2 * n + 2);
    }
}

#[tokio::test]
async fn fractional_prices_round_to_two_decimals() {
    let mut payload = grocery_order();
    payload.items = vec![ReceiptItem {
        name: "Cheese".to_string(),
        quantity: 2,
        unit_price: 1.995,
    }];
    payload.total = 3.99;

    let frames = captured_frames(&payload).await;
    // 2 x 1.995 renders as 3.99, never 3.990 or 4
    let price_line = frames
        .iter()
        .find(|f| f.windows(7).any(|w| w == b"= $3.99"))
        .expect("rounded line total present");
    assert_eq!(price_line, &line("     2 @ $1.99 = $3.99"));
}

#[tokio::test]
async fn bold_never_leaks_into_following_frame() {
    let frames = captured_frames(&grocery_order()).await;

    for frame in &frames[1..frames.len() - 1] {
        // Every line frame ends with the format resets, bold off then
        // align left, regardless of its own styling
        let tail = &frame[frame.len() - 6..];
        assert_eq!(tail, &[0x1B, 0x45, 0x00, 0x1B, 0x61, 0x00]);
    }
}

#[tokio::test]
async fn styled_lines_carry_their_controls_up_front() {
    let frames = captured_frames(&grocery_order()).await;

    // Store name: bold then centered, before the text
    let header = &frames[1];
    assert_eq!(&header[0..6], &[0x1B, 0x45, 0x01, 0x1B, 0x61, 0x01]);

    // Total amount: bold then right-aligned. It follows the bold "TOTAL"
    // label, distinguishing it from the item price line earlier on.
    let label_pos = frames.iter().position(|f| f == &bold("TOTAL")).unwrap();
    let total = &frames[label_pos + 1];
    assert_eq!(&total[0..6], &[0x1B, 0x45, 0x01, 0x1B, 0x61, 0x02]);
    // Right alignment value sanity
    assert_eq!(Alignment::Right as u8, 0x02);
}
