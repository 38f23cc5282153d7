//! # Recibo CLI
//!
//! Command-line interface for Bluetooth LE receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Check whether this host has a usable Bluetooth LE adapter
//! recibo probe
//!
//! # List nearby printers matching the discovery filter
//! recibo scan
//!
//! # Print a receipt from an order payload
//! recibo print order.json
//!
//! # Print the built-in demo receipt
//! recibo print
//!
//! # Inspect the frames a job would send, without hardware
//! recibo print --dry-run
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use recibo::{
    ReciboError,
    printer::PrinterClient,
    receipt::{ReceiptItem, ReceiptPayload},
    transport::{self, BleTransport, ConnectOptions, MockTransport, Transport},
};

/// Recibo - Bluetooth LE receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Discovery and timeout flags shared by scan and print.
#[derive(Args, Debug)]
struct DiscoveryArgs {
    /// Device name prefix to accept during discovery
    #[arg(long, default_value = transport::DEFAULT_NAME_PREFIX)]
    name_prefix: String,

    /// Print service UUID to scan for
    #[arg(long, default_value_t = transport::PRINT_SERVICE)]
    service: uuid::Uuid,

    /// Writable characteristic UUID under the service
    #[arg(long, default_value_t = transport::PRINT_CHARACTERISTIC)]
    characteristic: uuid::Uuid,

    /// Seconds to wait for discovery + connection
    #[arg(long, default_value_t = 15)]
    connect_timeout: u64,

    /// Seconds to wait for each write
    #[arg(long, default_value_t = 5)]
    write_timeout: u64,
}

impl DiscoveryArgs {
    fn to_options(&self) -> ConnectOptions {
        ConnectOptions {
            device_name_prefix: Some(self.name_prefix.clone()),
            service: self.service,
            characteristic: self.characteristic,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            write_timeout: Duration::from_secs(self.write_timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether this host exposes Bluetooth LE at all
    Probe,

    /// Scan for nearby printers matching the discovery filter
    Scan {
        /// Seconds to scan before listing results
        #[arg(long, default_value_t = 10)]
        seconds: u64,

        #[command(flatten)]
        discovery: DiscoveryArgs,
    },

    /// Print a receipt
    Print {
        /// JSON order payload (omit to print a demo receipt)
        file: Option<PathBuf>,

        /// Encode the job and hex-dump its frames instead of printing
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        discovery: DiscoveryArgs,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ReciboError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Probe => probe().await,
        Commands::Scan { seconds, discovery } => {
            scan(&discovery.to_options(), Duration::from_secs(seconds)).await
        }
        Commands::Print {
            file,
            dry_run,
            discovery,
        } => {
            let payload = match file {
                Some(path) => load_payload(&path)?,
                None => demo_payload(),
            };
            payload.validate()?;

            if dry_run {
                print_dry_run(&payload, &discovery.to_options()).await
            } else {
                print_receipt(&payload, &discovery.to_options()).await
            }
        }
    }
}

async fn probe() -> Result<(), ReciboError> {
    if BleTransport::new().is_supported().await {
        println!("Bluetooth LE adapter: available");
    } else {
        println!("Bluetooth LE adapter: not available");
        println!("Printing is disabled on this host.");
    }
    Ok(())
}

async fn scan(options: &ConnectOptions, duration: Duration) -> Result<(), ReciboError> {
    let transport = BleTransport::new();
    if !transport.is_supported().await {
        return Err(ReciboError::NotSupported);
    }

    println!("Scanning for {}s...", duration.as_secs());
    let printers = transport::ble::scan(options, duration).await?;

    if printers.is_empty() {
        println!("No matching printers found.");
        return Ok(());
    }

    println!("Found {} printer(s):", printers.len());
    for printer in printers {
        println!(
            "  {}  {}",
            printer.address,
            printer.name.as_deref().unwrap_or("(no name)")
        );
    }
    Ok(())
}

async fn print_receipt(payload: &ReceiptPayload, options: &ConnectOptions) -> Result<(), ReciboError> {
    let transport = BleTransport::new();
    // Probe first; a missing adapter is not a connect() failure
    if !transport.is_supported().await {
        return Err(ReciboError::NotSupported);
    }

    let mut client = PrinterClient::new(transport, options.clone());

    println!("Connecting...");
    client.connect().await?;

    println!("Printing receipt for order #{}...", payload.order_id);
    let result = client.print_receipt(payload).await;

    // Always release the session, even after a mid-job failure
    client.disconnect().await;
    result?;

    println!("Printed successfully!");
    Ok(())
}

/// Run the job against the capturing transport and hex-dump each frame.
async fn print_dry_run(payload: &ReceiptPayload, options: &ConnectOptions) -> Result<(), ReciboError> {
    let transport = MockTransport::new();
    let log = transport.log();

    let mut client = PrinterClient::new(transport, options.clone());
    client.connect().await?;
    let result = client.print_receipt(payload).await;
    client.disconnect().await;
    result?;

    for (i, frame) in log.frames().iter().enumerate() {
        println!("{:3}  {}", i, hex_dump(frame));
    }
    println!("{} frames, {} bytes total", log.write_count(), log.stream().len());
    Ok(())
}

fn hex_dump(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_payload(path: &PathBuf) -> Result<ReceiptPayload, ReciboError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| ReciboError::InvalidPayload(format!("{}: {}", path.display(), e)))
}

fn demo_payload() -> ReceiptPayload {
    ReceiptPayload {
        store_name: "Grocery Store".to_string(),
        store_phone: "555-0100".to_string(),
        order_id: 42,
        order_date: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        customer_name: "Demo Customer".to_string(),
        customer_phone: "555-0199".to_string(),
        items: vec![
            ReceiptItem {
                name: "Apple".to_string(),
                quantity: 3,
                unit_price: 1.99,
            },
            ReceiptItem {
                name: "Bread".to_string(),
                quantity: 1,
                unit_price: 2.49,
            },
        ],
        total: 8.46,
    }
}
