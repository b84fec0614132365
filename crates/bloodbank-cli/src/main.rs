//! Blood bank CLI - manage donors, blood units and donation drives from the terminal.
//!
//! Talks to the blood bank record store over HTTP and prints plain-text
//! views of the dashboard, inventory, donors, drives and admins.

mod app;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bloodbank_core::models::{Antigen, BloodGroup, ProductType, Role};

use app::App;

// ============================================================================
// Constants
// ============================================================================

/// Directory for a daily-rolling log file, in addition to stderr
const ENV_LOG_DIR: &str = "BLOODBANK_LOG_DIR";

const LOG_FILE_PREFIX: &str = "bloodbank.log";

#[derive(Parser)]
#[command(name = "bloodbank")]
#[command(about = "Blood bank inventory, donors and donation drives")]
#[command(version)]
struct Cli {
    /// Record store base URL (overrides config)
    #[arg(long, env = "BLOODBANK_API_BASE_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as an admin
    Login {
        /// Admin name (defaults to the last one used)
        #[arg(long, env = "BLOODBANK_USERNAME")]
        name: Option<String>,

        /// Remember the password in the OS keychain
        #[arg(long)]
        remember: bool,
    },

    /// Forget the current session
    Logout {
        /// Also remove the remembered password from the OS keychain
        #[arg(long)]
        forget: bool,
    },

    /// Show the logged-in admin
    Whoami,

    /// Create an admin account for yourself
    Register {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "Admin")]
        role: Role,

        #[arg(long)]
        campus: String,

        #[arg(long)]
        department: String,
    },

    /// Stats, stock per blood group, alerts, recent donors and upcoming drives
    Dashboard {
        /// Print stats and stock levels as JSON
        #[arg(long)]
        json: bool,
    },

    /// List blood units with their freshness
    Inventory {
        /// Only show this blood group (e.g. "O+")
        #[arg(long)]
        group: Option<BloodGroup>,
    },

    /// List donors
    Donors {
        /// Match name or department (case-insensitive) or contact number
        #[arg(long, short)]
        search: Option<String>,

        #[arg(long)]
        group: Option<BloodGroup>,
    },

    /// List upcoming and past donation drives
    Drives,

    /// List admin accounts (Admin and Super Admin only)
    Admins,

    /// Record a donated blood unit
    AddUnit {
        /// Donor to attribute the unit to; fills group, antigen and product type
        #[arg(long)]
        donor: Option<i64>,

        #[arg(long)]
        group: Option<BloodGroup>,

        #[arg(long)]
        antigen: Option<Antigen>,

        /// Whole Blood, Plasma, Platelets, Red Blood Cells or any other label
        #[arg(long)]
        product: Option<ProductType>,

        /// Volume in liters
        #[arg(long)]
        amount: f64,

        /// Donation date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        donated: Option<NaiveDate>,

        /// Expiry date override, YYYY-MM-DD
        #[arg(long)]
        expiry: Option<NaiveDate>,
    },

    /// Register a donor
    AddDonor {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        department: String,

        #[arg(long)]
        branch: String,

        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: NaiveDate,

        #[arg(long)]
        group: BloodGroup,

        #[arg(long, default_value = "Positive")]
        antigen: Antigen,

        #[arg(long, default_value = "Whole Blood")]
        product: ProductType,

        #[arg(long)]
        contact: String,

        /// Volume donated in liters
        #[arg(long)]
        amount: f64,
    },

    /// Schedule a donation drive
    AddDrive {
        /// Drive date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        campus: String,

        #[arg(long)]
        venue: String,

        /// Expected or collected volume in liters
        #[arg(long)]
        total: Option<f64>,
    },

    /// Create another admin account (Admin and Super Admin only)
    AddAdmin {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "Admin")]
        role: Role,

        #[arg(long)]
        campus: String,

        #[arg(long)]
        department: String,
    },
}

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes the log file on drop and must outlive `main`'s work.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();
    info!("bloodbank starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut app = App::new(cli.api_url)?;
    app.execute(cli.command).await
}
