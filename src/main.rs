use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealer_desk::cli::{
    active_role, handle_audit_command, handle_dashboard_command, handle_expense_command,
    handle_import_command, handle_link_command, handle_report_command, handle_vehicle_command,
};
use dealer_desk::config::{paths::DealerPaths, settings::Settings};
use dealer_desk::storage::{init::initialize_storage, Storage};

/// Environment variable holding the log filter (e.g. `dealer_desk=debug`)
const LOG_ENV: &str = "DEALER_LOG";

#[derive(Parser)]
#[command(
    name = "dealer",
    version,
    about = "Inventory, deep links and sales reports for a car dealership",
    long_about = "dealer-desk manages a local copy of a dealership's inventory, \
                  builds shareable links to vehicle pages, and produces the \
                  sales reports of the admin dashboard from the command line."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode and decode vehicle links
    #[command(subcommand)]
    Link(dealer_desk::cli::LinkCommands),

    /// Inventory management commands
    #[command(subcommand, alias = "v")]
    Vehicle(dealer_desk::cli::VehicleCommands),

    /// Vehicle expense commands
    #[command(subcommand)]
    Expense(dealer_desk::cli::ExpenseCommands),

    /// Sales reports
    #[command(subcommand)]
    Report(dealer_desk::cli::ReportCommands),

    /// Admin dashboard
    #[command(subcommand)]
    Dashboard(dealer_desk::cli::DashboardCommands),

    /// Import a JSON dump of the hosted inventory
    Import {
        /// Path to the JSON file
        file: String,
        /// Replace the local inventory instead of merging
        #[arg(long)]
        replace: bool,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only this vehicle (id, short id, link or URL)
        #[arg(long)]
        vehicle: Option<String>,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = DealerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(
        data_dir = %paths.data_dir().display(),
        vehicles = storage.vehicles.count()?,
        "storage loaded"
    );

    match cli.command {
        Some(Commands::Link(cmd)) => handle_link_command(&settings, cmd)?,
        Some(Commands::Vehicle(cmd)) => handle_vehicle_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Dashboard(cmd)) => handle_dashboard_command(&storage, &settings, cmd)?,
        Some(Commands::Import { file, replace }) => {
            handle_import_command(&storage, &file, replace)?
        }
        Some(Commands::Audit { limit, vehicle }) => {
            handle_audit_command(&storage, limit, vehicle.as_deref())?
        }
        Some(Commands::Init) => {
            println!("Initializing dealer-desk at: {}", paths.base_dir().display());
            initialize_storage(&paths, &settings)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'dealer vehicle add' to list your first vehicle,");
            println!("or 'dealer import <file>' to load an inventory dump.");
        }
        Some(Commands::Config) => {
            println!("dealer-desk Configuration");
            println!("=========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency:        {}", settings.currency_symbol);
            println!("  Decimal sep.:    {}", settings.decimal_separator);
            println!("  CSV delimiter:   {}", settings.csv_delimiter);
            println!("  Leaderboard:     top {}", settings.leaderboard_size);
            println!("  Trend months:    {}", settings.trend_months);
            println!("  Site URL:        {}", settings.site_url);
            println!("  Active role:     {}", active_role(&storage, &settings)?);
        }
        None => {
            println!("dealer-desk - Back-office tools for a car dealership");
            println!();
            println!("Run 'dealer --help' for usage information.");
        }
    }

    Ok(())
}
