use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dorm_billing::cli::{
    handle_audit_command, handle_export_command, handle_readings_command, handle_tenant_command,
    AuditArgs, ExportArgs, ReadingArgs, TenantCommands,
};
use dorm_billing::config::{paths::DATA_DIR_ENV, BillingPaths, Settings};
use dorm_billing::BillingError;

#[derive(Parser)]
#[command(
    name = "dormbill",
    author = "Kaylee Beyene",
    version,
    about = "Water and electricity billing for dormitories",
    long_about = "dormbill computes per-room and per-tenant utility charges from \
                  meter readings, filters them by month and room or tenant, and \
                  exports spreadsheet-ready CSV reports."
)]
struct Cli {
    /// Base directory for settings, data snapshots and reports
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Show billed readings
    #[command(alias = "ls")]
    Readings(ReadingArgs),

    /// Export billed readings to a CSV report
    Export(ExportArgs),

    /// Tenant management commands
    #[command(subcommand)]
    Tenant(TenantCommands),

    /// Show recent tenant changes and exports
    Audit(AuditArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<BillingError>() {
                Some(notice) if notice.is_validation_notice() => eprintln!("{}", notice),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dorm_billing=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => BillingPaths::with_base_dir(dir),
        None => BillingPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing dorm-billing at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Default rates: water {}/unit, electric {}/unit",
                settings.default_rates.water.format_with_symbol(&settings.currency_symbol),
                settings.default_rates.electric.format_with_symbol(&settings.currency_symbol)
            );
            println!("Put the readings snapshot at: {}", paths.readings_file().display());
        }
        Some(Commands::Config) => {
            println!("dorm-billing Configuration");
            println!("==========================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Readings snapshot: {}", paths.readings_file().display());
            println!("Tenants file:      {}", paths.tenants_file().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Water rate:    {}",
                settings.default_rates.water.format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "  Electric rate: {}",
                settings.default_rates.electric.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Date format:   {:?}", settings.date_locale);
            println!("  Initialized:   {}", paths.is_initialized());
        }
        Some(Commands::Readings(args)) => {
            handle_readings_command(&paths, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&paths, &settings, args)?;
        }
        Some(Commands::Tenant(cmd)) => {
            handle_tenant_command(&paths, cmd)?;
        }
        Some(Commands::Audit(args)) => {
            handle_audit_command(&paths, args)?;
        }
        None => {
            println!("dormbill - dormitory utility billing");
            println!();
            println!("Run 'dormbill --help' for usage information.");
            println!("Run 'dormbill readings' to see this month's bills.");
        }
    }

    Ok(())
}
