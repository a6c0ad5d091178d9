//! Reading CLI commands
//!
//! Shows billed readings for a period, with optional rate overrides.

use std::path::PathBuf;

use clap::Args;

use crate::config::{BillingPaths, Settings};
use crate::display::{format_reading_table, format_summary};
use crate::error::BillingResult;
use crate::models::{BillingPeriod, MeterType, Money};
use crate::services::Dashboard;
use crate::sources::JsonFileSource;

/// Filter and rate options shared by `readings` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct ReadingArgs {
    /// Billing period (YYYY-MM); defaults to the current month
    #[arg(short, long, conflicts_with = "all")]
    pub period: Option<BillingPeriod>,

    /// Show every period
    #[arg(short, long)]
    pub all: bool,

    /// Match room number or tenant names (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Water rate per unit for this run (e.g. 18.50)
    #[arg(long, value_parser = parse_rate)]
    pub water: Option<Money>,

    /// Electric rate per unit for this run
    #[arg(long, value_parser = parse_rate)]
    pub electric: Option<Money>,

    /// Readings snapshot to use instead of the data directory's (JSON or CSV)
    #[arg(long)]
    pub readings: Option<PathBuf>,
}

impl ReadingArgs {
    /// The period to show, or `None` for every period
    pub fn period(&self) -> Option<BillingPeriod> {
        if self.all {
            None
        } else {
            Some(self.period.unwrap_or_else(BillingPeriod::current_month))
        }
    }

    /// Fetch readings and set up a session with these options applied
    pub fn load_dashboard(&self, paths: &BillingPaths, settings: &Settings) -> BillingResult<Dashboard> {
        let mut source = JsonFileSource::from_paths(paths);
        if let Some(path) = &self.readings {
            source = source.with_readings_path(path.clone());
        }

        let mut dashboard = Dashboard::default();
        dashboard.set_rates(settings.default_rates);
        if let Some(rate) = self.water {
            dashboard.set_rate(MeterType::Water, rate)?;
        }
        if let Some(rate) = self.electric {
            dashboard.set_rate(MeterType::Electric, rate)?;
        }

        dashboard.set_period(self.period());
        dashboard.set_search(self.search.clone().unwrap_or_default());
        dashboard.refresh(&source)?;

        Ok(dashboard)
    }
}

fn parse_rate(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Handle the `readings` command
pub fn handle_readings_command(
    paths: &BillingPaths,
    settings: &Settings,
    args: ReadingArgs,
) -> BillingResult<()> {
    let dashboard = args.load_dashboard(paths, settings)?;
    let rows = dashboard.visible_rows();

    println!("Readings for {}", dashboard.criteria().period_label());
    println!(
        "Rates: water {}/unit, electric {}/unit",
        dashboard.rates().water.format_with_symbol(&settings.currency_symbol),
        dashboard.rates().electric.format_with_symbol(&settings.currency_symbol)
    );
    println!();
    println!("{}", format_reading_table(&rows, settings));

    if !rows.is_empty() {
        println!();
        print!("{}", format_summary(&dashboard.summary(), &rows, settings));
    }

    Ok(())
}
