//! Report CLI commands
//!
//! Sales reports for a period. Without `--month`/`--year` the period saved
//! on the dashboard is used.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::dashboard::{DashboardState, FieldAccess, VehicleField};
use crate::display::report::{
    format_groups, format_leaderboard, format_stock, format_summary, format_trend,
};
use crate::error::{DealerError, DealerResult};
use crate::export::{write_sales_csv, SalesCsvFormat};
use crate::reports::{
    GroupCounts, GroupField, Leaderboard, MonthFilter, SalesFilter, SalesSummary, SalesTrend,
    StockSummary, YearFilter, MAX_TREND_MONTHS,
};
use crate::storage::Storage;

use super::active_role;

/// Period selection shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Month 1-12, or "all"
    #[arg(short, long)]
    pub month: Option<String>,
    /// Year, or "all"
    #[arg(short, long)]
    pub year: Option<String>,
}

impl PeriodArgs {
    /// Apply the flags on top of a base filter
    pub fn resolve(&self, base: SalesFilter) -> DealerResult<SalesFilter> {
        let month = match self.month.as_deref() {
            Some(m) => MonthFilter::parse(m).map_err(|e| DealerError::Validation(e.to_string()))?,
            None => base.month,
        };
        let year = match self.year.as_deref() {
            Some(y) => YearFilter::parse(y).map_err(|e| DealerError::Validation(e.to_string()))?,
            None => base.year,
        };
        Ok(SalesFilter::new(month, year))
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Revenue, cost, profit and ROI for a period
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Stock counts and capital tied up
    Stock,
    /// Salespeople ranked by revenue
    Leaderboard {
        #[command(flatten)]
        period: PeriodArgs,
        /// Number of salespeople to show
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Sales counted by make, model or category
    Group {
        #[command(flatten)]
        period: PeriodArgs,
        /// Field to group by
        #[arg(short, long, value_enum, default_value = "make")]
        by: GroupField,
    },
    /// Monthly revenue with month-over-month change
    Trend {
        /// Number of months ending with the current one (1-120)
        #[arg(
            short = 'n',
            long,
            value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_MONTHS as i64)
        )]
        months: Option<u32>,
    },
    /// Export the sales of a period to CSV
    Export {
        #[command(flatten)]
        period: PeriodArgs,
        /// Output file ("-" for stdout; default under the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> DealerResult<()> {
    let style = settings.money_format();
    let access = FieldAccess::for_role(active_role(storage, settings)?);
    let saved = DashboardState::load(storage.paths(), settings)?.filter;
    let vehicles = storage.vehicles.get_all()?;

    match cmd {
        ReportCommands::Summary { period } => {
            access.require_view(VehicleField::Financials)?;
            let filter = period.resolve(saved)?;
            let summary = SalesSummary::from_sales(filter.apply(&vehicles));
            print!("{}", format_summary(&filter, &summary, &style));
        }

        ReportCommands::Stock => {
            print!("{}", format_stock(&StockSummary::build(&vehicles), &style));
        }

        ReportCommands::Leaderboard { period, top } => {
            let filter = period.resolve(saved)?;
            let top = top.unwrap_or(settings.leaderboard_size).max(1);
            let board = Leaderboard::build(filter.apply(&vehicles), Some(top));
            let show_revenue = access.can_view(VehicleField::Financials);
            println!("Top salespeople: {}", filter);
            print!("{}", format_leaderboard(&board, &style, show_revenue));
        }

        ReportCommands::Group { period, by } => {
            let filter = period.resolve(saved)?;
            let groups = GroupCounts::by(by, filter.apply(&vehicles));
            println!("Sales by {}: {}", by, filter);
            print!("{}", format_groups(&groups));
        }

        ReportCommands::Trend { months } => {
            access.require_view(VehicleField::Financials)?;
            let months = months.unwrap_or(settings.trend_months);
            let today = chrono::Local::now().date_naive();
            let trend = SalesTrend::build(&vehicles, today, months);
            print!("{}", format_trend(&trend, &style));
        }

        ReportCommands::Export { period, output } => {
            access.require_view(VehicleField::Financials)?;
            let filter = period.resolve(saved)?;
            let sales = filter.apply(&vehicles);
            let format = SalesCsvFormat::from_settings(settings);

            match output {
                Some(path) if path.as_os_str() == "-" => {
                    let stdout = std::io::stdout();
                    write_sales_csv(&sales, &format, stdout.lock())?;
                }
                other => {
                    let path = other
                        .unwrap_or_else(|| storage.paths().exports_dir().join(filter.report_filename()));
                    let file = File::create(&path).map_err(|e| {
                        DealerError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_sales_csv(&sales, &format, &mut writer)?;
                    writer
                        .flush()
                        .map_err(|e| DealerError::Export(e.to_string()))?;
                    println!("Exported {} sales to: {}", sales.len(), path.display());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_overrides_saved_filter() {
        let saved = SalesFilter::month_of(2025, 3);

        let unchanged = PeriodArgs::default().resolve(saved).unwrap();
        assert_eq!(unchanged, saved);

        let args = PeriodArgs {
            month: Some("all".into()),
            year: None,
        };
        let whole_year = args.resolve(saved).unwrap();
        assert_eq!(whole_year, SalesFilter::new(MonthFilter::All, YearFilter::Year(2025)));

        let bad = PeriodArgs {
            month: Some("13".into()),
            year: None,
        };
        assert!(bad.resolve(saved).unwrap_err().is_validation());
    }
}
