//! CSV export of sales reports
//!
//! Produces the spreadsheet file the dealership downloads from the reports
//! page: UTF-8 with a byte-order mark so spreadsheet tools pick up accented
//! characters, `;` separated, money with a comma decimal separator.

use std::io::Write;

use ::csv::{Terminator, WriterBuilder};

use crate::config::settings::Settings;
use crate::error::{DealerError, DealerResult};
use crate::models::{Money, Vehicle};
use crate::reports::{VehicleFinancials, UNSPECIFIED};

/// UTF-8 byte-order mark
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Column headers of the sales report
pub const SALES_HEADER: [&str; 10] = [
    "Data",
    "Modelo",
    "Placa",
    "Vendedor",
    "Preço Compra",
    "Total Despesas",
    "Custo Total",
    "Preço Venda",
    "Lucro",
    "ROI %",
];

/// Locale options for the sales CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesCsvFormat {
    pub delimiter: u8,
    pub decimal_separator: char,
}

impl Default for SalesCsvFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_separator: ',',
        }
    }
}

impl SalesCsvFormat {
    /// Take the delimiter and decimal separator from user settings
    ///
    /// Non-ASCII delimiters fall back to `;`.
    pub fn from_settings(settings: &Settings) -> Self {
        let delimiter = if settings.csv_delimiter.is_ascii() {
            settings.csv_delimiter as u8
        } else {
            b';'
        };
        Self {
            delimiter,
            decimal_separator: settings.decimal_separator,
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_plain(self.decimal_separator)
    }

    fn percent(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        format!("{:.2}", value).replace('.', &self.decimal_separator.to_string())
    }
}

/// One report row for a sold vehicle
fn sales_row(vehicle: &Vehicle, format: &SalesCsvFormat) -> [String; 10] {
    let f = VehicleFinancials::of(vehicle);
    let date = vehicle
        .sold_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let salesperson = vehicle
        .salesperson
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNSPECIFIED);

    [
        date,
        format!("{} {}", vehicle.make, vehicle.model),
        vehicle.plate.clone().unwrap_or_default(),
        salesperson.to_string(),
        format.money(f.purchase),
        format.money(f.expenses),
        format.money(f.cost),
        format.money(vehicle.sold_price),
        format.money(f.profit),
        format.percent(f.roi),
    ]
}

/// Write the sales report, BOM first, to any writer
pub fn write_sales_csv<W: Write>(
    sales: &[&Vehicle],
    format: &SalesCsvFormat,
    mut writer: W,
) -> DealerResult<()> {
    writer
        .write_all(UTF8_BOM.as_bytes())
        .map_err(|e| DealerError::Export(e.to_string()))?;

    let mut csv = WriterBuilder::new()
        .delimiter(format.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(SALES_HEADER)?;
    for vehicle in sales {
        csv.write_record(sales_row(vehicle, format))?;
    }
    csv.flush().map_err(|e| DealerError::Export(e.to_string()))?;

    Ok(())
}

/// Render the sales report as text, in the order given
pub fn export_sales_csv(sales: &[&Vehicle], format: &SalesCsvFormat) -> DealerResult<String> {
    let mut buffer = Vec::new();
    write_sales_csv(sales, format, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| DealerError::Export(e.to_string()))
}
