//! Export module for dealer-desk
//!
//! Renders filtered sales into the downloadable spreadsheet format.

pub mod csv;

pub use self::csv::{export_sales_csv, write_sales_csv, SalesCsvFormat, SALES_HEADER, UTF8_BOM};
