//! Vehicle display formatting
//!
//! Catalogue tables and the detail view. The detail view only prints what
//! the current role is allowed to see.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::dashboard::{FieldAccess, VehicleField};
use crate::models::{MoneyFormat, Vehicle};
use crate::reports::VehicleFinancials;
use crate::services::Page;

use super::report::format_percent;

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl VehicleRow {
    fn new(vehicle: &Vehicle, style: &MoneyFormat) -> Self {
        Self {
            id: vehicle.id.short().to_string(),
            vehicle: format!("{} {}", vehicle.make, vehicle.model),
            year: vehicle.year_label(),
            plate: vehicle.plate.clone().unwrap_or_default(),
            price: vehicle.price.format(style),
            status: vehicle.status.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of vehicles as a table
pub fn format_vehicle_list(vehicles: &[Vehicle], style: &MoneyFormat) -> String {
    if vehicles.is_empty() {
        return "No vehicles found.\n".to_string();
    }

    let rows: Vec<VehicleRow> = vehicles.iter().map(|v| VehicleRow::new(v, style)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format one catalogue page with its position
pub fn format_vehicle_page(page: &Page<Vehicle>, style: &MoneyFormat) -> String {
    let mut output = format_vehicle_list(&page.items, style);
    if page.total > 0 {
        output.push_str(&format!(
            "Page {} of {} ({} vehicles)\n",
            page.page, page.total_pages, page.total
        ));
    }
    output
}

/// Format a vehicle's expenses as a table
pub fn format_expense_list(vehicle: &Vehicle, style: &MoneyFormat) -> String {
    if vehicle.expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = vehicle
        .expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short().to_string(),
            date: e
                .date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            description: e.description.clone(),
            category: e.category.to_string(),
            amount: e.amount.format(style),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\nTotal: {}\n", table, vehicle.total_expenses().format(style))
}

/// Format vehicle details, honoring field visibility
pub fn format_vehicle_details(
    vehicle: &Vehicle,
    access: &FieldAccess,
    style: &MoneyFormat,
    share_url: Option<&str>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Vehicle:     {}\n", vehicle.title()));
    output.push_str(&format!("ID:          {}\n", vehicle.id));
    output.push_str(&format!("Status:      {}\n", vehicle.status));
    output.push_str(&format!("Price:       {}\n", vehicle.price.format(style)));

    if !vehicle.fipe_price.is_zero() {
        output.push_str(&format!("FIPE:        {}\n", vehicle.fipe_price.format(style)));
    }
    if let Some(plate) = &vehicle.plate {
        output.push_str(&format!("Plate:       {}\n", plate));
    }
    if let Some(category) = &vehicle.category {
        output.push_str(&format!("Category:    {}\n", category));
    }
    if let Some(mileage) = vehicle.mileage {
        output.push_str(&format!("Mileage:     {} km\n", mileage));
    }
    if !vehicle.description.is_empty() {
        output.push_str(&format!("Description: {}\n", vehicle.description));
    }

    if access.can_view(VehicleField::PurchasePrice) {
        output.push_str(&format!(
            "Purchase:    {}\n",
            vehicle.purchase_price.format(style)
        ));
    }

    if vehicle.is_sold() {
        if access.can_view(VehicleField::SoldPrice) {
            output.push_str(&format!("Sold for:    {}\n", vehicle.sold_price.format(style)));
        }
        if let Some(date) = vehicle.sold_date.filter(|_| access.can_view(VehicleField::SoldDate)) {
            output.push_str(&format!("Sold on:     {}\n", date.format("%d/%m/%Y")));
        }
        if let Some(name) = vehicle
            .salesperson
            .as_deref()
            .filter(|_| access.can_view(VehicleField::Salesperson))
        {
            output.push_str(&format!("Salesperson: {}\n", name));
        }
    }

    if let Some(url) = share_url {
        output.push_str(&format!("Link:        {}\n", url));
    }

    if access.can_view(VehicleField::Expenses) {
        output.push('\n');
        output.push_str(&format_expense_list(vehicle, style));
    }

    if access.can_view(VehicleField::Financials) {
        let f = VehicleFinancials::of(vehicle);
        output.push('\n');
        output.push_str(&format!("Total cost:  {}\n", f.cost.format(style)));
        if vehicle.is_sold() {
            output.push_str(&format!("Profit:      {}\n", f.profit.format(style)));
            output.push_str(&format!(
                "ROI:         {}\n",
                format_percent(f.roi, style.decimal_separator)
            ));
        }
    }

    output
}
