//! Dashboard rendering

use crate::dashboard::{DashboardView, VehicleField};
use crate::models::MoneyFormat;

use super::report::{
    format_groups, format_leaderboard, format_percent, format_stock, format_summary,
    format_trend, separator,
};

/// Render the whole dashboard
///
/// Editors get the sale count in place of the financial summary, a
/// leaderboard without revenue, no trend, and no cost or profit for the
/// selected vehicle.
pub fn format_dashboard(view: &DashboardView, style: &MoneyFormat) -> String {
    let show_revenue = view.access.can_view(VehicleField::Financials);
    let mut output = String::new();

    output.push_str(&format!("Dashboard ({}) - {}\n", view.access.role, view.filter));
    output.push_str(&separator(60));
    output.push_str("\n\n");

    match &view.summary {
        Some(summary) => output.push_str(&format_summary(&view.filter, summary, style)),
        None => output.push_str(&format!("Sales in {}: {}\n", view.filter, view.sale_count)),
    }
    output.push('\n');

    output.push_str(&format_stock(&view.stock, style));
    output.push('\n');

    output.push_str("Top salespeople\n");
    output.push_str(&format_leaderboard(&view.leaderboard, style, show_revenue));
    output.push('\n');

    output.push_str(&format!("Sales by {}\n", view.groups.field()));
    output.push_str(&format_groups(&view.groups));

    if let Some(trend) = &view.trend {
        output.push('\n');
        output.push_str("Revenue trend\n");
        output.push_str(&format_trend(trend, style));
    }

    if let Some(selected) = &view.selected {
        output.push('\n');
        output.push_str(&format!("Selected: {} ({})\n", selected.vehicle.title(), selected.vehicle.id));
        if let Some(f) = &selected.financials {
            output.push_str(&format!(
                "  Cost {}  Revenue {}  Profit {}  ROI {}\n",
                f.cost.format(style),
                f.revenue.format(style),
                f.profit.format(style),
                format_percent(f.roi, style.decimal_separator)
            ));
        }
    }

    output
}
