//! Report formatting for terminal output

use crate::models::{Money, MoneyFormat};
use crate::reports::{GroupCounts, Leaderboard, SalesFilter, SalesSummary, SalesTrend, StockSummary};

const BAR_WIDTH: usize = 30;

/// Percentage with one decimal and the locale separator, e.g. `11,1%`
pub fn format_percent(value: f64, decimal_separator: char) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.1}%", value).replace('.', &decimal_separator.to_string())
}

/// Signed percentage for trends, e.g. `+50,0%`
pub fn format_change(value: f64, decimal_separator: char) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_percent(value, decimal_separator))
}

/// Horizontal bar scaled against `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

fn money(amount: Money, style: &MoneyFormat) -> String {
    amount.format(style)
}

/// Sales KPIs for a period
pub fn format_summary(filter: &SalesFilter, summary: &SalesSummary, style: &MoneyFormat) -> String {
    let sep = style.decimal_separator;
    let mut output = String::new();

    output.push_str(&format!("Sales summary: {}\n", filter));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("  Sales:           {}\n", summary.sale_count));
    output.push_str(&format!("  Revenue:         {}\n", money(summary.total_revenue, style)));
    output.push_str(&format!("  Purchase cost:   {}\n", money(summary.total_purchase, style)));
    output.push_str(&format!("  Expenses:        {}\n", money(summary.total_expenses, style)));
    output.push_str(&format!("  Total cost:      {}\n", money(summary.total_cost, style)));
    output.push_str(&format!("  Net profit:      {}\n", money(summary.net_profit, style)));
    output.push_str(&format!("  ROI:             {}\n", format_percent(summary.roi, sep)));
    output.push_str(&format!("  Average ticket:  {}\n", money(summary.average_ticket, style)));

    output
}

pub fn format_stock(stock: &StockSummary, style: &MoneyFormat) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Stock: {} available, {} sold, {} in maintenance, {} unavailable\n",
        stock.available, stock.sold, stock.maintenance, stock.unavailable
    ));
    output.push_str(&format!("  Stock value:      {}\n", money(stock.stock_value, style)));
    output.push_str(&format!("  Capital tied up:  {}\n", money(stock.capital_tied_up, style)));
    output
}

/// Ranked salespeople; `show_revenue` adds the revenue column
pub fn format_leaderboard(board: &Leaderboard, style: &MoneyFormat, show_revenue: bool) -> String {
    if board.is_empty() {
        return "No sales in this period.\n".to_string();
    }

    let name_width = board
        .entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .max("Salesperson".len());

    let mut output = String::new();
    let mut header = format!(
        "{:>3}  {:<name_width$}  {:>5}",
        "#",
        "Salesperson",
        "Sales",
        name_width = name_width
    );
    let mut width = name_width + 14;
    if show_revenue {
        header.push_str(&format!("  {:>16}", "Revenue"));
        width += 18;
    }
    output.push_str(&header);
    output.push('\n');
    output.push_str(&separator(width));
    output.push('\n');

    for (rank, entry) in board.entries.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>5}",
            rank + 1,
            entry.name,
            entry.sales,
            name_width = name_width
        ));
        if show_revenue {
            output.push_str(&format!("  {:>16}", money(entry.revenue, style)));
        }
        output.push('\n');
    }

    output
}

pub fn format_groups(groups: &GroupCounts) -> String {
    if groups.is_empty() {
        return "No sales in this period.\n".to_string();
    }

    let mut output = String::new();
    if let Some(top) = groups.most_frequent() {
        output.push_str(&format!(
            "Most sold {}: {} ({})\n",
            groups.field(),
            top.value,
            top.count
        ));
    }

    let max = groups.entries().iter().map(|e| e.count).max().unwrap_or(0) as f64;
    let width = groups
        .entries()
        .iter()
        .map(|e| e.value.chars().count())
        .max()
        .unwrap_or(0);

    for entry in groups.ranked() {
        output.push_str(&format!(
            "  {:<width$}  {:>4}  {}\n",
            entry.value,
            entry.count,
            format_bar(entry.count as f64, max, BAR_WIDTH / 2),
            width = width
        ));
    }

    output
}

/// Monthly revenue with bars and the month-over-month change
pub fn format_trend(trend: &SalesTrend, style: &MoneyFormat) -> String {
    let max = trend.max_revenue().as_f64();
    let mut output = String::new();

    for bucket in &trend.buckets {
        output.push_str(&format!(
            "  {:<8}  {}  {:>16}  ({})\n",
            bucket.label(),
            format_bar(bucket.revenue.as_f64(), max, BAR_WIDTH),
            money(bucket.revenue, style),
            bucket.sales
        ));
    }

    match (trend.last_completed(), trend.previous_completed()) {
        (Some(last), Some(prev)) => output.push_str(&format!(
            "Month over month ({} vs {}): {}\n",
            last.label(),
            prev.label(),
            format_change(trend.month_over_month(), style.decimal_separator)
        )),
        _ => output.push_str("Month over month: not enough history\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Vehicle, VehicleStatus};
    use crate::reports::GroupField;
    use chrono::NaiveDate;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(11.111, ','), "11,1%");
        assert_eq!(format_percent(f64::NAN, ','), "0,0%");
        assert_eq!(format_change(50.0, ','), "+50,0%");
        assert_eq!(format_change(-57.14, '.'), "-57.1%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(0.0, 10.0, 3), "   ");
        assert_eq!(format_bar(20.0, 10.0, 2), "██");
    }

    #[test]
    fn test_summary_uses_locale_money() {
        let mut v = Vehicle::new("Fiat", "Uno", 2015, Money::zero());
        v.status = VehicleStatus::Sold;
        v.purchase_price = Money::from_units(10000);
        v.sold_price = Money::from_units(12340);
        v.sold_date = NaiveDate::from_ymd_opt(2025, 1, 5);

        let summary = SalesSummary::from_sales([&v]);
        let text = format_summary(&SalesFilter::month_of(2025, 1), &summary, &MoneyFormat::default());
        assert!(text.contains("Sales summary: 01/2025"));
        assert!(text.contains("R$ 12.340,00"));
        assert!(text.contains("ROI:             23,4%"));
    }

    #[test]
    fn test_leaderboard_revenue_column() {
        let mut v = Vehicle::new("Fiat", "Uno", 2015, Money::zero());
        v.status = VehicleStatus::Sold;
        v.sold_price = Money::from_units(24000);
        v.salesperson = Some("Ana".into());
        let board = Leaderboard::build([&v], None);
        let style = MoneyFormat::default();

        let full = format_leaderboard(&board, &style, true);
        assert!(full.contains("Revenue"));
        assert!(full.contains("R$ 24.000,00"));

        let counts_only = format_leaderboard(&board, &style, false);
        assert!(counts_only.contains("Ana"));
        assert!(!counts_only.contains("R$"));
    }

    #[test]
    fn test_empty_sections() {
        let style = MoneyFormat::default();
        assert!(format_leaderboard(&Leaderboard::default(), &style, true).contains("No sales"));
        let groups = GroupCounts::by(GroupField::Make, std::iter::empty());
        assert!(format_groups(&groups).contains("No sales"));

        let trend = SalesTrend::build(std::iter::empty(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 2);
        assert!(format_trend(&trend, &style).contains("not enough history"));
    }
}
