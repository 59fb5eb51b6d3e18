//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::dashboard::{FieldAccess, VehicleField};
use crate::display::vehicle::format_expense_list;
use crate::error::{DealerError, DealerResult};
use crate::models::{ExpenseCategory, Vehicle};
use crate::services::{NewExpense, VehicleService};
use crate::storage::Storage;

use super::{active_role, parse_date_or_today, parse_money};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Book a cost against a vehicle
    Add {
        /// Vehicle id, short id, link or URL
        vehicle: String,
        /// What was paid for
        description: String,
        /// Amount (e.g. "800" or "800,00")
        amount: String,
        /// Expense date (default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category (maintenance, repair, document, other)
        #[arg(short, long, default_value = "other")]
        category: String,
    },
    /// Remove an expense
    Remove {
        /// Vehicle id, short id, link or URL
        vehicle: String,
        /// Expense id or short id
        expense: String,
    },
    /// List a vehicle's expenses
    List {
        /// Vehicle id, short id, link or URL
        vehicle: String,
    },
}

fn find_expense_id(vehicle: &Vehicle, identifier: &str) -> DealerResult<crate::models::ExpenseId> {
    let mut matches = vehicle
        .expenses
        .iter()
        .filter(|e| e.id.as_str() == identifier || e.id.as_str().starts_with(identifier));
    match (matches.next(), matches.next()) {
        (Some(expense), None) => Ok(expense.id.clone()),
        (Some(_), Some(_)) => Err(DealerError::Validation(format!(
            "Expense id '{}' is ambiguous",
            identifier
        ))),
        _ => Err(DealerError::expense_not_found(identifier)),
    }
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> DealerResult<()> {
    let service = VehicleService::new(storage);
    let style = settings.money_format();
    let access = FieldAccess::for_role(active_role(storage, settings)?);

    match cmd {
        ExpenseCommands::Add {
            vehicle,
            description,
            amount,
            date,
            category,
        } => {
            access.require_edit(VehicleField::Expenses)?;
            let category = ExpenseCategory::parse(&category).ok_or_else(|| {
                DealerError::Validation(format!(
                    "Invalid category: '{}'. Valid categories: maintenance, repair, document, other",
                    category
                ))
            })?;

            let target = service.require(&vehicle)?;
            let expense = service.add_expense(
                &target.id,
                NewExpense {
                    description,
                    amount: parse_money(&amount)?,
                    date: parse_date_or_today(date.as_deref())?,
                    category,
                },
            )?;
            println!(
                "Added expense {} ({}) to {}",
                expense.description,
                expense.amount.format(&style),
                target.title()
            );
        }

        ExpenseCommands::Remove { vehicle, expense } => {
            access.require_edit(VehicleField::Expenses)?;
            let target = service.require(&vehicle)?;
            let expense_id = find_expense_id(&target, &expense)?;
            let removed = service.remove_expense(&target.id, &expense_id)?;
            println!("Removed expense: {}", removed.description);
        }

        ExpenseCommands::List { vehicle } => {
            access.require_view(VehicleField::Expenses)?;
            let target = service.require(&vehicle)?;
            println!("Expenses for {}", target.title());
            print!("{}", format_expense_list(&target, &style));
        }
    }

    Ok(())
}
