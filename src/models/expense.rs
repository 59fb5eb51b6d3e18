//! Expense entries attached to a vehicle
//!
//! Expenses are owned by exactly one vehicle: they are created and removed
//! only through explicit edits of that vehicle and are never shared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::lenient_date;
use super::ids::ExpenseId;
use super::lenient;
use super::money::Money;

/// Kind of cost incurred on a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ExpenseCategory {
    Maintenance,
    Repair,
    Document,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Parse a category name, accepting the Portuguese labels used by the admin form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "maintenance" | "manutencao" | "manutenção" => Some(Self::Maintenance),
            "repair" | "reparo" => Some(Self::Repair),
            "document" | "documentation" | "documentacao" | "documentação" => {
                Some(Self::Document)
            }
            "other" | "outro" | "outros" => Some(Self::Other),
            _ => None,
        }
    }
}

impl From<String> for ExpenseCategory {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or_default()
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maintenance => write!(f, "maintenance"),
            Self::Repair => write!(f, "repair"),
            Self::Document => write!(f, "document"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single cost booked against a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: ExpenseId,

    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,

    /// Non-negative amount; malformed values load as zero
    #[serde(default)]
    pub amount: Money,

    #[serde(default, with = "lenient_date")]
    pub date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::label")]
    pub category: ExpenseCategory,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            date: Some(date),
            category,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NegativeAmount(m) => write!(f, "Expense amount cannot be negative: {}", m),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
