//! Vehicle model
//!
//! A vehicle in the dealership inventory, as returned by the backend's
//! "fetch all vehicles" call. Field names accept both the snake_case column
//! names and the camelCase names used by the web client.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::lenient_date;
use super::expense::Expense;
use super::ids::{ExpenseId, VehicleId};
use super::lenient;
use super::money::Money;

/// Year sentinel for brand-new, zero-mileage vehicles
pub const ZERO_KM_YEAR: i32 = 32000;

/// Availability of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum VehicleStatus {
    #[default]
    Available,
    Sold,
    Maintenance,
    Unavailable,
}

impl VehicleStatus {
    /// Parse a status name (English or the Portuguese admin labels)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" | "disponivel" | "disponível" => Some(Self::Available),
            "sold" | "vendido" => Some(Self::Sold),
            "maintenance" | "manutencao" | "manutenção" => Some(Self::Maintenance),
            "unavailable" | "indisponivel" | "indisponível" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

impl From<String> for VehicleStatus {
    /// Unknown statuses load as unavailable so they never leak into the public catalogue
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or(Self::Unavailable)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Sold => write!(f, "sold"),
            Self::Maintenance => write!(f, "maintenance"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: VehicleId,

    #[serde(default, deserialize_with = "lenient::string")]
    pub make: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub model: String,

    /// Model year; [`ZERO_KM_YEAR`] marks a brand-new vehicle
    #[serde(default, deserialize_with = "lenient::int")]
    pub year: i32,

    /// Current list price
    #[serde(default)]
    pub price: Money,

    /// Manufacturer / FIPE reference price
    #[serde(default, alias = "fipePrice")]
    pub fipe_price: Money,

    #[serde(default, alias = "purchasePrice")]
    pub purchase_price: Money,

    #[serde(default, alias = "soldPrice")]
    pub sold_price: Money,

    #[serde(default, alias = "soldDate", with = "lenient_date")]
    pub sold_date: Option<NaiveDate>,

    #[serde(
        default,
        alias = "salespersonName",
        alias = "sellerName",
        deserialize_with = "lenient::optional_string"
    )]
    pub salesperson: Option<String>,

    #[serde(default, deserialize_with = "lenient::label")]
    pub status: VehicleStatus,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub plate: Option<String>,

    /// Body type or segment (SUV, hatch, sedan, ...)
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub mileage: Option<u32>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,

    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Create a new available vehicle
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, price: Money) -> Self {
        Self {
            id: VehicleId::new(),
            make: make.into(),
            model: model.into(),
            year,
            price,
            fipe_price: Money::zero(),
            purchase_price: Money::zero(),
            sold_price: Money::zero(),
            sold_date: None,
            salesperson: None,
            status: VehicleStatus::Available,
            expenses: Vec::new(),
            plate: None,
            category: None,
            mileage: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_sold(&self) -> bool {
        self.status == VehicleStatus::Sold
    }

    /// Brand-new vehicles carry the year sentinel
    pub fn is_zero_km(&self) -> bool {
        self.year == ZERO_KM_YEAR
    }

    /// Year label for display ("0 km" for new vehicles)
    pub fn year_label(&self) -> String {
        if self.is_zero_km() {
            "0 km".to_string()
        } else {
            self.year.to_string()
        }
    }

    /// "Make Model Year" heading
    pub fn title(&self) -> String {
        format!("{} {} {}", self.make, self.model, self.year_label())
    }

    /// Sum of all expense amounts
    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Record the sale
    pub fn mark_sold(&mut self, price: Money, date: NaiveDate, salesperson: Option<String>) {
        self.status = VehicleStatus::Sold;
        self.sold_price = price;
        self.sold_date = Some(date);
        self.salesperson = salesperson.filter(|s| !s.trim().is_empty());
    }

    /// Find an expense by id
    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Remove an expense, returning it if present
    pub fn remove_expense(&mut self, id: &ExpenseId) -> Option<Expense> {
        let pos = self.expenses.iter().position(|e| &e.id == id)?;
        Some(self.expenses.remove(pos))
    }

    /// Validate the vehicle against the admin form rules
    pub fn validate(&self) -> Result<(), VehicleValidationError> {
        if self.make.trim().is_empty() {
            return Err(VehicleValidationError::EmptyMake);
        }
        if self.model.trim().is_empty() {
            return Err(VehicleValidationError::EmptyModel);
        }
        let max_year = Utc::now().year() + 1;
        if !self.is_zero_km() && !(1900..=max_year).contains(&self.year) {
            return Err(VehicleValidationError::InvalidYear(self.year));
        }
        for (field, amount) in [
            ("price", self.price),
            ("fipe_price", self.fipe_price),
            ("purchase_price", self.purchase_price),
            ("sold_price", self.sold_price),
        ] {
            if amount.is_negative() {
                return Err(VehicleValidationError::NegativeAmount(field));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Validation errors for vehicles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleValidationError {
    EmptyMake,
    EmptyModel,
    InvalidYear(i32),
    NegativeAmount(&'static str),
}

impl fmt::Display for VehicleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMake => write!(f, "Vehicle make cannot be empty"),
            Self::EmptyModel => write!(f, "Vehicle model cannot be empty"),
            Self::InvalidYear(y) => write!(
                f,
                "Invalid year {}: use a model year or {} for a zero-km vehicle",
                y, ZERO_KM_YEAR
            ),
            Self::NegativeAmount(field) => write!(f, "{} cannot be negative", field),
        }
    }
}

impl std::error::Error for VehicleValidationError {}
