//! Role-based field access for the admin dashboard
//!
//! Access is computed once per view from the role and then queried, so the
//! same rules drive both what the detail view shows and what an edit may
//! touch.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DealerError, DealerResult};

/// Back-office user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Editor,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
        }
    }
}

/// A field of the vehicle admin form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Make,
    Model,
    Year,
    Price,
    FipePrice,
    Status,
    Plate,
    Category,
    Mileage,
    Description,
    PurchasePrice,
    SoldPrice,
    SoldDate,
    Salesperson,
    Expenses,
    /// Computed cost, profit and ROI
    Financials,
}

impl VehicleField {
    pub const ALL: [VehicleField; 16] = [
        Self::Make,
        Self::Model,
        Self::Year,
        Self::Price,
        Self::FipePrice,
        Self::Status,
        Self::Plate,
        Self::Category,
        Self::Mileage,
        Self::Description,
        Self::PurchasePrice,
        Self::SoldPrice,
        Self::SoldDate,
        Self::Salesperson,
        Self::Expenses,
        Self::Financials,
    ];

    /// Public listing fields any back-office user may edit
    pub const LISTING: [VehicleField; 10] = [
        Self::Make,
        Self::Model,
        Self::Year,
        Self::Price,
        Self::FipePrice,
        Self::Status,
        Self::Plate,
        Self::Category,
        Self::Mileage,
        Self::Description,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::Price => "price",
            Self::FipePrice => "fipe_price",
            Self::Status => "status",
            Self::Plate => "plate",
            Self::Category => "category",
            Self::Mileage => "mileage",
            Self::Description => "description",
            Self::PurchasePrice => "purchase_price",
            Self::SoldPrice => "sold_price",
            Self::SoldDate => "sold_date",
            Self::Salesperson => "salesperson",
            Self::Expenses => "expenses",
            Self::Financials => "financials",
        }
    }
}

impl fmt::Display for VehicleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field visibility and editability for one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    pub role: Role,
    pub editable: Vec<VehicleField>,
    pub read_only: Vec<VehicleField>,
    pub hidden: Vec<VehicleField>,
}

impl FieldAccess {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                role,
                editable: VehicleField::ALL
                    .into_iter()
                    .filter(|f| *f != VehicleField::Financials)
                    .collect(),
                read_only: vec![VehicleField::Financials],
                hidden: Vec::new(),
            },
            Role::Editor => Self {
                role,
                editable: VehicleField::LISTING.to_vec(),
                read_only: vec![
                    VehicleField::PurchasePrice,
                    VehicleField::SoldPrice,
                    VehicleField::SoldDate,
                    VehicleField::Salesperson,
                ],
                hidden: vec![VehicleField::Expenses, VehicleField::Financials],
            },
        }
    }

    pub fn can_edit(&self, field: VehicleField) -> bool {
        self.editable.contains(&field)
    }

    pub fn can_view(&self, field: VehicleField) -> bool {
        !self.hidden.contains(&field)
    }

    /// Fail with a permission error unless `field` is editable
    pub fn require_edit(&self, field: VehicleField) -> DealerResult<()> {
        if self.can_edit(field) {
            Ok(())
        } else {
            Err(DealerError::Permission {
                role: self.role.to_string(),
                action: "edit",
                field: field.to_string(),
            })
        }
    }

    /// Fail with a permission error if `field` is hidden
    pub fn require_view(&self, field: VehicleField) -> DealerResult<()> {
        if self.can_view(field) {
            Ok(())
        } else {
            Err(DealerError::Permission {
                role: self.role.to_string(),
                action: "view",
                field: field.to_string(),
            })
        }
    }
}
