//! Vehicle service
//!
//! Business logic for the inventory: creating listings, role-checked edits,
//! recording sales, expenses and deep-link lookup. Every mutation is saved
//! and written to the audit log.

use chrono::NaiveDate;

use crate::audit::AuditEntry;
use crate::dashboard::{FieldAccess, Role, VehicleField};
use crate::error::{DealerError, DealerResult};
use crate::link::{decode_link, extract_link_param, share_url, EncodedLink};
use crate::models::{
    Expense, ExpenseCategory, ExpenseId, Money, Vehicle, VehicleId, VehicleStatus,
};
use crate::storage::{normalize_plate, Storage};

/// Service for vehicle management
pub struct VehicleService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Money,
    pub fipe_price: Money,
    pub purchase_price: Money,
    pub plate: Option<String>,
    pub category: Option<String>,
    pub mileage: Option<u32>,
    pub description: String,
}

impl NewVehicle {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, price: Money) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            price,
            fipe_price: Money::zero(),
            purchase_price: Money::zero(),
            plate: None,
            category: None,
            mileage: None,
            description: String::new(),
        }
    }
}

/// Partial update of a vehicle; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct VehiclePatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Money>,
    pub fipe_price: Option<Money>,
    pub purchase_price: Option<Money>,
    pub sold_price: Option<Money>,
    pub plate: Option<String>,
    pub category: Option<String>,
    pub mileage: Option<u32>,
    pub description: Option<String>,
    pub salesperson: Option<String>,
}

impl VehiclePatch {
    /// Fields this patch touches
    pub fn fields(&self) -> Vec<VehicleField> {
        let mut fields = Vec::new();
        let mut touch = |set: bool, field| {
            if set {
                fields.push(field);
            }
        };
        touch(self.make.is_some(), VehicleField::Make);
        touch(self.model.is_some(), VehicleField::Model);
        touch(self.year.is_some(), VehicleField::Year);
        touch(self.price.is_some(), VehicleField::Price);
        touch(self.fipe_price.is_some(), VehicleField::FipePrice);
        touch(self.purchase_price.is_some(), VehicleField::PurchasePrice);
        touch(self.sold_price.is_some(), VehicleField::SoldPrice);
        touch(self.plate.is_some(), VehicleField::Plate);
        touch(self.category.is_some(), VehicleField::Category);
        touch(self.mileage.is_some(), VehicleField::Mileage);
        touch(self.description.is_some(), VehicleField::Description);
        touch(self.salesperson.is_some(), VehicleField::Salesperson);
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    fn apply(self, vehicle: &mut Vehicle) {
        if let Some(make) = self.make {
            vehicle.make = make.trim().to_string();
        }
        if let Some(model) = self.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(price) = self.price {
            vehicle.price = price;
        }
        if let Some(fipe_price) = self.fipe_price {
            vehicle.fipe_price = fipe_price;
        }
        if let Some(purchase_price) = self.purchase_price {
            vehicle.purchase_price = purchase_price;
        }
        if let Some(sold_price) = self.sold_price {
            vehicle.sold_price = sold_price;
        }
        if let Some(plate) = self.plate {
            vehicle.plate = non_blank(plate);
        }
        if let Some(category) = self.category {
            vehicle.category = non_blank(category);
        }
        if let Some(mileage) = self.mileage {
            vehicle.mileage = Some(mileage);
        }
        if let Some(description) = self.description {
            vehicle.description = description;
        }
        if let Some(salesperson) = self.salesperson {
            vehicle.salesperson = non_blank(salesperson);
        }
    }
}

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl<'a> VehicleService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new vehicle listing
    pub fn create(&self, input: NewVehicle) -> DealerResult<Vehicle> {
        let mut vehicle = Vehicle::new(input.make.trim(), input.model.trim(), input.year, input.price);
        vehicle.fipe_price = input.fipe_price;
        vehicle.purchase_price = input.purchase_price;
        vehicle.plate = input.plate.and_then(non_blank);
        vehicle.category = input.category.and_then(non_blank);
        vehicle.mileage = input.mileage;
        vehicle.description = input.description;

        vehicle
            .validate()
            .map_err(|e| DealerError::Validation(e.to_string()))?;
        self.ensure_plate_free(&vehicle)?;

        self.storage.vehicles.upsert(vehicle.clone())?;
        self.storage.vehicles.save()?;

        self.storage.audit().record(&AuditEntry::listed(&vehicle))?;

        Ok(vehicle)
    }

    pub fn get(&self, id: &VehicleId) -> DealerResult<Option<Vehicle>> {
        self.storage.vehicles.get(id)
    }

    /// All vehicles, newest first
    pub fn list(&self) -> DealerResult<Vec<Vehicle>> {
        self.storage.vehicles.get_all()
    }

    /// Find a vehicle by id, share link fragment or full share URL
    pub fn find(&self, identifier: &str) -> DealerResult<Option<Vehicle>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if let Some(vehicle) = self.storage.vehicles.get(&VehicleId::from(identifier))? {
            return Ok(Some(vehicle));
        }

        // Short ids from list tables
        let mut prefixed = self
            .storage
            .vehicles
            .get_all()?
            .into_iter()
            .filter(|v| v.id.as_str().starts_with(identifier));
        if let (Some(vehicle), None) = (prefixed.next(), prefixed.next()) {
            return Ok(Some(vehicle));
        }

        match extract_link_param(identifier) {
            Some(param) => self.find_by_link(&param),
            None => Ok(None),
        }
    }

    /// Resolve a link fragment (`{slug}-{encoded id}`) to a stored vehicle
    pub fn find_by_link(&self, param: &str) -> DealerResult<Option<Vehicle>> {
        match decode_link(param) {
            Some(id) => self.storage.vehicles.get(&VehicleId::from(id)),
            None => Ok(None),
        }
    }

    /// Find or fail with a not-found error
    pub fn require(&self, identifier: &str) -> DealerResult<Vehicle> {
        self.find(identifier)?
            .ok_or_else(|| DealerError::vehicle_not_found(identifier))
    }

    /// Public detail-page URL for a vehicle
    pub fn share_link(&self, vehicle: &Vehicle, base_url: &str) -> String {
        share_url(base_url, &EncodedLink::for_vehicle(vehicle))
    }

    /// Apply a partial update, refusing fields the role may not edit
    pub fn update_listing(
        &self,
        id: &VehicleId,
        patch: VehiclePatch,
        role: Role,
    ) -> DealerResult<Vehicle> {
        let access = FieldAccess::for_role(role);
        for field in patch.fields() {
            access.require_edit(field)?;
        }

        let mut vehicle = self.load(id)?;
        let before = vehicle.clone();
        patch.apply(&mut vehicle);

        vehicle
            .validate()
            .map_err(|e| DealerError::Validation(e.to_string()))?;
        self.ensure_plate_free(&vehicle)?;

        self.persist_update(&before, &vehicle)?;
        Ok(vehicle)
    }

    /// Record a sale
    pub fn mark_sold(
        &self,
        id: &VehicleId,
        price: Money,
        date: NaiveDate,
        salesperson: Option<String>,
    ) -> DealerResult<Vehicle> {
        if price.is_negative() {
            return Err(DealerError::Validation(format!(
                "Sale price cannot be negative: {}",
                price
            )));
        }

        let mut vehicle = self.load(id)?;
        let before = vehicle.clone();
        vehicle.mark_sold(price, date, salesperson);

        self.persist_update(&before, &vehicle)?;
        Ok(vehicle)
    }

    /// Change availability
    ///
    /// Sales go through [`Self::mark_sold`]. Moving a sold vehicle back to
    /// another status clears its sale data.
    pub fn set_status(&self, id: &VehicleId, status: VehicleStatus) -> DealerResult<Vehicle> {
        if status == VehicleStatus::Sold {
            return Err(DealerError::Validation(
                "Record a sale with its price and date instead of setting the status".into(),
            ));
        }

        let mut vehicle = self.load(id)?;
        if vehicle.status == status {
            return Ok(vehicle);
        }

        let before = vehicle.clone();
        if vehicle.is_sold() {
            vehicle.sold_price = Money::zero();
            vehicle.sold_date = None;
            vehicle.salesperson = None;
        }
        vehicle.status = status;

        self.persist_update(&before, &vehicle)?;
        Ok(vehicle)
    }

    /// Attach an expense to a vehicle
    pub fn add_expense(&self, id: &VehicleId, input: NewExpense) -> DealerResult<Expense> {
        let expense = Expense::new(
            input.description.trim(),
            input.amount,
            input.date,
            input.category,
        );
        expense
            .validate()
            .map_err(|e| DealerError::Validation(e.to_string()))?;

        let mut vehicle = self.load(id)?;
        vehicle.expenses.push(expense.clone());
        self.storage.vehicles.upsert(vehicle.clone())?;
        self.storage.vehicles.save()?;

        self.storage
            .audit()
            .record(&AuditEntry::expense_added(&vehicle, &expense))?;

        Ok(expense)
    }

    /// Remove an expense from a vehicle
    pub fn remove_expense(&self, id: &VehicleId, expense_id: &ExpenseId) -> DealerResult<Expense> {
        let mut vehicle = self.load(id)?;
        let expense = vehicle
            .remove_expense(expense_id)
            .ok_or_else(|| DealerError::expense_not_found(expense_id.to_string()))?;

        self.storage.vehicles.upsert(vehicle.clone())?;
        self.storage.vehicles.save()?;

        self.storage
            .audit()
            .record(&AuditEntry::expense_removed(&vehicle, &expense))?;

        Ok(expense)
    }

    /// Delete a vehicle and its expenses
    pub fn delete(&self, id: &VehicleId) -> DealerResult<Vehicle> {
        let vehicle = self.load(id)?;

        self.storage.vehicles.delete(id)?;
        self.storage.vehicles.save()?;

        self.storage.audit().record(&AuditEntry::removed(&vehicle))?;

        Ok(vehicle)
    }

    fn load(&self, id: &VehicleId) -> DealerResult<Vehicle> {
        self.storage
            .vehicles
            .get(id)?
            .ok_or_else(|| DealerError::vehicle_not_found(id.to_string()))
    }

    fn ensure_plate_free(&self, vehicle: &Vehicle) -> DealerResult<()> {
        let Some(plate) = vehicle.plate.as_deref() else {
            return Ok(());
        };
        match self.storage.vehicles.get_by_plate(plate)? {
            Some(other) if other.id != vehicle.id => Err(DealerError::Duplicate {
                entity_type: "Vehicle",
                identifier: normalize_plate(plate),
            }),
            _ => Ok(()),
        }
    }

    fn persist_update(&self, before: &Vehicle, after: &Vehicle) -> DealerResult<()> {
        self.storage.vehicles.upsert(after.clone())?;
        self.storage.vehicles.save()?;

        self.storage.audit().record(&AuditEntry::edited(before, after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditQuery};
    use crate::config::paths::DealerPaths;
    use crate::link::encode_link;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DealerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn uno(service: &VehicleService) -> Vehicle {
        let mut input = NewVehicle::new("Fiat", "Uno", 2015, Money::from_units(25000));
        input.purchase_price = Money::from_units(20000);
        input.plate = Some("ABC1D23".to_string());
        service.create(input).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_vehicle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);

        let vehicle = uno(&service);
        assert_eq!(vehicle.title(), "Fiat Uno 2015");
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(service.list().unwrap().len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Listed);
        assert_eq!(entries[0].link, EncodedLink::for_vehicle(&vehicle).to_string());
    }

    #[test]
    fn test_create_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);

        let blank = service.create(NewVehicle::new(" ", "Uno", 2015, Money::zero()));
        assert!(blank.unwrap_err().is_validation());

        let year = service.create(NewVehicle::new("Fiat", "Uno", 1850, Money::zero()));
        assert!(year.unwrap_err().is_validation());

        let zero_km = service.create(NewVehicle::new("Fiat", "Pulse", 32000, Money::zero()));
        assert!(zero_km.unwrap().is_zero_km());
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        uno(&service);

        let mut input = NewVehicle::new("VW", "Gol", 2014, Money::zero());
        input.plate = Some("abc-1d23".to_string());
        let result = service.create(input);
        assert!(matches!(result, Err(DealerError::Duplicate { .. })));
    }

    #[test]
    fn test_find_by_id_link_and_url() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        let by_id = service.find(vehicle.id.as_str()).unwrap().unwrap();
        assert_eq!(by_id.id, vehicle.id);
        let by_short = service.find(vehicle.id.short()).unwrap().unwrap();
        assert_eq!(by_short.id, vehicle.id);

        let param = encode_link(vehicle.id.as_str(), "Fiat", "Uno", 2015);
        let by_link = service.find(&param).unwrap().unwrap();
        assert_eq!(by_link.id, vehicle.id);

        let url = service.share_link(&vehicle, "https://loja.example.com");
        assert!(url.starts_with("https://loja.example.com/carro?id=fiat-uno-2015-"));
        let by_url = service.find(&url).unwrap().unwrap();
        assert_eq!(by_url.id, vehicle.id);

        // A well-formed link to a vehicle that does not exist
        let missing = encode_link("nope", "Fiat", "Uno", 2015);
        assert!(service.find_by_link(&missing).unwrap().is_none());
        assert!(service.find("fiat-uno-***").unwrap().is_none());
    }

    #[test]
    fn test_editor_cannot_touch_purchase_price() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        let patch = VehiclePatch {
            purchase_price: Some(Money::from_units(1)),
            ..Default::default()
        };
        let err = service
            .update_listing(&vehicle.id, patch, Role::Editor)
            .unwrap_err();
        assert!(err.is_permission());

        let unchanged = service.get(&vehicle.id).unwrap().unwrap();
        assert_eq!(unchanged.purchase_price, Money::from_units(20000));
    }

    #[test]
    fn test_update_listing_as_editor() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        let patch = VehiclePatch {
            price: Some(Money::from_units(23500)),
            description: Some("Único dono".to_string()),
            ..Default::default()
        };
        let updated = service
            .update_listing(&vehicle.id, patch, Role::Editor)
            .unwrap();
        assert_eq!(updated.price, Money::from_units(23500));

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.action, AuditAction::Edited);
        assert!(last.changes.as_deref().unwrap().contains("price"));
    }

    #[test]
    fn test_mark_sold_and_revert() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        let sold = service
            .mark_sold(
                &vehicle.id,
                Money::from_units(24000),
                date(2025, 1, 20),
                Some("Ana".into()),
            )
            .unwrap();
        assert!(sold.is_sold());
        assert_eq!(sold.salesperson.as_deref(), Some("Ana"));

        let err = service
            .mark_sold(&vehicle.id, Money::from_units(-1), date(2025, 1, 20), None)
            .unwrap_err();
        assert!(err.is_validation());

        let back = service
            .set_status(&vehicle.id, VehicleStatus::Available)
            .unwrap();
        assert!(back.sold_date.is_none());
        assert!(back.sold_price.is_zero());

        assert!(service
            .set_status(&vehicle.id, VehicleStatus::Sold)
            .unwrap_err()
            .is_validation());

        let history = storage
            .audit()
            .entries(&AuditQuery::default().for_vehicle(vehicle.id.clone()))
            .unwrap();
        let actions: Vec<_> = history.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Listed, AuditAction::Sold, AuditAction::Edited]
        );
    }

    #[test]
    fn test_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        let expense = service
            .add_expense(
                &vehicle.id,
                NewExpense {
                    description: "Troca de óleo".into(),
                    amount: Money::from_units(350),
                    date: date(2025, 1, 5),
                    category: ExpenseCategory::Maintenance,
                },
            )
            .unwrap();

        let stored = service.get(&vehicle.id).unwrap().unwrap();
        assert_eq!(stored.total_expenses(), Money::from_units(350));

        let negative = service.add_expense(
            &vehicle.id,
            NewExpense {
                description: "Estorno".into(),
                amount: Money::from_units(-10),
                date: date(2025, 1, 6),
                category: ExpenseCategory::Other,
            },
        );
        assert!(negative.unwrap_err().is_validation());

        service.remove_expense(&vehicle.id, &expense.id).unwrap();
        let err = service
            .remove_expense(&vehicle.id, &expense.id)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = VehicleService::new(&storage);
        let vehicle = uno(&service);

        service.delete(&vehicle.id).unwrap();
        assert!(service.get(&vehicle.id).unwrap().is_none());
        assert!(service.delete(&vehicle.id).unwrap_err().is_not_found());

        let last = storage.audit().read_all().unwrap().pop().unwrap();
        assert_eq!(last.action, AuditAction::Removed);
    }
}
