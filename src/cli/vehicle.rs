//! Vehicle CLI commands
//!
//! Implements CLI commands for inventory management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::dashboard::{FieldAccess, VehicleField};
use crate::display::vehicle::{format_vehicle_details, format_vehicle_page};
use crate::error::{DealerError, DealerResult};
use crate::models::VehicleStatus;
use crate::services::{InventoryQuery, NewVehicle, SortOrder, VehiclePatch, VehicleService};
use crate::storage::Storage;

use super::{active_role, parse_date_or_today, parse_money, parse_year};

/// Vehicle subcommands
#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Add a vehicle to the inventory
    Add {
        /// Make (e.g. "Fiat")
        make: String,
        /// Model (e.g. "Uno")
        model: String,
        /// Model year, or "0km"
        year: String,
        /// Asking price (e.g. "25000" or "25.000,00")
        price: String,
        /// Reference FIPE table price
        #[arg(long)]
        fipe: Option<String>,
        /// What the dealership paid
        #[arg(short = 'c', long)]
        purchase: Option<String>,
        /// License plate
        #[arg(short, long)]
        plate: Option<String>,
        /// Body category (e.g. "suv")
        #[arg(long)]
        category: Option<String>,
        /// Odometer reading in km
        #[arg(short, long)]
        mileage: Option<u32>,
        /// Listing description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List vehicles in the catalogue
    List {
        /// Status to show ("all" for every status)
        #[arg(short, long, default_value = "available")]
        status: String,
        /// Exact make
        #[arg(long)]
        make: Option<String>,
        /// Search make and model, ignoring accents
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Minimum price
        #[arg(long)]
        min_price: Option<String>,
        /// Maximum price
        #[arg(long)]
        max_price: Option<String>,
        /// Minimum model year
        #[arg(long)]
        min_year: Option<i32>,
        /// Maximum model year
        #[arg(long)]
        max_year: Option<i32>,
        /// Ordering
        #[arg(long, value_enum, default_value = "newest")]
        sort: SortOrder,
        /// Page number
        #[arg(long, default_value = "1")]
        page: usize,
        /// Vehicles per page
        #[arg(long, default_value_t = crate::services::DEFAULT_PER_PAGE)]
        per_page: usize,
    },
    /// Show vehicle details
    Show {
        /// Vehicle id, short id, link or URL
        vehicle: String,
    },
    /// Edit listing fields
    Edit {
        /// Vehicle id, short id, link or URL
        vehicle: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        fipe: Option<String>,
        #[arg(long)]
        purchase: Option<String>,
        #[arg(long)]
        sold_price: Option<String>,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        mileage: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        salesperson: Option<String>,
    },
    /// Record a sale
    Sell {
        /// Vehicle id, short id, link or URL
        vehicle: String,
        /// Sale price
        price: String,
        /// Sale date (YYYY-MM-DD or DD/MM/YYYY, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Salesperson who closed the sale
        #[arg(short, long)]
        salesperson: Option<String>,
    },
    /// Change availability (available, maintenance, unavailable)
    Status {
        /// Vehicle id, short id, link or URL
        vehicle: String,
        /// New status
        status: String,
    },
    /// Remove a vehicle and its expenses
    Remove {
        /// Vehicle id, short id, link or URL
        vehicle: String,
    },
    /// Print the public link for a vehicle
    Share {
        /// Vehicle id, short id, link or URL
        vehicle: String,
    },
}

fn parse_status(value: &str) -> DealerResult<VehicleStatus> {
    VehicleStatus::parse(value).ok_or_else(|| {
        DealerError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: available, sold, maintenance, unavailable",
            value
        ))
    })
}

fn parse_optional_money(value: Option<String>) -> DealerResult<Option<crate::models::Money>> {
    value.as_deref().map(parse_money).transpose()
}

/// Handle a vehicle command
pub fn handle_vehicle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: VehicleCommands,
) -> DealerResult<()> {
    let service = VehicleService::new(storage);
    let style = settings.money_format();

    match cmd {
        VehicleCommands::Add {
            make,
            model,
            year,
            price,
            fipe,
            purchase,
            plate,
            category,
            mileage,
            description,
        } => {
            let access = FieldAccess::for_role(active_role(storage, settings)?);
            if purchase.is_some() {
                access.require_edit(VehicleField::PurchasePrice)?;
            }

            let mut input = NewVehicle::new(make, model, parse_year(&year)?, parse_money(&price)?);
            input.fipe_price = parse_optional_money(fipe)?.unwrap_or_default();
            input.purchase_price = parse_optional_money(purchase)?.unwrap_or_default();
            input.plate = plate;
            input.category = category;
            input.mileage = mileage;
            input.description = description;

            let vehicle = service.create(input)?;
            println!("Added vehicle: {}", vehicle.title());
            println!("  ID:    {}", vehicle.id);
            println!("  Price: {}", vehicle.price.format(&style));
        }

        VehicleCommands::List {
            status,
            make,
            search,
            min_price,
            max_price,
            min_year,
            max_year,
            sort,
            page,
            per_page,
        } => {
            let status = if status.eq_ignore_ascii_case("all") {
                None
            } else {
                Some(parse_status(&status)?)
            };

            let mut query = InventoryQuery::new()
                .status(status)
                .price_range(parse_optional_money(min_price)?, parse_optional_money(max_price)?)
                .year_range(min_year, max_year)
                .sort(sort)
                .page(page, per_page);
            if let Some(make) = make {
                query = query.make(make);
            }
            if let Some(search) = search {
                query = query.text(search);
            }

            let vehicles = service.list()?;
            print!("{}", format_vehicle_page(&query.run(&vehicles), &style));
        }

        VehicleCommands::Show { vehicle } => {
            let vehicle = service.require(&vehicle)?;
            let access = FieldAccess::for_role(active_role(storage, settings)?);
            let url = service.share_link(&vehicle, &settings.site_url);
            print!(
                "{}",
                format_vehicle_details(&vehicle, &access, &style, Some(&url))
            );
        }

        VehicleCommands::Edit {
            vehicle,
            make,
            model,
            year,
            price,
            fipe,
            purchase,
            sold_price,
            plate,
            category,
            mileage,
            description,
            salesperson,
        } => {
            let target = service.require(&vehicle)?;
            let patch = VehiclePatch {
                make,
                model,
                year: year.as_deref().map(parse_year).transpose()?,
                price: parse_optional_money(price)?,
                fipe_price: parse_optional_money(fipe)?,
                purchase_price: parse_optional_money(purchase)?,
                sold_price: parse_optional_money(sold_price)?,
                plate,
                category,
                mileage,
                description,
                salesperson,
            };

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let role = active_role(storage, settings)?;
            let updated = service.update_listing(&target.id, patch, role)?;
            println!("Updated vehicle: {}", updated.title());
        }

        VehicleCommands::Sell {
            vehicle,
            price,
            date,
            salesperson,
        } => {
            let access = FieldAccess::for_role(active_role(storage, settings)?);
            access.require_edit(VehicleField::SoldPrice)?;

            let target = service.require(&vehicle)?;
            let date = parse_date_or_today(date.as_deref())?;
            let sold = service.mark_sold(&target.id, parse_money(&price)?, date, salesperson)?;
            println!(
                "Sold {} for {} on {}",
                sold.title(),
                sold.sold_price.format(&style),
                date.format("%d/%m/%Y")
            );
        }

        VehicleCommands::Status { vehicle, status } => {
            let access = FieldAccess::for_role(active_role(storage, settings)?);
            access.require_edit(VehicleField::Status)?;

            let target = service.require(&vehicle)?;
            let updated = service.set_status(&target.id, parse_status(&status)?)?;
            println!("{} is now {}", updated.title(), updated.status);
        }

        VehicleCommands::Remove { vehicle } => {
            let target = service.require(&vehicle)?;
            let removed = service.delete(&target.id)?;
            println!("Removed vehicle: {}", removed.title());
        }

        VehicleCommands::Share { vehicle } => {
            let vehicle = service.require(&vehicle)?;
            println!("{}", service.share_link(&vehicle, &settings.site_url));
        }
    }

    Ok(())
}
