//! Row models for the fleet and maintenance lists.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::status::PillCategory;
use crate::domain::vehicle::{Maintenance, Vehicle};
use crate::dto::format::{
    EMPTY_CELL, format_currency, format_date, format_optional_date, group_thousands,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleRow {
    pub id: i32,
    pub plate: String,
    pub description: String,
    pub mileage: String,
    pub last_maintenance: String,
    pub next_maintenance: String,
    /// Raw due date, kept so the view can compare it with today.
    pub maintenance_due: Option<NaiveDate>,
    pub status_label: &'static str,
    pub pill: PillCategory,
}

impl VehicleRow {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.maintenance_due.is_some_and(|due| due <= today)
    }
}

impl From<Vehicle> for VehicleRow {
    fn from(vehicle: Vehicle) -> Self {
        let maintenance_due = vehicle.maintenance_due();
        let description = match vehicle.year {
            Some(year) => format!("{} {} ({year})", vehicle.brand, vehicle.model),
            None => format!("{} {}", vehicle.brand, vehicle.model),
        };
        let (status_label, pill) = if vehicle.active {
            ("Activo", PillCategory::Done)
        } else {
            ("Fuera de servicio", PillCategory::Cancelled)
        };

        Self {
            id: vehicle.id.get(),
            plate: vehicle.plate,
            description,
            mileage: format!("{} km", group_thousands(u64::from(vehicle.mileage))),
            last_maintenance: format_optional_date(vehicle.last_maintenance),
            next_maintenance: format_optional_date(maintenance_due),
            maintenance_due,
            status_label,
            pill,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaintenanceRow {
    pub id: i32,
    pub date: String,
    pub description: String,
    pub cost: String,
    pub mileage: String,
}

impl From<Maintenance> for MaintenanceRow {
    fn from(maintenance: Maintenance) -> Self {
        Self {
            id: maintenance.id.get(),
            date: format_date(maintenance.date),
            description: maintenance.description,
            cost: format_currency(maintenance.cost),
            mileage: maintenance
                .mileage
                .map(|km| format!("{} km", group_thousands(u64::from(km))))
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}
