use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{LicensePlate, MaintenanceDescription, MaintenanceId, VehicleId};
use crate::search::request::{FilterMap, SearchFilters, is_date_range_valid};

/// Fleet vehicle as returned by `POST /vehicles/search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub plate: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub mileage: u32,
    #[serde(default)]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(default)]
    pub maintenance_interval_months: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Vehicle {
    /// Date the next maintenance is due, when the vehicle has a schedule.
    pub fn maintenance_due(&self) -> Option<NaiveDate> {
        let last = self.last_maintenance?;
        let interval = self.maintenance_interval_months?;
        next_maintenance_date(last, interval)
    }
}

/// Adds `interval_months` to `last`, clamping to the end of shorter months.
///
/// Returns `None` for a zero interval or when the date overflows.
pub fn next_maintenance_date(last: NaiveDate, interval_months: u32) -> Option<NaiveDate> {
    if interval_months == 0 {
        return None;
    }
    last.checked_add_months(Months::new(interval_months))
}

/// Body of `POST /vehicles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub plate: LicensePlate,
    pub brand: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub mileage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_interval_months: Option<u32>,
}

/// Maintenance record of a vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(default)]
    pub mileage: Option<u32>,
}

/// Body of `POST /vehicles/{id}/maintenances`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenance {
    pub date: NaiveDate,
    pub description: MaintenanceDescription,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleFilters {
    pub active: Option<bool>,
    pub maintenance_due: Option<bool>,
}

impl SearchFilters for VehicleFilters {
    fn write_filters(&self, filters: &mut FilterMap) {
        filters
            .flag("active", self.active)
            .flag("maintenanceDue", self.maintenance_due);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl MaintenanceFilters {
    pub fn is_date_range_valid(&self) -> bool {
        is_date_range_valid(self.date_from, self.date_to)
    }
}

impl SearchFilters for MaintenanceFilters {
    fn write_filters(&self, filters: &mut FilterMap) {
        filters
            .date("dateFrom", self.date_from)
            .date("dateTo", self.date_to);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_maintenance_adds_calendar_months() {
        assert_eq!(next_maintenance_date(date(2024, 3, 15), 6), Some(date(2024, 9, 15)));
        assert_eq!(next_maintenance_date(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(next_maintenance_date(date(2024, 1, 31), 0), None);
    }

    #[test]
    fn maintenance_due_requires_schedule() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": 1,
            "plate": "AB123CD",
            "brand": "Ford",
            "model": "Transit",
            "lastMaintenance": "2024-02-10"
        }))
        .unwrap();
        assert_eq!(vehicle.maintenance_due(), None);

        let scheduled = Vehicle {
            maintenance_interval_months: Some(3),
            ..vehicle
        };
        assert_eq!(scheduled.maintenance_due(), Some(date(2024, 5, 10)));
    }

    #[test]
    fn maintenance_filters_write_wire_dates() {
        let filters = MaintenanceFilters {
            date_from: Some(date(2024, 1, 1)),
            date_to: Some(date(2023, 12, 1)),
        };
        let mut map = FilterMap::new();
        filters.write_filters(&mut map);

        assert!(!filters.is_date_range_valid());
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"dateFrom": "2024-01-01", "dateTo": "2023-12-01"})
        );
    }

    #[test]
    fn new_vehicle_serializes_plate_normalized() {
        let vehicle = NewVehicle {
            plate: LicensePlate::new("ab 123 cd").unwrap(),
            brand: "Renault".into(),
            model: "Kangoo".into(),
            year: None,
            mileage: 1200,
            maintenance_interval_months: Some(6),
        };

        assert_eq!(
            serde_json::to_value(&vehicle).unwrap(),
            json!({
                "plate": "AB123CD",
                "brand": "Renault",
                "model": "Kangoo",
                "mileage": 1200,
                "maintenanceIntervalMonths": 6
            })
        );
    }
}
