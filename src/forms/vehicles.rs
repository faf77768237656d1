use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{LicensePlate, MaintenanceDescription, VehicleId};
use crate::domain::vehicle::{NewMaintenance, NewVehicle};
use crate::forms::{FormError, parse_amount};
use crate::forms::filters::parse_optional_date;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleForm {
    pub plate: String,
    #[validate(length(min = 1, max = 60))]
    pub brand: String,
    #[validate(length(min = 1, max = 60))]
    pub model: String,
    #[serde(default)]
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    #[serde(default)]
    pub mileage: u32,
    #[serde(default)]
    #[validate(range(min = 1, max = 60))]
    pub maintenance_interval_months: Option<u32>,
}

impl TryFrom<AddVehicleForm> for NewVehicle {
    type Error = FormError;

    fn try_from(form: AddVehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            plate: LicensePlate::new(form.plate).map_err(|_| FormError::InvalidPlate)?,
            brand: form.brand.trim().to_string(),
            model: form.model.trim().to_string(),
            year: form.year,
            mileage: form.mileage,
            maintenance_interval_months: form.maintenance_interval_months,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMaintenanceForm {
    pub vehicle_id: i32,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    #[serde(default)]
    pub mileage: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddMaintenancePayload {
    pub vehicle_id: VehicleId,
    pub maintenance: NewMaintenance,
}

impl TryFrom<AddMaintenanceForm> for AddMaintenancePayload {
    type Error = FormError;

    fn try_from(form: AddMaintenanceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let date: NaiveDate =
            parse_optional_date(Some(&form.date))?.ok_or(FormError::InvalidDate)?;

        Ok(Self {
            vehicle_id: VehicleId::new(form.vehicle_id).map_err(|_| FormError::InvalidId)?,
            maintenance: NewMaintenance {
                date,
                description: MaintenanceDescription::new(form.description)
                    .map_err(|_| FormError::InvalidName)?,
                cost: parse_amount(form.cost)?,
                mileage: form.mileage,
            },
        })
    }
}
