//! Fleet list, vehicle registration and maintenance log.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::{Maintenance, NewVehicle, Vehicle};
use crate::dto::vehicles::{MaintenanceRow, VehicleRow};
use crate::forms::vehicles::{AddMaintenanceForm, AddMaintenancePayload, AddVehicleForm};
use crate::repository::errors::RepositoryResult;
use crate::repository::{Download, VehicleReader, VehicleWriter};
use crate::search::orchestrator::ListSource;
use crate::search::request::{SearchRequest, SearchResult};
use crate::services::notifications::ActionMessages;
use crate::services::{ServiceError, ServiceResult};

pub const MSG_VEHICLE_CREATED: &str = "Vehículo registrado.";
pub const MSG_VEHICLE_CREATE_FAILED: &str = "No se pudo registrar el vehículo.";
pub const MSG_MAINTENANCE_ADDED: &str = "Mantenimiento registrado.";
pub const MSG_MAINTENANCE_ADD_FAILED: &str = "No se pudo registrar el mantenimiento.";
pub const MSG_DUPLICATE_PLATE: &str = "Ya existe un vehículo con esa patente";

pub const VEHICLE_CREATE: ActionMessages =
    ActionMessages::new(MSG_VEHICLE_CREATED, MSG_VEHICLE_CREATE_FAILED);
pub const MAINTENANCE_ADD: ActionMessages =
    ActionMessages::new(MSG_MAINTENANCE_ADDED, MSG_MAINTENANCE_ADD_FAILED);

pub async fn search_vehicles<R>(
    repo: &R,
    request: &SearchRequest,
) -> ServiceResult<SearchResult<VehicleRow>>
where
    R: VehicleReader + ?Sized,
{
    let page = repo.search_vehicles(request).await?;
    Ok(page.map(VehicleRow::from))
}

pub async fn load_vehicle<R>(repo: &R, vehicle_id: i32) -> ServiceResult<Vehicle>
where
    R: VehicleReader + ?Sized,
{
    let vehicle_id = VehicleId::new(vehicle_id)?;

    repo.get_vehicle(vehicle_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn add_vehicle<R>(repo: &R, form: AddVehicleForm) -> ServiceResult<VehicleRow>
where
    R: VehicleWriter + ?Sized,
{
    let new_vehicle = NewVehicle::try_from(form)?;

    let vehicle = repo
        .create_vehicle(&new_vehicle)
        .await
        .map_err(ServiceError::conflict_on("plate", MSG_DUPLICATE_PLATE))?;

    log::info!("Registered vehicle {} ({})", vehicle.id, vehicle.plate);
    Ok(VehicleRow::from(vehicle))
}

pub async fn search_maintenances<R>(
    repo: &R,
    vehicle_id: i32,
    request: &SearchRequest,
) -> ServiceResult<SearchResult<MaintenanceRow>>
where
    R: VehicleReader + ?Sized,
{
    let vehicle_id = VehicleId::new(vehicle_id)?;
    let page = repo.search_maintenances(vehicle_id, request).await?;
    Ok(page.map(MaintenanceRow::from))
}

pub async fn add_maintenance<R>(repo: &R, form: AddMaintenanceForm) -> ServiceResult<MaintenanceRow>
where
    R: VehicleWriter + ?Sized,
{
    let payload = AddMaintenancePayload::try_from(form)?;

    let maintenance = repo
        .add_maintenance(payload.vehicle_id, &payload.maintenance)
        .await
        .map_err(|err| {
            log::error!("Failed to add maintenance to vehicle {}: {err}", payload.vehicle_id);
            err
        })?;

    Ok(MaintenanceRow::from(maintenance))
}

pub async fn download_vehicles<R>(repo: &R, request: &SearchRequest) -> ServiceResult<Download>
where
    R: VehicleReader + ?Sized,
{
    Ok(repo.download_vehicles(request).await?)
}

pub struct VehicleListSource<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> VehicleListSource<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ListSource for VehicleListSource<R>
where
    R: VehicleReader + ?Sized + 'static,
{
    type Item = Vehicle;

    async fn fetch(&self, request: SearchRequest) -> RepositoryResult<SearchResult<Vehicle>> {
        self.repo.search_vehicles(&request).await
    }
}

/// Maintenance sub-list of one vehicle.
pub struct MaintenanceListSource<R: ?Sized> {
    repo: Arc<R>,
    vehicle_id: VehicleId,
}

impl<R: ?Sized> MaintenanceListSource<R> {
    pub fn new(repo: Arc<R>, vehicle_id: VehicleId) -> Self {
        Self { repo, vehicle_id }
    }
}

#[async_trait]
impl<R> ListSource for MaintenanceListSource<R>
where
    R: VehicleReader + ?Sized + 'static,
{
    type Item = Maintenance;

    async fn fetch(&self, request: SearchRequest) -> RepositoryResult<SearchResult<Maintenance>> {
        self.repo
            .search_maintenances(self.vehicle_id, &request)
            .await
    }
}
