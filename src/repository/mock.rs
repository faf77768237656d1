//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::order::{Order, OrderDetail, OrderStatusUpdate};
use crate::domain::product::{NewProduct, Product, StockUpdate};
use crate::domain::registration_request::{Approval, RegistrationRequest, Rejection};
use crate::domain::types::{OrderId, ProductId, RegistrationRequestId, VehicleId};
use crate::domain::vehicle::{Maintenance, NewMaintenance, NewVehicle, Vehicle};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    Download, OrderReader, OrderWriter, ProductReader, ProductWriter, RegistrationRequestReader,
    RegistrationRequestWriter, VehicleReader, VehicleWriter,
};
use crate::search::request::{SearchRequest, SearchResult};

mock! {
    pub Repository {}

    #[async_trait]
    impl OrderReader for Repository {
        async fn search_orders(&self, request: &SearchRequest) -> RepositoryResult<SearchResult<Order>>;
        async fn get_order(&self, id: OrderId) -> RepositoryResult<Option<OrderDetail>>;
        async fn download_orders(&self, request: &SearchRequest) -> RepositoryResult<Download>;
    }

    #[async_trait]
    impl OrderWriter for Repository {
        async fn update_order_status(
            &self,
            id: OrderId,
            update: &OrderStatusUpdate,
        ) -> RepositoryResult<Order>;
    }

    #[async_trait]
    impl ProductReader for Repository {
        async fn search_products(
            &self,
            request: &SearchRequest,
        ) -> RepositoryResult<SearchResult<Product>>;
        async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        async fn download_products(&self, request: &SearchRequest) -> RepositoryResult<Download>;
    }

    #[async_trait]
    impl ProductWriter for Repository {
        async fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
        async fn update_stock(&self, id: ProductId, update: &StockUpdate) -> RepositoryResult<Product>;
    }

    #[async_trait]
    impl VehicleReader for Repository {
        async fn search_vehicles(
            &self,
            request: &SearchRequest,
        ) -> RepositoryResult<SearchResult<Vehicle>>;
        async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
        async fn download_vehicles(&self, request: &SearchRequest) -> RepositoryResult<Download>;
        async fn search_maintenances(
            &self,
            vehicle_id: VehicleId,
            request: &SearchRequest,
        ) -> RepositoryResult<SearchResult<Maintenance>>;
    }

    #[async_trait]
    impl VehicleWriter for Repository {
        async fn create_vehicle(&self, vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
        async fn add_maintenance(
            &self,
            vehicle_id: VehicleId,
            maintenance: &NewMaintenance,
        ) -> RepositoryResult<Maintenance>;
    }

    #[async_trait]
    impl RegistrationRequestReader for Repository {
        async fn search_registration_requests(
            &self,
            request: &SearchRequest,
        ) -> RepositoryResult<SearchResult<RegistrationRequest>>;
        async fn get_registration_request(
            &self,
            id: RegistrationRequestId,
        ) -> RepositoryResult<Option<RegistrationRequest>>;
        async fn download_registration_requests(
            &self,
            request: &SearchRequest,
        ) -> RepositoryResult<Download>;
    }

    #[async_trait]
    impl RegistrationRequestWriter for Repository {
        async fn approve_registration_request(
            &self,
            id: RegistrationRequestId,
            approval: &Approval,
        ) -> RepositoryResult<RegistrationRequest>;
        async fn reject_registration_request(
            &self,
            id: RegistrationRequestId,
            rejection: &Rejection,
        ) -> RepositoryResult<RegistrationRequest>;
    }
}
