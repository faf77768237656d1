use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::order::{Order, OrderDetail, OrderStatusUpdate};
use crate::domain::product::{NewProduct, Product, StockUpdate};
use crate::domain::registration_request::{Approval, RegistrationRequest, Rejection};
use crate::domain::types::{OrderId, ProductId, RegistrationRequestId, VehicleId};
use crate::domain::vehicle::{Maintenance, NewMaintenance, NewVehicle, Vehicle};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    Download, OrderReader, OrderWriter, ProductReader, ProductWriter, RegistrationRequestReader,
    RegistrationRequestWriter, VehicleReader, VehicleWriter,
};
use crate::search::request::{SearchRequest, SearchResult};

pub const ORDERS: &str = "orders";
pub const PRODUCTS: &str = "products";
pub const VEHICLES: &str = "vehicles";
pub const REGISTRATION_REQUESTS: &str = "registration-requests";

const ORDERS_FILE: &str = "pedidos.xlsx";
const PRODUCTS_FILE: &str = "productos.xlsx";
const VEHICLES_FILE: &str = "vehiculos.xlsx";
const REGISTRATION_REQUESTS_FILE: &str = "solicitudes.xlsx";

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Repository backed by the JSON REST backend.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpRepository {
    pub fn new(api_url: &str, token: Option<String>, timeout: Duration) -> RepositoryResult<Self> {
        let mut base_url = Url::parse(api_url.trim())?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &ClientConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_url,
            config.bearer_token().map(str::to_string),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RepositoryResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn execute(builder: RequestBuilder) -> RepositoryResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        log::debug!("{url} answered {status}: {body}");

        Err(RepositoryError::from_status(status, error_message(&body)))
    }

    async fn search<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &SearchRequest,
    ) -> RepositoryResult<SearchResult<T>> {
        let builder = self
            .request(Method::POST, &format!("{path}/search"))?
            .json(request);
        let response = Self::execute(builder).await?;
        Ok(response.json().await?)
    }

    async fn find<T: DeserializeOwned>(&self, path: &str) -> RepositoryResult<Option<T>> {
        match Self::execute(self.request(Method::GET, path)?).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> RepositoryResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path)?.json(body);
        let response = Self::execute(builder).await?;
        Ok(response.json().await?)
    }

    async fn download(
        &self,
        path: &str,
        request: &SearchRequest,
        default_name: &str,
    ) -> RepositoryResult<Download> {
        let builder = self
            .request(Method::POST, &format!("{path}/download"))?
            .json(request);
        let response = Self::execute(builder).await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| default_name.to_string());
        let bytes = response.bytes().await?.to_vec();

        log::debug!("Downloaded {file_name} ({} bytes)", bytes.len());
        Ok(Download { file_name, bytes })
    }
}

/// Extracts the `message` of a JSON error body, if it has a non-blank one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

/// Reads the plain `filename=` parameter of a `Content-Disposition` header.
pub fn file_name_from_disposition(value: &str) -> Option<String> {
    const KEY: &str = "filename=";

    value.split(';').map(str::trim).find_map(|part| {
        let key = part.get(..KEY.len())?;
        if !key.eq_ignore_ascii_case(KEY) {
            return None;
        }
        let name = part[KEY.len()..].trim().trim_matches('"').trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[async_trait]
impl OrderReader for HttpRepository {
    async fn search_orders(&self, request: &SearchRequest) -> RepositoryResult<SearchResult<Order>> {
        self.search(ORDERS, request).await
    }

    async fn get_order(&self, id: OrderId) -> RepositoryResult<Option<OrderDetail>> {
        self.find(&format!("{ORDERS}/{id}")).await
    }

    async fn download_orders(&self, request: &SearchRequest) -> RepositoryResult<Download> {
        self.download(ORDERS, request, ORDERS_FILE).await
    }
}

#[async_trait]
impl OrderWriter for HttpRepository {
    async fn update_order_status(
        &self,
        id: OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<Order> {
        self.send_json(Method::PATCH, &format!("{ORDERS}/{id}"), update)
            .await
    }
}

#[async_trait]
impl ProductReader for HttpRepository {
    async fn search_products(
        &self,
        request: &SearchRequest,
    ) -> RepositoryResult<SearchResult<Product>> {
        self.search(PRODUCTS, request).await
    }

    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.find(&format!("{PRODUCTS}/{id}")).await
    }

    async fn download_products(&self, request: &SearchRequest) -> RepositoryResult<Download> {
        self.download(PRODUCTS, request, PRODUCTS_FILE).await
    }
}

#[async_trait]
impl ProductWriter for HttpRepository {
    async fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        self.send_json(Method::POST, PRODUCTS, product).await
    }

    async fn update_stock(&self, id: ProductId, update: &StockUpdate) -> RepositoryResult<Product> {
        self.send_json(Method::PATCH, &format!("{PRODUCTS}/{id}"), update)
            .await
    }
}

#[async_trait]
impl VehicleReader for HttpRepository {
    async fn search_vehicles(
        &self,
        request: &SearchRequest,
    ) -> RepositoryResult<SearchResult<Vehicle>> {
        self.search(VEHICLES, request).await
    }

    async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        self.find(&format!("{VEHICLES}/{id}")).await
    }

    async fn download_vehicles(&self, request: &SearchRequest) -> RepositoryResult<Download> {
        self.download(VEHICLES, request, VEHICLES_FILE).await
    }

    async fn search_maintenances(
        &self,
        vehicle_id: VehicleId,
        request: &SearchRequest,
    ) -> RepositoryResult<SearchResult<Maintenance>> {
        self.search(&format!("{VEHICLES}/{vehicle_id}/maintenances"), request)
            .await
    }
}

#[async_trait]
impl VehicleWriter for HttpRepository {
    async fn create_vehicle(&self, vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        self.send_json(Method::POST, VEHICLES, vehicle).await
    }

    async fn add_maintenance(
        &self,
        vehicle_id: VehicleId,
        maintenance: &NewMaintenance,
    ) -> RepositoryResult<Maintenance> {
        self.send_json(
            Method::POST,
            &format!("{VEHICLES}/{vehicle_id}/maintenances"),
            maintenance,
        )
        .await
    }
}

#[async_trait]
impl RegistrationRequestReader for HttpRepository {
    async fn search_registration_requests(
        &self,
        request: &SearchRequest,
    ) -> RepositoryResult<SearchResult<RegistrationRequest>> {
        self.search(REGISTRATION_REQUESTS, request).await
    }

    async fn get_registration_request(
        &self,
        id: RegistrationRequestId,
    ) -> RepositoryResult<Option<RegistrationRequest>> {
        self.find(&format!("{REGISTRATION_REQUESTS}/{id}")).await
    }

    async fn download_registration_requests(
        &self,
        request: &SearchRequest,
    ) -> RepositoryResult<Download> {
        self.download(REGISTRATION_REQUESTS, request, REGISTRATION_REQUESTS_FILE)
            .await
    }
}

#[async_trait]
impl RegistrationRequestWriter for HttpRepository {
    async fn approve_registration_request(
        &self,
        id: RegistrationRequestId,
        approval: &Approval,
    ) -> RepositoryResult<RegistrationRequest> {
        self.send_json(
            Method::POST,
            &format!("{REGISTRATION_REQUESTS}/{id}/approve"),
            approval,
        )
        .await
    }

    async fn reject_registration_request(
        &self,
        id: RegistrationRequestId,
        rejection: &Rejection,
    ) -> RepositoryResult<RegistrationRequest> {
        self.send_json(
            Method::POST,
            &format!("{REGISTRATION_REQUESTS}/{id}/reject"),
            rejection,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let repo =
            HttpRepository::new("http://localhost:8080/api/v1", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            repo.base_url().join("orders/search").unwrap().as_str(),
            "http://localhost:8080/api/v1/orders/search"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpRepository::new("not a url", None, Duration::from_secs(1)),
            Err(RepositoryError::Unexpected(_))
        ));
    }

    #[test]
    fn disposition_file_names() {
        assert_eq!(
            file_name_from_disposition("attachment; filename=\"pedidos 2024.xlsx\""),
            Some("pedidos 2024.xlsx".to_string())
        );
        assert_eq!(
            file_name_from_disposition("attachment; FILENAME=stock.xlsx"),
            Some("stock.xlsx".to_string())
        );
        assert_eq!(file_name_from_disposition("attachment"), None);
        assert_eq!(file_name_from_disposition("attachment; filename=\"\""), None);
    }

    #[test]
    fn error_bodies_yield_messages() {
        assert_eq!(
            error_message(r#"{"message":" Stock insuficiente "}"#),
            Some("Stock insuficiente".to_string())
        );
        assert_eq!(error_message(r#"{"message":""}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
