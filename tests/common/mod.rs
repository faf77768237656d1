//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use httpmock::MockServer;
use serde_json::{Value, json};

use backoffice_client::repository::HttpRepository;

pub const TOKEN: &str = "secret-token";

/// Repository pointed at `server`'s `/api` root.
pub fn repo(server: &MockServer, token: Option<&str>) -> HttpRepository {
    HttpRepository::new(
        &server.url("/api"),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("valid repository")
}

pub fn order_json(id: i32, status: &str, shipment_id: Option<i32>) -> Value {
    json!({
        "id": id,
        "orderNumber": format!("A-{id:04}"),
        "clientName": "Kiosco Don Luis",
        "createdAt": "2024-05-01T10:00:00",
        "total": 804,
        "status": status,
        "shipmentId": shipment_id,
        "itemsCount": 2
    })
}

pub fn registration_request_json(id: i32, status: &str) -> Value {
    json!({
        "id": id,
        "businessName": "Distribuidora Sur",
        "documentNumber": "30712345678",
        "email": "compras@sur.com.ar",
        "phone": null,
        "createdAt": "2024-11-02T09:00:00",
        "status": status
    })
}

pub fn maintenance_json(id: i32, vehicle_id: i32) -> Value {
    json!({
        "id": id,
        "vehicleId": vehicle_id,
        "date": "2024-02-01",
        "description": "Cambio de aceite",
        "cost": 45000,
        "mileage": 81000
    })
}
