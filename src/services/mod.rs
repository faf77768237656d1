//! Use cases driven by the list views and their action dialogs.
//!
//! Services are generic over the repository traits, convert forms into typed
//! payloads before any request is made and translate repository failures
//! into [`ServiceError`]s.

pub mod errors;
pub mod export;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod registration_requests;
pub mod vehicles;

pub use errors::{ServiceError, ServiceResult};
