//! Domain entities of the back-office lists.

pub mod order;
pub mod product;
pub mod registration_request;
pub mod status;
pub mod types;
pub mod vehicle;
