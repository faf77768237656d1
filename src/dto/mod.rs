//! Row models projected from domain entities for display.

pub mod format;
pub mod orders;
pub mod products;
pub mod registration_requests;
pub mod vehicles;
