//! Client-side core of the back-office list views.
//!
//! Each list (orders, products, vehicles and their maintenances,
//! registration requests) keeps an immutable filter state, debounces edits
//! into backend searches and projects the responses into display rows.
//!
//! The `data` feature builds the network-free layer: domain entities, row
//! projection, forms, pagination and the search state/request/store types.
//! The `client` feature adds the HTTP repository, services and the search
//! orchestrator.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;
pub mod search;

#[cfg(feature = "client")]
pub mod error_conversions;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
