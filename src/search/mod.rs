//! Search core shared by every paginated list.
//!
//! `state`, `request` and `store` are plain data and build with the `data`
//! feature alone; the debounce trigger and the orchestrator need tokio.

#[cfg(feature = "client")]
pub mod orchestrator;
pub mod request;
pub mod state;
pub mod store;
#[cfg(feature = "client")]
pub mod trigger;
