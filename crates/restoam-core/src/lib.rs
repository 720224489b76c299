//! restoam-core — domain model, list state machine, and REST client for the
//! RestoAM workorder service.
//!
//! # Conventions
//!
//! - **Errors**: fallible APIs return `Result` with [`error::ApiError`] or
//!   `anyhow::Result` at configuration boundaries; the filter store absorbs
//!   its own failures.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod filters;
pub mod links;
pub mod model;
pub mod store;

pub use client::{HttpApi, ListQuery, Page, WorkorderApi};
pub use controller::{DEFAULT_PAGE_SIZE, EmptyState, FILTER_KEY, ListController, PAGE_SIZES};
pub use error::ApiError;
pub use filters::FilterSet;
pub use model::{Priority, Status, Workorder};
pub use store::{FileStore, FilterStore, MemoryStore};
