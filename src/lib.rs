//! Inventory REST API: CRUD over products, suppliers, and orders backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{EntityDef, Settings, ORDERS, PRODUCTS, SUPPLIERS};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, entity_routes};
pub use service::Repository;
pub use state::AppState;
pub use store::{Gateway, PgStore};
