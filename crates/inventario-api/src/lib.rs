// inventario-api: Async Rust client for the inventory REST backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::InventoryClient;
pub use error::Error;
pub use models::{
    HealthStatus, Movement, MovementKind, MovementQuery, NewMovement, NewProduct, Product,
    ProductQuery, Statistics, UnknownMovementKind,
};
pub use transport::TransportConfig;
