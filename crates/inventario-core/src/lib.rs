// inventario-core: Client controller and reactive state between inventario-api and the TUI.

pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod notify;
pub mod store;
pub mod ui;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use controller::{ConnectionState, Controller};
pub use draft::{FieldKind, FieldSpec, MovementDraft, ProductDraft};
pub use error::CoreError;
pub use notify::{Banner, BannerLevel, Banners};
pub use store::{DataStore, Versioned};
pub use ui::{Modal, Tab, UiState};

// Wire types consumers need alongside the controller.
pub use inventario_api::{Movement, MovementKind, NewMovement, NewProduct, Product, Statistics};
