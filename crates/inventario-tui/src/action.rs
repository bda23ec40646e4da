//! Actions flowing through the TUI event loop.

use std::sync::Arc;

use inventario_core::{
    Banners, ConnectionState, Modal, Movement, MovementDraft, Product, ProductDraft, Statistics,
    Tab, UiState,
};

/// Every state change in the TUI goes through one of these.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────────
    Quit,
    Render,
    Resize(u16, u16),

    // ── Navigation ───────────────────────────────────────────────
    SwitchTab(Tab),
    OpenModal(Modal),
    CloseModal(Modal),
    /// Mouse press outside the front modal's content box.
    ClickOutside(Modal),
    /// Open the movement form pre-filled for a product.
    NewMovementFor(i64),

    // ── Backend ──────────────────────────────────────────────────
    Reload,
    SubmitProduct(ProductDraft),
    SubmitMovement(MovementDraft),
    /// A submit finished, successfully or not.
    SubmitFinished(Modal),

    // ── Controller state ─────────────────────────────────────────
    ProductsUpdated(Arc<Vec<Product>>),
    MovementsUpdated(Arc<Vec<Movement>>),
    StatisticsUpdated(Arc<Statistics>),
    UiUpdated(UiState),
    BannersUpdated(Banners),
    ConnectionChanged(ConnectionState),

    /// Dismiss the newest banner.
    DismissBanner,
}
