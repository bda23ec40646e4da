// ── Client controller ──
//
// Single owner of application state. Loads the three backend resources
// concurrently, submits creations, and holds navigation and banner state.
// Every failure is caught here and turned into a banner; nothing
// propagates to the caller as a crash.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use inventario_api::{InventoryClient, NewMovement, NewProduct};

use crate::config::ClientConfig;
use crate::draft::{MovementDraft, ProductDraft};
use crate::error::CoreError;
use crate::notify::{BannerLevel, Banners};
use crate::store::DataStore;
use crate::ui::{Modal, Tab, UiState};

const PRODUCT_CREATED: &str = "Producto creado correctamente";
const MOVEMENT_CREATED: &str = "Movimiento registrado correctamente";
const PRODUCT_FALLBACK: &str = "Error al crear producto";
const MOVEMENT_FALLBACK: &str = "Error al registrar movimiento";

// ── ConnectionState ──────────────────────────────────────────────

/// Result of the last health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Unknown,
    Online,
    Offline,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`; every event handler gets
/// its own clone. State lives in `watch` channels so front-ends can
/// subscribe instead of polling.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    client: InventoryClient,
    store: DataStore,
    ui: watch::Sender<UiState>,
    banners: watch::Sender<Banners>,
    connection: watch::Sender<ConnectionState>,
}

impl Controller {
    /// Build the controller. Does no I/O; call [`start`](Self::start) to
    /// run the initial load.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = InventoryClient::new(&config.api_url, &config.transport())?;
        let (ui, _) = watch::channel(UiState::default());
        let (banners, _) = watch::channel(Banners::default());
        let (connection, _) = watch::channel(ConnectionState::Unknown);

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: DataStore::new(),
                ui,
                banners,
                connection,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Initial load: probe the backend and fetch everything.
    pub async fn start(&self) {
        info!(api_url = %self.inner.client.base_url(), "starting inventory client");
        tokio::join!(self.check_health(), self.load_data());
    }

    // ── Navigation ───────────────────────────────────────────────

    pub fn switch_tab(&self, tab: Tab) {
        if self.inner.ui.send_if_modified(|ui| ui.switch_tab(tab)) {
            debug!(%tab, "switched tab");
        }
    }

    pub fn open_modal(&self, modal: Modal) {
        self.inner.ui.send_if_modified(|ui| ui.open_modal(modal));
    }

    pub fn close_modal(&self, modal: Modal) {
        self.inner.ui.send_if_modified(|ui| ui.close_modal(modal));
    }

    /// A click landed outside `modal`'s content area.
    pub fn click_outside(&self, modal: Modal) {
        if self.inner.ui.borrow().is_open(modal) {
            debug!(%modal, "click outside modal");
            self.close_modal(modal);
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.inner.ui.borrow().clone()
    }

    pub fn subscribe_ui(&self) -> watch::Receiver<UiState> {
        self.inner.ui.subscribe()
    }

    // ── Data loading ─────────────────────────────────────────────

    /// Fetch products, movements and statistics as three independent tasks.
    ///
    /// Each fetch reports its own failure; this only reports tasks that
    /// panicked or were cancelled.
    pub async fn load_data(&self) {
        let products = self.spawn_load(|c| async move { c.load_products().await });
        let movements = self.spawn_load(|c| async move { c.load_movements().await });
        let statistics = self.spawn_load(|c| async move { c.load_statistics().await });

        let (products, movements, statistics) = tokio::join!(products, movements, statistics);
        for result in [products, movements, statistics] {
            if let Err(e) = result {
                warn!(error = %e, "load task failed");
                self.show_error(format!("Error al cargar datos: {e}"));
            }
        }
        info!("load cycle complete");
    }

    fn spawn_load<F, Fut>(&self, load: F) -> JoinHandle<()>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(load(self.clone()))
    }

    /// `GET /productos`, replacing the product list on success.
    pub async fn load_products(&self) {
        let store = &self.inner.store;
        let generation = store.reserve_products();
        match self.inner.client.list_products().await {
            Ok(products) => {
                let count = products.len();
                if store.apply_products(generation, products) {
                    debug!(generation, count, "products updated");
                } else {
                    debug!(generation, "dropping stale products response");
                }
            }
            Err(e) => self.report_load_failure("productos", e.into()),
        }
    }

    /// `GET /movimientos`, replacing the movement list on success.
    pub async fn load_movements(&self) {
        let store = &self.inner.store;
        let generation = store.reserve_movements();
        match self.inner.client.list_movements().await {
            Ok(movements) => {
                let count = movements.len();
                if store.apply_movements(generation, movements) {
                    debug!(generation, count, "movements updated");
                } else {
                    debug!(generation, "dropping stale movements response");
                }
            }
            Err(e) => self.report_load_failure("movimientos", e.into()),
        }
    }

    /// `GET /estadisticas`, replacing the statistics on success.
    pub async fn load_statistics(&self) {
        let store = &self.inner.store;
        let generation = store.reserve_statistics();
        match self.inner.client.get_statistics().await {
            Ok(statistics) => {
                if store.apply_statistics(generation, statistics) {
                    debug!(generation, "statistics updated");
                } else {
                    debug!(generation, "dropping stale statistics response");
                }
            }
            Err(e) => self.report_load_failure("estadísticas", e.into()),
        }
    }

    fn report_load_failure(&self, resource: &str, err: CoreError) {
        warn!(resource, error = %err, "load failed");
        self.show_error(format!("Error al cargar {resource}: {err}"));
    }

    // ── Mutations ────────────────────────────────────────────────

    /// `POST /productos`. On success closes the product modal and reloads
    /// everything; on failure the modal stays open.
    pub async fn add_product(&self, product: &NewProduct) -> Result<(), CoreError> {
        let result = self
            .inner
            .client
            .create_product(product)
            .await
            .map_err(|e| CoreError::from_write(e, PRODUCT_FALLBACK));
        self.finish_write(result, Modal::NewProduct, PRODUCT_CREATED)
            .await
    }

    /// `POST /movimientos`. On success closes the movement modal and
    /// reloads everything; on failure the modal stays open.
    pub async fn add_movement(&self, movement: &NewMovement) -> Result<(), CoreError> {
        let result = self
            .inner
            .client
            .create_movement(movement)
            .await
            .map_err(|e| CoreError::from_write(e, MOVEMENT_FALLBACK));
        self.finish_write(result, Modal::NewMovement, MOVEMENT_CREATED)
            .await
    }

    /// Validate a product form and submit it.
    pub async fn submit_product(&self, draft: &ProductDraft) -> Result<(), CoreError> {
        match draft.to_payload() {
            Ok(product) => self.add_product(&product).await,
            Err(e) => Err(self.reject_draft(e)),
        }
    }

    /// Validate a movement form and submit it.
    pub async fn submit_movement(&self, draft: &MovementDraft) -> Result<(), CoreError> {
        match draft.to_payload() {
            Ok(movement) => self.add_movement(&movement).await,
            Err(e) => Err(self.reject_draft(e)),
        }
    }

    fn reject_draft(&self, err: CoreError) -> CoreError {
        debug!(error = %err, "form rejected");
        self.show_error(err.to_string());
        err
    }

    async fn finish_write(
        &self,
        result: Result<(), CoreError>,
        modal: Modal,
        success: &str,
    ) -> Result<(), CoreError> {
        match result {
            Ok(()) => {
                info!(%modal, "{success}");
                self.show_success(success);
                self.close_modal(modal);
                self.load_data().await;
                Ok(())
            }
            Err(e) => {
                warn!(%modal, error = %e, "write failed");
                self.show_error(e.to_string());
                Err(e)
            }
        }
    }

    // ── Health ───────────────────────────────────────────────────

    /// `GET /health`. A failure is logged and shown as offline, never fatal.
    pub async fn check_health(&self) -> ConnectionState {
        let state = match self.inner.client.health().await {
            Ok(health) if health.is_ok() => ConnectionState::Online,
            Ok(health) => {
                warn!(status = %health.status, "backend reports unhealthy");
                ConnectionState::Offline
            }
            Err(e) => {
                warn!(error = %e, "health check failed");
                ConnectionState::Offline
            }
        };
        self.inner.connection.send_replace(state);
        state
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.inner.connection.borrow()
    }

    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection.subscribe()
    }

    // ── Banners ──────────────────────────────────────────────────

    /// Show an error banner for five seconds. Returns its id.
    pub fn show_error(&self, message: impl Into<String>) -> u64 {
        self.notify(BannerLevel::Error, message.into())
    }

    /// Show a success banner for three seconds. Returns its id.
    pub fn show_success(&self, message: impl Into<String>) -> u64 {
        self.notify(BannerLevel::Success, message.into())
    }

    pub fn dismiss_banner(&self, id: u64) {
        self.inner.banners.send_if_modified(|b| b.dismiss(id));
    }

    pub fn banners(&self) -> Banners {
        self.inner.banners.borrow().clone()
    }

    pub fn subscribe_banners(&self) -> watch::Receiver<Banners> {
        self.inner.banners.subscribe()
    }

    fn notify(&self, level: BannerLevel, message: String) -> u64 {
        let mut id = 0;
        self.inner.banners.send_modify(|b| id = b.push(level, message));

        // Expiry timer; without a runtime the banner stays until dismissed.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let inner = Arc::clone(&self.inner);
            handle.spawn(async move {
                tokio::time::sleep(level.ttl()).await;
                inner.banners.send_if_modified(|b| b.dismiss(id));
            });
        }
        id
    }
}
