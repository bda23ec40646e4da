// Inventory backend HTTP client
//
// Wraps `reqwest::Client` with collection-URL construction and the two
// error shapes the backend produces: bare status codes on reads and a
// `{"error": "..."}` body on rejected writes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{
    ErrorBody, HealthStatus, Movement, MovementQuery, NewMovement, NewProduct, Product,
    ProductQuery, Statistics,
};
use crate::transport::TransportConfig;

const PRODUCTS: &str = "productos";
const MOVEMENTS: &str = "movimientos";
const STATISTICS: &str = "estadisticas";

/// Async client for the inventory REST API.
///
/// `base_url` is the API root (e.g. `http://192.168.5.59:5010/api`); every
/// collection lives directly beneath it. The client is cheap to clone.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl InventoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the API root and make sure it ends with `/` so that relative
    /// joins land beneath it instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `/health` sits at the server root, beside the API prefix:
    /// `http://host:5010/api/` → `http://host:5010/health`.
    fn health_url(&self) -> Result<Url, Error> {
        let trimmed = self.base_url.path().trim_end_matches('/');
        let parent = trimmed.rsplit_once('/').map_or("", |(head, _)| head);
        let mut url = self.base_url.clone();
        url.set_path(&format!("{parent}/health"));
        Ok(url)
    }

    // ── Products ─────────────────────────────────────────────────────

    /// `GET /productos`
    pub async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.get(self.url(PRODUCTS)?, &[]).await
    }

    /// `GET /productos?categoria=..&activo=..`
    pub async fn list_products_filtered(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, Error> {
        self.get(self.url(PRODUCTS)?, &query.params()).await
    }

    /// `POST /productos`
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), Error> {
        self.post(self.url(PRODUCTS)?, product).await
    }

    // ── Movements ────────────────────────────────────────────────────

    /// `GET /movimientos` (backend orders newest first).
    ///
    /// Rows with a `tipo` outside entrada/salida (the backend also stores
    /// `ajuste`) are logged and skipped; the rest are returned.
    pub async fn list_movements(&self) -> Result<Vec<Movement>, Error> {
        self.get_rows(self.url(MOVEMENTS)?, &[]).await
    }

    /// `GET /movimientos?producto_id=..&tipo=..`
    pub async fn list_movements_filtered(
        &self,
        query: &MovementQuery,
    ) -> Result<Vec<Movement>, Error> {
        self.get_rows(self.url(MOVEMENTS)?, &query.params()).await
    }

    /// `POST /movimientos`
    pub async fn create_movement(&self, movement: &NewMovement) -> Result<(), Error> {
        self.post(self.url(MOVEMENTS)?, movement).await
    }

    // ── Statistics / health ──────────────────────────────────────────

    /// `GET /estadisticas`
    pub async fn get_statistics(&self) -> Result<Statistics, Error> {
        self.get(self.url(STATISTICS)?, &[]).await
    }

    /// `GET /health` at the server root.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get(self.health_url()?, &[]).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.get_text(url, params).await?;
        decode(&body)
    }

    /// GET a JSON array, decoding each element on its own. Elements that
    /// do not decode are dropped with a warning.
    async fn get_rows<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let body = self.get_text(url, params).await?;
        let rows: Vec<serde_json::Value> = decode(&body)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable row");
                    None
                }
            })
            .collect())
    }

    async fn get_text(&self, url: Url, params: &[(&str, String)]) -> Result<String, Error> {
        debug!("GET {url} params={params:?}");

        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }

    async fn post<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());

        debug!(status = status.as_u16(), ?message, "POST rejected");
        Err(Error::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Decode a response body. The body preview goes to the log only; the
/// error message stays short enough for a banner.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        debug!(error = %e, preview, "response body did not decode");
        Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        }
    })
}
