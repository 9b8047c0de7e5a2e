use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

use crate::clients::{ExchangeRateClient, MockGatewayClient, PdfClient, StorageClient};
use eyre::Result;
pub use baliquote_primitives::models::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub fx: ExchangeRateClient,
    pub gateway: MockGatewayClient,
    pub storage: StorageClient,
    pub pdf: PdfClient,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let fx = ExchangeRateClient::new(http.clone(), &config.exchange_api_url)?;

        let gateway = MockGatewayClient::new(&config.gateway_details);

        let storage = StorageClient::new(http.clone(), &config.storage_details)?;

        let pdf = PdfClient::new(http.clone(), &config.pdf_render_url)?;

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            fx,
            gateway,
            storage,
            pdf,
        }))
    }
}
