use crate::models::app_state::auth_details::AuthInfo;
use crate::models::app_state::gateway_details::GatewayInfo;
use crate::models::app_state::storage_details::StorageInfo;
use eyre::{eyre, Report};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth_details: AuthInfo,

    pub app_url: String,

    pub quote_validity_days: i64,

    pub default_markup_bps: i32,

    pub gateway_details: GatewayInfo,

    pub storage_details: StorageInfo,

    pub pdf_render_url: String,

    pub exchange_api_url: String,

    pub fx_refresh_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        let default_markup_bps: i32 = env::var("DEFAULT_MARKUP_BPS")
            .unwrap_or_else(|_| "1500".into())
            .parse()?;

        if !(0..=10_000).contains(&default_markup_bps) {
            return Err(eyre!("DEFAULT_MARKUP_BPS must be between 0 and 10000"));
        }

        Ok(Self {
            auth_details: AuthInfo::new()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            quote_validity_days: env::var("QUOTE_VALIDITY_DAYS")
                .unwrap_or_else(|_| "14".into())
                .parse()?,

            default_markup_bps,

            gateway_details: GatewayInfo::new()?,

            storage_details: StorageInfo::new()?,

            pdf_render_url: env::var("PDF_RENDER_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            exchange_api_url: env::var("EXCHANGE_API_URL")
                .unwrap_or_else(|_| "https://api.exchangerate-api.com/v4/latest".into()),

            fx_refresh_interval_secs: env::var("FX_REFRESH_INTERVAL_SECS")
                .unwrap_or_else(|_| "21600".into())
                .parse()?,
        })
    }
}
