use crate::models::entities::enum_types::CurrencyCode;
use crate::models::entities::exchange_rate::ExchangeRate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Body returned by the public FX API for a base currency.
#[derive(Debug, Deserialize)]
pub struct FxApiResponse {
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateDto {
    pub currency_code: CurrencyCode,
    #[schema(example = 16250.0)]
    pub rate_to_idr: f64,
    pub source: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ExchangeRate> for ExchangeRateDto {
    fn from(rate: ExchangeRate) -> Self {
        Self {
            currency_code: rate.currency_code,
            rate_to_idr: rate.rate_to_idr,
            source: rate.source,
            updated_at: rate.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRatesResponse {
    pub rates: Vec<ExchangeRateDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FxRefreshResponse {
    pub source: String,
    pub updated: Vec<CurrencyCode>,
    pub skipped: Vec<CurrencyCode>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpireQuotesResponse {
    pub expired: usize,
}
