use crate::app_state::AppState;
use crate::repositories::exchange_rate_repository::ExchangeRateRepository;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::exchange_rate_dto::{
    ExchangeRateDto, ExchangeRatesResponse, FxRefreshResponse,
};
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use baliquote_primitives::models::entities::exchange_rate::NewExchangeRate;
use chrono::Utc;
use diesel::prelude::*;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{info, warn};

pub struct ExchangeRateService;

impl ExchangeRateService {
    /// The FX API quotes units of each currency per rupiah; stored rates are
    /// rupiah per unit. Missing or non-positive rates are skipped.
    pub fn invert_rates(
        idr_based: &HashMap<String, f64>,
    ) -> (Vec<(CurrencyCode, f64)>, Vec<CurrencyCode>) {
        let mut inverted = Vec::new();
        let mut skipped = Vec::new();

        for currency in CurrencyCode::iter().filter(|c| !c.is_base()) {
            match idr_based
                .get(&currency.to_string())
                .copied()
                .filter(|r| r.is_finite() && *r > 0.0)
            {
                Some(rate) => inverted.push((currency, 1.0 / rate)),
                None => skipped.push(currency),
            }
        }

        (inverted, skipped)
    }

    pub async fn refresh_rates(state: &AppState) -> Result<FxRefreshResponse, ApiError> {
        let rates = state.fx.latest_rates(CurrencyCode::IDR).await?;
        let source = state.fx.source();

        let (inverted, skipped) = Self::invert_rates(&rates);
        if inverted.is_empty() {
            return Err(ApiError::Upstream(
                "FX API returned none of the supported currencies".into(),
            ));
        }

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let now = Utc::now();
        conn.transaction::<_, ApiError, _>(|conn| {
            for (currency, rate_to_idr) in &inverted {
                ExchangeRateRepository::upsert(
                    conn,
                    &NewExchangeRate {
                        currency_code: *currency,
                        rate_to_idr: *rate_to_idr,
                        source: source.clone(),
                        updated_at: now,
                    },
                )?;
            }
            Ok(())
        })?;

        if !skipped.is_empty() {
            warn!(?skipped, "FX refresh skipped currencies without a usable rate");
        }
        info!(updated = inverted.len(), %source, "Exchange rates refreshed");

        Ok(FxRefreshResponse {
            source,
            updated: inverted.into_iter().map(|(c, _)| c).collect(),
            skipped,
        })
    }

    pub fn list_rates(state: &AppState) -> Result<ExchangeRatesResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let rates = ExchangeRateRepository::list(&mut conn)?;

        Ok(ExchangeRatesResponse {
            rates: rates.into_iter().map(ExchangeRateDto::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_inverted_to_rupiah_per_unit() {
        let rates = HashMap::from([
            ("IDR".to_string(), 1.0),
            ("USD".to_string(), 0.0000625),
            ("JPY".to_string(), 0.0096),
            ("EUR".to_string(), 0.0),
        ]);

        let (inverted, skipped) = ExchangeRateService::invert_rates(&rates);
        let usd = inverted
            .iter()
            .find(|(c, _)| *c == CurrencyCode::USD)
            .map(|(_, r)| *r)
            .unwrap();

        assert!((usd - 16_000.0).abs() < 1e-6);
        assert!(inverted.iter().any(|(c, _)| *c == CurrencyCode::JPY));
        assert!(inverted.iter().all(|(c, _)| *c != CurrencyCode::IDR));
        assert!(skipped.contains(&CurrencyCode::EUR));
        assert!(skipped.contains(&CurrencyCode::GBP));
        assert!(!skipped.contains(&CurrencyCode::IDR));
    }
}
