use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::exchange_rate_dto::FxApiResponse;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone)]
pub struct ExchangeRateClient {
    http: Client,
    base_url: Url,
}

impl ExchangeRateClient {
    pub fn new(http: Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::Internal("Invalid FX base URL".into()))?;
        Ok(Self { http, base_url })
    }

    /// Host of the FX API, stored as the `source` of each rate.
    pub fn source(&self) -> String {
        self.base_url.host_str().unwrap_or("exchange-api").to_string()
    }

    /// Units of each currency per one unit of `base`.
    pub async fn latest_rates(&self, base: CurrencyCode) -> Result<HashMap<String, f64>, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Internal("Invalid FX URL path".into()))?
            .pop_if_empty()
            .push(base.to_string().as_str());

        let resp = self
            .http
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("FX API unreachable: {}", e)))?;

        let status = resp.status();
        let body = resp
            .json::<FxApiResponse>()
            .await
            .map_err(|_| ApiError::Upstream("Invalid FX response".into()))?;

        if !status.is_success() {
            return Err(ApiError::Upstream(
                body.error.unwrap_or_else(|| format!("FX API returned {}", status)),
            ));
        }

        if body.rates.is_empty() {
            return Err(ApiError::Upstream("FX API returned no rates".into()));
        }

        Ok(body.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reads_rates_for_base_currency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/IDR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "IDR",
                "rates": { "IDR": 1.0, "USD": 0.0000625 }
            })))
            .mount(&server)
            .await;

        let client =
            ExchangeRateClient::new(Client::new(), &format!("{}/v4/latest", server.uri())).unwrap();
        let rates = client.latest_rates(CurrencyCode::IDR).await.unwrap();

        assert_eq!(rates.get("USD").copied(), Some(0.0000625));
        assert_eq!(client.source(), "127.0.0.1");
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({ "error": "quota" })),
            )
            .mount(&server)
            .await;

        let client = ExchangeRateClient::new(Client::new(), &server.uri()).unwrap();
        let err = client.latest_rates(CurrencyCode::IDR).await.unwrap_err();

        assert!(matches!(err, ApiError::Upstream(msg) if msg == "quota"));
    }
}
