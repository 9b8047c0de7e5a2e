use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::app_state::GatewayInfo;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use rand::Rng;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Payment intent as handed back by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayIntent {
    pub id: String,
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: CurrencyCode,
}

/// Stand-in for a card processor. Intents are minted locally after a short
/// random delay; their outcome arrives later through the webhook.
#[derive(Clone)]
pub struct MockGatewayClient {
    min_latency_ms: u64,
    max_latency_ms: u64,
}

impl MockGatewayClient {
    pub fn new(config: &GatewayInfo) -> Self {
        Self {
            min_latency_ms: config.min_latency_ms,
            max_latency_ms: config.max_latency_ms,
        }
    }

    pub async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: CurrencyCode,
        quote_reference: &str,
    ) -> Result<GatewayIntent, ApiError> {
        if amount_minor <= 0 {
            return Err(ApiError::BadRequest(
                "Payment amount must be greater than zero".into(),
            ));
        }

        let (delay, secret) = {
            let mut rng = rand::thread_rng();
            let delay = rng.gen_range(self.min_latency_ms..=self.max_latency_ms);
            let secret: [u8; 12] = rng.gen();
            (delay, secret)
        };

        tokio::time::sleep(Duration::from_millis(delay)).await;

        let id = format!("pi_mock_{}", Uuid::new_v4().simple());
        let client_secret = format!("{}_secret_{}", id, hex::encode(secret));

        info!(
            intent_id = %id,
            quote = %quote_reference,
            amount_minor,
            %currency,
            "Gateway intent created"
        );

        Ok(GatewayIntent {
            id,
            client_secret,
            amount_minor,
            currency,
        })
    }
}
