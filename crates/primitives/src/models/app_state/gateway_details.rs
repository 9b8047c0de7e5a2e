use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct GatewayInfo {
    pub webhook_secret: SecretString,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
}

impl GatewayInfo {
    pub fn new() -> Result<Self, Report> {
        let min_latency_ms: u64 = env::var("GATEWAY_MIN_LATENCY_MS")
            .unwrap_or_else(|_| "100".into())
            .parse()?;
        let max_latency_ms: u64 = env::var("GATEWAY_MAX_LATENCY_MS")
            .unwrap_or_else(|_| "600".into())
            .parse()?;

        if max_latency_ms < min_latency_ms {
            return Err(eyre!(
                "GATEWAY_MAX_LATENCY_MS must not be lower than GATEWAY_MIN_LATENCY_MS"
            ));
        }

        Ok(Self {
            webhook_secret: SecretString::from(
                env::var("GATEWAY_WEBHOOK_SECRET")
                    .map_err(|_| eyre!("GATEWAY_WEBHOOK_SECRET must be set"))?,
            ),
            min_latency_ms,
            max_latency_ms,
        })
    }
}
