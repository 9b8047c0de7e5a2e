use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct StorageInfo {
    pub storage_url: String,
    pub service_key: SecretString,
    pub proof_bucket: String,
    pub pdf_bucket: String,
    pub max_upload_bytes: usize,
}

impl StorageInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            storage_url: env::var("STORAGE_URL")
                .map_err(|_| eyre!("STORAGE_URL environment variable must be set"))?,
            service_key: SecretString::from(
                env::var("STORAGE_SERVICE_KEY")
                    .map_err(|_| eyre!("STORAGE_SERVICE_KEY environment variable must be set"))?,
            ),
            proof_bucket: env::var("STORAGE_PROOF_BUCKET")
                .unwrap_or_else(|_| "payment-proofs".into()),
            pdf_bucket: env::var("STORAGE_PDF_BUCKET").unwrap_or_else(|_| "quote-pdfs".into()),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "5242880".into())
                .parse()?,
        })
    }
}
