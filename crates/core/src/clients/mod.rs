pub mod exchange_rate;
pub mod gateway;
pub mod pdf;
pub mod storage;

pub use exchange_rate::ExchangeRateClient;
pub use gateway::{GatewayIntent, MockGatewayClient};
pub use pdf::PdfClient;
pub use storage::StorageClient;
