pub mod agent_dto;
pub mod client_dto;
pub mod exchange_rate_dto;
pub mod health_dto;
pub mod notification_dto;
pub mod payment_dto;
pub mod quote_dto;

pub use agent_dto::*;
pub use client_dto::*;
pub use exchange_rate_dto::*;
pub use health_dto::*;
pub use notification_dto::*;
pub use payment_dto::*;
pub use quote_dto::*;
