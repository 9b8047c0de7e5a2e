pub mod agent_repository;
pub mod client_repository;
pub mod exchange_rate_repository;
pub mod notification_repository;
pub mod payment_repository;
pub mod quote_item_repository;
pub mod quote_repository;
