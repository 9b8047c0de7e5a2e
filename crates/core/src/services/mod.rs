pub mod agent_service;
pub mod automation_service;
pub mod client_service;
pub mod exchange_rate_service;
pub mod notification_service;
pub mod payment_service;
pub mod pdf_service;
pub mod pricing_service;
pub mod quote_service;
pub mod verification_service;
pub mod webhook_service;
