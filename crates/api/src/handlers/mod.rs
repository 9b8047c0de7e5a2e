pub mod admin_agents;
pub mod admin_notifications;
pub mod admin_payments;
pub mod agent_profile;
pub mod automation;
pub mod clients;
pub mod exchange_rates;
pub mod gateway_webhook;
pub mod health;
pub mod manual_payment;
pub mod notifications;
pub mod payment_intent;
pub mod payments;
pub mod quote_actions;
pub mod quote_pdf;
pub mod quotes;
