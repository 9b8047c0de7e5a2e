pub mod agent;
pub mod client;
pub mod enum_types;
pub mod exchange_rate;
pub mod notification;
pub mod payment;
pub mod quote;
pub mod quote_items;

pub use agent::*;
pub use client::*;
pub use enum_types::*;
pub use exchange_rate::*;
pub use notification::*;
pub use payment::*;
pub use quote::*;
pub use quote_items::*;
