pub mod app_config;
pub mod auth_details;
pub mod gateway_details;
pub mod storage_details;

pub use app_config::*;
pub use auth_details::*;
pub use gateway_details::*;
pub use storage_details::*;
