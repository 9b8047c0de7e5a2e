pub mod app;
pub mod config;
pub mod handlers;

pub use app::create_router;
