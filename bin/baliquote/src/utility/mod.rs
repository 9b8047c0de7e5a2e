pub mod db_pool;
pub mod logging;
pub mod scheduled_tasks;
pub mod server;
pub mod shutdown;
pub mod tasks;
