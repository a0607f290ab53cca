pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod guide;
pub mod model;
pub mod mood_log;
pub mod seed;
pub mod status;
pub mod storage;
pub mod summary;
pub mod task_store;
pub mod week;

pub use dashboard::{Dashboard, DashboardSettings};
pub use error::AppError;
