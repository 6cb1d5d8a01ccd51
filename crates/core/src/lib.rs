pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod model;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use filter::{compute_display, DisplayView};
pub use model::*;
pub use services::TasksService;
pub use store::{ServiceStore, TaskStore};
