pub mod cli;
pub mod commands;
pub mod config;
pub mod tui;

pub use ticklist_core as core;
pub use ticklist_core::database as db;
pub use ticklist_core::model;

pub use ticklist_core::AppConfig;
