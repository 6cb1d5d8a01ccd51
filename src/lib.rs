pub use ticklist_tui::cli;
pub use ticklist_tui::commands;
pub use ticklist_tui::config;
pub use ticklist_tui::tui;
pub use ticklist_tui::AppConfig;

pub use ticklist_core as core;
pub use ticklist_core::database as db;
pub use ticklist_core::model;

pub use ticklist_client as client;

pub use ticklist_server as server;
pub use ticklist_server::ServerConfig;
