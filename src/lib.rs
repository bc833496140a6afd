pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod preferences;
pub mod services;
pub mod theme;
pub mod types;
pub mod ui;
pub mod views;
