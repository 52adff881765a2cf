//! Headless interaction core for an app-like marketplace client.

pub mod config;
pub mod content;
pub mod data;
pub mod logging;
pub mod trace;
pub mod ui;
