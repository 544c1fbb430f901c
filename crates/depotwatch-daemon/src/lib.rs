pub mod config;
pub mod poller;
pub mod render;
pub mod services;
pub mod watcher;

pub use config::Config;
