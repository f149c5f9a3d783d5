//! Configuration loading

pub mod config;

pub use config::Config;
