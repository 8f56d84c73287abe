//! Shared runtime configuration for the deskrelay bridge.

pub mod config;

pub use config::BridgeConfig;
