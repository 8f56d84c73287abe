//! HTTP surface and inbound routing for the deskrelay bridge.
//!
//! Two webhook endpoints face the outside world: `/helpdesk` receives the
//! ticket platform's subscription events and `/telegram` receives the Bot
//! API's updates. Each handler decides skip-vs-forward on the envelope
//! shape, translates what crosses, and hands the result to the matching
//! outbound client. `/install` and `/disconnect` manage the per-project
//! settings record.

pub mod helpdesk_routes;
pub mod install_routes;
pub mod server;
pub mod state;
pub mod telegram_routes;

pub use {
    server::{Status, build_app, serve},
    state::AppState,
};
