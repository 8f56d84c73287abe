//! Ticket-protocol side of the bridge: wire types for the helpdesk
//! platform's conversation messages, custom-token sign-in, and the delivery
//! client that posts a translated message into the right support request.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use {
    client::{HelpdeskClient, SenderContext},
    error::{Error, Result},
    types::{CHANNEL_NAME, Channel, MessageType, TicketAttributes, TicketMessage},
};
