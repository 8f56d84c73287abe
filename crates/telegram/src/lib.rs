//! Bot-protocol side of the bridge: wire types for the webhook envelope,
//! callback-token encoding, and the raw Bot API HTTP client.
//!
//! The bridge speaks the Bot API as plain JSON over reqwest; translated
//! messages are serialized exactly as the API expects them, so there is no
//! intermediate SDK layer between the translator and the wire.

pub mod callback;
pub mod client;
pub mod error;
pub mod outbound;
pub mod types;

pub use {
    callback::CallbackToken,
    client::TelegramClient,
    error::{Error, Result},
    outbound::TelegramOutbound,
    types::{InboundEvent, OutboundMessage, Update},
};
