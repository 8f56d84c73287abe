//! Bidirectional message translation between the two wire schemas.
//!
//! Both directions pass through [`canonical::CanonicalMessage`], a pivot
//! representation independent of either protocol: inbound payloads are
//! classified into the pivot, then rendered for the destination side.
//! Translation is pure; anything the destination protocol cannot represent
//! comes back as [`UnsupportedContent`] for the caller to branch on.

pub mod canonical;
pub mod error;
pub mod to_telegram;
pub mod to_ticket;

pub use {
    canonical::{Button, ButtonKind, CanonicalMessage, MediaRef},
    error::UnsupportedContent,
    to_telegram::to_telegram,
    to_ticket::to_ticket,
};
