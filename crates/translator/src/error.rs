use thiserror::Error;

/// Content that cannot be represented on the destination protocol.
///
/// The ticket→bot path logs and drops these; the bot→ticket path reports a
/// client error. Neither path treats them as a fault of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedContent {
    #[error("unsupported media type: {0:?}")]
    MimeType(String),

    #[error("attachment carries no buttons")]
    EmptyButtonList,

    #[error("unsupported update kind: {0}")]
    UpdateKind(&'static str),

    #[error("malformed callback payload: {0}")]
    MalformedCallback(String),
}
