//! Custom-token sign-in.
//!
//! The platform authenticates external chat users through
//! `signinWithCustomToken`: the bridge signs a short claims document with
//! the project's shared secret (HS256 JWS) and exchanges it for a session
//! token.

use {
    base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD},
    hmac::{Hmac, Mac},
    serde::Serialize,
    sha2::Sha256,
};

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Claims identifying the external chat user to the platform.
#[derive(Debug, Clone, Serialize)]
pub struct CustomClaims {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub sub: String,
    pub aud: String,
}

impl CustomClaims {
    /// Claims for a Telegram chat participant.
    pub fn telegram_user(
        chat_id: &str,
        first_name: &str,
        last_name: &str,
        audience: String,
    ) -> Self {
        Self {
            id: format!("telegram-{chat_id}"),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: "na@telegram.com".to_string(),
            sub: "userexternal".to_string(),
            aud: audience,
        }
    }
}

/// HS256 JWS over the claims, compact serialization.
pub fn sign_custom_token(claims: &CustomClaims, secret: &str) -> Result<String> {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{header}.{payload}");

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| Error::InvalidSecret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}
