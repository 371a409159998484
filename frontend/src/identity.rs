//! Works out who just logged in.
//!
//! The login endpoint may or may not echo the user id. When it does not, the
//! id is read from the `user_id` claim of the JWT it handed back. Signature
//! checking is the server's job; the claim is only used for display and for
//! restoring the session after a reload.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
enum TokenError {
    #[error("token is not a three-part JWT")]
    NotJwt,

    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not JSON claims: {0}")]
    Claims(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    user_id: Option<u64>,
}

fn claimed_user_id(token: &str) -> Result<Option<u64>, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        return Err(TokenError::NotJwt);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Claims = serde_json::from_slice(&bytes)?;
    Ok(claims.user_id)
}

/// The id reported by the server, else the token's `user_id` claim.
pub fn resolve_user_id(reported: Option<u64>, token: &str) -> Option<u64> {
    if reported.is_some() {
        return reported;
    }
    match claimed_user_id(token) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("could not read user id from token: {err}");
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn fake_jwt(claims: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_id_wins_over_claim() {
        let token = fake_jwt(r#"{"user_id":42}"#);
        assert_eq!(resolve_user_id(Some(7), &token), Some(7));
    }

    #[test]
    fn reads_user_id_claim() {
        let token = fake_jwt(r#"{"user_id":42,"username":"alice","exp":1700000000}"#);
        assert_eq!(resolve_user_id(None, &token), Some(42));
    }

    #[test]
    fn opaque_or_claimless_tokens_yield_none() {
        assert_eq!(resolve_user_id(None, "abc123"), None);
        assert_eq!(resolve_user_id(None, &fake_jwt(r#"{"sub":"alice"}"#)), None);
        assert_eq!(resolve_user_id(None, "a.!!!.c"), None);
    }
}
