//! Anti-forgery tokens for HTML form submissions.
//!
//! A token is `<issued_at>.<nonce>.<hex hmac-sha256(secret, issued_at.nonce)>`.
//! The same token is handed out twice: in the form's hidden field and in a
//! cookie. A submission is accepted only when both copies are present and
//! equal, the signature verifies against the application key, and the token
//! is younger than the configured lifetime.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Form field carrying the token.
pub const TOKEN_FIELD: &str = "_token";

/// Cookie carrying the second copy of the token.
pub const COOKIE_NAME: &str = "formgate_csrf";

/// Length of the random nonce (alphanumeric characters).
pub const NONCE_LENGTH: usize = 40;

/// Tolerated clock difference for tokens stamped slightly in the future.
const CLOCK_SKEW_SECS: i64 = 60;

type HmacSha256 = Hmac<Sha256>;

/// Why a submission's token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("no token was submitted")]
    Missing,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token does not match the cookie")]
    CookieMismatch,
}

// ---------------------------------------------------------------------------
// Issue / verify
// ---------------------------------------------------------------------------

/// Issue a fresh token signed with `secret`, stamped with the current time.
pub fn issue_token(secret: &[u8]) -> String {
    issue_token_at(secret, chrono::Utc::now().timestamp())
}

/// Issue a token stamped with `issued_at` (unix seconds).
pub fn issue_token_at(secret: &[u8], issued_at: i64) -> String {
    let nonce: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect();
    let payload = format!("{issued_at}.{nonce}");
    let signature = hex::encode(sign(secret, &payload));
    format!("{payload}.{signature}")
}

/// Check a single token: well-formed, signed with `secret`, and no older
/// than `max_age_secs` at `now` (unix seconds).
pub fn verify_token(secret: &[u8], token: &str, max_age_secs: i64, now: i64) -> Result<(), TokenError> {
    let (payload, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
    let (issued_at, nonce) = payload.split_once('.').ok_or(TokenError::Malformed)?;
    let issued_at: i64 = issued_at.parse().map_err(|_| TokenError::Malformed)?;
    if nonce.len() != NONCE_LENGTH || !nonce.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TokenError::Malformed);
    }
    let signature = hex::decode(signature).ok_or(TokenError::Malformed)?;
    mac(secret, payload)
        .verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let age = now - issued_at;
    if age > max_age_secs || age < -CLOCK_SKEW_SECS {
        return Err(TokenError::Expired);
    }
    Ok(())
}

/// Check a form submission against its cookie (double-submit).
///
/// `submitted` is the hidden-field value and `cookie` the cookie value; both
/// must carry the same valid token.
pub fn verify_submission(
    secret: &[u8],
    submitted: Option<&str>,
    cookie: Option<&str>,
    max_age_secs: i64,
    now: i64,
) -> Result<(), TokenError> {
    let submitted = submitted.filter(|t| !t.is_empty()).ok_or(TokenError::Missing)?;
    let cookie = cookie.ok_or(TokenError::CookieMismatch)?;
    if !constant_time_eq(submitted.as_bytes(), cookie.as_bytes()) {
        return Err(TokenError::CookieMismatch);
    }
    verify_token(secret, submitted, max_age_secs, now)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn mac(secret: &[u8], payload: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    mac
}

fn sign(secret: &[u8], payload: &str) -> Vec<u8> {
    mac(secret, payload).finalize().into_bytes().to_vec()
}

// ---------------------------------------------------------------------------
// hex helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string; `None` on odd length or non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}
