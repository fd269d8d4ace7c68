//! Telegram login widget assertion checks.
//!
//! The widget redirects the browser with the user's profile fields and a
//! `hash` in the query string. The hash is an HMAC-SHA256 over the "data check
//! string" (every other field as `key=value`, sorted by key, joined with `\n`)
//! keyed with `SHA-256(bot_token)`.
//!
//! Every failure path here resolves to a rejection; nothing panics on
//! attacker-controlled input.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const HASH_FIELD: &str = "hash";
pub const AUTH_DATE_FIELD: &str = "auth_date";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing hash")]
    MissingHash,
    #[error("invalid signing key")]
    InvalidKey,
    #[error("hash mismatch")]
    HashMismatch,
}

/// Build the data check string: all fields but `hash`, sorted by key, one
/// `key=value` per line.
#[must_use]
pub fn data_check_string(assertion: &HashMap<String, String>) -> String {
    assertion
        .iter()
        .filter(|(key, _)| key.as_str() != HASH_FIELD)
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase hex HMAC-SHA256 of `check_string`, keyed with `SHA-256(bot_token)`.
///
/// # Errors
/// Returns `Rejection::InvalidKey` if the HMAC refuses the derived key.
pub fn signature(check_string: &str, bot_token: &SecretString) -> Result<String, Rejection> {
    let secret_key = Sha256::digest(bot_token.expose_secret().as_bytes());

    let mut mac = HmacSha256::new_from_slice(&secret_key).map_err(|_| Rejection::InvalidKey)?;
    mac.update(check_string.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check an assertion, keeping the reason it was rejected.
///
/// # Errors
/// Returns the `Rejection` describing why the assertion is not authentic.
pub fn check(
    assertion: &HashMap<String, String>,
    bot_token: &SecretString,
) -> Result<(), Rejection> {
    let received = assertion.get(HASH_FIELD).ok_or(Rejection::MissingHash)?;

    let computed = signature(&data_check_string(assertion), bot_token)?;

    if bool::from(computed.as_bytes().ct_eq(received.as_bytes())) {
        Ok(())
    } else {
        Err(Rejection::HashMismatch)
    }
}

/// Returns true only if the assertion was signed for `bot_token` and has not
/// been tampered with.
#[must_use]
pub fn verify(assertion: &HashMap<String, String>, bot_token: &SecretString) -> bool {
    match check(assertion, bot_token) {
        Ok(()) => true,
        Err(rejection) => {
            debug!("Login assertion rejected: {}", rejection);
            false
        }
    }
}

/// Reject assertions whose `auth_date` is older than `max_age`, or in the future.
/// A zero `max_age` disables the check.
#[must_use]
pub fn is_fresh(
    assertion: &HashMap<String, String>,
    max_age: Duration,
    now_unix_seconds: u64,
) -> bool {
    if max_age.is_zero() {
        return true;
    }

    let Some(auth_date) = assertion
        .get(AUTH_DATE_FIELD)
        .and_then(|value| value.parse::<u64>().ok())
    else {
        debug!("Login assertion has no usable auth_date");
        return false;
    };

    if auth_date > now_unix_seconds {
        debug!("Login assertion auth_date is in the future");
        return false;
    }

    now_unix_seconds - auth_date <= max_age.as_secs()
}
