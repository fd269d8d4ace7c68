use crate::cli::{
    actions::{server::Args, Action},
    commands::{ARG_BOT_TOKEN, ARG_BOT_USERNAME, ARG_MAX_AUTH_AGE, ARG_PORT},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8000);

    let bot_token = matches
        .get_one::<String>(ARG_BOT_TOKEN)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --bot-token")?;

    let bot_username = matches
        .get_one::<String>(ARG_BOT_USERNAME)
        .cloned()
        .context("missing required argument: --bot-username")?;

    let max_auth_age = matches
        .get_one::<u64>(ARG_MAX_AUTH_AGE)
        .copied()
        .map_or(Duration::ZERO, Duration::from_secs);

    Ok(Action::Server(Args {
        port,
        bot_token,
        bot_username,
        max_auth_age,
    }))
}
