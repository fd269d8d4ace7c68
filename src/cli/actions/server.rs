use crate::{cli::globals::GlobalArgs, tglogin};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub bot_token: SecretString,
    pub bot_username: String,
    pub max_auth_age: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!("{}", startup_message(&args));

    let globals =
        GlobalArgs::new(args.bot_token, args.bot_username).with_max_auth_age(args.max_auth_age);

    tglogin::new(args.port, globals).await
}

fn startup_message(args: &Args) -> String {
    let max_auth_age = if args.max_auth_age.is_zero() {
        "disabled".to_string()
    } else {
        format!("{}s", args.max_auth_age.as_secs())
    };
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("login_path", tglogin::LOGIN_PATH.to_string()),
        ("bot_username", args.bot_username.clone()),
        (
            "bot_token_set",
            (!args.bot_token.expose_secret().is_empty()).to_string(),
        ),
        ("max_auth_age", max_auth_age),
    ];
    format_entries("Startup configuration", &entries)
}

fn format_entries(title: &str, entries: &[(&str, String)]) -> String {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    message
}

fn banner() -> String {
    let short_hash = short_commit(tglogin::GIT_COMMIT_HASH);
    BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const BANNER: &str = r"
  _        _             _
 | |_ __ _| | ___   __ _(_)_ __
 | __/ _` | |/ _ \ / _` | | '_ \
 | || (_| | | (_) | (_| | | | | |
  \__\__, |_|\___/ \__, |_|_| |_|{VERSION}
     |___/         |___/";
