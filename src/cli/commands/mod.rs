use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        NonEmptyStringValueParser, ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_BOT_TOKEN: &str = "bot-token";
pub const ARG_BOT_USERNAME: &str = "bot-username";
pub const ARG_PORT: &str = "port";
pub const ARG_MAX_AUTH_AGE: &str = "max-auth-age";
pub const ARG_VERBOSITY: &str = "verbosity";

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!(
            "{} - {}",
            env!("CARGO_PKG_VERSION"),
            crate::tglogin::GIT_COMMIT_HASH
        )
        .into_boxed_str(),
    );

    Command::new("tglogin")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8000")
                .env("TGLOGIN_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_BOT_TOKEN)
                .long("bot-token")
                .help("Telegram bot token, used to verify login assertions")
                .env("TGLOGIN_BOT_TOKEN")
                .hide_env_values(true)
                .value_parser(NonEmptyStringValueParser::new())
                .required(true),
        )
        .arg(
            Arg::new(ARG_BOT_USERNAME)
                .long("bot-username")
                .help("Telegram bot username shown by the login widget")
                .env("TGLOGIN_BOT_USERNAME")
                .value_parser(NonEmptyStringValueParser::new())
                .required(true),
        )
        .arg(
            Arg::new(ARG_MAX_AUTH_AGE)
                .long("max-auth-age")
                .help("Reject logins whose auth_date is older than this many seconds (0 disables)")
                .default_value("0")
                .env("TGLOGIN_MAX_AUTH_AGE")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("TGLOGIN_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
