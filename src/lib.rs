//! # tglogin
//!
//! Sign-in with the Telegram login widget.
//!
//! The service serves a landing page embedding the widget and a callback
//! endpoint the widget redirects to. The callback receives the user's profile
//! fields plus a `hash` in the query string and only greets the user when
//! [`tglogin::verify::verify`] confirms the fields were signed for the
//! configured bot token.
//!
//! The bot token is a startup argument (`--bot-token` / `TGLOGIN_BOT_TOKEN`)
//! and is passed explicitly to the verifier on every call.

pub mod cli;
pub mod tglogin;
