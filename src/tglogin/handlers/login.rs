use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    cli::globals::GlobalArgs,
    tglogin::{page, verify},
};

const FALLBACK_NAME: &str = "Telegram user";

// axum handler for the login widget redirect
#[instrument(skip_all)]
pub async fn login(
    globals: Extension<Arc<GlobalArgs>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(err) => {
            warn!("Failed to parse login parameters: {}", err);
            return failed();
        }
    };

    let Some(assertion) = unique_fields(pairs) else {
        warn!("Login parameters contain a repeated field");
        return failed();
    };

    debug!(
        "Login parameters: {}",
        serde_json::to_string(&assertion).unwrap_or_default()
    );

    if !verify::verify(&assertion, &globals.bot_token) {
        warn!("Login attempt failed verification");
        return failed();
    }

    if !verify::is_fresh(&assertion, globals.max_auth_age, now_unix_seconds()) {
        warn!("Login attempt with expired auth_date");
        return failed();
    }

    let name = display_name(&assertion);
    let user_id = assertion.get("id").map_or("unknown", String::as_str);

    info!("User {} (ID: {}) signed in", name, user_id);

    (StatusCode::OK, Html(page::success(name))).into_response()
}

/// Collect query pairs into a field map, or `None` if any field repeats.
fn unique_fields(pairs: Vec<(String, String)>) -> Option<HashMap<String, String>> {
    let mut fields = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        if fields.insert(key, value).is_some() {
            return None;
        }
    }
    Some(fields)
}

fn failed() -> Response {
    (StatusCode::BAD_REQUEST, page::LOGIN_FAILED).into_response()
}

/// Prefer `username`, then `first_name`.
fn display_name(assertion: &HashMap<String, String>) -> &str {
    ["username", "first_name"]
        .iter()
        .filter_map(|field| assertion.get(*field))
        .map(String::as_str)
        .find(|value| !value.is_empty())
        .unwrap_or(FALLBACK_NAME)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
