use axum::{extract::Extension, response::Html};
use std::sync::Arc;
use tracing::instrument;

use crate::{
    cli::globals::GlobalArgs,
    tglogin::{page, LOGIN_PATH},
};

// axum handler for the landing page
#[instrument(skip_all)]
pub async fn index(globals: Extension<Arc<GlobalArgs>>) -> Html<String> {
    Html(page::index(&globals.bot_username, LOGIN_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn index_embeds_bot_username() {
        let globals = Arc::new(GlobalArgs::new(
            SecretString::from("123:ABC"),
            "mass_looking_bot".to_string(),
        ));

        let Html(body) = index(Extension(globals)).await;
        assert!(body.contains(r#"data-telegram-login="mass_looking_bot""#));
        assert!(body.contains(&format!(r#"data-auth-url="{LOGIN_PATH}""#)));
        assert!(!body.contains("123:ABC"));
    }
}
