use secrecy::SecretString;
use std::time::Duration;

/// Configuration shared by every request handler.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub bot_token: SecretString,
    pub bot_username: String,
    pub max_auth_age: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(bot_token: SecretString, bot_username: String) -> Self {
        Self {
            bot_token,
            bot_username,
            max_auth_age: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_max_auth_age(mut self, max_auth_age: Duration) -> Self {
        self.max_auth_age = max_auth_age;
        self
    }
}
