use secrecy::SecretString;

/// Process-wide settings shared by the server and its handlers.
#[derive(Clone)]
pub struct GlobalArgs {
    pub auth_url: String,
    pub auth_token: SecretString,
    pub frontend_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(auth_url: String, frontend_url: String) -> Self {
        Self {
            auth_url,
            auth_token: SecretString::default(),
            frontend_url,
        }
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.auth_token = token;
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("auth_url", &self.auth_url)
            .field("auth_token", &"***")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
