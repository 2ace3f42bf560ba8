use serde::Deserialize;

/// Portal login pair loaded from the credentials file
#[derive(Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
