/// Credential verification collaborator for the login endpoint.
///
/// Abstract so deployments can swap the built-in static pair for an
/// external identity provider without touching the HTTP layer.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait::async_trait]
impl Authenticator for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
