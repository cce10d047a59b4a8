use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

pub trait CredentialVerifier: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity>;
}

// Plaintext comparison against the configured table. Demo use only.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        match self.users.get(username) {
            Some(stored) if stored == password => Some(Identity {
                username: username.to_string(),
            }),
            _ => None,
        }
    }
}
