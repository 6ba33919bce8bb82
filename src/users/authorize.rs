use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Credential check for the full user listing. Kept behind a trait so a real
/// token scheme can replace the static string without touching handlers.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> bool;
}

/// Matches `Authorization: Bearer <secret>` against one shared secret.
pub struct StaticBearer {
    expected: String,
}

impl StaticBearer {
    pub fn new(secret: &str) -> Self {
        Self {
            expected: format!("Bearer {secret}"),
        }
    }
}

impl Authorizer for StaticBearer {
    fn authorize(&self, headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == self.expected)
            .unwrap_or(false)
    }
}
