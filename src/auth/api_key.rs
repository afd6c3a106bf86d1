use crate::api::models::ApiError;
use crate::constants::constants::API_KEY_HEADER;
use crate::core::errors::TaskboardError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Shared secret expected in the `task-manager-api-key` header.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: &str) -> Self {
        ApiKey(Arc::from(key))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        // length leaks, content does not
        expected.len() == candidate.len()
            && expected
                .iter()
                .zip(candidate)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(TaskboardError::Unauthorized)?;

    if !api_key.matches(presented) {
        log::warn!("Rejected request to {} with a wrong API key", req.uri().path());
        return Err(TaskboardError::Unauthorized.into());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_exact_key() {
        let key = ApiKey::new("tepontarinat");
        assert!(key.matches("tepontarinat"));
        assert!(!key.matches("tepontarinaT"));
        assert!(!key.matches("tepontarina"));
        assert!(!key.matches(""));
    }

    #[test]
    fn debug_output_hides_the_key() {
        assert_eq!(format!("{:?}", ApiKey::new("secret")), "ApiKey(<redacted>)");
    }
}
