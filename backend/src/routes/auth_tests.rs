//! Request gate tests
//!
//! Every protected route must answer 401 unless a valid bearer token is
//! presented, and the body must not reveal why a token was rejected.

#[cfg(test)]
mod tests {
    use crate::auth::TokenService;
    use crate::config::AppConfig;
    use crate::repositories::InMemoryUserStore;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const TEST_SECRET: &str = "gate-test-secret-key-0123456789abcdef";

    fn create_test_state() -> AppState {
        let mut config = AppConfig::default();
        config.jwt.secret = TEST_SECRET.to_string();
        AppState::new(Arc::new(InMemoryUserStore::new()), config).unwrap()
    }

    async fn call(
        state: AppState,
        method: &str,
        uri: &str,
        authorization: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(header) = authorization {
            builder = builder.header("Authorization", header);
        }

        let response = create_router(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (status, body)
    }

    fn error_message(body: &Value) -> &str {
        body["error"]["message"].as_str().unwrap_or_default()
    }

    /// Random strings that are not valid tokens
    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9]{10,50}",
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}",
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}",
        ]
    }

    fn auth_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            invalid_token_strategy().prop_map(Some),
            invalid_token_strategy().prop_map(|t| Some(format!("Basic {}", t))),
            invalid_token_strategy().prop_map(|t| Some(format!("Bearer {}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_unauthenticated_requests_return_401(auth_header in auth_header_strategy()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (status, _) = call(create_test_state(), "GET", "/api/auth/verify", auth_header).await;
                prop_assert_eq!(status, StatusCode::UNAUTHORIZED);
                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn test_missing_auth_header() {
        let (status, body) = call(create_test_state(), "GET", "/api/auth/verify", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "Authorization header missing");
    }

    #[rstest]
    #[case("Token abc")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("bearer abc")]
    #[case("Bearer")]
    #[case("Bearer abc def")]
    #[tokio::test]
    async fn test_invalid_header_format(#[case] header: &str) {
        let (status, body) = call(
            create_test_state(),
            "GET",
            "/api/auth/verify",
            Some(header.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "Invalid authorization header format");
    }

    #[tokio::test]
    async fn test_expired_token_gets_generic_message() {
        let state = create_test_state();
        let issued = Utc::now() - Duration::hours(25);
        let token = state.tokens().issue_token(1, issued).unwrap();

        let (status, body) =
            call(state, "GET", "/api/auth/verify", Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_token_with_wrong_secret_gets_generic_message() {
        let other = TokenService::new("wrong-secret-key", 86400).unwrap();
        let token = other.issue_token(1, Utc::now()).unwrap();

        let (status, body) = call(
            create_test_state(),
            "GET",
            "/api/auth/verify",
            Some(format!("Bearer {}", token)),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_valid_token_reaches_verify_handler() {
        let state = create_test_state();
        let token = state.tokens().issue_token(17, Utc::now()).unwrap();

        let (status, body) =
            call(state, "GET", "/api/auth/verify", Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Token valid");
        assert_eq!(body["user_id"], 17);
    }

    #[tokio::test]
    async fn test_logout_is_gated() {
        let (status, body) = call(create_test_state(), "POST", "/api/auth/logout", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "Authorization header missing");
    }

    #[tokio::test]
    async fn test_login_is_not_gated() {
        // No body: rejected by validation, not by the gate
        let (status, _) = call(create_test_state(), "POST", "/api/auth/login", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
