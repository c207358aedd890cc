use serde_json::json;

use crate::common::{TEST_SECRET, TestApp, routes};

mod issuing {
    use super::*;

    #[tokio::test]
    async fn posting_an_identity_sets_an_http_only_session_cookie() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::JWT, &json!({"email": "alice@example.com"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        let cookie = res.set_cookie.as_deref().unwrap();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(!cookie.contains("Secure"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[tokio::test]
    async fn issued_token_carries_the_identity() {
        let app = TestApp::spawn().await;
        let identity = json!({"email": "alice@example.com", "name": "Alice"});

        let res = app.post_without_token(routes::JWT, &identity).await;
        let decoded = blog_server::utils::jwt::verify(&res.token(), TEST_SECRET).unwrap();

        assert_eq!(serde_json::Value::Object(decoded), identity);
    }

    #[tokio::test]
    async fn cannot_issue_a_token_for_a_non_object_payload() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::JWT, &json!(["alice"])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_smuggle_an_expiry_into_the_payload() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::JWT, &json!({"email": "a@x.com", "exp": 9999999999u64}))
            .await;

        assert_eq!(res.status, 400);
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_expires_the_cookie_with_matching_attributes() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::LOGOUT, &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        let cookie = res.set_cookie.as_deref().unwrap();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }
}

mod verification {
    use super::*;

    #[tokio::test]
    async fn protected_route_without_cookie_is_not_authorized() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::comments_for("any")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert_eq!(res.body["message"], "Not Authorized!");
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized_access() {
        let app = TestApp::spawn().await;
        let token = app.login("alice@example.com").await;
        let tampered = format!("{token}x");

        let res = app
            .get_with_token(&routes::comments_for("any"), &tampered)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
        assert_eq!(res.body["message"], "Unauthorized Access!");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let identity = json!({"email": "mallory@example.com"})
            .as_object()
            .cloned()
            .unwrap();
        let forged = blog_server::utils::jwt::sign(identity, "not-the-secret", 72).unwrap();

        let res = app
            .get_with_token(&routes::comments_for("any"), &forged)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let app = TestApp::spawn().await;
        let identity = json!({"email": "alice@example.com"})
            .as_object()
            .cloned()
            .unwrap();
        let expired = blog_server::utils::jwt::sign(identity, TEST_SECRET, -1).unwrap();

        let res = app
            .get_with_token(&routes::comments_for("any"), &expired)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn identity_carrying_an_audience_passes_the_gate() {
        let app = TestApp::spawn().await;
        let issued = app
            .post_without_token(routes::JWT, &json!({"email": "a@x.com", "aud": "web"}))
            .await;
        assert_eq!(issued.status, 200);

        let res = app
            .get_with_token(&routes::comments_for("any"), &issued.token())
            .await;

        assert_eq!(res.status, 200, "gate rejected the token: {}", res.text);
    }

    #[tokio::test]
    async fn valid_session_passes_the_gate() {
        let app = TestApp::spawn().await;
        let token = app.login("alice@example.com").await;

        let res = app
            .get_with_token(&routes::comments_for("any"), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::ROOT).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text, "Server is Running!");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/blogs"].is_object());
}
