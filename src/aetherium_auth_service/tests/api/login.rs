use serde_json::{Value, json};

use crate::helpers::{TestApp, credentials, get_random_email, refresh_cookie_value};

#[tokio::test]
async fn should_return_200_with_access_token_and_refresh_cookie() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let body = credentials(&email, "secret1");
    app.post_register(&body).await;

    let response = app.post_login(&body).await;

    assert_eq!(response.status().as_u16(), 200);

    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "refreshToken")
        .expect("No refresh cookie found");
    assert!(!cookie.value().is_empty());
    assert!(cookie.http_only());
    assert!(cookie.same_site_strict());
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(
        cookie.max_age(),
        Some(std::time::Duration::from_secs(7 * 24 * 60 * 60))
    );

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["user"]["email"], email.as_str());
    assert_eq!(json["accessToken"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn should_persist_the_refresh_token() {
    let app = TestApp::new().await;
    let (_, _, refresh_token) = app.signed_in_user().await;

    let response = app.post_refresh(Some(&refresh_token)).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_for_wrong_password_and_unknown_email_alike() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&credentials(&email, "secret1")).await;

    let wrong_password = app.post_login(&credentials(&email, "secret2")).await;
    let unknown_email = app
        .post_login(&credentials(&get_random_email(), "secret1"))
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);
    assert!(refresh_cookie_value(&wrong_password).is_none());

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn should_return_400_for_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({ "email": "not-an-email", "password": "secret1" }),
        json!({ "email": get_random_email() }),
        json!({ "password": "secret1" }),
        json!({ "email": get_random_email(), "password": 123456 }),
    ];

    for body in test_cases {
        let response = app.post_login(&body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");
    }
}

#[tokio::test]
async fn should_issue_distinct_tokens_on_each_login() {
    let app = TestApp::new().await;
    let body = credentials(&get_random_email(), "secret1");
    app.post_register(&body).await;

    let first = app.post_login(&body).await;
    let second = app.post_login(&body).await;

    assert_ne!(refresh_cookie_value(&first), refresh_cookie_value(&second));
}
