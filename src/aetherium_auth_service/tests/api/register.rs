use aetherium_core::{Email, UserStore};
use secrecy::Secret;
use serde_json::{Value, json};

use crate::helpers::{TestApp, credentials, get_random_email};

#[tokio::test]
async fn should_return_201_and_the_user_for_valid_input() {
    let app = TestApp::new().await;
    let email = get_random_email();

    let response = app.post_register(&credentials(&email, "secret1")).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"]["id"].is_string());
    assert!(body["user"]["created_at"].is_string());
    assert!(body["user"]["updated_at"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    let body = credentials(&get_random_email(), "secret1");

    assert_eq!(app.post_register(&body).await.status().as_u16(), 201);
    let response = app.post_register(&body).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email is already registered");
}

#[tokio::test]
async fn should_return_400_with_issues_for_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        (json!({ "email": "not-an-email", "password": "secret1" }), vec!["email"]),
        (json!({ "email": get_random_email(), "password": "short" }), vec!["password"]),
        (
            json!({ "email": get_random_email(), "password": "x".repeat(51) }),
            vec!["password"],
        ),
        (
            json!({ "email": format!("{}@example.com", "a".repeat(250)), "password": "secret1" }),
            vec!["email"],
        ),
        (json!({ "password": "secret1" }), vec!["email"]),
        (json!({}), vec!["email", "password"]),
        (json!({ "email": "bad", "password": "bad" }), vec!["email", "password"]),
    ];

    for (body, expected_fields) in test_cases {
        let response = app.post_register(&body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");

        let error: Value = response.json().await.unwrap();
        let fields: Vec<&str> = error["issues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|issue| issue["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, expected_fields, "Failed for input: {body}");
    }
}

#[tokio::test]
async fn should_return_400_for_a_body_that_is_not_json() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/register", &app.address))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("definitely not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_not_create_a_user_on_validation_failure() {
    let app = TestApp::new().await;
    let email = get_random_email();

    let response = app.post_register(&credentials(&email, "short")).await;
    assert_eq!(response.status().as_u16(), 400);

    let parsed = Email::parse(Secret::new(email.clone())).unwrap();
    assert!(app.user_store.get_user_by_email(&parsed).await.is_err());

    let response = app.post_register(&credentials(&email, "secret1")).await;
    assert_eq!(response.status().as_u16(), 201);
    assert!(app.user_store.get_user_by_email(&parsed).await.is_ok());
}
