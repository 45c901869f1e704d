use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_report_ok_when_both_stores_respond() {
    let app = TestApp::new().await;

    let response = app.get_health().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["postgres"], "OK");
    assert_eq!(body["mongo"], "OK");
}

#[tokio::test]
async fn should_report_degraded_mongo_without_failing() {
    let app = TestApp::builder().mongo_up(false).spawn().await;

    let response = app.get_health().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["mongo"], "ERROR");
}

#[tokio::test]
async fn should_return_500_when_postgres_is_down() {
    let app = TestApp::builder().postgres_up(false).spawn().await;

    let response = app.get_health().await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ERROR");
    assert!(body["message"].is_string());
}
