//! Resource wrappers against a mock backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jobboard_client::models::{Page, UserType};
use jobboard_client::{ApiClient, ApiError, MemorySessionStore, RegistrationError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::builder(store.clone())
        .base_url(server.uri())
        .build()
        .unwrap();
    (client, store)
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"identifier": "rina", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer",
            "expires_in": 1800
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let (client, store) = client(&server);

    let session = client.auth().login("rina", "hunter22").await.unwrap();

    assert_eq!(session.access_token, "access-1");
    assert_eq!(store.snapshot(), Some(session));
    assert!(client.auth().is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_bad_credentials_do_not_trigger_refresh_or_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();
    let client = ApiClient::builder(Arc::new(MemorySessionStore::new()))
        .base_url(server.uri())
        .on_login_required(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let err = client.auth().login("rina", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.detail(), Some(json!("Incorrect email or password")));
    assert_eq!(redirects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_current_user_after_login_and_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "665f1c",
            "username": "rina",
            "name": "Rina Wijaya",
            "email": "rina@example.com",
            "user_type": "applier"
        })))
        .mount(&server)
        .await;
    let (client, store) = client(&server);
    let auth = client.auth();

    auth.login("rina", "hunter22").await.unwrap();
    let user = auth.current_user().await.unwrap();
    assert_eq!(user.user_type, UserType::Applier);
    assert_eq!(user.name, "Rina Wijaya");

    auth.logout().await.unwrap();
    assert!(store.snapshot().is_none());
    assert!(!auth.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_current_user_is_none_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    assert!(client.auth().current_user().await.is_none());
}

#[tokio::test]
async fn test_job_listing_sends_skip_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/search/image/"))
        .and(query_param("query", "backend"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "job-21"}])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let jobs = client
        .jobs()
        .search_with_images("backend", Page::new(2, Page::JOBS_PER_PAGE))
        .await
        .unwrap();

    assert_eq!(jobs, json!([{"id": "job-21"}]));
}

#[tokio::test]
async fn test_create_job_strips_blank_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(json!({
            "title": "Data Engineer",
            "skills": ["python", "airflow"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "job-1"})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let created = client
        .jobs()
        .create(json!({
            "title": "Data Engineer",
            "salary_range": "",
            "skills": ["python", "", "airflow"],
            "benefits": []
        }))
        .await
        .unwrap();

    assert_eq!(created["id"], "job-1");
}

#[tokio::test]
async fn test_delete_with_empty_body_returns_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/appliers/app-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let body = client.appliers().delete("app-9").await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_application_history_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/history/app-1"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    client
        .applications()
        .history("app-1", Page::first(Page::APPLICATIONS_PER_PAGE))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_applier_registration_conflict_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/appliers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Username already taken"})))
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let err = client
        .appliers()
        .register(json!({"username": "rina", "email": "rina@example.com"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "BAD_REQUEST");
    match err {
        RegistrationError::BadRequest { details } => {
            assert_eq!(details, Some(json!("Username already taken")))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_recruiter_registration_validation_details() {
    let server = MockServer::start().await;
    let detail = json!([{"loc": ["body", "company_name"], "msg": "field required"}]);
    Mock::given(method("POST"))
        .and(path("/recruiters"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": detail.clone()})))
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let err = client
        .recruiters()
        .register(json!({"username": "acme"}))
        .await
        .unwrap_err();

    match err {
        RegistrationError::Validation { details } => assert_eq!(details, detail),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_change_password_posts_to_member_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recruiters/rec-3/change-password"))
        .and(body_json(json!({"old_password": "a", "new_password": "b"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    client
        .recruiters()
        .change_password("rec-3", json!({"old_password": "a", "new_password": "b"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_password_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let err = client
        .password_reset()
        .reset_password("rina@example.com", "123", "longpassword")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_verify_otp_surfaces_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .and(body_json(json!({"email": "rina@example.com", "otp": "654321"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid or expired OTP"})))
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let err = client
        .password_reset()
        .verify_otp("rina@example.com", "654321")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert_eq!(err.detail(), Some(json!("Invalid or expired OTP")));
}

#[tokio::test]
async fn test_view_log_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/log-views/job/job-7/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(42)))
        .mount(&server)
        .await;
    let (client, _) = client(&server);

    let count = client.view_logs().count_for_job("job-7").await.unwrap();
    assert_eq!(count, json!(42));
}
