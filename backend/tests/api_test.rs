//! HTTP surface tests

use actix_web::{test, web, App};
use job_application_agent::{
    api::{configure, ApiResponse, AppState, UploadRequest},
    Agent, AgentPhase, AgentSnapshot, ResumeFile, ResumeStorage, SimulatedSubmitter,
    UploadSource,
};
use std::sync::Arc;
use std::time::Duration;

fn app_state(delay: Duration) -> web::Data<AppState> {
    let agent = Agent::new(
        ResumeStorage::in_memory().unwrap(),
        Arc::new(SimulatedSubmitter::new(delay)),
    );
    web::Data::new(AppState::new(agent))
}

fn upload_body(files: Vec<ResumeFile>) -> UploadRequest {
    UploadRequest {
        source: UploadSource::Drop,
        files,
    }
}

#[actix_web::test]
async fn test_health_and_page() {
    let app = test::init_service(App::new().app_data(app_state(Duration::ZERO)).configure(configure)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let html = test::read_body(resp).await;
    let html = String::from_utf8(html.to_vec()).unwrap();
    assert!(html.contains("Drag &amp; drop your resume"));
    assert!(html.contains(".pdf,.doc,.docx,.txt"));
}

#[actix_web::test]
async fn test_upload_then_state() {
    let app = test::init_service(App::new().app_data(app_state(Duration::ZERO)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(upload_body(vec![ResumeFile::new(
            "jane.txt",
            "Jane Doe\njane@x.com\n3 years experience with React and Python",
        )]))
        .to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    let snapshot = resp.data.unwrap();
    assert_eq!(snapshot.phase, AgentPhase::Reviewing);
    assert_eq!(snapshot.status.as_deref(), Some("Resume parsed successfully!"));

    let form = snapshot.form.unwrap();
    assert_eq!(form.field("Experience"), Some("3 years"));
    assert_eq!(form.field("Skills"), Some("React, Python"));

    let req = test::TestRequest::get().uri("/api/state").to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.data.unwrap().record.unwrap().name, "Jane Doe");
}

#[actix_web::test]
async fn test_empty_upload_leaves_state() {
    let app = test::init_service(App::new().app_data(app_state(Duration::ZERO)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(upload_body(vec![]))
        .to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    let snapshot = resp.data.unwrap();
    assert_eq!(snapshot.phase, AgentPhase::Idle);
    assert!(snapshot.form.is_none());
    assert!(snapshot.status.is_none());
}

#[actix_web::test]
async fn test_submit_and_clear() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(Duration::from_millis(20)))
            .configure(configure),
    )
    .await;

    // nothing to submit yet
    let req = test::TestRequest::post().uri("/api/submit").to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.data.unwrap().phase, AgentPhase::Idle);

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(upload_body(vec![ResumeFile::new("cv.txt", "John Smith\n5 yrs SQL")]))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post().uri("/api/submit").to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    let snapshot = resp.data.unwrap();
    assert_eq!(snapshot.phase, AgentPhase::Submitting);
    assert!(snapshot.form.unwrap().submit_disabled);

    tokio::time::sleep(Duration::from_millis(200)).await;

    let req = test::TestRequest::get().uri("/api/state").to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    let snapshot = resp.data.unwrap();
    assert_eq!(snapshot.phase, AgentPhase::Reviewing);
    assert_eq!(snapshot.status.as_deref(), Some("Application submitted successfully!"));

    let req = test::TestRequest::post().uri("/api/clear").to_request();
    let resp: ApiResponse<AgentSnapshot> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.data.unwrap().phase, AgentPhase::Idle);
}

#[actix_web::test]
async fn test_upload_with_large_extra_file_uses_first() {
    let app = test::init_service(App::new().app_data(app_state(Duration::ZERO)).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/upload")
        .set_json(upload_body(vec![
            ResumeFile::new("jane.txt", "Jane Doe\njane@x.com\n3 years React"),
            ResumeFile::new("big.pdf", vec![0u8; 1024 * 1024]),
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: ApiResponse<AgentSnapshot> = test::read_body_json(resp).await;
    let snapshot = body.data.unwrap();
    assert_eq!(snapshot.phase, AgentPhase::Reviewing);
    assert_eq!(snapshot.record.unwrap().name, "Jane Doe");
}
