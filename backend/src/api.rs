//! Web API Module
//!
//! Serves the single application page and the actions behind it.
//! All endpoints return JSON (except the page itself) and require no
//! authentication: the server is meant for a local, single-user session.

use crate::agent::{
    orchestrator::{Agent, AgentSnapshot},
    uploader::{accept_attribute, ResumeFile, UploadSource},
};
use crate::config::AgentConfig;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

/// Uploads carry raw file bytes as JSON arrays
const MAX_UPLOAD_JSON_BYTES: usize = 16 * 1024 * 1024;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub agent: Agent,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub source: UploadSource,
    #[serde(default)]
    pub files: Vec<ResumeFile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

// ============================================================
// API HANDLERS
// ============================================================

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Job Application Agent",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// The application page
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page())
}

async fn get_state(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(data.agent.snapshot()))
}

/// Picked or dropped files; only the first one is used
async fn upload_resume(
    data: web::Data<AppState>,
    req: web::Json<UploadRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let state = data.agent.upload(&req.files, req.source);
    HttpResponse::Ok().json(ApiResponse::success(AgentSnapshot::from(&state)))
}

/// Start a submission; the outcome shows up in later `/api/state` calls
async fn submit_application(data: web::Data<AppState>) -> impl Responder {
    let state = data.agent.start_submit();
    HttpResponse::Ok().json(ApiResponse::success(AgentSnapshot::from(&state)))
}

async fn clear_resume(data: web::Data<AppState>) -> impl Responder {
    match data.agent.clear() {
        Ok(state) => HttpResponse::Ok().json(ApiResponse::success(AgentSnapshot::from(&state))),
        Err(e) => {
            error!("Failed to clear stored resume: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(&format!("Storage error: {}", e)))
        }
    }
}

// ============================================================
// ROUTES
// ============================================================

/// Register every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_UPLOAD_JSON_BYTES))
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/api/state", web::get().to(get_state))
        .route("/api/upload", web::post().to(upload_resume))
        .route("/api/submit", web::post().to(submit_application))
        .route("/api/clear", web::post().to(clear_resume));
}

// ============================================================
// PAGE
// ============================================================

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Job Application Agent</title>
<style>
  body { font-family: sans-serif; max-width: 56rem; margin: 0 auto; padding: 1.5rem; }
  #drop-zone { border: 2px dashed #ccc; border-radius: .5rem; padding: 1.5rem; text-align: center; }
  #drop-zone.dragging { border-color: #2563eb; }
  #fields { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin: 1rem 0; }
  #status { margin-top: 1rem; padding: 1rem; border-radius: .4rem; background: #dcfce7; }
  #status.error { background: #fee2e2; }
  [hidden] { display: none !important; }
</style>
</head>
<body>
<h1>AI Job Application Agent</h1>
<div id="drop-zone">
  <input type="file" id="picker" accept="{{ACCEPT}}" hidden>
  <p>Drag &amp; drop your resume here or</p>
  <button type="button" id="browse">browse files</button>
</div>
<section id="form" hidden>
  <h2>Auto-filled Information</h2>
  <div id="fields"></div>
  <button type="button" id="submit"></button>
  <button type="button" id="clear">Clear</button>
</section>
<div id="status" hidden></div>
<script>
const $ = (id) => document.getElementById(id);

function render(s) {
  $("form").hidden = !s.form;
  if (s.form) {
    $("fields").replaceChildren(...s.form.fields.map((f) => {
      const div = document.createElement("div");
      const label = document.createElement("strong");
      label.textContent = f.label + ": ";
      div.append(label, f.value);
      return div;
    }));
    $("submit").textContent = s.form.submit_label;
    $("submit").disabled = s.form.submit_disabled;
    $("clear").disabled = s.is_processing;
  }
  $("status").hidden = !s.status;
  $("status").textContent = s.status || "";
  $("status").classList.toggle("error", s.status_is_error);
  if (s.is_processing) setTimeout(refresh, 250);
}

async function call(method, path, body) {
  const res = await fetch(path, {
    method,
    headers: body ? { "Content-Type": "application/json" } : {},
    body: body ? JSON.stringify(body) : undefined,
  });
  const json = await res.json();
  if (json.success) render(json.data);
}

const refresh = () => call("GET", "/api/state");

// Only the first file is read; extras never reach the server.
async function upload(fileList, source) {
  const files = [];
  const first = fileList.length > 0 ? fileList[0] : null;
  if (first) {
    const buf = await first.arrayBuffer();
    files.push({ name: first.name, bytes: Array.from(new Uint8Array(buf)) });
  }
  await call("POST", "/api/upload", { source, files });
}

$("browse").onclick = () => $("picker").click();
$("picker").onchange = (e) => upload(e.target.files, "picker");
$("drop-zone").ondragover = (e) => { e.preventDefault(); $("drop-zone").classList.add("dragging"); };
$("drop-zone").ondragleave = () => $("drop-zone").classList.remove("dragging");
$("drop-zone").ondrop = (e) => {
  e.preventDefault();
  $("drop-zone").classList.remove("dragging");
  upload(e.dataTransfer.files, "drop");
};
$("submit").onclick = () => call("POST", "/api/submit");
$("clear").onclick = () => call("POST", "/api/clear");
refresh();
</script>
</body>
</html>
"#;

/// The page with the advisory file-type filter filled in
pub fn render_page() -> String {
    PAGE_TEMPLATE.replace("{{ACCEPT}}", &accept_attribute())
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Configure and run the API server
pub async fn run_server(config: &AgentConfig) -> std::io::Result<()> {
    let agent = Agent::from_config(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(AppState::new(agent));

    info!(
        "Job Application Agent starting at http://{}:{}",
        config.host, config.port
    );
    info!("Endpoints:");
    info!("   GET  /             - Application page");
    info!("   GET  /api/state    - Current record, phase and status");
    info!("   POST /api/upload   - Upload resume files (first one is used)");
    info!("   POST /api/submit   - Submit the application");
    info!("   POST /api/clear    - Clear the stored resume");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_fills_accept() {
        let page = render_page();
        assert!(page.contains(r#"accept=".pdf,.doc,.docx,.txt""#));
        assert!(!page.contains("{{ACCEPT}}"));
    }

    #[test]
    fn test_page_reads_first_file_only() {
        let page = render_page();
        assert!(page.contains("const first = fileList.length > 0 ? fileList[0] : null;"));
        assert!(!page.contains("Array.from(fileList)"));
    }

    #[test]
    fn test_upload_request_defaults() {
        let req: UploadRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.source, UploadSource::Picker);
        assert!(req.files.is_empty());

        let req: UploadRequest =
            serde_json::from_str(r#"{"source": "drop", "files": [{"name": "a.txt", "bytes": [104, 105]}]}"#)
                .unwrap();
        assert_eq!(req.source, UploadSource::Drop);
        assert_eq!(req.files[0].bytes, b"hi");
    }
}
