//! In-process fake of the DOX and Labelary endpoints

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Multipart, Path as UrlPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use po_label_print::app_state::AppState;
use po_label_print::config::AppConfig;
use po_label_print::services::poller::Sleeper;
use serde_json::Value;

use crate::fixtures::{clients_payload, purchase_order_result, ACCESS_TOKEN, FAKE_PDF, JOB_ID};

/// Behaviour of the fake services for one test.
pub struct Script {
    pub token_status: StatusCode,
    pub submit_status: StatusCode,
    pub job_status_code: StatusCode,
    /// Statuses returned by successive status checks; PENDING once exhausted.
    pub statuses: Vec<&'static str>,
    pub result_status: StatusCode,
    pub result_body: String,
    pub labelary_status: StatusCode,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            submit_status: StatusCode::OK,
            job_status_code: StatusCode::OK,
            statuses: vec!["PENDING", "PENDING", "DONE"],
            result_status: StatusCode::OK,
            result_body: purchase_order_result().to_string(),
            labelary_status: StatusCode::OK,
        }
    }
}

/// Everything the fake observed.
#[derive(Debug, Default)]
pub struct Recorded {
    pub calls: Vec<&'static str>,
    pub token_forms: Vec<HashMap<String, String>>,
    pub authorizations: Vec<String>,
    pub uploaded_file: Option<(String, Vec<u8>)>,
    pub options: Option<Value>,
    pub client_limit: Option<String>,
    pub labelary_path: Option<String>,
    pub labelary_accept: Option<String>,
    pub labelary_body: Option<String>,
}

impl Recorded {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

#[derive(Clone)]
struct FakeState {
    script: Arc<Script>,
    statuses: Arc<Mutex<VecDeque<&'static str>>>,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeState {
    fn record(&self, call: &'static str, headers: &HeaderMap) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.calls.push(call);
        if let Some(auth) = headers.get(header::AUTHORIZATION) {
            recorded
                .authorizations
                .push(auth.to_str().unwrap_or_default().to_string());
        }
    }
}

pub struct FakeServices {
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeServices {
    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }

    /// Configuration pointing every endpoint at this fake.
    pub fn config(&self, document: &Path, output: &Path, extra: &[(&str, &str)]) -> AppConfig {
        let mut pairs: Vec<(String, String)> = vec![
            ("DOX_CLIENT_ID".into(), "sb-test".into()),
            ("DOX_CLIENT_SECRET".into(), "secret".into()),
            ("DOX_TOKEN_URL".into(), format!("{}/oauth/token", self.base_url)),
            ("DOX_API_URL".into(), format!("{}/api/jobs", self.base_url)),
            ("DOX_BASE_URL".into(), self.base_url.clone()),
            ("DOX_SCHEMA_ID".into(), "schema-po".into()),
            ("QR_DATA".into(), "https://track.example.com/po".into()),
            ("LABELARY_URL".into(), self.base_url.clone()),
            ("DOCUMENT_PATH".into(), document.display().to_string()),
            ("OUTPUT_PATH".into(), output.display().to_string()),
        ];
        pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        AppConfig::from_pairs(pairs).expect("test config is valid")
    }

    pub fn state(&self, document: &Path, output: &Path, extra: &[(&str, &str)]) -> AppState {
        AppState::from_config(self.config(document, output, extra)).expect("HTTP client builds")
    }
}

/// Start the fake on an ephemeral port.
pub async fn start_fake(script: Script) -> FakeServices {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = FakeState {
        statuses: Arc::new(Mutex::new(script.statuses.iter().copied().collect())),
        script: Arc::new(script),
        recorded: recorded.clone(),
    };

    let app = Router::new()
        .route("/oauth/token", post(token))
        .route("/document-information-extraction/v1/clients", get(clients))
        .route("/api/jobs", post(submit))
        .route("/api/jobs/{job_id}", get(job_status))
        .route(
            "/document-information-extraction/v1/document/jobs/{job_id}",
            get(job_result),
        )
        .route("/v1/printers/{printer}/labels/{size}/", post(labelary))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });

    FakeServices {
        base_url: format!("http://{addr}"),
        recorded,
    }
}

async fn token(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.record("token", &headers);
    state.recorded.lock().unwrap().token_forms.push(form);

    if !state.script.token_status.is_success() {
        return (state.script.token_status, "invalid_client").into_response();
    }
    Json(serde_json::json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "bearer",
        "expires_in": 43199
    }))
    .into_response()
}

async fn clients(
    State(state): State<FakeState>,
    headers: HeaderMap,
    axum::extract::Query(query): axum::extract::Query<HashMap<String, String>>,
) -> Response {
    state.record("clients", &headers);
    state.recorded.lock().unwrap().client_limit = query.get("limit").cloned();
    Json(clients_payload()).into_response()
}

async fn submit(
    State(state): State<FakeState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.record("submit", &headers);

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.unwrap_or_default();

        let mut recorded = state.recorded.lock().unwrap();
        match name.as_str() {
            "file" => {
                recorded.uploaded_file = Some((file_name.unwrap_or_default(), data.to_vec()))
            }
            "options" => recorded.options = serde_json::from_slice(&data).ok(),
            _ => {}
        }
    }

    if !state.script.submit_status.is_success() {
        return (state.script.submit_status, "upload rejected").into_response();
    }
    Json(serde_json::json!({"id": JOB_ID, "status": "PENDING"})).into_response()
}

async fn job_status(
    State(state): State<FakeState>,
    headers: HeaderMap,
    UrlPath(job_id): UrlPath<String>,
) -> Response {
    state.record("status", &headers);
    assert_eq!(job_id, JOB_ID);

    if !state.script.job_status_code.is_success() {
        return (state.script.job_status_code, "unavailable").into_response();
    }
    let status = state.statuses.lock().unwrap().pop_front().unwrap_or("PENDING");
    Json(serde_json::json!({"id": job_id, "status": status})).into_response()
}

async fn job_result(
    State(state): State<FakeState>,
    headers: HeaderMap,
    UrlPath(job_id): UrlPath<String>,
) -> Response {
    state.record("result", &headers);
    assert_eq!(job_id, JOB_ID);

    (
        state.script.result_status,
        [(header::CONTENT_TYPE, "application/json")],
        state.script.result_body.clone(),
    )
        .into_response()
}

async fn labelary(
    State(state): State<FakeState>,
    headers: HeaderMap,
    UrlPath((printer, size)): UrlPath<(String, String)>,
    body: String,
) -> Response {
    state.record("labelary", &headers);
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.labelary_path = Some(format!("/v1/printers/{printer}/labels/{size}/"));
        recorded.labelary_accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        recorded.labelary_body = Some(body);
    }

    if !state.script.labelary_status.is_success() {
        return (state.script.labelary_status, "ERROR: Invalid command").into_response();
    }
    ([(header::CONTENT_TYPE, "application/pdf")], FAKE_PDF.to_vec()).into_response()
}

/// Sleeper that returns immediately and counts how often it was asked to wait.
#[derive(Default)]
pub struct InstantSleeper {
    pub sleeps: Mutex<u32>,
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: std::time::Duration) {
        *self.sleeps.lock().unwrap() += 1;
    }
}
