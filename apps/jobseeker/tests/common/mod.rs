//! In-process stand-in for the jobseeker backend.
//!
//! Serves the `/api/v1` routes the client uses from an in-memory state,
//! records every request, and can be told to fail or slow down.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use jobseeker::api::ApiClient;
use jobseeker::session::Session;

pub const USERNAME: &str = "ada@example.com";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "test-token";
pub const TAKEN_USERNAME: &str = "taken@example.com";
/// Model alias for which every LLM-backed endpoint returns 500.
pub const BROKEN_MODEL: &str = "broken";

pub fn sample_pdf(tag: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% {tag}\n%%EOF\n").into_bytes()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body: Value,
    pub raw_body: Bytes,
}

struct MockState {
    requests: Vec<RecordedRequest>,
    user: Value,
    job_postings: Vec<Value>,
    comparisons: Vec<Value>,
    next_id: i64,
    builds: u32,
    fail_builds: bool,
    fail_model_names: bool,
    delay: Duration,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = Arc::new(Mutex::new(seed()));
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state }
    }

    /// Client already holding a valid token.
    pub fn client(&self) -> ApiClient {
        let api = ApiClient::new(&self.base_url).unwrap();
        api.set_token(Some(TOKEN.to_string()));
        api
    }

    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(&self.base_url).unwrap()
    }

    pub fn session(&self) -> Session {
        Session::new(self.client())
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Recorded requests whose path (without `/api/v1`) equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn set_fail_builds(&self, fail: bool) {
        self.lock().fail_builds = fail;
    }

    pub fn set_fail_model_names(&self, fail: bool) {
        self.lock().fail_model_names = fail;
    }

    /// Delay applied to generate and build endpoints.
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = delay;
    }

    pub fn user(&self) -> Value {
        self.lock().user.clone()
    }

    pub fn comparison(&self, id: i64) -> Value {
        self.lock()
            .comparisons
            .iter()
            .find(|c| c["id"] == id)
            .cloned()
            .unwrap()
    }

    pub fn builds(&self) -> u32 {
        self.lock().builds
    }
}

fn seed() -> MockState {
    let job_postings = (1..=60)
        .map(|i: i64| {
            let title = if i % 2 == 0 { "Data Scientist" } else { "Backend Engineer" };
            let company = if i % 2 == 0 { "Acme" } else { "Globex" };
            let location = if i % 3 == 0 { Value::Null } else { json!("Berlin") };
            json!({
                "id": i,
                "title": format!("{title} {i}"),
                "company": company,
                "location": location,
                "description": "Build services.\nOwn them in production.",
                "seniority_level": "Mid-Senior level",
                "institution_followers": 1000 + i,
            })
        })
        .collect();

    let comparisons = vec![
        json!({
            "id": 10,
            "user_id": 1,
            "job_posting_id": 1,
            "title": "Backend Engineer 1",
            "company": "Globex",
            "location": "Berlin",
            "comparison": {"requirements": ["Rust"]},
            "resume": null,
            "cover_letter": null,
            "is_active": true,
            "work_experiences": [
                {
                    "id": 1, "comparison_id": 10, "title": "Software Engineer", "company": "Initech",
                    "start_year": 2018, "start_month": 2, "end_year": 2021, "end_month": 6,
                    "accomplishments": ["Migrated billing to Rust", "Cut deploy time in half"]
                },
                {
                    "id": 2, "comparison_id": 10, "title": "Staff Engineer", "company": "Hooli",
                    "start_year": 2021, "start_month": 7, "end_year": null, "end_month": null,
                    "accomplishments": ["Led the storage team"]
                }
            ],
            "cover_letter_paragraphs": [
                {"id": 1, "comparison_id": 10, "paragraph_number": 1, "paragraph_text": "Dear hiring manager,"},
                {"id": 2, "comparison_id": 10, "paragraph_number": 2, "paragraph_text": "I build reliable systems."}
            ]
        }),
        json!({
            "id": 11,
            "user_id": 1,
            "job_posting_id": 2,
            "title": "Data Scientist 2",
            "company": "Acme",
            "location": null,
            "comparison": null,
            "resume": null,
            "cover_letter": null,
            "is_active": false,
            "work_experiences": [],
            "cover_letter_paragraphs": []
        }),
    ];

    MockState {
        requests: Vec::new(),
        user: json!({
            "id": 1,
            "username": USERNAME,
            "name": "Ada Lovelace",
            "is_superuser": true,
            "is_active": true,
            "date_created": "2024-05-01T12:00:00",
            "resume": null,
            "parsed_skills": null,
            "additional_info": null
        }),
        job_postings,
        comparisons,
        next_id: 100,
        builds: 0,
        fail_builds: false,
        fail_model_names: false,
        delay: Duration::ZERO,
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api/v1")
        .unwrap_or(uri.path())
        .to_string();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let json_body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let delay = {
        let mut s = state.lock().unwrap();
        s.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            query: query.clone(),
            content_type: content_type.clone(),
            body: json_body.clone(),
            raw_body: body.clone(),
        });
        s.delay
    };
    if !delay.is_zero() && (path.contains("/generate-") || path.contains("/build-")) {
        tokio::time::sleep(delay).await;
    }

    let public = path.starts_with("/login/access-token")
        || path.starts_with("/password-recovery")
        || path.starts_with("/reset-password")
        || path == "/users/signup";
    let bearer = format!("Bearer {TOKEN}");
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == bearer);
    if !public && !authorized {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }

    let mut s = state.lock().unwrap();
    route(&mut s, &method, &path, &query, &json_body, &body, content_type.as_deref())
}

fn ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn message(text: &str) -> Response {
    ok(json!({ "message": text }))
}

fn detail(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "detail": text }))).into_response()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn query_i64(query: &HashMap<String, String>, key: &str) -> Option<i64> {
    query.get(key).and_then(|v| v.parse().ok())
}

fn route(
    s: &mut MockState,
    method: &Method,
    path: &str,
    query: &HashMap<String, String>,
    body: &Value,
    raw: &Bytes,
    content_type: Option<&str>,
) -> Response {
    match (method.as_str(), path) {
        ("POST", "/login/access-token") => {
            let form: HashMap<String, String> = serde_urlencoded::from_bytes(raw).unwrap_or_default();
            if form.get("username").map(String::as_str) == Some(USERNAME)
                && form.get("password").map(String::as_str) == Some(PASSWORD)
            {
                ok(json!({ "access_token": TOKEN, "token_type": "bearer" }))
            } else {
                detail(StatusCode::BAD_REQUEST, "Incorrect email or password")
            }
        }
        ("POST", "/login/test-token") | ("GET", "/users/me") => ok(s.user.clone()),
        ("POST", p) if p.starts_with("/password-recovery-html-content/") => {
            Html("<html><body>Reset your password</body></html>").into_response()
        }
        ("POST", p) if p.starts_with("/password-recovery/") => message("Password recovery email sent"),
        ("POST", "/reset-password/") => {
            if body["token"] == "valid-reset-token" {
                message("Password updated successfully")
            } else {
                detail(StatusCode::BAD_REQUEST, "Invalid token")
            }
        }
        ("POST", "/users/") | ("POST", "/users/signup") => {
            if body["password"].as_str().map_or(true, str::is_empty) {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [
                        {"loc": ["body", "password"], "msg": "field required", "type": "value_error.missing"}
                    ]})),
                )
                    .into_response();
            }
            if body["username"] == TAKEN_USERNAME || body["username"] == USERNAME {
                return detail(
                    StatusCode::CONFLICT,
                    "The user with this username already exists in the system",
                );
            }
            s.next_id += 1;
            let name = body.get("name").or_else(|| body.get("full_name")).cloned();
            ok(json!({ "id": s.next_id, "username": body["username"], "name": name }))
        }
        ("PATCH", "/users/me") => {
            if body["username"] == TAKEN_USERNAME {
                return detail(StatusCode::CONFLICT, "User with this username already exists");
            }
            if let (Some(user), Some(update)) = (s.user.as_object_mut(), body.as_object()) {
                for (key, value) in update {
                    user.insert(key.clone(), value.clone());
                }
            }
            ok(s.user.clone())
        }
        ("PATCH", "/users/me/password") => {
            if body["current_password"] == PASSWORD {
                message("Password updated successfully")
            } else {
                detail(StatusCode::BAD_REQUEST, "Incorrect password")
            }
        }
        ("DELETE", p) if p.starts_with("/users/") => {
            if p == "/users/1" {
                detail(StatusCode::FORBIDDEN, "Super users are not allowed to delete themselves")
            } else if p == "/users/2" {
                message("User deleted successfully")
            } else {
                detail(StatusCode::NOT_FOUND, "User not found")
            }
        }
        ("PATCH", "/users/me/upload-resume") => {
            let multipart = content_type.is_some_and(|c| c.starts_with("multipart/form-data"));
            if !multipart || !contains(raw, b"name=\"file\"") || !contains(raw, b"%PDF") {
                return detail(StatusCode::BAD_REQUEST, "Invalid file");
            }
            s.user["resume"] = json!(STANDARD.encode(sample_pdf("uploaded")));
            message("Resume uploaded successfully")
        }
        ("PATCH", "/users/me/parse-resume") => {
            if body["name"] == BROKEN_MODEL {
                return detail(StatusCode::INTERNAL_SERVER_ERROR, "Error parsing resume");
            }
            s.user["parsed_skills"] = json!(["Rust", "SQL"]);
            message("Resume parsed successfully")
        }
        ("POST", "/utils/test-email/") => match query.get("email_to") {
            Some(_) => (StatusCode::CREATED, Json(json!({"message": "Test email sent"}))).into_response(),
            None => detail(StatusCode::BAD_REQUEST, "email_to is required"),
        },
        ("GET", "/model-names") => {
            if s.fail_model_names {
                return detail(StatusCode::INTERNAL_SERVER_ERROR, "Model catalog unavailable");
            }
            ok(json!([
                {"llm_alias": "GPT4_O", "llm_value": "gpt-4o"},
                {"llm_alias": "CLAUDE_OPUS", "llm_value": "claude-3-opus-20240229"},
                {"llm_alias": BROKEN_MODEL, "llm_value": "none"}
            ]))
        }
        ("GET", "/job-postings") => {
            let skip = query_i64(query, "skip").unwrap_or(0).max(0) as usize;
            let limit = query_i64(query, "limit").unwrap_or(100);
            if limit > 100 {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [{
                        "loc": ["query", "limit"],
                        "msg": "ensure this value is less than or equal to 100",
                        "type": "value_error.number.not_le"
                    }]})),
                )
                    .into_response();
            }
            let matches = |field: &str, filter: Option<&String>, job: &Value| {
                filter.map_or(true, |f| {
                    job[field]
                        .as_str()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&f.to_lowercase())
                })
            };
            let data: Vec<Value> = s
                .job_postings
                .iter()
                .filter(|j| matches("title", query.get("job_title"), j))
                .filter(|j| matches("company", query.get("company_name"), j))
                .skip(skip)
                .take(limit.max(0) as usize)
                .cloned()
                .collect();
            ok(json!({ "data": data }))
        }
        ("GET", "/comparisons/") => {
            let found = match (query_i64(query, "comparison_id"), query_i64(query, "job_posting_id")) {
                (Some(id), _) => s.comparisons.iter().find(|c| c["id"] == id),
                (None, Some(job)) => s.comparisons.iter().find(|c| c["job_posting_id"] == job),
                (None, None) => None,
            };
            match found {
                Some(c) => ok(c.clone()),
                None => detail(StatusCode::NOT_FOUND, "Comparison not found"),
            }
        }
        ("GET", "/comparisons/current_user") => ok(json!({ "data": s.comparisons.clone() })),
        ("PATCH", "/comparisons/create-activate") => {
            let Some(job_id) = query_i64(query, "job_posting_id") else {
                return detail(StatusCode::BAD_REQUEST, "job_posting_id is required");
            };
            if let Some(c) = s.comparisons.iter_mut().find(|c| c["job_posting_id"] == job_id) {
                c["is_active"] = json!(true);
                return message("Comparison activated");
            }
            let Some(job) = s.job_postings.iter().find(|j| j["id"] == job_id).cloned() else {
                return detail(StatusCode::NOT_FOUND, "Job posting not found");
            };
            s.next_id += 1;
            let id = s.next_id;
            s.comparisons.push(json!({
                "id": id,
                "user_id": 1,
                "job_posting_id": job_id,
                "title": job["title"],
                "company": job["company"],
                "location": job["location"],
                "comparison": null,
                "resume": null,
                "cover_letter": null,
                "is_active": true,
                "work_experiences": [],
                "cover_letter_paragraphs": []
            }));
            message("Comparison created and activated")
        }
        ("PATCH", "/comparisons/deactivate") => {
            let job_id = query_i64(query, "job_posting_id");
            match s.comparisons.iter_mut().find(|c| Some(c["job_posting_id"].as_i64().unwrap_or(-1)) == job_id) {
                Some(c) => {
                    c["is_active"] = json!(false);
                    message("Comparison deactivated")
                }
                None => detail(StatusCode::NOT_FOUND, "Comparison not found"),
            }
        }
        ("POST", "/comparisons/generate-work-experiences") => {
            if body["name"] == BROKEN_MODEL {
                return detail(StatusCode::INTERNAL_SERVER_ERROR, "Error generating work experiences");
            }
            let Some(id) = query_i64(query, "comparison_id") else {
                return detail(StatusCode::BAD_REQUEST, "comparison_id is required");
            };
            let base = s.next_id;
            s.next_id += 2;
            let Some(c) = s.comparisons.iter_mut().find(|c| c["id"] == id) else {
                return detail(StatusCode::NOT_FOUND, "Comparison not found");
            };
            c["work_experiences"] = json!([
                {
                    "id": base + 1, "comparison_id": id, "title": "Senior Engineer", "company": "Initech",
                    "start_year": 2019, "start_month": 1, "end_year": 2022, "end_month": 12,
                    "accomplishments": ["Shipped the ingestion pipeline"]
                },
                {
                    "id": base + 2, "comparison_id": id, "title": "Tech Lead", "company": "Hooli",
                    "start_year": 2023, "start_month": 1, "end_year": null, "end_month": null,
                    "accomplishments": ["Grew the team from 3 to 8"]
                }
            ]);
            message("Work experiences generated successfully")
        }
        ("POST", "/comparisons/generate-cover-letter-paragraphs") => {
            if body["name"] == BROKEN_MODEL {
                return detail(StatusCode::INTERNAL_SERVER_ERROR, "Error generating cover letter");
            }
            let Some(id) = query_i64(query, "comparison_id") else {
                return detail(StatusCode::BAD_REQUEST, "comparison_id is required");
            };
            let Some(c) = s.comparisons.iter_mut().find(|c| c["id"] == id) else {
                return detail(StatusCode::NOT_FOUND, "Comparison not found");
            };
            c["cover_letter_paragraphs"] = json!([
                {"id": 50, "comparison_id": id, "paragraph_number": 1, "paragraph_text": "Opening."},
                {"id": 51, "comparison_id": id, "paragraph_number": 2, "paragraph_text": "Body."},
                {"id": 52, "comparison_id": id, "paragraph_number": 3, "paragraph_text": "Closing."}
            ]);
            message("Cover letter paragraphs generated successfully")
        }
        ("PATCH", p @ ("/comparisons/build-resume" | "/comparisons/build-cover-letter")) => {
            if s.fail_builds {
                return detail(StatusCode::INTERNAL_SERVER_ERROR, "Error building PDF");
            }
            let Some(id) = query_i64(query, "comparison_id") else {
                return detail(StatusCode::BAD_REQUEST, "comparison_id is required");
            };
            s.builds += 1;
            let pdf = STANDARD.encode(sample_pdf(&format!("build {}", s.builds)));
            let field = if p.ends_with("resume") { "resume" } else { "cover_letter" };
            let Some(c) = s.comparisons.iter_mut().find(|c| c["id"] == id) else {
                return detail(StatusCode::NOT_FOUND, "Comparison not found");
            };
            c[field] = json!(pdf);
            message("PDF built successfully")
        }
        ("POST", "/comparisons/edit-work-experience") => {
            if body["title"].as_str().map_or(true, |t| t.trim().is_empty()) {
                return detail(StatusCode::BAD_REQUEST, "Title is required");
            }
            if body["start_year"].is_null() {
                return detail(StatusCode::BAD_REQUEST, "Start year is required");
            }
            let found = s
                .comparisons
                .iter_mut()
                .filter(|c| c["id"] == body["comparison_id"])
                .flat_map(|c| c["work_experiences"].as_array_mut())
                .flatten()
                .find(|w| w["id"] == body["id"]);
            match found {
                Some(slot) => {
                    *slot = body.clone();
                    message("Work Experience updated successfully")
                }
                None => detail(StatusCode::NOT_FOUND, "Work Experience not found"),
            }
        }
        ("POST", "/comparisons/edit-cover-letter-paragraph") => {
            let found = s
                .comparisons
                .iter_mut()
                .filter(|c| c["id"] == body["comparison_id"])
                .flat_map(|c| c["cover_letter_paragraphs"].as_array_mut())
                .flatten()
                .find(|p| p["id"] == body["id"]);
            match found {
                Some(slot) => {
                    *slot = body.clone();
                    message("Cover Letter Paragraph updated successfully")
                }
                None => detail(StatusCode::NOT_FOUND, "Cover Letter Paragraph not found"),
            }
        }
        _ => detail(StatusCode::NOT_FOUND, "Not Found"),
    }
}
