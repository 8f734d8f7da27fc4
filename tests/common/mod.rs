// Shared fakes for the HTTP tests: an in-memory store and a scripted model.
#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use futures::{stream, StreamExt};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use datagen::{
    app,
    auth::TokenService,
    database::{StoreError, UserStore},
    llm::{FragmentStream, LanguageModel, LlmError, Prompt},
    models::{
        usage::{NewUsageLog, UsageLog},
        users::{NewUser, User},
    },
    state::AppState,
};

pub const SECRET: &str = "integration-secret";

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    usage: Mutex<Vec<UsageLog>>,
}

impl MemoryStore {
    pub fn usage(&self) -> Vec<UsageLog> {
        self.usage.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("Username"));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email"));
        }
        let created = User {
            id: users.len() as i32 + 1,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            hashed_password: user.hashed_password,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn record_usage(&self, entry: NewUsageLog) -> Result<(), StoreError> {
        let mut usage = self.usage.lock().unwrap();
        // spread timestamps so newest-first ordering is observable
        let timestamp = Utc::now() + Duration::seconds(usage.len() as i64);
        usage.push(UsageLog {
            id: entry.id,
            user_id: entry.user_id,
            prompt: entry.prompt,
            timestamp,
            is_archived: false,
        });
        Ok(())
    }

    async fn usage_for_user(&self, user_id: i32) -> Result<Vec<UsageLog>, StoreError> {
        let mut logs: Vec<UsageLog> = self
            .usage
            .lock()
            .unwrap()
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(logs)
    }

    async fn set_archived(&self, user_id: i32, session_id: Uuid, archived: bool) -> Result<bool, StoreError> {
        let mut usage = self.usage.lock().unwrap();
        match usage.iter_mut().find(|log| log.id == session_id && log.user_id == user_id) {
            Some(log) => {
                log.is_archived = archived;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Replays fixed fragments and a fixed completion.
pub struct ScriptedModel {
    pub fragments: Vec<&'static str>,
    /// Fail the stream once this many fragments have been sent.
    pub fail_after: Option<usize>,
    /// `None` makes `complete` fail.
    pub completion: Option<&'static str>,
    pub completions: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(fragments: Vec<&'static str>) -> Self {
        Self {
            fragments,
            fail_after: None,
            completion: None,
            completions: AtomicUsize::new(0),
        }
    }

    pub fn completing(completion: &'static str) -> Self {
        Self {
            completion: Some(completion),
            ..Self::new(Vec::new())
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn stream(&self, _prompt: &Prompt) -> Result<FragmentStream, LlmError> {
        let mut items: Vec<Result<String, LlmError>> =
            self.fragments.iter().map(|f| Ok(f.to_string())).collect();
        if let Some(n) = self.fail_after {
            items.truncate(n);
            items.push(Err(LlmError::Api("upstream reset".into())));
        }
        Ok(stream::iter(items).boxed())
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        self.completion
            .map(str::to_string)
            .ok_or_else(|| LlmError::Api("quota exceeded".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub model: Arc<ScriptedModel>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new(model: ScriptedModel) -> Self {
        let store = Arc::new(MemoryStore::default());
        let model = Arc::new(model);
        let tokens = TokenService::new(SECRET, 30);
        let state = AppState::new(store.clone(), model.clone(), tokens.clone());
        let router = app(state, &["http://localhost:3000".to_string()]);
        Self {
            router,
            store,
            model,
            tokens,
        }
    }

    /// Inserts an account directly and returns a bearer token for it.
    pub async fn seed_user(&self, username: &str, email: &str) -> String {
        let user = self
            .store
            .create_user(NewUser {
                first_name: "Test".into(),
                last_name: "User".into(),
                username: username.into(),
                email: email.into(),
                hashed_password: String::new(),
            })
            .await
            .unwrap();
        self.tokens.issue(&user).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// `data:` payloads of an SSE body, in order.
pub fn sse_data(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.trim_start().to_string())
        .collect()
}
