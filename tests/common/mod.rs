#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use spotdeck::{spotify::SpotifyClient, types::Session};

#[derive(Debug, Clone)]
pub struct Hit {
    pub path_and_query: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, (u16, String)>,
    hits: Vec<Hit>,
}

/// Local stand-in for the Web API. Routes match on path and query first,
/// then on the bare path.
#[derive(Clone)]
pub struct MockApi {
    pub base_url: String,
    inner: Arc<Mutex<Inner>>,
}

impl MockApi {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            inner,
        }
    }

    /// Registers a raw response. `{base}` in the body becomes the base URL.
    pub fn route(&self, path_and_query: &str, status: u16, body: &str) {
        let body = body.replace("{base}", &self.base_url);
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert(format!("/v1{path_and_query}"), (status, body));
    }

    pub fn json(&self, path_and_query: &str, body: Value) {
        self.route(path_and_query, 200, &body.to_string());
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.inner.lock().unwrap().hits.clone()
    }

    pub fn hit_count(&self) -> usize {
        self.inner.lock().unwrap().hits.len()
    }

    pub fn hits_for(&self, path: &str) -> Vec<Hit> {
        let prefix = format!("/v1{path}");
        self.hits()
            .into_iter()
            .filter(|h| h.path_and_query.starts_with(&prefix))
            .collect()
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(self.base_url.clone())
    }
}

async fn handle(State(inner): State<Arc<Mutex<Inner>>>, uri: Uri, headers: HeaderMap) -> Response {
    let key = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    let route = {
        let mut inner = inner.lock().unwrap();
        inner.hits.push(Hit {
            path_and_query: key.clone(),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
        inner
            .routes
            .get(&key)
            .or_else(|| inner.routes.get(uri.path()))
            .cloned()
    };

    match route {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn session() -> Session {
    Session {
        access_token: "test-token".to_string(),
        user_id: "user-1".to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        image: None,
        expires_at: chrono::Utc::now().timestamp() + 3600,
    }
}

pub fn expired_session() -> Session {
    Session {
        expires_at: chrono::Utc::now().timestamp() - 1,
        ..session()
    }
}

pub fn artist(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "images": [] })
}

pub fn track(id: &str, name: &str, artist_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [artist(artist_id, "Some Artist")],
        "duration_ms": 185000,
        "preview_url": null
    })
}

pub fn album(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [artist("a1", "Some Artist")],
        "images": [],
        "album_type": "album",
        "release_date": "2024-05-10"
    })
}

pub fn page(items: Value, total: u64, next: Option<&str>) -> Value {
    json!({ "total": total, "items": items, "next": next })
}
