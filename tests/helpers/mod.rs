#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use http_body_util::BodyExt;
use platewise_shared::{AuthData, AuthUser};
use tower::ServiceExt;

/// A stub generation/persistence backend. Records every request's method
/// and path so tests can assert which calls were (not) issued.
pub struct Backend {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl Backend {
    pub fn recorded(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count_of(&self, method: &str, path: &str) -> usize {
        self.recorded()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }
}

pub async fn spawn_backend(router: axum::Router) -> Backend {
    let requests: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = requests.clone();

    let router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder
                .lock()
                .unwrap()
                .push((req.method().to_string(), req.uri().path().to_string()));
            next.run(req).await
        }
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Backend {
        base_url: format!("http://{addr}"),
        requests,
    }
}

pub fn test_config(backend_url: &str) -> platewise::config::Config {
    platewise::config::Config {
        server: platewise::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        backend: platewise::config::BackendConfig {
            base_url: backend_url.to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        observability: platewise::config::ObservabilityConfig::default(),
        session: platewise::config::SessionConfig::default(),
    }
}

pub fn app_for(backend: &Backend) -> axum::Router {
    platewise::create_app(test_config(&backend.base_url)).unwrap()
}

/// Minimal cookie jar for driving the app through consecutive requests.
#[derive(Default)]
pub struct Cookies(HashMap<String, String>);

impl Cookies {
    pub fn absorb(&mut self, response: &axum::http::Response<Body>) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let Some(pair) = raw.split(';').next() else {
                continue;
            };
            if let Some((name, val)) = pair.split_once('=') {
                if val.is_empty() {
                    self.0.remove(name);
                } else {
                    self.0.insert(name.to_string(), val.to_string());
                }
            }
        }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn header(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Marks the jar as signed in the way a successful login would.
pub fn sign_in(cookies: &mut Cookies) {
    let auth = AuthData {
        user: AuthUser {
            id: "u-1".to_string(),
            username: "kim@example.com".to_string(),
        },
        token: "tok-1".to_string(),
    };
    let cookie = platewise::auth::build_auth_cookie(&auth).unwrap();
    cookies.set(cookie.name(), cookie.value());
}

async fn run(
    app: &axum::Router,
    cookies: &mut Cookies,
    request: Request<Body>,
) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    cookies.absorb(&response);

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn get(app: &axum::Router, cookies: &mut Cookies, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(header::COOKIE, cookies.header())
        .body(Body::empty())
        .unwrap();
    run(app, cookies, request).await
}

pub async fn post_form(
    app: &axum::Router,
    cookies: &mut Cookies,
    path: &str,
    form: &[(&str, &str)],
) -> (StatusCode, String) {
    let body = serde_urlencoded::to_string(form).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::COOKIE, cookies.header())
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    run(app, cookies, request).await
}
