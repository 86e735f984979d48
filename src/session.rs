use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use platewise_forms::WizardSession;
use platewise_mealplan::Replacement;
use platewise_shared::{Dish, MealPlan, ShoppingList};
use ulid::Ulid;

const SESSION_COOKIE_NAME: &str = "platewise_session";

/// Everything one browser session is currently looking at. Wizard progress
/// and displayed results never leave the process; only saved copies go
/// through the backend.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub wizard: Option<WizardSession>,
    pub dish: Option<Dish>,
    pub plan: Option<MealPlan>,
    pub replacement: Replacement,
    pub shopping_lists: Vec<ShoppingList>,
}

struct Entry {
    state: SessionState,
    touched: Instant,
}

/// In-memory per-session store. Access is serialized through one lock, so
/// within a session every transition commits before the next request for
/// that session observes the state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            max_sessions,
        }
    }

    /// Runs `f` with exclusive access to the session's state, creating the
    /// session on first touch. Closures must not block on I/O; backend
    /// calls happen between two `with` invocations.
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut map = self.inner.lock().unwrap_or_else(|err| err.into_inner());

        if map.len() >= self.max_sessions {
            let ttl = self.ttl;
            map.retain(|_, entry| entry.touched.elapsed() < ttl);
        }

        let entry = map.entry(id.to_owned()).or_insert_with(|| Entry {
            state: SessionState::default(),
            touched: Instant::now(),
        });
        entry.touched = Instant::now();
        f(&mut entry.state)
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the session id from the jar, minting a fresh id (and the cookie
/// that carries it) when absent. The possibly-updated jar must be part of
/// the response for the cookie to stick.
pub fn ensure_session(jar: CookieJar) -> (String, CookieJar) {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        return (cookie.value().to_owned(), jar);
    }

    let id = Ulid::new().to_string();
    let cookie = Cookie::build((SESSION_COOKIE_NAME, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    (id, jar.add(cookie))
}

/// Session id for requests that only make sense mid-session.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_survives_between_touches() {
        let store = SessionStore::new(Duration::from_secs(60), 100);

        store.with("s-1", |state| {
            state.dish = Some(Dish {
                title: "Pad thai".to_owned(),
                ..Default::default()
            });
        });

        let title = store.with("s-1", |state| {
            state.dish.as_ref().map(|dish| dish.title.clone())
        });
        assert_eq!(title.as_deref(), Some("Pad thai"));
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        store.with("s-1", |state| state.dish = Some(Dish::default()));

        let other = store.with("s-2", |state| state.dish.clone());
        assert!(other.is_none());
    }

    #[test]
    fn stale_sessions_are_evicted_once_the_store_fills_up() {
        let store = SessionStore::new(Duration::from_secs(0), 2);
        store.with("s-1", |_| {});
        store.with("s-2", |_| {});
        // Hitting the cap sweeps entries older than the (zero) ttl.
        store.with("s-3", |_| {});
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ensure_session_mints_an_id_once() {
        let (id, jar) = ensure_session(CookieJar::new());
        assert!(!id.is_empty());

        let (same, _) = ensure_session(jar);
        assert_eq!(same, id);
    }
}
