//! Application state shared across handlers

use std::sync::Arc;

use crate::db::LectureStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn LectureStore>,
}

impl AppState {
    pub fn new(store: impl LectureStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Build state around a store the caller keeps a handle to.
    pub fn from_shared(store: Arc<dyn LectureStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &dyn LectureStore {
        self.inner.store.as_ref()
    }
}
