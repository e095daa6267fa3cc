//! # Command Context
//!
//! Everything a command may touch, built once per process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppContext                                                             │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    courses       │ │    store         │ │    config            │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Seed catalog  │ │  • Theme, cart   │ │  • Currency format   │    │
//! │  │  • Read-only     │ │  • Session user  │ │  • Price ceiling     │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use coursehub_core::catalog::find_by_id;
use coursehub_core::data::seed_courses;
use coursehub_core::{CoreError, Course};
use coursehub_store::{AppStore, KeyValueStore};

use crate::config::ConfigState;
use crate::error::ApiError;

pub struct AppContext<S: KeyValueStore> {
    pub courses: Vec<Course>,
    pub store: AppStore<S>,
    pub config: ConfigState,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Opens the store on `storage` next to the seeded catalog.
    pub fn new(storage: S, config: ConfigState) -> Self {
        AppContext {
            courses: seed_courses(),
            store: AppStore::open(storage),
            config,
        }
    }

    pub fn course(&self, id: u32) -> Result<&Course, ApiError> {
        find_by_id(&self.courses, id).ok_or_else(|| CoreError::CourseNotFound(id).into())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use coursehub_store::MemoryStore;

    use super::*;

    pub fn context() -> AppContext<MemoryStore> {
        AppContext::new(MemoryStore::new(), ConfigState::default())
    }
}
