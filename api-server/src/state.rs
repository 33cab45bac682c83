//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use organizador_core::task::{FileTaskStore, TaskRepository};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: Arc<dyn TaskRepository>,
    data_dir: PathBuf,
}

impl AppState {
    /// Open the file-backed task store described by `config`
    pub async fn new(config: &Config) -> organizador_core::Result<Self> {
        let task_store = FileTaskStore::new(config.tasks_path()).await?;
        Ok(Self::with_store(config.data_dir.clone(), Arc::new(task_store)))
    }

    /// Build state around an already opened repository
    pub fn with_store(data_dir: PathBuf, task_store: Arc<dyn TaskRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store,
                data_dir,
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &dyn TaskRepository {
        self.inner.task_store.as_ref()
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}
