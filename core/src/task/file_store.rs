//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::filter::TaskFilter;
use super::model::{Task, TaskId, TaskPayload};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// On-disk layout of the store
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    next_id: TaskId,
    tarefas: Vec<Task>,
}

struct StoreState {
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the file, ordered by id
    state: RwLock<StoreState>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<StoreFile>(&content).map_err(|e| {
                Error::Storage(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            StoreFile::default()
        };

        // Never hand out an id lower than one already stored.
        let highest = file.tarefas.iter().map(|t| t.id).max().unwrap_or(0);
        let next_id = file.next_id.max(highest.saturating_add(1)).max(1);
        let tasks: BTreeMap<TaskId, Task> = file.tarefas.into_iter().map(|t| (t.id, t)).collect();

        debug!("Loaded {} tasks from {}", tasks.len(), path.display());

        Ok(Self {
            path,
            state: RwLock::new(StoreState { next_id, tasks }),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the state to disk. Called with the write lock held so the file
    /// always reflects a single committed state.
    async fn persist(&self, state: &StoreState) -> Result<()> {
        let file = StoreFile {
            next_id: state.next_id,
            tarefas: state.tasks.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, payload: TaskPayload) -> Result<Task> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| Error::Storage("Task id space exhausted".to_string()))?;

        let task = Task::from_payload(id, payload);
        state.tasks.insert(id, task.clone());
        state.next_id = next_id;

        if let Err(e) = self.persist(&state).await {
            // Roll back so memory matches the last committed file.
            state.tasks.remove(&id);
            state.next_id = id;
            return Err(e);
        }

        info!("Created task {}", id);
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        let tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        debug!("Listed {} tasks for {:?}", tasks.len(), filter);
        Ok(tasks)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let mut state = self.state.write().await;

        let previous = match state.tasks.get_mut(&task.id) {
            Some(slot) => std::mem::replace(slot, task.clone()),
            None => return Err(Error::TaskNotFound(task.id)),
        };

        if let Err(e) = self.persist(&state).await {
            state.tasks.insert(previous.id, previous);
            return Err(e);
        }

        info!("Updated task {}", task.id);
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let mut state = self.state.write().await;

        let Some(removed) = state.tasks.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&state).await {
            state.tasks.insert(id, removed);
            return Err(e);
        }

        info!("Deleted task {}", id);
        Ok(true)
    }
}
