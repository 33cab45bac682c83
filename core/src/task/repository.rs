//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::filter::TaskFilter;
use super::model::{Task, TaskId, TaskPayload};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Every mutating call is committed before it returns.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task; the store assigns its id
    async fn create(&self, payload: TaskPayload) -> Result<Task>;

    /// Get a task by ID
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// List the tasks matching `filter`, ordered by id
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Replace an existing task
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task by ID, returning whether it existed
    async fn delete(&self, id: TaskId) -> Result<bool>;
}
