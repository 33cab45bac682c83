//! Task module
//!
//! This module contains task-related types and logic.

mod file_store;
mod filter;
mod model;
mod repository;

pub use file_store::FileTaskStore;
pub use filter::TaskFilter;
pub use model::*;
pub use repository::TaskRepository;
