//! Core library for the Organizador task service
//!
//! This crate contains the task domain:
//! - The `Task` record, its status enumeration and date handling
//! - Query filters over the task collection
//! - The repository trait and its file-backed implementation

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
