//! This crate provides a client for a personal task-management service.
//!
//! The REST API is reached through the [`Client`](client::Client) in the [`client`] module, which can be used as a stand-alone module. \
//! Any [`TaskSource`](traits::TaskSource) (the actual client, or the in-memory [`MemorySource`](memory::MemorySource)) can be put behind
//! a [`Store`](store::Store), that caches the latest data and notifies its subscribers whenever it changes.
//!
//! Everything a user interface displays is derived from this data, without any further network access:
//! * month calendars, in the [`calendar`] module,
//! * statistics about task statuses, in the [`stats`] module,
//! * the task board and the reminders, in the [`board`] module,
//! * the whole dashboard, in the [`dashboard`] module.

pub mod traits;

mod lenient;
mod status;
pub use status::{StatusSet, TaskStatus};
mod task;
pub use task::{NewTask, Task, TaskId};
pub mod category;
pub use category::{Category, CategoryId, ColorToken};
mod quick_task;
pub use quick_task::{NewQuickTask, QuickTask, QuickTaskId, QuickTaskKind};
mod session;
pub use session::Session;

pub mod calendar;
pub mod stats;
pub mod board;
pub mod dashboard;
pub mod schedule;

pub mod client;
pub mod memory;
pub mod mock_behaviour;
pub mod store;
pub use store::Store;

pub mod config;
pub mod utils;
