//! Use-case services.
//!
//! One orchestration unit per entity. Services hold repository handles and
//! coordinate at most a few calls per operation; all field-level rules live
//! in the entities.

pub mod lists;
pub mod tasks;

pub use lists::TaskListService;
pub use tasks::TaskService;
