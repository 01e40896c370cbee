//! Planning: deciding the new name and destination of library files.
//!
//! Nothing is moved or renamed here. [`plan_file`] produces a [`Plan`] for a
//! single file; [`plan`] streams plans for many files, computed concurrently.

mod file;
mod stream;

pub use self::file::{Plan, place_file, plan_file, rename_file};
pub use self::stream::{PlanEvent, plan};
