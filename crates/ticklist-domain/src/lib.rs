pub mod collection;
pub mod task;

pub use collection::TaskCollection;
pub use task::{Task, TaskId};
