pub mod controller;
pub mod store;

pub use controller::Controller;
pub use store::{TaskStore, STORAGE_KEY};
