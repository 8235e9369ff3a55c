pub mod config;
pub mod error;
pub mod result;
pub mod swipe;

pub use config::AppConfig;
pub use error::TicklistError;
pub use result::TicklistResult;
pub use swipe::{SwipeAction, SwipeConfig, SwipeEvent, SwipeMachine, SwipePhase};
