pub mod completion;
pub mod config;
pub mod task;

pub use completion::*;
pub use config::*;
pub use task::*;
