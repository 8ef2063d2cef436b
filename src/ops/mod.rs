pub mod progress;
pub mod session;
