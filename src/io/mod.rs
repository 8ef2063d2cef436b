pub mod config_io;
pub mod progress;
pub mod storage;
