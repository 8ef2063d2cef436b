pub mod celebration;
pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod telemetry;
pub mod tui;
pub mod util;
