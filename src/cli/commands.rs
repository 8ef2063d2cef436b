use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "shiplist", about = concat!("shiplist v", env!("CARGO_PKG_VERSION"), " - SaaS launch checklist"), version)]
pub struct Cli {
    /// Progress file to use instead of the default data directory
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
