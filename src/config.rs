use std::time::Duration;

use clap::Parser;
use tracing::Level;

/// Serves the demo route table over HTTP/1.1.
#[derive(Parser, Debug)]
#[command(name = "route-table", version, about, long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:4221")]
    pub addr: String,

    /// Seconds to wait on an idle connection, 0 to wait forever.
    #[arg(long, default_value_t = 10)]
    pub read_timeout_secs: u64,

    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Config {
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
