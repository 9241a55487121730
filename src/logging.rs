/// Tracing setup.  The terminal is in raw mode while the game runs, so logs
/// go to a file through a non-blocking appender.
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "laser_defender.log";
const DEFAULT_FILTER: &str = "laser_defender=info";

/// Install the global subscriber writing to `dir/laser_defender.log`.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A second init in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
