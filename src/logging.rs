use chrono::Local;
use log::LevelFilter;
use std::io::Write;

/// Installs the process-wide logger.
///
/// Lines look like `[2024-05-01 12:00:00.123] [INFO] message`. `RUST_LOG`
/// overrides the default level; `verbose` lowers it to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
