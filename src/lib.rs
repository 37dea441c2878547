pub mod packet;
pub mod parser;
pub mod snafu;

/// Sets up `env_logger` for a puzzle binary. `--verbose` lowers the filter to `Debug`.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(level)
        .init();
}
